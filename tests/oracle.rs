use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use winmul::limb::Limb;
use winmul::{Natural, WindowConfig, WindowMode, WindowedMultiplier, windowed_multiply};

fn random_natural(rng: &mut StdRng, max_limbs: usize) -> Natural {
	let len = rng.gen_range(0..=max_limbs);
	let limbs: Vec<Limb> = (0..len).map(|_| Limb(rng.next_u64())).collect();
	Natural::from_limbs(&limbs)
}

fn to_biguint(n: &Natural) -> BigUint {
	n.as_limbs().iter().rev().fold(BigUint::from(0_u32), |acc, limb| (acc << 64_u32) + limb.0)
}

#[test]
fn windowed_product_matches_biguint() {
	let mut rng = StdRng::seed_from_u64(0x5eed);
	for _ in 0..200 {
		let k = random_natural(&mut rng, 5);
		let p = random_natural(&mut rng, 5);
		let width = rng.gen_range(1..=8);

		let q = windowed_multiply(&k, &p, width).unwrap();
		assert_eq!(to_biguint(&q), to_biguint(&k) * to_biguint(&p), "k={k} p={p} width={width}");
	}
}

#[test]
fn plain_product_and_formatting_match_biguint() {
	let mut rng = StdRng::seed_from_u64(42);
	for _ in 0..100 {
		let a = random_natural(&mut rng, 4);
		let b = random_natural(&mut rng, 4);
		let product = &a * &b;

		let expected = to_biguint(&a) * to_biguint(&b);
		assert_eq!(product.to_string(), expected.to_string());
		assert_eq!(format!("{:x}", product), expected.to_str_radix(16));
		assert_eq!(format!("{:b}", product), expected.to_str_radix(2));
		assert_eq!(expected.to_string().parse::<Natural>().unwrap(), product);
	}
}

#[test]
fn truncating_mode_uses_only_whole_windows() {
	let mut rng = StdRng::seed_from_u64(7);
	for _ in 0..100 {
		let k = random_natural(&mut rng, 3);
		let p = random_natural(&mut rng, 2);
		let width = rng.gen_range(1..=8);

		let config = WindowConfig::new(width).unwrap().with_mode(WindowMode::Truncating);
		let q = WindowedMultiplier::new(config).unwrap().multiply(&k, &p).unwrap();

		// Only the low `width * floor(bits / width)` bits of the scalar contribute.
		let kept_bits = (k.bit_width() / width) * width;
		let mask = (BigUint::from(1_u32) << kept_bits) - 1_u32;
		let expected = (to_biguint(&k) & mask) * to_biguint(&p);
		assert_eq!(to_biguint(&q), expected);
	}
}

#[test]
fn cryptographic_scale_scalar() {
	let k: Natural =
		"40505654708211189456746820883201845994248137211058198699828051064905928553035".parse().unwrap();
	let p: Natural =
		"55066263022277343669578718895168534326250603453777594175500187360389116729240".parse().unwrap();

	let q = windowed_multiply(&k, &p, 4).unwrap();
	assert_eq!(q, &k * &p);
	assert_eq!(to_biguint(&q), to_biguint(&k) * to_biguint(&p));
}
