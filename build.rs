type Limb = u64;

const LIMB_MAX: Limb = Limb::MAX;
const MIN_BASE: usize = 2;
const MAX_BASE: usize = 36;

fn base_conv() -> String {
	let mut base_conv = String::new();
	base_conv.push_str("// Generated by build.rs\n\n");
	base_conv.push_str("use crate::base_conv::BaseConv;\n");
	base_conv.push_str("use crate::limb::Limb;\n");
	base_conv.push_str("\n");
	base_conv
		.push_str(&format!("pub const BASE_CONV: [BaseConv; {}] = [\n", MAX_BASE - MIN_BASE + 1));
	for base in MIN_BASE..=MAX_BASE {
		// the largest power of `base` that fits into a limb
		let mut digits_per_limb = 1;
		let mut last_multiple = base as Limb;
		while last_multiple <= LIMB_MAX / base as Limb {
			last_multiple *= base as Limb;
			digits_per_limb += 1;
		}

		base_conv.push_str("\tBaseConv {\n");
		base_conv.push_str(&format!("\t\tbase: {},\n", base));
		base_conv.push_str(&format!("\t\tdigits_per_limb: {},\n", digits_per_limb));
		base_conv.push_str(&format!("\t\tbig_base: Limb({}),\n", last_multiple));
		base_conv.push_str("\t},\n");
	}
	base_conv.push_str("];\n");
	base_conv.push_str("\n");

	// 127 marks an invalid character, -1 a separator that is skipped.
	// Letters are case-insensitive.
	let mut mapping = [127_i8; 256];
	for i in b'0'..=b'9' {
		mapping[i as usize] = (i - b'0') as i8;
	}
	for i in b'A'..=b'Z' {
		mapping[i as usize] = (i - b'A' + 10) as i8;
	}
	for i in b'a'..=b'z' {
		mapping[i as usize] = (i - b'a' + 10) as i8;
	}
	mapping[b'_' as usize] = -1;
	base_conv.push_str("pub const DIGIT_MAPPING: [i8; 256] = [\n");
	for i in 0..16 {
		let mut line = String::new();
		for j in 0..16 {
			line.push_str(&format!("{:4},", mapping[i * 16 + j]));
		}
		base_conv.push_str(&format!("\t{}\n", line));
	}
	base_conv.push_str("];\n");
	base_conv
}

fn main() {
	println!("cargo:rerun-if-changed=build.rs");

	let out_dir = std::env::var_os("OUT_DIR").unwrap();
	let path = std::path::Path::new(&out_dir).join("base_conv_gen.rs");

	// Only touch the file when the content changes, so the crate is not rebuilt needlessly.
	let base_conv = base_conv();
	if std::fs::read_to_string(&path).ok().as_deref() != Some(base_conv.as_str()) {
		std::fs::write(&path, base_conv).unwrap();
	}
}
