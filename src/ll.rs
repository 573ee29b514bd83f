//! Low-level operations on little-endian limb slices.
//!
//! Unless stated otherwise, inputs may contain zero high limbs, and functions that write into
//! `r` return the trimmed length of the result.

use crate::error::{Error, assert};
use crate::limb::{Limb, Value};

/// Returns the length of `a` without high zero limbs.
#[inline]
pub fn trim(a: &[Limb]) -> usize {
	let mut len = a.len();
	while len > 0 && a[len - 1].is_zero() {
		len -= 1;
	}
	len
}

/// Returns the number of bits needed to store the number.
/// Zero (including an empty slice) needs 0 bits.
pub fn bit_width(a: &[Limb]) -> usize {
	let len = trim(a);
	if len == 0 {
		0 //
	} else {
		(len - 1) * Limb::BITS + a[len - 1].bit_width()
	}
}

/// Returns the index of the lowest set bit, or `None` if the number is zero.
pub fn trailing_zeros(a: &[Limb]) -> Option<usize> {
	a.iter()
		.position(|limb| limb.is_not_zero())
		.map(|i| i * Limb::BITS + a[i].trailing_zeros())
}

#[inline]
pub fn get_bit(a: &[Limb], index: usize) -> bool {
	match a.get(index / Limb::BITS) {
		Some(limb) => (limb.0 >> (index % Limb::BITS)) & 1 != 0,
		None => false,
	}
}

/// Reads `width` bits starting at bit `lsb`. Bits above the end of `a` read as zero.
///
/// Preconditions:
/// - `1 <= width <= Limb::BITS`
pub fn get_bits(a: &[Limb], lsb: usize, width: usize) -> Limb {
	debug_assert!(width >= 1 && width <= Limb::BITS);

	let i = lsb / Limb::BITS;
	let shift = lsb % Limb::BITS;
	let lo = a.get(i).copied().unwrap_or(Limb::ZERO);
	let hi = a.get(i + 1).copied().unwrap_or(Limb::ZERO);

	// The window may straddle two limbs.
	let t = Limb::make_double(lo, hi) >> shift;
	let mask = if width == Limb::BITS { Value::MAX } else { (1 << width) - 1 };
	Limb(t as Value & mask)
}

/// `r.len` must be at least `max(a.len, b.len) + 1`
pub fn add(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<usize, Error> {
	// Ensure that `a` is the longer of the two numbers
	let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };

	assert(r.len() > a.len(), || Error::new_buffer_too_small("ll::add()"))?;

	let mut carry = false;
	for i in 0..b.len() {
		(r[i], carry) = Limb::addc(a[i], b[i], carry);
	}
	for i in b.len()..a.len() {
		(r[i], carry) = Limb::addc(a[i], Limb::ZERO, carry);
	}
	r[a.len()] = Limb::from_bool(carry);

	Ok(trim(&r[..=a.len()]))
}

/// Shifts `a` left by `shift` bits.
///
/// `r.len` must be at least `a.len + shift / Limb::BITS + 1`
pub fn shl(r: &mut [Limb], a: &[Limb], shift: usize) -> Result<usize, Error> {
	let limbs = shift / Limb::BITS;
	let bits = shift % Limb::BITS;
	let len = a.len() + limbs + 1;

	assert(r.len() >= len, || Error::new_buffer_too_small("ll::shl()"))?;

	r[..limbs].fill(Limb::ZERO);
	let mut prev = Limb::ZERO;
	for i in 0..a.len() {
		let t = Limb::make_double(prev, a[i]) << bits;
		r[limbs + i] = Limb::from_high_half(t);
		prev = a[i];
	}
	r[limbs + a.len()] = Limb::from_high_half(Limb::make_double(prev, Limb::ZERO) << bits);

	Ok(trim(&r[..len]))
}

/// Calculates `a = a * b + c` in place and returns the limb that did not fit.
pub fn mul_1_in_place(a: &mut [Limb], b: Limb, c: Limb) -> Limb {
	let mut high = c;
	for limb in a.iter_mut() {
		[*limb, high] = Limb::mul(*limb, b, high, Limb::ZERO);
	}
	high
}

/// Calculates `r = r + a * b` over the first `a.len()` limbs of `r`
/// and returns the limb that did not fit.
///
/// Preconditions:
/// - `r.len() >= a.len()`
pub fn addmul_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
	debug_assert!(r.len() >= a.len());
	let mut high = Limb::ZERO;
	for (r, a) in r.iter_mut().zip(a) {
		[*r, high] = Limb::mul(*a, b, high, *r);
	}
	high
}

/// Schoolbook multiplication.
///
/// `r.len` must be at least `a.len + b.len`
pub fn mul(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<usize, Error> {
	let a = &a[..trim(a)];
	let b = &b[..trim(b)];
	if a.is_empty() || b.is_empty() {
		return Ok(0);
	}

	let len = a.len() + b.len();
	assert(r.len() >= len, || Error::new_buffer_too_small("ll::mul()"))?;

	r[..len].fill(Limb::ZERO);

	for (j, b) in b.iter().enumerate() {
		let high = addmul_1(&mut r[j..], a, *b);
		r[j + a.len()] = high;
	}

	Ok(trim(&r[..len]))
}

/// Divides `a` in place by `divisor` and returns the remainder.
///
/// Preconditions:
/// - `divisor != 0`
pub fn div_1_in_place(a: &mut [Limb], divisor: Limb) -> Limb {
	debug_assert!(divisor.is_not_zero());
	let mut rem = Limb::ZERO;
	for limb in a.iter_mut().rev() {
		(*limb, rem) = Limb::div_2by1(*limb, rem, divisor);
	}
	rem
}
