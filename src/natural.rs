use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::error::{Error, assert};
use crate::limb::{Limb, Value};
use crate::ll;

/// Two inline limbs cover every scalar up to 128 bits without touching the heap.
pub type LimbVec = SmallVec<[Limb; 2]>;

/// Arbitrary-precision non-negative integer.
///
/// Limbs are stored little-endian. The highest limb, if any, is non-zero, so zero is
/// represented by an empty vector and two equal numbers always have equal limbs.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Natural {
	limbs: LimbVec,
}

impl Natural {
	pub fn zero() -> Self {
		Self { limbs: LimbVec::new() }
	}

	pub fn one() -> Self {
		Self::from(1_u64)
	}

	/// Creates a number from little-endian limbs. High zero limbs are dropped.
	pub fn from_limbs(limbs: &[Limb]) -> Self {
		let len = ll::trim(limbs);
		Self { limbs: LimbVec::from_slice(&limbs[..len]) }
	}

	pub(crate) fn from_limb_vec(mut limbs: LimbVec, len: usize) -> Self {
		limbs.truncate(len);
		debug_assert!(limbs.last().is_none_or(|hi| hi.is_not_zero()));
		Self { limbs }
	}

	pub fn as_limbs(&self) -> &[Limb] {
		&self.limbs
	}

	pub fn is_zero(&self) -> bool {
		self.limbs.is_empty()
	}

	/// Returns number of bits needed to store the value. Zero needs 0 bits.
	pub fn bit_width(&self) -> usize {
		ll::bit_width(&self.limbs)
	}

	/// Like `bit_width()`, but zero has no meaningful bit length and is rejected.
	pub fn bit_length(&self) -> Result<usize, Error> {
		assert(!self.is_zero(), || {
			Error::new_invalid_argument("bit length is undefined for zero")
		})?;
		Ok(self.bit_width())
	}

	pub fn get_bit(&self, index: usize) -> bool {
		ll::get_bit(&self.limbs, index)
	}

	/// Reads `width` bits starting at bit `lsb`. Bits above `bit_width()` read as zero.
	pub fn extract_bits(&self, lsb: usize, width: usize) -> Result<Value, Error> {
		assert(width >= 1, || Error::new_invalid_argument("bit slice width must be non-zero"))?;
		assert(width <= Limb::BITS, || {
			Error::new_invalid_argument("bit slice width must fit into one limb")
		})?;
		Ok(ll::get_bits(&self.limbs, lsb, width).0)
	}

	/// Returns the index of the lowest set bit, or `None` for zero.
	pub fn trailing_zeros(&self) -> Option<usize> {
		ll::trailing_zeros(&self.limbs)
	}

	pub fn try_add(&self, b: &Natural) -> Result<Natural, Error> {
		let mut r = LimbVec::from_elem(Limb::ZERO, self.limbs.len().max(b.limbs.len()) + 1);
		let len = ll::add(&mut r, &self.limbs, &b.limbs)?;
		Ok(Self::from_limb_vec(r, len))
	}

	pub fn try_mul(&self, b: &Natural) -> Result<Natural, Error> {
		let mut r = LimbVec::from_elem(Limb::ZERO, self.limbs.len() + b.limbs.len());
		let len = ll::mul(&mut r, &self.limbs, &b.limbs)?;
		Ok(Self::from_limb_vec(r, len))
	}

	pub fn try_shl(&self, shift: usize) -> Result<Natural, Error> {
		if self.is_zero() {
			return Ok(Self::zero());
		}
		let mut r = LimbVec::from_elem(Limb::ZERO, self.limbs.len() + shift / Limb::BITS + 1);
		let len = ll::shl(&mut r, &self.limbs, shift)?;
		Ok(Self::from_limb_vec(r, len))
	}

	/// The buffer is always sized for the result, so this cannot fail.
	pub fn add(&self, b: &Natural) -> Natural {
		self.try_add(b).unwrap()
	}

	/// Plain schoolbook product.
	pub fn mul(&self, b: &Natural) -> Natural {
		self.try_mul(b).unwrap()
	}

	pub fn shl(&self, shift: usize) -> Natural {
		self.try_shl(shift).unwrap()
	}

	/// `self + self`, computed as a one-bit shift.
	pub fn double(&self) -> Natural {
		self.shl(1)
	}

	/// `self * b + c` in place.
	pub(crate) fn mul_limb_add(&mut self, b: Limb, c: Limb) {
		let high = ll::mul_1_in_place(&mut self.limbs, b, c);
		if high.is_not_zero() {
			self.limbs.push(high);
		}
		let len = ll::trim(&self.limbs);
		self.limbs.truncate(len);
	}

	/// Divides `self` in place by `divisor` and returns the remainder.
	pub(crate) fn div_limb(&mut self, divisor: Limb) -> Limb {
		let rem = ll::div_1_in_place(&mut self.limbs, divisor);
		let len = ll::trim(&self.limbs);
		self.limbs.truncate(len);
		rem
	}
}

impl Ord for Natural {
	fn cmp(&self, other: &Self) -> Ordering {
		// No high zero limbs, so the longer number is the bigger one.
		self.limbs
			.len()
			.cmp(&other.limbs.len())
			.then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
	}
}

impl PartialOrd for Natural {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl From<u64> for Natural {
	fn from(value: u64) -> Self {
		Self::from_limbs(&[Limb(value)])
	}
}

impl From<u32> for Natural {
	fn from(value: u32) -> Self {
		Self::from(value as u64)
	}
}

impl From<u128> for Natural {
	fn from(value: u128) -> Self {
		Self::from_limbs(&[Limb::from_low_half(value), Limb::from_high_half(value)])
	}
}

impl TryFrom<&Natural> for u128 {
	type Error = Error;

	fn try_from(value: &Natural) -> Result<Self, Self::Error> {
		match value.as_limbs() {
			[] => Ok(0),
			[lo] => Ok(lo.0 as u128),
			[lo, hi] => Ok(Limb::make_double(*lo, *hi)),
			_ => Err(Error::new_invalid_argument("value does not fit into u128")),
		}
	}
}

impl std::ops::Add<&Natural> for &Natural {
	type Output = Natural;

	fn add(self, rhs: &Natural) -> Natural {
		Natural::add(self, rhs)
	}
}

impl std::ops::Mul<&Natural> for &Natural {
	type Output = Natural;

	fn mul(self, rhs: &Natural) -> Natural {
		Natural::mul(self, rhs)
	}
}

impl std::ops::Shl<usize> for &Natural {
	type Output = Natural;

	fn shl(self, rhs: usize) -> Natural {
		Natural::shl(self, rhs)
	}
}

impl std::fmt::Debug for Natural {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Natural({:#x})", self)
	}
}
