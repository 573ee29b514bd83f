use smallvec::SmallVec;

use crate::error::{Error, assert};
use crate::limb::Limb;
use crate::natural::Natural;

mod generated {
	include!(concat!(env!("OUT_DIR"), "/base_conv_gen.rs"));
}

use generated::{BASE_CONV, DIGIT_MAPPING};

const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Copy, Clone, Debug)]
pub struct BaseConv {
	pub base: u8,
	pub digits_per_limb: usize,
	/// base ** digits_per_limb, the largest power of `base` that fits into a limb
	pub big_base: Limb,
}

impl BaseConv {
	/// min_base() ..= max_base() are valid base values.
	pub const fn min_base() -> u32 {
		2
	}

	/// min_base() ..= max_base() are valid base values.
	pub const fn max_base() -> u32 {
		BASE_CONV.len() as u32 + 1
	}

	/// Returns the conversion constants for the given base.
	pub fn get(base: u32) -> Result<&'static BaseConv, Error> {
		let value = BASE_CONV
			.get(base.wrapping_sub(2) as usize)
			.ok_or_else(|| Error::new_invalid_base("base must be in the range 2 ..= 36"))?;
		debug_assert!(value.base as u32 == base);
		Ok(value)
	}

	/// Maps characters to digit values. `_` separators are skipped.
	fn str_to_digits(&self, bytes: &[u8]) -> Result<SmallVec<[u8; 64]>, Error> {
		let mut digits = SmallVec::with_capacity(bytes.len());
		for c in bytes {
			let digit = DIGIT_MAPPING[*c as usize];
			if digit < 0 {
				continue;
			}
			assert((digit as u8) < self.base, || Error::new_parse_error("invalid digit"))?;
			digits.push(digit as u8);
		}

		assert(!digits.is_empty(), || Error::new_parse_error("no digits found"))?;
		Ok(digits)
	}

	fn parse_segment(&self, segment: &[u8]) -> Limb {
		let base = self.base as u64;
		Limb(segment.iter().fold(0, |val, digit| val * base + *digit as u64))
	}

	/// Parses unsigned digits without any sign or prefix.
	pub fn parse(&self, text: &str) -> Result<Natural, Error> {
		let digits = self.str_to_digits(text.as_bytes())?;

		// The top segment takes the remainder, all other segments are full.
		let top_len = match digits.len() % self.digits_per_limb {
			0 => self.digits_per_limb,
			len => len,
		};
		let (top, rest) = digits.split_at(top_len);

		let mut value = Natural::zero();
		value.mul_limb_add(Limb::ZERO, self.parse_segment(top));
		for segment in rest.chunks(self.digits_per_limb) {
			value.mul_limb_add(self.big_base, self.parse_segment(segment));
		}
		Ok(value)
	}

	pub fn format(&self, value: &Natural, upper: bool) -> String {
		let alphabet = if upper { UPPER_DIGITS } else { LOWER_DIGITS };
		let base = self.base as u64;

		// Digits are produced least significant first.
		let mut digits = Vec::new();
		let mut value = value.clone();
		loop {
			let mut segment = value.div_limb(self.big_base).0;
			let last = value.is_zero();
			let mut n = 0;
			while n < self.digits_per_limb && (segment != 0 || !last) {
				digits.push(alphabet[(segment % base) as usize]);
				segment /= base;
				n += 1;
			}
			if last {
				break;
			}
		}
		if digits.is_empty() {
			digits.push(b'0');
		}

		digits.iter().rev().map(|d| *d as char).collect()
	}
}

/// Splits an optional `0x`, `0o` or `0b` prefix off `text`.
fn split_prefix(text: &str) -> (u32, &str) {
	let bytes = text.as_bytes();
	if bytes.len() > 2 && bytes[0] == b'0' {
		match bytes[1] {
			b'x' | b'X' => return (16, &text[2..]),
			b'o' | b'O' => return (8, &text[2..]),
			b'b' | b'B' => return (2, &text[2..]),
			_ => {},
		}
	}
	(10, text)
}

/// Strips an optional sign. Only `+` is accepted, a value below zero is not a `Natural`.
fn strip_sign(text: &str) -> Result<&str, Error> {
	assert(!text.starts_with('-'), || {
		Error::new_invalid_argument("negative values are not supported")
	})?;
	Ok(text.strip_prefix('+').unwrap_or(text))
}

impl Natural {
	pub fn from_str_radix(text: &str, radix: u32) -> Result<Natural, Error> {
		let conv = BaseConv::get(radix)?;
		conv.parse(strip_sign(text)?)
	}

	pub fn to_str_radix(&self, radix: u32) -> Result<String, Error> {
		Ok(BaseConv::get(radix)?.format(self, false))
	}
}

/// Parses decimal text, or hex/octal/binary text with a `0x`/`0o`/`0b` prefix.
impl std::str::FromStr for Natural {
	type Err = Error;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let (radix, digits) = split_prefix(strip_sign(text)?);
		BaseConv::get(radix)?.parse(digits)
	}
}

macro_rules! impl_fmt {
	($trait:ident, $radix:expr, $prefix:expr, $upper:expr) => {
		impl std::fmt::$trait for Natural {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				let conv = BaseConv::get($radix).map_err(|_| std::fmt::Error)?;
				f.pad_integral(true, $prefix, &conv.format(self, $upper))
			}
		}
	};
}

impl_fmt!(Display, 10, "", false);
impl_fmt!(Binary, 2, "0b", false);
impl_fmt!(Octal, 8, "0o", false);
impl_fmt!(LowerHex, 16, "0x", false);
impl_fmt!(UpperHex, 16, "0x", true);
