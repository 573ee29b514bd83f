pub type Value = u64;
pub type Double = u128;

#[derive(Clone, Copy, Default, PartialEq, Debug, Eq, Hash, Ord, PartialOrd)]
pub struct Limb(pub Value);

impl Limb {
	pub const BITS: usize = Value::BITS as usize;

	pub const ZERO: Limb = Self(0);
	pub const MAX: Limb = Self(Value::MAX);

	#[inline]
	pub const fn make_double(low: Limb, high: Limb) -> Double {
		const _OK: () = assert!(std::mem::size_of::<Double>() >= 2 * std::mem::size_of::<Value>());
		(low.0 as Double) | ((high.0 as Double) << Limb::BITS)
	}

	#[inline]
	pub const fn from_low_half(value: Double) -> Limb {
		Limb(value as Value)
	}

	#[inline]
	pub const fn from_high_half(value: Double) -> Limb {
		Limb((value >> Limb::BITS) as Value)
	}

	#[inline]
	pub const fn from_bool(value: bool) -> Limb {
		Limb(value as Value)
	}

	#[inline]
	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	#[inline]
	pub const fn is_not_zero(self) -> bool {
		self.0 != 0
	}

	/// Returns number of bits needed to store the value.
	/// If the value is zero, it returns 0.
	#[inline]
	pub const fn bit_width(self) -> usize {
		Self::BITS - self.0.leading_zeros() as usize
	}

	#[inline]
	pub const fn trailing_zeros(self) -> usize {
		self.0.trailing_zeros() as usize
	}

	/// Returns:
	///     (value, carry)
	/// Where:
	///     value = (a + b + carry) % 2**BITS
	///     carry = (a + b + carry) > MAX
	#[inline]
	pub const fn addc(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
		let (sum, overflow1) = a.0.overflowing_add(b.0);
		let (sum, overflow2) = sum.overflowing_add(carry as Value);
		(Limb(sum), overflow1 | overflow2)
	}

	/// Returns:
	///     [low, high]
	/// Where:
	///     big_value = a * b + c + d
	///     low = big_value % 2**BITS
	///     high = big_value / 2**BITS
	///
	/// The sum cannot overflow: (2**BITS - 1)**2 + 2 * (2**BITS - 1) == 2**(2 * BITS) - 1
	#[inline]
	pub const fn mul(a: Limb, b: Limb, c: Limb, d: Limb) -> [Limb; 2] {
		let t = (a.0 as Double) * (b.0 as Double) + (c.0 as Double) + (d.0 as Double);
		[Limb::from_low_half(t), Limb::from_high_half(t)]
	}

	/// Divides the two-limb value `[low, high]` by `divisor`.
	///
	/// Returns:
	///     (quotient, remainder)
	/// Preconditions:
	///     high < divisor, so the quotient fits into one limb
	#[inline]
	pub const fn div_2by1(low: Limb, high: Limb, divisor: Limb) -> (Limb, Limb) {
		debug_assert!(high.0 < divisor.0);
		let a = Limb::make_double(low, high);
		let d = divisor.0 as Double;
		(Limb((a / d) as Value), Limb((a % d) as Value))
	}
}
