use crate::natural::Natural;

/// What the windowed multiplier needs from an operand: an additive group element.
///
/// The multiplier only ever adds and doubles, so any type with an associative addition and
/// an identity can be multiplied by a `Natural` scalar.
pub trait Point: Clone {
	fn identity() -> Self;

	fn add(&self, other: &Self) -> Self;

	/// `self + self`
	fn double(&self) -> Self {
		self.add(self)
	}

	fn is_identity(&self) -> bool;
}

impl Point for Natural {
	fn identity() -> Self {
		Natural::zero()
	}

	fn add(&self, other: &Self) -> Self {
		Natural::add(self, other)
	}

	fn double(&self) -> Self {
		Natural::double(self)
	}

	fn is_identity(&self) -> bool {
		self.is_zero()
	}
}
