//! Fixed-window scalar multiplication.
//!
//! The scalar is cut into `width`-bit windows, most significant first. For every window the
//! accumulator is doubled `width` times and then the precomputed multiple selected by the
//! window value is added:
//!
//! ```text
//!     k = 0b1_0111, width = 4     windows: 0001 0111
//!     Q = 0
//!     Q = 16 * Q + table[1]       (= 1 * P)
//!     Q = 16 * Q + table[7]       (= 23 * P)
//! ```

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::error::{Error, assert};
use crate::natural::Natural;
use crate::point::Point;
use crate::trace::{Event, NoTrace, Trace};

pub const DEFAULT_WIDTH: usize = 4;
pub const MAX_WIDTH: usize = 8;

const MAX_ENTRIES: usize = 1 << MAX_WIDTH;

/// How many windows are taken from a scalar whose bit length is not a multiple of the width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowMode {
	/// `ceil(bits / width)` windows. The leading window is zero-padded, so the result is
	/// always `k * P`.
	#[default]
	Full,

	/// `floor(bits / width)` windows. A leading partial window is dropped and only the low
	/// `width * floor(bits / width)` bits of the scalar are used. Kept for bit-exact
	/// compatibility with older outputs.
	Truncating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
	pub width: usize,
	pub mode: WindowMode,
}

impl Default for WindowConfig {
	fn default() -> Self {
		Self { width: DEFAULT_WIDTH, mode: WindowMode::Full }
	}
}

impl WindowConfig {
	pub fn new(width: usize) -> Result<Self, Error> {
		let config = Self { width, ..Self::default() };
		config.validate()?;
		Ok(config)
	}

	pub fn with_mode(self, mode: WindowMode) -> Self {
		Self { mode, ..self }
	}

	pub fn validate(&self) -> Result<(), Error> {
		assert(self.width >= 1, || Error::new_invalid_argument("window width must be non-zero"))?;
		assert(self.width <= MAX_WIDTH, || {
			Error::new_invalid_argument("window width must be at most 8 bits")
		})
	}

	pub fn window_count(&self, bits: usize) -> usize {
		match self.mode {
			WindowMode::Full => bits.div_ceil(self.width),
			WindowMode::Truncating => bits / self.width,
		}
	}
}

/// `table[i] == i * P` for every window value `i` in `0 .. 2**width`.
#[derive(Clone, Debug)]
pub struct PrecomputedTable<P: Point> {
	entries: ArrayVec<P, MAX_ENTRIES>,
}

impl<P: Point> PrecomputedTable<P> {
	pub fn new(p: &P, width: usize) -> Result<Self, Error> {
		WindowConfig::new(width)?;

		let mut entries = ArrayVec::new();
		let mut multiple = P::identity();
		for _ in 0..(1_usize << width) {
			let next = multiple.add(p);
			entries.push(multiple);
			multiple = next;
		}
		Ok(Self { entries })
	}

	pub fn get(&self, index: usize) -> Option<&P> {
		self.entries.get(index)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn as_slice(&self) -> &[P] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, P> {
		self.entries.iter()
	}
}

impl<'a, P: Point> IntoIterator for &'a PrecomputedTable<P> {
	type Item = &'a P;
	type IntoIter = std::slice::Iter<'a, P>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<P: Point> std::ops::Index<usize> for PrecomputedTable<P> {
	type Output = P;

	fn index(&self, index: usize) -> &P {
		&self.entries[index]
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowedMultiplier {
	config: WindowConfig,
}

impl WindowedMultiplier {
	pub fn new(config: WindowConfig) -> Result<Self, Error> {
		config.validate()?;
		Ok(Self { config })
	}

	pub fn config(&self) -> &WindowConfig {
		&self.config
	}

	pub fn multiply<P: Point>(&self, k: &Natural, p: &P) -> Result<P, Error> {
		self.multiply_traced(k, p, &mut NoTrace)
	}

	pub fn multiply_traced<P: Point, T: Trace + ?Sized>(
		&self, k: &Natural, p: &P, tracer: &mut T,
	) -> Result<P, Error> {
		let WindowConfig { width, mode } = self.config;

		// Zero has no bit length, but its product is well defined.
		if k.is_zero() {
			debug!("scalar is zero, result is the identity");
			tracer.event(Event::Start { scalar_bits: 0, window_count: 0, width, mode });
			tracer.event(Event::Done);
			return Ok(P::identity());
		}

		let bits = bit_length(k)?;
		let table = PrecomputedTable::new(p, width)?;
		let window_count = self.config.window_count(bits);

		debug!(
			"multiplying {} bit scalar using {} windows of {} bits ({:?})",
			bits, window_count, width, mode
		);
		if window_count * width < bits {
			debug!("dropping the top {} bits of the scalar", bits - window_count * width);
		}
		tracer.event(Event::Start { scalar_bits: bits, window_count, width, mode });
		tracer.event(Event::Precomputed { entries: table.len() });

		let mut q = P::identity();
		for i in 0..window_count {
			for _ in 0..width {
				q = q.double();
			}

			let lsb_offset = (window_count - i - 1) * width;
			let value = extract_bits(k, lsb_offset, width)?;
			trace!("window {}: bits {}..{} = {:#x}", i, lsb_offset, lsb_offset + width, value);
			tracer.event(Event::Window { index: i, lsb_offset, value });

			if value > 0 {
				q = q.add(&table[value as usize]);
			}
		}

		tracer.event(Event::Done);
		Ok(q)
	}
}

/// Number of bits needed to represent `number`. Fails for zero.
pub fn bit_length(number: &Natural) -> Result<usize, Error> {
	number.bit_length()
}

/// The value of `width` bits of `number` starting at bit `lsb_offset`, where bit 0 is the
/// least significant.
///
/// Bits above the top of `number` read as zero, so a slice reaching past the end yields the
/// same value as the shorter slice that fits, and a slice starting past the end yields 0.
pub fn extract_bits(number: &Natural, lsb_offset: usize, width: usize) -> Result<u64, Error> {
	number.extract_bits(lsb_offset, width)
}

/// Computes `k * p` with `window_width`-bit windows, processing every bit of `k`.
pub fn windowed_multiply<P: Point>(k: &Natural, p: &P, window_width: usize) -> Result<P, Error> {
	WindowedMultiplier::new(WindowConfig::new(window_width)?)?.multiply(k, p)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use crate::trace::Recorder;

	fn n(value: u64) -> Natural {
		Natural::from(value)
	}

	#[test]
	fn test_config() {
		let config = WindowConfig::default();
		assert_eq!(config.width, 4);
		assert_eq!(config.mode, WindowMode::Full);

		assert_eq!(config.window_count(5), 2);
		assert_eq!(config.window_count(8), 2);
		assert_eq!(config.with_mode(WindowMode::Truncating).window_count(5), 1);
		assert_eq!(config.with_mode(WindowMode::Truncating).window_count(3), 0);

		assert_eq!(WindowConfig::new(0).err().unwrap().kind, ErrorKind::InvalidArgument);
		assert_eq!(WindowConfig::new(9).err().unwrap().kind, ErrorKind::InvalidArgument);
		assert!(WindowConfig::new(8).is_ok());

		let bad = WindowConfig { width: 0, mode: WindowMode::Full };
		assert_eq!(WindowedMultiplier::new(bad).err().unwrap().kind, ErrorKind::InvalidArgument);
	}

	#[test]
	fn test_precomputed_table() {
		let p = n(23530);
		for width in 1..=MAX_WIDTH {
			let table = PrecomputedTable::new(&p, width).unwrap();
			assert_eq!(table.len(), 1 << width);
			for (i, entry) in table.iter().enumerate() {
				assert_eq!(*entry, &n(i as u64) * &p);
			}
			assert_eq!(table.iter().count(), table.as_slice().len());
		}

		let table = PrecomputedTable::new(&p, 2).unwrap();
		let mut multiples = Vec::new();
		for entry in &table {
			multiples.push(entry.clone());
		}
		assert_eq!(multiples, vec![n(0), n(23530), n(2 * 23530), n(3 * 23530)]);

		let table = PrecomputedTable::new(&p, 4).unwrap();
		assert_eq!(table.get(15), Some(&n(15 * 23530)));
		assert_eq!(table.get(16), None);
		assert!(PrecomputedTable::new(&p, 0).is_err());
	}

	#[test]
	fn test_helpers() {
		assert_eq!(bit_length(&n(1)), Ok(1));
		assert_eq!(bit_length(&n(255)), Ok(8));
		assert_eq!(bit_length(&n(256)), Ok(9));
		assert_eq!(bit_length(&n(0)).err().unwrap().kind, ErrorKind::InvalidArgument);

		assert_eq!(extract_bits(&n(0b10110), 1, 3), Ok(3));
		// reaching past the top bit
		assert_eq!(extract_bits(&n(0b10110), 3, 4), Ok(0b10));
		// starting past the top bit
		assert_eq!(extract_bits(&n(0b10110), 5, 4), Ok(0));
		assert_eq!(extract_bits(&n(0b10110), 0, 0).err().unwrap().kind, ErrorKind::InvalidArgument);
	}

	#[test]
	fn test_windowed_multiply() {
		assert_eq!(windowed_multiply(&n(13), &n(5), 4), Ok(n(65)));
		assert_eq!(windowed_multiply(&n(23), &n(5), 4), Ok(n(115)));
		assert_eq!(windowed_multiply(&n(1), &n(5), 4), Ok(n(5)));
		assert_eq!(windowed_multiply(&n(0), &n(5), 4), Ok(n(0)));
		assert_eq!(windowed_multiply(&n(7), &n(0), 4), Ok(n(0)));

		for width in 1..=MAX_WIDTH {
			for k in 0..300_u64 {
				let q = windowed_multiply(&n(k), &n(977), width);
				assert_eq!(q, Ok(n(k * 977)), "k={k} width={width}");
			}
		}

		let err = windowed_multiply(&n(13), &n(5), 0).err().unwrap();
		assert_eq!(err.kind, ErrorKind::InvalidArgument);
	}

	#[test]
	fn test_truncating() {
		let truncating = WindowConfig::default().with_mode(WindowMode::Truncating);
		let multiplier = WindowedMultiplier::new(truncating).unwrap();

		// 23 = 0b1_0111 has 5 bits, only the low window 0111 is used
		assert_eq!(multiplier.multiply(&n(23), &n(5)), Ok(n(35)));
		assert_ne!(multiplier.multiply(&n(23), &n(5)), Ok(n(115)));

		// whole windows are not affected
		assert_eq!(multiplier.multiply(&n(0xAB), &n(5)), Ok(n(0xAB * 5)));

		// fewer bits than one window
		assert_eq!(multiplier.multiply(&n(5), &n(5)), Ok(n(0)));
		assert_eq!(multiplier.multiply(&n(0), &n(5)), Ok(n(0)));

		// a 25-bit scalar loses its top bit
		assert_eq!(multiplier.multiply(&n(23029340), &n(23530)), Ok(n(147112477720)));
		assert_eq!(
			WindowedMultiplier::default().multiply(&n(23029340), &n(23530)),
			Ok(n(541880370200))
		);
	}

	#[test]
	fn test_deterministic() {
		let multiplier = WindowedMultiplier::default();
		let k = Natural::from(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210_u128);
		let p = n(0xffff_ffff);
		let first = multiplier.multiply(&k, &p).unwrap();
		for _ in 0..4 {
			assert_eq!(multiplier.multiply(&k, &p).unwrap(), first);
		}
		assert_eq!(first, &k * &p);
	}

	#[test]
	fn test_trace() {
		let mut recorder = Recorder::new();
		let multiplier = WindowedMultiplier::default();
		let q = multiplier.multiply_traced(&n(0b1_0111), &n(5), &mut recorder).unwrap();
		assert_eq!(q, n(115));

		assert_eq!(recorder.events(), &[
			Event::Start { scalar_bits: 5, window_count: 2, width: 4, mode: WindowMode::Full },
			Event::Precomputed { entries: 16 },
			Event::Window { index: 0, lsb_offset: 4, value: 1 },
			Event::Window { index: 1, lsb_offset: 0, value: 7 },
			Event::Done,
		]);
		assert_eq!(recorder.used_entries().iter().collect::<Vec<_>>(), vec![1, 7]);

		recorder.clear();
		multiplier.multiply_traced(&n(0), &n(5), &mut recorder).unwrap();
		assert_eq!(recorder.window_values(), Vec::<u64>::new());
		assert_eq!(recorder.events().last(), Some(&Event::Done));
	}

	#[derive(Clone, Debug, PartialEq)]
	struct Counting {
		value: u64,
		adds: usize,
		doubles: usize,
	}

	impl Point for Counting {
		fn identity() -> Self {
			Self { value: 0, adds: 0, doubles: 0 }
		}

		fn add(&self, other: &Self) -> Self {
			Self {
				value: self.value + other.value,
				adds: self.adds + other.adds + 1,
				doubles: self.doubles + other.doubles,
			}
		}

		fn double(&self) -> Self {
			Self { value: 2 * self.value, adds: self.adds, doubles: self.doubles + 1 }
		}

		fn is_identity(&self) -> bool {
			self.value == 0
		}
	}

	#[test]
	fn test_operation_counts() {
		let p = Counting { value: 3, adds: 0, doubles: 0 };
		let k = n(0x1203);

		// 13 bits -> 4 windows of 4 bits: 16 doublings, one addition per non-zero window
		let q = windowed_multiply(&k, &p, 4).unwrap();
		assert_eq!(q.value, 0x1203 * 3);
		assert_eq!(q.doubles, 16);

		// Table additions are counted too: entry `w` carries `w` additions.
		let table_adds = 1 + 2 + 3;
		assert_eq!(q.adds, table_adds + 3);
	}
}
