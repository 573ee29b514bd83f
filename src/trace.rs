//! Observing the intermediate state of a windowed multiplication.
//!
//! The multiplier reports what it does through a [`Trace`]. Nothing is recorded unless the
//! caller passes a collector such as [`Recorder`]; the default [`NoTrace`] discards everything.

use bit_set::BitSet;

use crate::window::WindowMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
	Start {
		scalar_bits: usize,
		window_count: usize,
		width: usize,
		mode: WindowMode,
	},
	/// The table of multiples `0 * P ..= (entries - 1) * P` is ready.
	Precomputed { entries: usize },
	/// Window `index` (0 is the most significant) read `value` from the scalar bits
	/// starting at `lsb_offset`.
	Window { index: usize, lsb_offset: usize, value: u64 },
	Done,
}

pub trait Trace {
	fn event(&mut self, event: Event);
}

impl<T: Trace + ?Sized> Trace for &mut T {
	fn event(&mut self, event: Event) {
		(**self).event(event)
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
	#[inline]
	fn event(&mut self, _event: Event) {}
}

#[derive(Clone, Debug, Default)]
pub struct Recorder {
	events: Vec<Event>,
	used: BitSet,
}

impl Recorder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn events(&self) -> &[Event] {
		&self.events
	}

	/// Window values in processing order, most significant window first.
	pub fn window_values(&self) -> Vec<u64> {
		self.events
			.iter()
			.filter_map(|event| match event {
				Event::Window { value, .. } => Some(*value),
				_ => None,
			})
			.collect()
	}

	/// Indices of the table entries that were added to the accumulator.
	pub fn used_entries(&self) -> &BitSet {
		&self.used
	}

	pub fn clear(&mut self) {
		self.events.clear();
		self.used.clear();
	}
}

impl Trace for Recorder {
	fn event(&mut self, event: Event) {
		if let Event::Window { value, .. } = event {
			if value > 0 {
				self.used.insert(value as usize);
			}
		}
		self.events.push(event);
	}
}
