//! Fixed-window scalar multiplication over arbitrary-precision naturals.
//!
//! ```
//! use winmul::{Natural, windowed_multiply};
//!
//! let k: Natural = "13".parse().unwrap();
//! let p = Natural::from(5_u64);
//! assert_eq!(windowed_multiply(&k, &p, 4).unwrap(), Natural::from(65_u64));
//! ```
#![allow(non_snake_case)]

pub mod base_conv;
pub mod error;
pub mod limb;
pub mod ll;
pub mod natural;
pub mod point;
pub mod trace;
pub mod window;

pub use error::{Error, ErrorKind};
pub use natural::Natural;
pub use point::Point;
pub use trace::{Event, NoTrace, Recorder, Trace};
pub use window::{
	PrecomputedTable, WindowConfig, WindowMode, WindowedMultiplier, bit_length, extract_bits,
	windowed_multiply,
};

#[macro_export]
macro_rules! testvec {
	($($x:expr),* $(,)?) => {
		::std::vec::Vec::<$crate::limb::Limb>::from([$($crate::limb::Limb($x)),*])
	};
}
