// formsieve-charset/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod classes;
pub mod markup;
pub mod trim;

pub use classes::{keep_class, CharClass};
pub use markup::strip_markup;
pub use trim::{trim_blank, TRIM_SET};
