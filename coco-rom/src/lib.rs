//! Byte-level layouts for the two container formats a CoCo program can be
//! packaged into: sequential cassette (`.CAS`) images and sectored disk
//! (`.DSK`) images.

pub mod cassette;
pub mod disk;
pub mod err;

pub use err::{Error, Result};
