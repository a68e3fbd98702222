//! Turning an [`AssembledProgram`](crate::core::AssembledProgram) into the
//! things `casm` actually writes out: a listing, a symbol dump, and the
//! loadable container formats (§6).

pub mod containers;
pub mod listing;
pub mod symbols;
