#[macro_use]
extern crate tracing;

pub mod logging;

pub mod cli;
mod err;
