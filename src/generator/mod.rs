//! Item generation: assembly, sessions and their results

pub mod assembler;
pub mod engine;
pub mod registry;
pub mod result;

#[cfg(test)]
mod property_tests;

pub use assembler::*;
pub use engine::*;
pub use registry::*;
pub use result::*;
