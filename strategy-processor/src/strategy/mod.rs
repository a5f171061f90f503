//! Strategy module
//!
//! Schema validation, majority-vote evaluation, and the pipeline joining them.

pub mod evaluator;
pub mod processor;
pub mod validator;

pub use evaluator::*;
pub use processor::*;
pub use validator::*;
