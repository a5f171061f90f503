//! Message model
//!
//! Raw records, their typed signal view, and the decision overlaid on them.

pub mod decision;
pub mod record;
pub mod slot;

pub use decision::*;
pub use record::*;
pub use slot::*;
