//! Application Kernel
//!
//! Building blocks shared by every use case: the `Outcome` wrapper and the
//! `UseCase` executor.

mod outcome;
mod use_case;

pub use outcome::*;
pub use use_case::*;
