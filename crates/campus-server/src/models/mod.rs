//! Request/Response DTOs
//!
//! Transport shapes only; handlers convert them to and from domain entities.

mod common;
mod invoice;
mod student;

pub use common::*;
pub use invoice::*;
pub use student::*;
