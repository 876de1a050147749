//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod invoice_status;
mod page;
mod student_status;

pub use invoice_status::*;
pub use page::*;
pub use student_status::*;
