//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Student: administrative record of an enrolled learner
//! - Invoice: financial charge raised against a student

mod invoice;
mod student;

pub use invoice::*;
pub use student::*;
