//! Persistence records and their entity mappings

mod invoice;
mod student;

pub use invoice::*;
pub use student::*;
