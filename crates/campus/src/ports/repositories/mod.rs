//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod invoice_ledger;
mod repository;
mod student_roster;

pub use invoice_ledger::*;
pub use repository::*;
pub use student_roster::*;
