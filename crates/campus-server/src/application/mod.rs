//! Application Layer (Use Cases)
//!
//! Concrete use cases of each slice. They depend only on the `Repository`
//! port, so any storage (or an in-memory double) can back them.

mod invoices;
mod students;

pub use invoices::*;
pub use students::*;
