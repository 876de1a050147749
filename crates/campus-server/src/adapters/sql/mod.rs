//! SQL persistence adapters
//!
//! `Database` owns the pool, `Session` scopes one unit of work and
//! `SqlRepository` implements the `Repository` port for every mapped table.

mod database;
pub mod records;
mod repository;

pub use database::{Database, Session};
pub use records::{InvoiceMapper, InvoiceRepository, StudentMapper, StudentRepository};
pub use repository::{Mapper, SqlRepository};
