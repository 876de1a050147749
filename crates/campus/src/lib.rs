//! Campus Domain Library
//!
//! Core domain types and interfaces for the Campus platform API.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Student, Invoice)
//!   - `value_objects/`: Immutable value types (Page, StudentStatus, InvoiceStatus)
//!   - `errors/`: Application error taxonomy
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Generic data access interface, student roster, invoice ledger
//!
//! - **Application** (`application/`): Use-case executor and `Outcome` wrapper
//!
//! # Usage
//!
//! ```rust,ignore
//! use campus::{AppError, Outcome, Repository, Student, UseCase};
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{Outcome, UseCase};
pub use domain::{
    AppError, BoxError, ErrorKind, Invoice, InvoiceStatus, Page, Student, StudentStatus,
};
pub use ports::{InvoiceLedger, Repository, StudentRoster};
