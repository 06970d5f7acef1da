//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-addressed store contract the catalog service consumes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Store writes must enforce `BookDraft::validate()` before persistence.
//! - Missing records are reported as absent values, never as errors.

pub mod book_repo;
pub mod memory_repo;
