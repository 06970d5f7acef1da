//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book record, the store-facing draft and the boundary input.
//! - Keep field invariants in one place for every store backend.
//!
//! # Invariants
//! - Every persisted book is identified by a store-assigned `BookId`.
//! - Deletion is a hard delete; no tombstones or history are kept.

pub mod book;
pub mod input;
