//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate the JSON blob layout from service orchestration.
//!
//! # Invariants
//! - Repository writes must call `Note::validate()` before persistence.
//! - Read failures are masked only on the list path (`load_all`).

pub mod note_store;
