//! Domain records for the social-graph engine.
//!
//! # Responsibility
//! - Define the canonical data shapes owned by the store.
//! - Keep relationship state as adjacency lists of stable login keys, never
//!   object references.
//!
//! # Invariants
//! - Every record is identified by a stable string key (`login` for
//!   accounts, `name` for communities).
//! - Records carry no behavior that spans more than one record; cross-record
//!   transitions live in the service layer.

pub mod account;
pub mod community;
pub mod message;
