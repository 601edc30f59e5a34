//! Whole-state persistence gateway.
//!
//! # Responsibility
//! - Define the pluggable snapshot boundary the engine loads from at start
//!   and saves to at shutdown.
//! - Keep the on-disk format opaque; only load-or-empty and save-on-close
//!   semantics are contractual.
//!
//! # Invariants
//! - A missing snapshot source loads as empty state, never as an error.
//! - Sessions are never part of a snapshot.

use crate::model::account::Account;
use crate::model::community::Community;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json_file;

pub use json_file::JsonFileSnapshot;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Serialized image of the full engine state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: HashMap<String, Account>,
    pub communities: HashMap<String, Community>,
}

/// Gateway failures while loading or saving a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot io failure: {err}"),
            Self::Encode(err) => write!(f, "snapshot encoding failure: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Pluggable whole-state load/save boundary.
pub trait SnapshotStore {
    /// Loads the persisted state, or an empty snapshot when none exists.
    fn load(&self) -> SnapshotResult<Snapshot>;

    /// Persists the full state, replacing any previous snapshot.
    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()>;
}
