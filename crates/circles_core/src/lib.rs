//! In-memory social-graph engine: accounts, sessions, friendship
//! negotiation, one-directional relations, message queues and communities.
//! This crate is the single source of truth for the engine's invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod snapshot;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::Account;
pub use model::community::Community;
pub use model::message::{Broadcast, Note};
pub use service::account_service::{AccountError, AccountResult, AccountService};
pub use service::community_service::{CommunityError, CommunityResult, CommunityService};
pub use service::engine::{Engine, EngineError, EngineResult};
pub use service::messaging_service::{MessagingError, MessagingResult, MessagingService};
pub use service::relation_service::{RelationError, RelationResult, RelationService};
pub use snapshot::{JsonFileSnapshot, Snapshot, SnapshotError, SnapshotResult, SnapshotStore};
pub use store::{SessionError, SessionRegistry, SessionResult, Store};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
