//! Private note and community broadcast records.

use serde::{Deserialize, Serialize};

/// One private note queued for a single receiver.
///
/// `sender` holds the author's login so that the removal cascade can
/// identify which queued notes a departing account wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub sender: String,
    pub receiver: String,
    pub body: String,
}

impl Note {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            body: body.into(),
        }
    }
}

/// One community broadcast message.
///
/// Broadcasts carry no addressing; fan-out copies one instance into every
/// member queue at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub body: String,
}

impl Broadcast {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
