//! Community domain record.

use serde::{Deserialize, Serialize};

/// One named community with a fixed owner and an ordered member list.
///
/// The owner is always the first member. Membership order is join order and
/// drives broadcast fan-out order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub name: String,
    pub description: String,
    /// Login of the creating account; never changes.
    pub owner: String,
    /// Member logins, owner first, then join order.
    pub members: Vec<String>,
}

impl Community {
    /// Creates a community with the owner auto-joined as first member.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            name: name.into(),
            description: description.into(),
            members: vec![owner.clone()],
            owner,
        }
    }

    /// Returns whether `login` is in the member list.
    pub fn has_member(&self, login: &str) -> bool {
        self.members.iter().any(|entry| entry == login)
    }
}

#[cfg(test)]
mod tests {
    use super::Community;

    #[test]
    fn owner_is_seeded_as_first_member() {
        let community = Community::new("rustaceans", "crab talk", "ana");

        assert_eq!(community.owner, "ana");
        assert_eq!(community.members, vec!["ana".to_string()]);
        assert!(community.has_member("ana"));
        assert!(!community.has_member("bob"));
    }
}
