use model::entities::note;
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Who may edit or delete a note once they are logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipPolicy {
    /// Any authenticated user may act on any note id.
    #[default]
    Shared,
    /// Only the note's creator may act on it. Other users get `NotFound`.
    Strict,
}

impl OwnershipPolicy {
    /// Name used in configuration and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            OwnershipPolicy::Shared => "shared",
            OwnershipPolicy::Strict => "strict",
        }
    }

    pub fn permits(self, note: &note::Model, actor: UserId) -> bool {
        match self {
            OwnershipPolicy::Shared => true,
            OwnershipPolicy::Strict => note.is_owned_by(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_owned_by(user_id: Option<i32>) -> note::Model {
        note::Model {
            id: 1,
            content: "x".to_string(),
            user_id,
        }
    }

    #[test]
    fn shared_permits_everyone() {
        assert!(OwnershipPolicy::Shared.permits(&note_owned_by(Some(1)), 2));
        assert!(OwnershipPolicy::Shared.permits(&note_owned_by(None), 2));
    }

    #[test]
    fn strict_permits_only_the_owner() {
        assert!(OwnershipPolicy::Strict.permits(&note_owned_by(Some(1)), 1));
        assert!(!OwnershipPolicy::Strict.permits(&note_owned_by(Some(1)), 2));
        assert!(!OwnershipPolicy::Strict.permits(&note_owned_by(None), 1));
    }

    #[test]
    fn names_match_configuration_values() {
        assert_eq!(OwnershipPolicy::Shared.as_str(), "shared");
        assert_eq!(OwnershipPolicy::Strict.as_str(), "strict");
    }

    #[test]
    fn default_is_shared() {
        assert_eq!(OwnershipPolicy::default(), OwnershipPolicy::Shared);
    }
}
