//! Core types shared by the health and status systems

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health value. 64-bit so large stat scaling never overflows.
pub type Health = i64;

/// Stack count of a status. Signed because stack changes are reported as deltas.
pub type StackCount = i32;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an entity (player, monster, etc.)
    EntityId
);

string_id!(
    /// Identifier of an affinity (fire, cold, ...)
    AffinityId
);

string_id!(
    /// Identifier of a status definition (burning, poisoned, ...)
    StatusId
);

string_id!(
    /// Identifier of a resistance statistic
    ResistanceId
);

/// Where a mutating call originates from
///
/// External calls come from game logic and fire reaction hooks.
/// Internal calls are cascades the entity performs on itself; they mutate
/// state and return a result but never dispatch hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    Internal,
    #[default]
    External,
}

impl ActionSource {
    pub fn is_external(self) -> bool {
        self == ActionSource::External
    }
}

bitflags! {
    /// Flags altering the status apply/remove rules.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        /// Skip the status permission hooks
        const IGNORE_CONDITIONS  = 1 << 0;
        /// Skip max stack / not enough stacks rejections
        const IGNORE_STACK_LIMIT = 1 << 1;
    }
}

/// Round half away from zero and saturate into [`Health`]
pub(crate) fn round_health(value: f64) -> Health {
    value.round() as Health
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_conversions() {
        let id = EntityId::from("goblin");
        assert_eq!(id.as_str(), "goblin");
        assert_eq!(id.to_string(), "goblin");
        assert_eq!(StatusId::from("burning".to_string()), StatusId::from("burning"));
    }

    #[test]
    fn test_action_source_default_is_external() {
        assert!(ActionSource::default().is_external());
        assert!(!ActionSource::Internal.is_external());
    }

    #[test]
    fn test_status_flags() {
        let flags = StatusFlags::IGNORE_CONDITIONS | StatusFlags::IGNORE_STACK_LIMIT;
        assert!(flags.contains(StatusFlags::IGNORE_STACK_LIMIT));
        assert!(StatusFlags::default().is_empty());
    }

    #[test]
    fn test_round_health_half_up() {
        assert_eq!(round_health(74.5), 75);
        assert_eq!(round_health(74.49), 74);
        assert_eq!(round_health(0.0), 0);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&AffinityId::from("fire")).unwrap();
        assert_eq!(json, "\"fire\"");
    }
}
