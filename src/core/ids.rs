use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a mission (one client engagement for one month).
    MissionId
}

string_id! {
    /// Unique identifier for a client.
    ClientId
}

string_id! {
    /// Unique identifier for a referral partner (apporteur d'affaires).
    ApporteurId
}

string_id! {
    /// Unique identifier for an internal collaborator entitled to a
    /// percentage share of mission proceeds.
    CollaborateurId
}
