use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
    #[default]
    Unknown,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        };
        write!(f, "{}", role)
    }
}

impl Role {
    /// Maps the role claim of an access token; unrecognised roles become `Unknown`.
    pub fn from_claim(value: &str) -> Self {
        match value {
            "patient" => Role::Patient,
            "doctor" => Role::Doctor,
            "admin" => Role::Admin,
            _ => Role::Unknown,
        }
    }
}
