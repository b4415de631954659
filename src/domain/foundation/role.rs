//! Marketplace roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role a user holds in the marketplace.
///
/// Carried as `public_metadata.role` by the identity provider. Anything other
/// than `educator` (including an absent claim) means learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Learner,
    Educator,
}

impl UserRole {
    /// Maps an optional provider claim onto a role.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(value) if value.eq_ignore_ascii_case("educator") => UserRole::Educator,
            _ => UserRole::Learner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Learner => "learner",
            UserRole::Educator => "educator",
        }
    }

    pub fn is_educator(&self) -> bool {
        matches!(self, UserRole::Educator)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "learner" => Ok(UserRole::Learner),
            "educator" => Ok(UserRole::Educator),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}
