//! Shared primitives for all Rust crates in Examboard.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthProvider, CandidateBinding, Principal};

/// Result type used across Examboard crates.
pub type AppResult<T> = Result<T, AppError>;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                value.trim().parse::<i64>().map(Self).map_err(|error| {
                    AppError::Validation(format!("invalid {} '{value}': {error}", $label))
                })
            }
        }
    };
}

integer_id!(
    /// Identifier of a user account.
    UserId,
    "user id"
);
integer_id!(
    /// Identifier of an organization, the top-level tenant.
    OrganizationId,
    "organization id"
);
integer_id!(
    /// Identifier of a procedure (one hiring round) owned by an organization.
    ProcedureId,
    "procedure id"
);
integer_id!(
    /// Identifier of a contender applying within a procedure.
    ContenderId,
    "contender id"
);

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, OrganizationId, ProcedureId};

    #[test]
    fn ids_parse_from_route_segments() {
        let parsed = " 42 ".parse::<ProcedureId>();
        assert!(matches!(parsed, Ok(id) if id.get() == 42));
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        let parsed = "abc".parse::<OrganizationId>();
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&OrganizationId::new(7)).unwrap_or_default();
        assert_eq!(json, "7");
    }
}
