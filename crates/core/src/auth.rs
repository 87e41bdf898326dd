use serde::{Deserialize, Serialize};

use crate::{ContenderId, ProcedureId, UserId};

/// Credential path the principal authenticated through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Federated login through the organization's identity provider.
    Federated,
    /// Local credentials issued to candidates and invited procedure members.
    Local,
}

/// Candidate session binding fixed at login time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateBinding {
    /// Contender record the candidate logged in as.
    pub contender_id: ContenderId,
    /// The only procedure this session may address.
    pub procedure_id: ProcedureId,
}

/// Authenticated caller persisted in the session by the identity provider.
///
/// The principal is trusted as-is; credential verification happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
    display_name: String,
    email: Option<String>,
    auth_provider: AuthProvider,
    candidate: Option<CandidateBinding>,
}

impl Principal {
    /// Creates a staff principal from a federated login.
    #[must_use]
    pub fn staff(user_id: UserId, display_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email,
            auth_provider: AuthProvider::Federated,
            candidate: None,
        }
    }

    /// Creates a candidate principal bound to one contender and procedure.
    #[must_use]
    pub fn candidate(
        user_id: UserId,
        display_name: impl Into<String>,
        email: Option<String>,
        binding: CandidateBinding,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email,
            auth_provider: AuthProvider::Local,
            candidate: Some(binding),
        }
    }

    /// Overrides the credential path, e.g. for invited members with local accounts.
    #[must_use]
    pub fn with_auth_provider(mut self, auth_provider: AuthProvider) -> Self {
        self.auth_provider = auth_provider;
        self
    }

    /// Returns the authenticated user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the credential path used for this session.
    #[must_use]
    pub fn auth_provider(&self) -> AuthProvider {
        self.auth_provider
    }

    /// Returns the candidate binding for candidate sessions.
    #[must_use]
    pub fn candidate_binding(&self) -> Option<CandidateBinding> {
        self.candidate
    }
}
