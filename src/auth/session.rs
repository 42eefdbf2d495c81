//! Explicit session context.
//!
//! Holds what a successful login returns (token, user, roles, modules).
//! Components that need authentication state take a `&SessionStore`
//! instead of reading ambient storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated back-office user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    /// Fields the API sends that the client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A back-office module the user may open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub name: String,
    #[serde(default)]
    pub route: Option<String>,
}

impl ModuleAccess {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
        }
    }
}

/// One authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    /// Flattened role tags.
    pub roles: Vec<String>,
    pub modules: Vec<ModuleAccess>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user: User,
        roles: Vec<String>,
        modules: Vec<ModuleAccess>,
    ) -> Self {
        Self {
            token: token.into(),
            user,
            roles,
            modules,
            created_at: Utc::now(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the user may open `module` (case-insensitive name match).
    pub fn can_access(&self, module: &str) -> bool {
        self.modules
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(module))
    }
}

/// Owner of the current session, with an explicit create/clear lifecycle.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any previous one.
    pub fn create(&mut self, session: Session) -> &Session {
        self.current.insert(session)
    }

    /// End the current session, returning it.
    pub fn clear(&mut self) -> Option<Session> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
