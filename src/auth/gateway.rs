//! Session lifecycle on top of an [`AuthApi`].

use tracing::{info, warn};

use super::client::AuthApi;
use super::roles::{DEFAULT_ROUTE, RoleTable};
use super::session::{Session, SessionStore};
use crate::error::{PitbossError, ValidationError};

/// Signs users in and out and decides where they land.
pub struct AuthGateway<A: AuthApi> {
    api: A,
    roles: RoleTable,
    sessions: SessionStore,
}

impl<A: AuthApi> AuthGateway<A> {
    pub fn new(api: A, roles: RoleTable) -> Self {
        Self {
            api,
            roles,
            sessions: SessionStore::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Landing route for the current session (`/dashboard` when signed out).
    pub fn landing_route(&self) -> &str {
        match self.sessions.current() {
            Some(session) => self.roles.default_dashboard(Some(&session.roles[..])),
            None => DEFAULT_ROUTE,
        }
    }

    /// Log in, start a session and return the landing route.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<String, PitbossError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let data = self.api.login(username.trim(), password).await?;
        self.sessions.create(Session::new(
            data.token,
            data.user,
            data.roles,
            data.modules,
        ));

        let route = self.landing_route().to_string();
        info!(user = username.trim(), route = %route, "signed in");
        Ok(route)
    }

    /// Re-check the current session's token.
    ///
    /// Returns the landing route when the token is still good, `None` when
    /// there is no session. A refused token ends the session; a network
    /// failure leaves it in place.
    pub async fn restore(&mut self) -> Result<Option<String>, PitbossError> {
        let Some(token) = self.sessions.token().map(str::to_string) else {
            return Ok(None);
        };

        match self.api.verify(&token).await {
            Ok(user) => {
                if let Some(session) = self.sessions.clear() {
                    self.sessions.create(Session { user, ..session });
                }
                Ok(Some(self.landing_route().to_string()))
            }
            Err(PitbossError::Auth(reason)) => {
                warn!(reason = %reason, "session rejected, signing out");
                self.sessions.clear();
                Err(PitbossError::Auth(reason))
            }
            Err(e) => Err(e),
        }
    }

    /// End the current session.
    pub fn sign_out(&mut self) -> Option<Session> {
        let ended = self.sessions.clear();
        if let Some(session) = &ended {
            info!(user = %session.user.username, "signed out");
        }
        ended
    }

    /// Register a new user.
    pub async fn register(
        &self,
        user_data: &serde_json::Value,
    ) -> Result<serde_json::Value, PitbossError> {
        self.api.register(user_data).await
    }
}
