//! Session state machine: `Anonymous -> Authenticated -> Anonymous`.
//!
//! The service never decides where the session lives. Callers load a
//! [`SessionState`] from wherever they keep it (the HTTP layer uses a signed
//! cookie), let [`AuthService`] transition it, and persist the result.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, instrument, warn};

use crate::credentials::CredentialStore;
use crate::error::{Result, ServiceError};
use crate::UserId;

/// The single session slot held by one client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
    },
}

impl SessionState {
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

pub struct AuthService<'c, C> {
    credentials: CredentialStore<'c, C>,
}

impl<'c, C: ConnectionTrait> AuthService<'c, C> {
    pub fn new(credentials: CredentialStore<'c, C>) -> Self {
        Self { credentials }
    }

    /// Create an account. The caller stays logged out.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId> {
        self.credentials.register(username, password).await
    }

    /// Bind `session` to `username` if the password checks out.
    ///
    /// On failure the session is left untouched and the error is always
    /// [`ServiceError::InvalidCredentials`], whatever the actual cause.
    #[instrument(skip(self, session, password))]
    pub async fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> Result<UserId> {
        match self.credentials.verify(username, password).await? {
            Some(user_id) => {
                info!("User '{}' logged in", username);
                *session = SessionState::Authenticated {
                    username: username.to_string(),
                };
                Ok(user_id)
            }
            None => {
                warn!("Failed login attempt");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    pub fn logout(&self, session: &mut SessionState) {
        if let Some(username) = session.username() {
            info!("User '{}' logged out", username);
        }
        *session = SessionState::Anonymous;
    }

    /// The id of the user bound to `session`.
    ///
    /// A bound username that no longer exists resolves to `None`, the same as
    /// an anonymous session.
    #[instrument(skip(self))]
    pub async fn resolve(&self, session: &SessionState) -> Result<Option<UserId>> {
        let Some(username) = session.username() else {
            return Ok(None);
        };
        let user_id = self.credentials.find_id(username).await?;
        if user_id.is_none() {
            debug!("Session bound to unknown username '{}'", username);
        }
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::setup_db;

    #[tokio::test]
    async fn register_does_not_log_in() {
        let db = setup_db().await;
        let auth = AuthService::new(CredentialStore::new(&db));
        let session = SessionState::default();

        auth.register("alice", "pw1").await.unwrap();

        assert_eq!(session, SessionState::Anonymous);
        assert_eq!(auth.resolve(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn login_logout_cycle() {
        let db = setup_db().await;
        let auth = AuthService::new(CredentialStore::new(&db));
        let mut session = SessionState::Anonymous;

        let id = auth.register("alice", "pw1").await.unwrap();
        assert_eq!(auth.login(&mut session, "alice", "pw1").await.unwrap(), id);
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(auth.resolve(&session).await.unwrap(), Some(id));

        auth.logout(&mut session);
        assert!(!session.is_authenticated());
        assert_eq!(auth.resolve(&session).await.unwrap(), None);

        // Logging out twice is harmless
        auth.logout(&mut session);
        assert_eq!(session, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn failures_are_indistinguishable() {
        let db = setup_db().await;
        let auth = AuthService::new(CredentialStore::new(&db));
        auth.register("alice", "pw1").await.unwrap();

        let mut session = SessionState::Anonymous;
        let wrong_password = auth.login(&mut session, "alice", "wrong").await.unwrap_err();
        let unknown_user = auth.login(&mut session, "mallory", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_user, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(session, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let db = setup_db().await;
        let auth = AuthService::new(CredentialStore::new(&db));
        auth.register("alice", "pw1").await.unwrap();

        let mut session = SessionState::Anonymous;
        auth.login(&mut session, "alice", "pw1").await.unwrap();
        assert!(auth.login(&mut session, "alice", "nope").await.is_err());

        assert_eq!(session.username(), Some("alice"));
    }

    #[tokio::test]
    async fn stale_username_resolves_to_nobody() {
        let db = setup_db().await;
        let auth = AuthService::new(CredentialStore::new(&db));

        let session = SessionState::Authenticated {
            username: "ghost".to_string(),
        };
        assert_eq!(auth.resolve(&session).await.unwrap(), None);
    }
}
