use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Result, ServiceError};
use crate::password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking};
use crate::UserId;

/// Username/password-hash pairs, keyed by a generated [`UserId`].
///
/// Usernames are matched exactly (case-sensitive). Credentials can be added
/// but never changed or removed.
pub struct CredentialStore<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> CredentialStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Store a new user with an Argon2id hash of `password`.
    ///
    /// Fails with [`ServiceError::AlreadyExists`] when the username is taken,
    /// including when a concurrent registration wins the unique constraint.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId> {
        trace!("Checking whether username is free");
        if self.find_by_username(username).await?.is_some() {
            warn!("Registration rejected, username '{}' already exists", username);
            return Err(ServiceError::AlreadyExists(username.to_string()));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        self.insert(username, password_hash).await
    }

    /// Insert a user row. A unique-constraint hit means another registration
    /// took the username after the existence check.
    async fn insert(&self, username: &str, password_hash: String) -> Result<UserId> {
        let new_user = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        match new_user.insert(self.conn).await {
            Ok(user_model) => {
                info!("User registered with ID: {}, username: {}", user_model.id, user_model.username);
                Ok(user_model.id)
            }
            Err(db_error) => match db_error.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    warn!("Lost registration race for username '{}'", username);
                    Err(ServiceError::AlreadyExists(username.to_string()))
                }
                _ => Err(db_error.into()),
            },
        }
    }

    /// Return the user's id iff the username exists and `password` matches.
    ///
    /// An unknown user and a wrong password both yield `None`.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: &str) -> Result<Option<UserId>> {
        let Some(user_model) = self.find_by_username(username).await? else {
            debug!("No user named '{}'", username);
            // Same Argon2 cost as a real mismatch
            verify_dummy_blocking(password.to_string()).await?;
            return Ok(None);
        };

        if verify_password_blocking(password.to_string(), user_model.password_hash).await? {
            debug!("Password accepted for user ID: {}", user_model.id);
            Ok(Some(user_model.id))
        } else {
            debug!("Password rejected for user ID: {}", user_model.id);
            Ok(None)
        }
    }

    /// Resolve a username to its id without checking any password.
    #[instrument(skip(self))]
    pub async fn find_id(&self, username: &str) -> Result<Option<UserId>> {
        Ok(self.find_by_username(username).await?.map(|u| u.id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn)
            .await?)
    }
}
