//! Credential and note storage plus the session state machine.
//!
//! Store types borrow any SeaORM [`ConnectionTrait`](sea_orm::ConnectionTrait)
//! implementor. Passing a `DatabaseConnection` commits every operation on its
//! own; passing a `DatabaseTransaction` groups several operations under the
//! caller's commit.

pub mod access;
pub mod auth;
pub mod credentials;
pub mod error;
pub mod notes;
pub mod password;

#[cfg(test)]
pub(crate) mod testing;

pub use access::OwnershipPolicy;
pub use auth::{AuthService, SessionState};
pub use credentials::CredentialStore;
pub use error::{Result, ServiceError};
pub use notes::NoteStore;

/// Primary key of a row in `users`.
pub type UserId = i32;

/// Primary key of a row in `notes`.
pub type NoteId = i32;
