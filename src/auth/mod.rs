//! Email/password authentication.
//!
//! Route handlers only talk to the [`AuthProvider`] trait; `PgAuthProvider`
//! is the Postgres-backed implementation used by the server.

pub mod forms;
pub mod password;
pub mod provider;
pub mod token;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use forms::{LoginForm, RegistrationForm};
pub use provider::PgAuthProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A freshly created session and the bearer token that identifies it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInEmail {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpEmail {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Session token error: {0}")]
    Token(String),

    #[error("Password hashing failed")]
    Hashing,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Contract of the authentication collaborator.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_email(&self, body: SignInEmail) -> Result<AuthSession, AuthError>;

    async fn sign_up_email(&self, body: SignUpEmail) -> Result<AuthSession, AuthError>;

    /// Revoke the session behind `token`. Unknown tokens are not an error.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a live session. `Ok(None)` for unknown, expired or malformed tokens.
    async fn get_session(&self, token: &str) -> Result<Option<(User, Session)>, AuthError>;
}
