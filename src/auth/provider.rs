use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config;

use super::password::{hash_password, verify_password};
use super::token::{generate_token, validate_token, Claims};
use super::{AuthError, AuthProvider, AuthSession, Session, SignInEmail, SignUpEmail, User};

#[derive(sqlx::FromRow)]
struct Credentials {
    id: Uuid,
    password_hash: String,
}

/// Email/password accounts and server-side sessions stored in Postgres.
#[derive(Debug, Clone)]
pub struct PgAuthProvider {
    pool: PgPool,
}

impl PgAuthProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, roles, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn open_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let hours = config::config()
            .security
            .session_expiry_hours
            .min(config::MAX_SESSION_EXPIRY_HOURS);
        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3) \
             RETURNING id, user_id, expires_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(Utc::now() + Duration::hours(hours as i64))
        .fetch_one(&self.pool)
        .await?;

        let token = generate_token(&Claims::new(user.id, session.id, session.expires_at))?;
        debug!("Opened session {} for user {}", session.id, user.id);
        Ok(AuthSession { token, user, session })
    }
}

#[async_trait]
impl AuthProvider for PgAuthProvider {
    async fn sign_in_email(&self, body: SignInEmail) -> Result<AuthSession, AuthError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, password_hash FROM users WHERE lower(email) = lower($1)",
        )
        .bind(&body.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&body.password, &credentials.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .find_user(credentials.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        self.open_session(user).await
    }

    async fn sign_up_email(&self, body: SignUpEmail) -> Result<AuthSession, AuthError> {
        let password_hash = hash_password(&body.password)?;
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) \
             ON CONFLICT DO NOTHING \
             RETURNING id, name, email, roles, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&body.name)
        .bind(&body.email)
        .bind(&password_hash)
        .fetch_optional(&self.pool)
        .await?;

        let user = inserted.ok_or(AuthError::UserAlreadyExists)?;
        info!("Registered user {}", user.id);
        self.open_session(user).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let Ok(claims) = validate_token(token) else {
            return Ok(());
        };
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(claims.sid)
            .execute(&self.pool)
            .await?;
        debug!("Closed session {}", claims.sid);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<(User, Session)>, AuthError> {
        let Ok(claims) = validate_token(token) else {
            return Ok(None);
        };

        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, expires_at, created_at FROM sessions \
             WHERE id = $1 AND user_id = $2 AND expires_at > now()",
        )
        .bind(claims.sid)
        .bind(claims.sub)
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };
        Ok(self.find_user(session.user_id).await?.map(|user| (user, session)))
    }
}
