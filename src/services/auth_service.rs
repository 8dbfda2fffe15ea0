use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::error::{Error, Result};
use crate::models::user::{User, ROLE_STUDENT};
use crate::store::UserStore;
use crate::utils::token::generate_session_token;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const SESSION_TOKEN_LENGTH: usize = 32;

/// Demo-grade accounts and sessions: passwords are compared as stored and
/// tokens are opaque random strings held in memory. There is deliberately
/// no credential hashing or token signing here.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<(User, String)> {
        let user = User {
            id: Uuid::new_v4(),
            username: payload.username,
            email: payload.email,
            password: payload.password,
            role: ROLE_STUDENT.to_string(),
            created_at: Utc::now(),
        };
        let user = self.users.insert_user(user).await?;
        tracing::info!(user = %user.username, "User registered");
        let token = self.issue_token(user.id).await;
        Ok((user, token))
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<(User, String)> {
        let user = self
            .users
            .find_by_email(&payload.email)
            .await?
            .filter(|u| u.password == payload.password)
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;
        tracing::info!(user = %user.username, "User logged in");
        let token = self.issue_token(user.id).await;
        Ok((user, token))
    }

    /// Revokes a token. Unknown tokens are ignored so logout is idempotent.
    pub async fn logout(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    /// Resolves a bearer token to its user, if the token is live and the
    /// account still exists.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<User>> {
        let user_id = match self.tokens.read().await.get(token) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.users.get_user(user_id).await
    }

    pub async fn count_users(&self) -> Result<usize> {
        self.users.count_users().await
    }

    async fn issue_token(&self, user_id: Uuid) -> String {
        let token = generate_session_token(SESSION_TOKEN_LENGTH);
        self.tokens.write().await.insert(token.clone(), user_id);
        token
    }
}
