/// Account signup, login, and user status
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::db::{NewUser, UserStore};
use crate::error::{AppError, FieldViolation, Result};
use crate::models::{Identity, User};
use crate::security::{jwt, password};

const DEFAULT_STATUS: &str = "I am new!";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    auth: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, auth: AuthConfig) -> Self {
        Self { users, auth }
    }

    /// Register a new account
    ///
    /// A duplicate email is reported as a field violation before any write.
    pub async fn signup(&self, email: &str, name: &str, plain_password: &str) -> Result<User> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::Validation(vec![FieldViolation::new(
                "email",
                "user already exists",
            )]));
        }

        let password_hash = password::hash_password(plain_password)?;
        let user = self
            .users
            .insert(NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                status: DEFAULT_STATUS.to_string(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify credentials and issue a bearer token
    ///
    /// Unknown email and wrong password are both `Unauthenticated`.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<LoginResponse> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("user not found".to_string()))?;

        password::verify_password(plain_password, &user.password_hash)?;

        let token = jwt::issue_token(&user, &self.auth.jwt_secret, self.auth.token_expiry_hours)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginResponse {
            token,
            user_id: user.id,
        })
    }

    pub async fn get_status(&self, identity: &Identity) -> Result<String> {
        let user = self
            .users
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        Ok(user.status)
    }

    pub async fn set_status(&self, identity: &Identity, status: &str) -> Result<()> {
        if status.trim().is_empty() {
            return Err(AppError::Validation(vec![FieldViolation::new(
                "status",
                "status must not be empty",
            )]));
        }
        self.users.update_status(identity.user_id, status).await
    }
}
