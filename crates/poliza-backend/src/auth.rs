use poliza_core::models::user::{AuthTokens, User};
use serde::Serialize;
use tracing::info;

use crate::client::{BackendClient, routes};
use crate::error::BackendError;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn credentials_present(email: &str, password: &str) -> Result<(), BackendError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(BackendError::Validation("Email y contraseña son requeridos"));
    }
    Ok(())
}

impl BackendClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthTokens, BackendError> {
        credentials_present(&request.email, &request.password)?;
        let tokens: AuthTokens = self.post_json(routes::LOGIN, request).await?;
        info!(user_id = %tokens.user.user_id, "login succeeded");
        Ok(tokens)
    }

    /// Create an account. The backend answers with the new user record;
    /// it does not issue tokens.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, BackendError> {
        credentials_present(&request.email, &request.password)?;
        let user: User = self.post_json(routes::REGISTER, request).await?;
        info!(user_id = %user.user_id, "registration succeeded");
        Ok(user)
    }
}
