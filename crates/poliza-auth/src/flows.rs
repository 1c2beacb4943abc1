use poliza_backend::BackendClient;
use poliza_backend::auth::{LoginRequest, RegisterRequest};
use poliza_core::models::user::AuthTokens;
use tracing::info;

use crate::error::AuthError;
use crate::jwt;

/// Exchange credentials for a token pair.
///
/// The access token must at least be a readable JWT; the backend's error
/// detail is passed through on rejection.
pub async fn sign_in(
    client: &BackendClient,
    email: &str,
    password: &str,
) -> Result<AuthTokens, AuthError> {
    info!(email, "signing in");
    let tokens = client
        .login(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
        .await?;

    jwt::peek_claims(&tokens.access_token)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(tokens)
}

/// Create an account, then sign in with the same credentials.
///
/// The register endpoint returns only the user record, so tokens come from
/// a follow-up login.
pub async fn sign_up(
    client: &BackendClient,
    request: RegisterRequest,
) -> Result<AuthTokens, AuthError> {
    info!(email = %request.email, "registering account");
    let user = client.register(&request).await?;
    info!(user_id = %user.user_id, "account created, signing in");
    sign_in(client, &request.email, &request.password).await
}
