//! Bearer token verification against the hosted auth provider
use anyhow::{Result, anyhow};
use http::{HeaderMap, header};
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(alias = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// User as reported by the provider's `/auth/v1/user` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn fetch_user(
    client: &Client,
    auth_url: &str,
    service_key: &str,
    token: &str,
) -> Result<AuthUser> {
    let resp = client
        .get(format!("{}/auth/v1/user", auth_url))
        .header("apikey", service_key)
        .bearer_auth(token)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("Auth provider rejected token: {}", status));
    }

    Ok(resp.json::<AuthUser>().await?)
}

/// Resolve `token` to a user. Any failure, including the provider
/// being unreachable, counts as unauthenticated.
pub async fn verify_token(
    client: &Client,
    auth_url: &str,
    service_key: &str,
    token: &str,
) -> Option<AuthUser> {
    match fetch_user(client, auth_url, service_key, token).await {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::warn!("Auth error: {:#}", err);
            None
        }
    }
}
