//! Authenticated user and auth endpoint payloads

use super::token::AuthToken;
use serde::{Deserialize, Serialize};

/// The signed-in user as kept in the persisted auth state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl User {
    /// Placeholder used when the profile lookup after login fails.
    pub fn fallback(email: &str) -> Self {
        Self {
            id: "current_user".to_string(),
            full_name: email_local_part(email).to_string(),
            email: email.to_string(),
            onboarding_completed: false,
        }
    }

    pub fn from_profile(profile: ProfileResponse, email: &str) -> Self {
        let full_name = profile
            .full_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email_local_part(email).to_string());
        Self {
            id: profile.id,
            full_name,
            email: profile.email.unwrap_or_else(|| email.to_string()),
            onboarding_completed: profile.onboarding_completed.unwrap_or(false),
        }
    }

    pub fn from_registration(registered: RegisterResponse) -> Self {
        Self {
            id: registered.id,
            full_name: registered.full_name,
            email: registered.email,
            onboarding_completed: false,
        }
    }
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// `POST /auth/register` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// `GET /startup/me` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub onboarding_completed: Option<bool>,
}

/// `POST /auth/register` request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: AuthToken,
}
