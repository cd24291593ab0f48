//! Authentication use case.
//!
//! Logs in or registers against the API and persists the resulting session
//! under [`AUTH_STORAGE_KEY`], where the [`TokenAccessor`] picks it up for
//! every later request.
//!
//! [`TokenAccessor`]: crate::client::token_accessor::TokenAccessor

use crate::client::executor::ApiClient;
use crate::ports::key_value_store::{KeyValueStore, StorageError};
use std::sync::Arc;
use strata_domain::{
    AUTH_STORAGE_KEY, ApiError, ApiRequest, AuthToken, LoginResponse, PersistedAuth,
    ProfileResponse, RegisterRequest, RegisterResponse, Session, User,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingFields,

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct AuthUseCase {
    client: ApiClient,
    store: Arc<dyn KeyValueStore>,
}

impl AuthUseCase {
    pub fn new(client: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        Self { client, store }
    }

    /// Exchange credentials for a token, look up the profile, and persist
    /// the session.
    ///
    /// A failed profile lookup does not fail the login: the user is then
    /// derived from the email address.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        info!("Logging in as {}", email);
        let token = self.request_token(email, password).await?;
        let user = self.fetch_profile(&token, email).await;

        let session = Session { user, token };
        self.persist(&session)?;
        Ok(session)
    }

    /// Create an account, then log in with the same credentials.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if full_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        info!("Registering {}", email);
        let registered: RegisterResponse = self
            .client
            .post(
                "/auth/register",
                &RegisterRequest {
                    email,
                    password,
                    full_name,
                },
            )
            .await?;
        let token = self.request_token(email, password).await?;

        let session = Session {
            user: User::from_registration(registered),
            token,
        };
        self.persist(&session)?;
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(AUTH_STORAGE_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// The persisted session, if any. Unreadable storage counts as logged out.
    pub fn current_session(&self) -> Option<Session> {
        let raw = match self.store.get(AUTH_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!("Auth storage unreadable: {}", e);
                return None;
            }
        };
        let state = PersistedAuth::parse(&raw)?.state;
        Some(Session {
            user: state.user?,
            token: state.token?,
        })
    }

    async fn request_token(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let response: LoginResponse = self
            .client
            .post_form("/auth/login", &[("username", email), ("password", password)])
            .await?;
        AuthToken::new(response.access_token)
            .ok_or_else(|| ApiError::decode("Login response has an empty access token").into())
    }

    async fn fetch_profile(&self, token: &AuthToken, email: &str) -> User {
        // The new token is not persisted yet, so pass it explicitly.
        let request = ApiRequest::get("/startup/me").with_header("Authorization", token.bearer());
        match self.client.execute::<ProfileResponse>(request).await {
            Ok(profile) => User::from_profile(profile, email),
            Err(e) => {
                warn!("Failed to fetch profile, using fallback user: {}", e);
                User::fallback(email)
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let entry = PersistedAuth::signed_in(session.token.clone(), session.user.clone());
        self.store.set(AUTH_STORAGE_KEY, &entry.to_json())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::key_value_store::MemoryKeyValueStore;
    use crate::use_cases::test_support::{RouteTransport, client_with_store};
    use strata_domain::HttpMethod;

    const LOGIN_OK: &str = r#"{"access_token":"tok-1","token_type":"bearer"}"#;

    fn use_case(transport: RouteTransport) -> (AuthUseCase, Arc<RouteTransport>, Arc<MemoryKeyValueStore>) {
        let transport = Arc::new(transport);
        let store = Arc::new(MemoryKeyValueStore::new());
        let client = client_with_store(&transport, store.clone());
        (AuthUseCase::new(client, store.clone()), transport, store)
    }

    #[tokio::test]
    async fn test_login_persists_session_with_profile() {
        let (auth, transport, store) = use_case(
            RouteTransport::new()
                .route(HttpMethod::Post, "/auth/login", 200, LOGIN_OK)
                .route(
                    HttpMethod::Get,
                    "/startup/me",
                    200,
                    r#"{"id":"u-9","full_name":"Ada Lovelace","email":"ada@x.io","onboarding_completed":true}"#,
                ),
        );

        let session = auth.login("ada@x.io", "secret").await.unwrap();

        assert_eq!(session.token.as_str(), "tok-1");
        assert_eq!(session.user.id, "u-9");
        assert_eq!(session.user.full_name, "Ada Lovelace");
        assert!(session.user.onboarding_completed);

        let login = transport.request_to(HttpMethod::Post, "/auth/login").unwrap();
        assert_eq!(
            login.body.as_deref(),
            Some(b"username=ada%40x.io&password=secret".as_slice())
        );
        let me = transport.request_to(HttpMethod::Get, "/startup/me").unwrap();
        assert_eq!(me.header("Authorization"), Some("Bearer tok-1"));

        let raw = store.get(AUTH_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(AuthToken::from_persisted(&raw).unwrap().as_str(), "tok-1");
        assert_eq!(auth.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_login_falls_back_when_profile_fails() {
        let (auth, _transport, _store) = use_case(
            RouteTransport::new()
                .route(HttpMethod::Post, "/auth/login", 200, LOGIN_OK)
                .route(HttpMethod::Get, "/startup/me", 500, "{}"),
        );

        let session = auth.login("grace@navy.mil", "pw").await.unwrap();

        assert_eq!(session.user.id, "current_user");
        assert_eq!(session.user.full_name, "grace");
        assert_eq!(session.user.email, "grace@navy.mil");
        assert!(!session.user.onboarding_completed);
    }

    #[tokio::test]
    async fn test_login_rejected_credentials_propagate() {
        let (auth, _transport, store) = use_case(RouteTransport::new().route(
            HttpMethod::Post,
            "/auth/login",
            401,
            r#"{"detail":"Incorrect email or password"}"#,
        ));

        let err = auth.login("a@b.c", "wrong").await.unwrap_err();

        match err {
            AuthError::Api(e) => {
                assert_eq!(e.message(), "Incorrect email or password");
                assert!(e.is_unauthorized());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.get(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let (auth, transport, _store) = use_case(RouteTransport::new());

        assert!(matches!(
            auth.login("", "pw").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.login("a@b.c", "").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (auth, transport, _store) = use_case(
            RouteTransport::new()
                .route(
                    HttpMethod::Post,
                    "/auth/register",
                    201,
                    r#"{"id":"u-2","email":"new@co.io","full_name":"New Founder","is_active":true}"#,
                )
                .route(HttpMethod::Post, "/auth/login", 200, LOGIN_OK),
        );

        let session = auth
            .register("New Founder", "new@co.io", "pw")
            .await
            .unwrap();

        assert_eq!(session.user.id, "u-2");
        assert_eq!(session.user.full_name, "New Founder");
        assert!(!session.user.onboarding_completed);
        assert_eq!(
            transport.paths(),
            vec!["POST /auth/register", "POST /auth/login"]
        );
        let register = transport.request_to(HttpMethod::Post, "/auth/register").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&register.body.unwrap()).unwrap();
        assert_eq!(body["full_name"], "New Founder");
        assert_eq!(body["email"], "new@co.io");
        assert_eq!(auth.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let (auth, _transport, _store) = use_case(RouteTransport::new());
        assert!(matches!(
            auth.register(" ", "a@b.c", "pw").await,
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_logout_and_corrupt_storage() {
        let (auth, _transport, store) = use_case(RouteTransport::new());
        store.set(AUTH_STORAGE_KEY, "{broken").unwrap();
        assert_eq!(auth.current_session(), None);

        auth.logout().unwrap();
        assert_eq!(store.get(AUTH_STORAGE_KEY).unwrap(), None);
        assert_eq!(auth.current_session(), None);
    }
}
