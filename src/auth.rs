//! Authentication session
//!
//! Tracks the signed-in shopper on top of [`ApiClient`]: tokens minted at
//! login (persisted only when the shopper asks to be remembered), the cached
//! current user, and token refresh. Failures are kept as a plain message for
//! the form that triggered them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, InvalidationPattern};
use crate::client::{ApiClient, AUTH_CACHE_PREFIX};
use crate::error::{Result, StorefrontError};
use crate::models::{
    AuthResponse, AuthTokens, LoginRequest, ProfileUpdate, RegisterRequest,
    UpdatePasswordRequest, User,
};
use crate::persist::LocalStorage;

/// Storage key for persisted tokens.
pub const TOKENS_KEY: &str = "auth_tokens";

/// Cache key for the signed-in user.
pub const CURRENT_USER_KEY: &str = "auth:current_user";

/// Seconds the current user stays cached.
pub const CURRENT_USER_TTL: u64 = 300;

/// Cache key for the signed-in user's profile.
pub const USER_PROFILE_KEY: &str = "auth:user_profile";

/// Seconds the profile stays cached.
pub const USER_PROFILE_TTL: u64 = 600;

/// Seconds an email availability answer stays cached.
pub const EMAIL_CHECK_TTL: u64 = 60;

/// Tokens closer than this to expiry are refreshed by `validate_session`.
pub const REFRESH_WINDOW_MS: u64 = 5 * 60 * 1000;

/// Lifetime of tokens minted locally when the backend sends none.
pub const TOKEN_LIFETIME_MS: u64 = 24 * 60 * 60 * 1000;

/// Login form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl AuthTokens {
    /// True while the access token has not reached its expiry.
    pub fn is_valid(&self) -> bool {
        self.expires_at > current_timestamp_ms()
    }
}

/// Signed-in state for one shopper.
#[derive(Debug)]
pub struct AuthSession {
    client: ApiClient,
    storage: LocalStorage,
    tokens: Option<AuthTokens>,
    last_error: Option<String>,
}

impl AuthSession {
    /// Creates a session, restoring unexpired tokens from storage.
    ///
    /// Expired or unreadable stored tokens are deleted.
    pub fn new(client: ApiClient, storage: LocalStorage) -> Self {
        let tokens = load_tokens(&storage);
        Self {
            client,
            storage,
            tokens,
            last_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.as_ref().is_some_and(AuthTokens::is_valid)
    }

    /// Current access token, if one exists and has not expired.
    pub fn access_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .filter(|tokens| tokens.is_valid())
            .map(|tokens| tokens.access_token.as_str())
    }

    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    /// Message of the last failed auth operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // == Login / Register ==

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.last_error = None;
        self.client
            .invalidate(&InvalidationPattern::prefix(AUTH_CACHE_PREFIX))
            .await;

        let request = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };
        let result = self.client.login(&request).await;
        let mut response = self.track(result)?;

        let Some(user) = response.user.clone().filter(|_| response.success) else {
            self.last_error = Some(response.message.clone());
            return Ok(response);
        };

        let tokens = response.tokens.clone().unwrap_or_else(mint_tokens);
        if credentials.remember_me {
            self.save_tokens(tokens.clone());
        } else {
            self.tokens = Some(tokens.clone());
        }
        self.cache_user(&user).await?;

        debug!(email = %user.email, remember = credentials.remember_me, "logged in");
        response.tokens = Some(tokens);
        Ok(response)
    }

    /// Registers an account. Does not sign in.
    pub async fn register(&mut self, data: &RegisterRequest) -> Result<AuthResponse> {
        self.last_error = None;
        self.client
            .invalidate(&InvalidationPattern::prefix(AUTH_CACHE_PREFIX))
            .await;

        let result = self.client.register(data).await;
        let response = self.track(result)?;
        if !response.success {
            self.last_error = Some(response.message.clone());
        }
        Ok(response)
    }

    /// Signs out locally even when the backend call fails.
    pub async fn logout(&mut self) {
        if let Err(err) = self.client.logout().await {
            warn!(error = %err, "logout request failed");
        }
        self.clear_tokens();
        self.client.invalidate(&InvalidationPattern::All).await;
    }

    // == Passwords ==

    pub async fn reset_password(&mut self, email: &str) -> Result<AuthResponse> {
        self.last_error = None;
        let result = self.client.reset_password(email).await;
        let response = self.track(result)?;
        if !response.success {
            self.last_error = Some(response.message.clone());
        }
        Ok(response)
    }

    /// Changes the password; a success signs the session out.
    pub async fn update_password(&mut self, user_id: &str, password: &str) -> Result<AuthResponse> {
        self.last_error = None;
        let request = UpdatePasswordRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
        };
        let result = self.client.update_password(&request).await;
        let response = self.track(result)?;
        if response.success {
            self.clear_tokens();
        } else {
            self.last_error = Some(response.message.clone());
        }
        Ok(response)
    }

    // == Current User ==

    /// The signed-in user, from the cache when possible.
    ///
    /// Any failure to confirm the user with the backend signs the session out.
    pub async fn current_user(&mut self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }

        let cached = self.client.cache().write().await.get(CURRENT_USER_KEY);
        if let Some(user) = cached.and_then(|value| serde_json::from_value::<User>(value).ok()) {
            return Some(user);
        }

        let token = self.access_token().map(str::to_string);
        match self.client.current_user(token.as_deref()).await {
            Ok(AuthResponse {
                success: true,
                user: Some(user),
                ..
            }) => {
                if let Err(err) = self.cache_user(&user).await {
                    warn!(error = %err, "could not cache current user");
                }
                Some(user)
            }
            Ok(_) => {
                self.clear_tokens();
                None
            }
            Err(err) => {
                warn!(error = %err, "current user lookup failed");
                self.clear_tokens();
                None
            }
        }
    }

    /// Exchanges the refresh token for new tokens. Returns false, signed out,
    /// if there is no refresh token or the backend refuses it.
    pub async fn refresh_access_token(&mut self) -> bool {
        let Some(refresh_token) = self
            .tokens
            .as_ref()
            .and_then(|tokens| tokens.refresh_token.clone())
        else {
            return false;
        };

        match self.client.refresh_token(&refresh_token).await {
            Ok(AuthResponse {
                success: true,
                tokens: Some(tokens),
                ..
            }) => {
                self.save_tokens(tokens);
                true
            }
            Ok(_) => {
                self.clear_tokens();
                false
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                self.clear_tokens();
                false
            }
        }
    }

    /// Confirms the session is usable, refreshing tokens that expire within
    /// [`REFRESH_WINDOW_MS`].
    pub async fn validate_session(&mut self) -> bool {
        let Some(expires_at) = self
            .tokens
            .as_ref()
            .filter(|tokens| tokens.is_valid())
            .map(|tokens| tokens.expires_at)
        else {
            return false;
        };

        if expires_at.saturating_sub(current_timestamp_ms()) < REFRESH_WINDOW_MS {
            debug!("access token near expiry, refreshing");
            return self.refresh_access_token().await;
        }
        true
    }

    // == Profile ==

    /// The user's profile, cached longer than the current user.
    pub async fn user_profile(&mut self) -> Option<User> {
        let cached = self.client.cache().write().await.get(USER_PROFILE_KEY);
        if let Some(user) = cached.and_then(|value| serde_json::from_value::<User>(value).ok()) {
            return Some(user);
        }

        let user = self.current_user().await?;
        if let Err(err) = self.cache_value(USER_PROFILE_KEY, &user, USER_PROFILE_TTL).await {
            warn!(error = %err, "could not cache user profile");
        }
        Some(user)
    }

    /// Edits the signed-in user's profile and refreshes both cached copies.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<AuthResponse> {
        self.last_error = None;
        let Some(token) = self.access_token().map(str::to_string) else {
            let err = StorefrontError::Unauthorized("Not authenticated".to_string());
            self.last_error = Some(err.to_string());
            return Err(err);
        };

        let result = self.client.update_profile(update, Some(&token)).await;
        let response = self.track(result)?;
        match response.user.as_ref().filter(|_| response.success) {
            Some(user) => {
                self.cache_user(user).await?;
                self.cache_value(USER_PROFILE_KEY, user, USER_PROFILE_TTL)
                    .await?;
            }
            None => self.last_error = Some(response.message.clone()),
        }
        Ok(response)
    }

    /// Whether `email` already has an account. Answers are cached briefly;
    /// a failed lookup reports `false` and is not cached.
    pub async fn check_email_exists(&self, email: &str) -> bool {
        let key = email_check_key(email);
        let cached = self.client.cache().write().await.get(&key);
        if let Some(exists) = cached.and_then(|value| value.as_bool()) {
            return exists;
        }

        match self.client.check_email(email).await {
            Ok(response) => {
                self.client.cache().write().await.set(
                    key,
                    serde_json::Value::Bool(response.exists),
                    EMAIL_CHECK_TTL,
                );
                response.exists
            }
            Err(err) => {
                warn!(error = %err, "email check failed");
                false
            }
        }
    }

    // == Internals ==

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.last_error = Some(err.to_string());
        }
        result
    }

    async fn cache_user(&self, user: &User) -> Result<()> {
        self.cache_value(CURRENT_USER_KEY, user, CURRENT_USER_TTL)
            .await
    }

    async fn cache_value(&self, key: &str, user: &User, ttl_seconds: u64) -> Result<()> {
        let value = serde_json::to_value(user)?;
        self.client.cache().write().await.set(key, value, ttl_seconds);
        Ok(())
    }

    fn save_tokens(&mut self, tokens: AuthTokens) {
        if let Err(err) = self.storage.set_item(TOKENS_KEY, &tokens) {
            warn!(error = %err, "could not persist auth tokens");
        }
        self.tokens = Some(tokens);
    }

    fn clear_tokens(&mut self) {
        if let Err(err) = self.storage.remove_item(TOKENS_KEY) {
            warn!(error = %err, "could not remove persisted auth tokens");
        }
        self.tokens = None;
    }
}

fn load_tokens(storage: &LocalStorage) -> Option<AuthTokens> {
    match storage.get_item::<AuthTokens>(TOKENS_KEY) {
        Ok(Some(tokens)) if tokens.is_valid() => Some(tokens),
        Ok(Some(_)) => {
            debug!("discarding expired stored tokens");
            discard_tokens(storage);
            None
        }
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "error loading tokens from storage");
            discard_tokens(storage);
            None
        }
    }
}

fn discard_tokens(storage: &LocalStorage) {
    if let Err(err) = storage.remove_item(TOKENS_KEY) {
        warn!(error = %err, "could not remove persisted auth tokens");
    }
}

/// Cache key for the availability answer of one address.
pub fn email_check_key(email: &str) -> String {
    format!("{}email_check:{}", AUTH_CACHE_PREFIX, email)
}

fn mint_tokens() -> AuthTokens {
    let now = current_timestamp_ms();
    AuthTokens {
        access_token: format!("token_{}", now),
        refresh_token: Some(format!("refresh_{}", now)),
        expires_at: now + TOKEN_LIFETIME_MS,
    }
}
