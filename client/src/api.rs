//! The REST API boundary.
//!
//! [`BurgerApi`] is the transport interface consumed by effects; reducers
//! never see HTTP. The production implementation, [`HttpApi`], talks to
//! the Stellar REST API and transparently re-mints the access credential
//! from the refresh artifact when the server reports it expired, replaying
//! the request once.
//!
//! # Dyn Compatibility
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn BurgerApi>`). This is
//! required for the effect system where reducers create effects that
//! capture the API client.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::session::CredentialStorage;
use crate::types::{Ingredient, IngredientId, Order, OrdersData, User};

/// Future returned by every [`BurgerApi`] method.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Errors produced at the transport boundary.
///
/// None of these are fatal: reducers record the message on the affected
/// resource and the rest of the state core keeps working.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or malformed response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the credentials (expired or missing)
    #[error("{}", .message.as_deref().unwrap_or("access credential expired"))]
    Unauthorized {
        /// Server-provided message, when the body carried one
        message: Option<String>,
    },

    /// Any other non-success response
    #[error("{}", .message.as_deref().unwrap_or("server rejected the request"))]
    Server {
        /// Server-provided message, when the body carried one
        message: Option<String>,
    },

    /// An authenticated call was attempted with no refresh artifact stored
    #[error("no refresh credential available")]
    MissingRefreshToken,
}

impl ApiError {
    /// The human-readable message carried by this failure, if any.
    ///
    /// Returns `None` exactly when the server failed without a message,
    /// letting callers substitute a resource-specific fallback string.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Unauthorized { message } | Self::Server { message } => message.clone(),
            other => Some(other.to_string()),
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Contact identifier
    pub email: String,
    /// Plaintext password, sent over TLS only
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoginRequest {
    /// Contact identifier
    pub email: String,
    /// Plaintext password, sent over TLS only
    pub password: String,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct UserUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Identity plus the freshly minted credential pair, returned by
/// registration and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    /// The authenticated identity
    pub user: User,
    /// Short-lived access credential (sent with each authenticated request)
    pub access_token: String,
    /// Longer-lived refresh artifact
    pub refresh_token: String,
}

/// The transport interface consumed by effects.
pub trait BurgerApi: Send + Sync {
    /// `GET /ingredients`
    fn get_ingredients(&self) -> ApiFuture<'_, Vec<Ingredient>>;

    /// `POST /auth/register`
    fn register(&self, request: RegisterRequest) -> ApiFuture<'_, AuthPayload>;

    /// `POST /auth/login`
    fn login(&self, request: LoginRequest) -> ApiFuture<'_, AuthPayload>;

    /// `GET /auth/user` (authenticated)
    fn get_user(&self) -> ApiFuture<'_, User>;

    /// `PATCH /auth/user` (authenticated)
    fn update_user(&self, update: UserUpdate) -> ApiFuture<'_, User>;

    /// `POST /auth/logout`
    fn logout(&self) -> ApiFuture<'_, ()>;

    /// `POST /orders` (authenticated) with the ordered component id list
    fn create_order(&self, ingredient_ids: Vec<IngredientId>) -> ApiFuture<'_, Order>;

    /// `GET /orders` (authenticated) - the caller's order history
    fn get_my_orders(&self) -> ApiFuture<'_, Vec<Order>>;

    /// `GET /orders/all` - the public feed
    fn get_feed(&self) -> ApiFuture<'_, OrdersData>;

    /// `GET /orders/{number}` - lookup by order number; the first element
    /// of the returned list is the match
    fn get_order_by_number(&self, number: u32) -> ApiFuture<'_, Vec<Order>>;
}

// ── Wire DTOs ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct IngredientsResponse {
    success: bool,
    data: Vec<Ingredient>,
}

#[derive(Deserialize)]
struct AuthResponse {
    success: bool,
    user: User,
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Deserialize)]
struct UserResponse {
    success: bool,
    user: User,
}

#[derive(Deserialize)]
struct NewOrderResponse {
    success: bool,
    order: Order,
}

#[derive(Deserialize)]
struct OrdersResponse {
    success: bool,
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct FeedResponse {
    success: bool,
    orders: Vec<Order>,
    total: u64,
    #[serde(rename = "totalToday")]
    total_today: u64,
}

#[derive(Deserialize)]
struct RefreshResponse {
    success: bool,
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Deserialize)]
struct AckResponse {
    success: bool,
}

fn ensure_success(success: bool) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Server { message: None })
    }
}

// ── Production implementation ──────────────────────────────────────────

/// reqwest-backed [`BurgerApi`] implementation.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStorage>,
}

impl HttpApi {
    /// Build a client against `config`, persisting minted credentials to
    /// `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStorage>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            Err(ApiError::Unauthorized { message })
        } else {
            Err(ApiError::Server { message })
        }
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .http
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::parse(response).await
    }

    /// Mint a new credential pair from the refresh artifact and persist it.
    async fn refresh_session(&self) -> Result<String, ApiError> {
        let refresh = self
            .credentials
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;

        tracing::debug!("access credential expired, refreshing session");
        let body = serde_json::json!({ "token": refresh });
        let payload: RefreshResponse = self
            .request_json(Method::POST, "/auth/token", Some(&body), None)
            .await?;
        ensure_success(payload.success)?;

        self.credentials
            .store(&payload.access_token, &payload.refresh_token);
        Ok(payload.access_token)
    }

    /// Issue an authenticated request, refreshing the session and
    /// replaying once if the access credential has expired.
    async fn authorized_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let token = self.credentials.access_token();
        let first = self
            .request_json(method.clone(), path, body, token.as_deref())
            .await;

        match first {
            Err(ApiError::Unauthorized { .. }) => {
                let access = self.refresh_session().await?;
                self.request_json(method, path, body, Some(access.as_str()))
                    .await
            },
            other => other,
        }
    }
}

impl BurgerApi for HttpApi {
    fn get_ingredients(&self) -> ApiFuture<'_, Vec<Ingredient>> {
        Box::pin(async move {
            let response: IngredientsResponse = self
                .request_json(Method::GET, "/ingredients", None, None)
                .await?;
            ensure_success(response.success)?;
            Ok(response.data)
        })
    }

    fn register(&self, request: RegisterRequest) -> ApiFuture<'_, AuthPayload> {
        Box::pin(async move {
            let body = serde_json::to_value(&request).map_err(|_| ApiError::Server {
                message: None,
            })?;
            let response: AuthResponse = self
                .request_json(Method::POST, "/auth/register", Some(&body), None)
                .await?;
            ensure_success(response.success)?;
            Ok(AuthPayload {
                user: response.user,
                access_token: response.access_token,
                refresh_token: response.refresh_token,
            })
        })
    }

    fn login(&self, request: LoginRequest) -> ApiFuture<'_, AuthPayload> {
        Box::pin(async move {
            let body = serde_json::to_value(&request).map_err(|_| ApiError::Server {
                message: None,
            })?;
            let response: AuthResponse = self
                .request_json(Method::POST, "/auth/login", Some(&body), None)
                .await?;
            ensure_success(response.success)?;
            Ok(AuthPayload {
                user: response.user,
                access_token: response.access_token,
                refresh_token: response.refresh_token,
            })
        })
    }

    fn get_user(&self) -> ApiFuture<'_, User> {
        Box::pin(async move {
            let response: UserResponse = self
                .authorized_json(Method::GET, "/auth/user", None)
                .await?;
            ensure_success(response.success)?;
            Ok(response.user)
        })
    }

    fn update_user(&self, update: UserUpdate) -> ApiFuture<'_, User> {
        Box::pin(async move {
            let body = serde_json::to_value(&update).map_err(|_| ApiError::Server {
                message: None,
            })?;
            let response: UserResponse = self
                .authorized_json(Method::PATCH, "/auth/user", Some(&body))
                .await?;
            ensure_success(response.success)?;
            Ok(response.user)
        })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let token = self.credentials.refresh_token().unwrap_or_default();
            let body = serde_json::json!({ "token": token });
            let response: AckResponse = self
                .request_json(Method::POST, "/auth/logout", Some(&body), None)
                .await?;
            ensure_success(response.success)
        })
    }

    fn create_order(&self, ingredient_ids: Vec<IngredientId>) -> ApiFuture<'_, Order> {
        Box::pin(async move {
            let body = serde_json::json!({ "ingredients": ingredient_ids });
            let response: NewOrderResponse = self
                .authorized_json(Method::POST, "/orders", Some(&body))
                .await?;
            ensure_success(response.success)?;
            Ok(response.order)
        })
    }

    fn get_my_orders(&self) -> ApiFuture<'_, Vec<Order>> {
        Box::pin(async move {
            let response: OrdersResponse = self
                .authorized_json(Method::GET, "/orders", None)
                .await?;
            ensure_success(response.success)?;
            Ok(response.orders)
        })
    }

    fn get_feed(&self) -> ApiFuture<'_, OrdersData> {
        Box::pin(async move {
            let response: FeedResponse = self
                .request_json(Method::GET, "/orders/all", None, None)
                .await?;
            ensure_success(response.success)?;
            Ok(OrdersData {
                orders: response.orders,
                total: response.total,
                total_today: response.total_today,
            })
        })
    }

    fn get_order_by_number(&self, number: u32) -> ApiFuture<'_, Vec<Order>> {
        Box::pin(async move {
            let response: OrdersResponse = self
                .request_json(Method::GET, &format!("/orders/{number}"), None, None)
                .await?;
            ensure_success(response.success)?;
            Ok(response.orders)
        })
    }
}
