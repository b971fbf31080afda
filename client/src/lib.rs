//! Stellar client: the order-composition state core.
//!
//! Everything the burger-builder frontend needs to remember lives here as
//! a tree of reducer-owned slices: the ingredient catalog, the
//! in-progress composition, the signed-in identity, the caller's order
//! history, the public feed, and single-order lookup. Reducers are pure;
//! network and credential side effects run as [`stellar_core::Effect`]s
//! against the [`api::BurgerApi`] transport and feed their results back
//! as actions.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use stellar_client::{AppAction, ApiConfig, AppEnvironment, HttpApi, app_store};
//! use stellar_client::session::FileCredentials;
//!
//! let config = ApiConfig::from_env();
//! let credentials = Arc::new(FileCredentials::new("session.json"));
//! let api = Arc::new(HttpApi::new(&config, credentials.clone())?);
//! let store = app_store(AppEnvironment::new(api, credentials));
//! store.send(AppAction::Bootstrap).await?;
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod constructor;
pub mod environment;
pub mod feed;
pub mod ingredients;
pub mod mock_api;
pub mod order_details;
pub mod orders;
pub mod session;
pub mod submission;
pub mod types;
pub mod user;

pub use api::{ApiError, BurgerApi, HttpApi};
pub use app::{AppAction, AppReducer, AppState, AppStore, app_store};
pub use config::ApiConfig;
pub use environment::AppEnvironment;
pub use submission::{RefusalReason, SubmissionPlan, plan_submission};
pub use types::{Ingredient, IngredientId, IngredientKind, Order, OrderStatus, OrdersData, User};
