//! The authenticated identity and its session lifecycle.
//!
//! Credential persistence happens inside effects, never in the reducer:
//! registration and login store the minted pair before reporting success,
//! and logout clears it whether or not the server acknowledged. The
//! `auth_checked` flag records that the startup session probe has reached
//! a verdict, so consumers can distinguish "not signed in" from "not yet
//! known".

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, RemoteData, async_effect, smallvec};

use crate::api::{LoginRequest, RegisterRequest, UserUpdate};
use crate::environment::AppEnvironment;
use crate::types::User;

const REGISTER_FALLBACK: &str = "registration failed";
const LOGIN_FALLBACK: &str = "login failed";
const FETCH_FALLBACK: &str = "failed to fetch user";
const UPDATE_FALLBACK: &str = "failed to update profile";

/// Identity state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// The identity resource; `Fulfilled` means signed in
    pub identity: RemoteData<User>,
    /// Whether the session probe has reached a verdict
    pub auth_checked: bool,
}

impl UserState {
    /// The signed-in identity, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.identity.data()
    }
}

/// Identity lifecycle actions.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Create an account and sign in
    Register(RegisterRequest),
    /// Registration succeeded; credentials are already persisted
    Registered(User),
    /// Registration failed
    RegisterFailed(Option<String>),
    /// Sign in with existing credentials
    Login(LoginRequest),
    /// Login succeeded; credentials are already persisted
    LoggedIn(User),
    /// Login failed
    LoginFailed(Option<String>),
    /// Probe the stored session for a live identity
    Fetch,
    /// The session probe found an identity
    Fetched(User),
    /// The session probe failed; stored credentials were discarded
    FetchFailed(Option<String>),
    /// Update the signed-in profile
    Update(UserUpdate),
    /// The profile update succeeded
    Updated(User),
    /// The profile update failed
    UpdateFailed(Option<String>),
    /// Sign out
    Logout,
    /// Sign-out completed locally; credentials are already cleared
    LoggedOut,
}

/// Reducer over [`UserState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    type Action = UserAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            UserAction::Register(request) => {
                state.identity.begin();
                let api = env.api.clone();
                let credentials = env.credentials.clone();
                smallvec![async_effect! {
                    match api.register(request).await {
                        Ok(payload) => {
                            credentials.store(&payload.access_token, &payload.refresh_token);
                            Some(UserAction::Registered(payload.user))
                        },
                        Err(error) => Some(UserAction::RegisterFailed(error.message())),
                    }
                }]
            },
            UserAction::Registered(user) => {
                state.identity.resolve(user);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::RegisterFailed(message) => {
                state.identity.fail(message, REGISTER_FALLBACK);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::Login(request) => {
                state.identity.begin();
                let api = env.api.clone();
                let credentials = env.credentials.clone();
                smallvec![async_effect! {
                    match api.login(request).await {
                        Ok(payload) => {
                            credentials.store(&payload.access_token, &payload.refresh_token);
                            Some(UserAction::LoggedIn(payload.user))
                        },
                        Err(error) => Some(UserAction::LoginFailed(error.message())),
                    }
                }]
            },
            UserAction::LoggedIn(user) => {
                tracing::info!(email = %user.email, "signed in");
                state.identity.resolve(user);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::LoginFailed(message) => {
                state.identity.fail(message, LOGIN_FALLBACK);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::Fetch => {
                // No stored session means the verdict is immediate.
                if env.credentials.access_token().is_none() {
                    state.auth_checked = true;
                    return smallvec![];
                }
                state.identity.begin();
                let api = env.api.clone();
                let credentials = env.credentials.clone();
                smallvec![async_effect! {
                    match api.get_user().await {
                        Ok(user) => Some(UserAction::Fetched(user)),
                        Err(error) => {
                            // A dead session is not worth keeping around.
                            credentials.clear();
                            Some(UserAction::FetchFailed(error.message()))
                        },
                    }
                }]
            },
            UserAction::Fetched(user) => {
                state.identity.resolve(user);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::FetchFailed(message) => {
                state.identity.fail(message, FETCH_FALLBACK);
                state.auth_checked = true;
                smallvec![]
            },
            UserAction::Update(update) => {
                state.identity.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.update_user(update).await {
                        Ok(user) => Some(UserAction::Updated(user)),
                        Err(error) => Some(UserAction::UpdateFailed(error.message())),
                    }
                }]
            },
            UserAction::Updated(user) => {
                state.identity.resolve(user);
                smallvec![]
            },
            UserAction::UpdateFailed(message) => {
                // Stale profile data stays visible alongside the error.
                state.identity.fail(message, UPDATE_FALLBACK);
                smallvec![]
            },
            UserAction::Logout => {
                let api = env.api.clone();
                let credentials = env.credentials.clone();
                smallvec![async_effect! {
                    if let Err(error) = api.logout().await {
                        tracing::warn!(%error, "server-side logout failed, clearing locally");
                    }
                    credentials.clear();
                    Some(UserAction::LoggedOut)
                }]
            },
            UserAction::LoggedOut => {
                state.identity.reset();
                state.auth_checked = true;
                smallvec![]
            },
        }
    }
}
