//! Shared dependencies injected into every reducer.

use std::sync::Arc;

use stellar_core::environment::{IdGenerator, RandomIdGenerator};

use crate::api::BurgerApi;
use crate::session::{CredentialStorage, MemoryCredentials};

/// Dependencies available to all reducers in the application.
///
/// Reducers stay pure; anything that touches the outside world (the REST
/// API, credential persistence, id minting) goes through this environment
/// so tests can substitute controlled implementations.
#[derive(Clone)]
pub struct AppEnvironment {
    /// The REST transport
    pub api: Arc<dyn BurgerApi>,
    /// Session credential persistence
    pub credentials: Arc<dyn CredentialStorage>,
    /// Placement id minting for composition entries
    pub ids: Arc<dyn IdGenerator>,
}

impl AppEnvironment {
    /// Production wiring around a given transport and credential store.
    #[must_use]
    pub fn new(api: Arc<dyn BurgerApi>, credentials: Arc<dyn CredentialStorage>) -> Self {
        Self {
            api,
            credentials,
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Environment with in-memory credentials, for demos and tests.
    #[must_use]
    pub fn in_memory(api: Arc<dyn BurgerApi>) -> Self {
        Self::new(api, Arc::new(MemoryCredentials::new()))
    }

    /// Replace the id generator, keeping everything else.
    #[must_use]
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}
