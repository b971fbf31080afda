//! The ingredient catalog, fetched once at startup.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, RemoteData, async_effect, smallvec};

use crate::environment::AppEnvironment;
use crate::types::{Ingredient, IngredientId, IngredientKind};

/// Fallback error when the server fails without a message.
const FETCH_FALLBACK: &str = "failed to load ingredients";

/// The catalog and its load lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientsState {
    /// The catalog resource
    pub catalog: RemoteData<Vec<Ingredient>>,
}

impl IngredientsState {
    fn items(&self) -> &[Ingredient] {
        self.catalog.data().map_or(&[], Vec::as_slice)
    }

    /// All buns in catalog order.
    pub fn buns(&self) -> impl Iterator<Item = &Ingredient> {
        self.items()
            .iter()
            .filter(|i| i.kind == IngredientKind::Bun)
    }

    /// All mains in catalog order.
    pub fn mains(&self) -> impl Iterator<Item = &Ingredient> {
        self.items()
            .iter()
            .filter(|i| i.kind == IngredientKind::Main)
    }

    /// All sauces in catalog order.
    pub fn sauces(&self) -> impl Iterator<Item = &Ingredient> {
        self.items()
            .iter()
            .filter(|i| i.kind == IngredientKind::Sauce)
    }

    /// Look up one catalog entry by id.
    #[must_use]
    pub fn by_id(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.items().iter().find(|i| &i.id == id)
    }
}

/// Catalog lifecycle actions.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientsAction {
    /// Start loading the catalog
    Fetch,
    /// The catalog arrived
    Loaded(Vec<Ingredient>),
    /// Loading failed, with the server message when one was given
    FetchFailed(Option<String>),
}

/// Reducer over [`IngredientsState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientsReducer;

impl Reducer for IngredientsReducer {
    type State = IngredientsState;
    type Action = IngredientsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            IngredientsAction::Fetch => {
                state.catalog.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.get_ingredients().await {
                        Ok(catalog) => Some(IngredientsAction::Loaded(catalog)),
                        Err(error) => Some(IngredientsAction::FetchFailed(error.message())),
                    }
                }]
            },
            IngredientsAction::Loaded(catalog) => {
                tracing::debug!(count = catalog.len(), "catalog loaded");
                state.catalog.resolve(catalog);
                smallvec![]
            },
            IngredientsAction::FetchFailed(message) => {
                state.catalog.fail(message, FETCH_FALLBACK);
                smallvec![]
            },
        }
    }
}
