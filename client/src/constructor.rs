//! The in-progress burger composition.
//!
//! One optional bun plus an ordered list of fillings, each filling wrapped
//! with a minted placement id so two copies of the same catalog ingredient
//! stay individually addressable. The running total is maintained
//! incrementally: a bun counts twice (top and bottom), each filling once.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, smallvec};

use crate::environment::AppEnvironment;
use crate::types::{Ingredient, IngredientId};

/// Identity of one placement in the composition, distinct from the
/// catalog id of the ingredient occupying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub String);

impl PlacementId {
    /// Wrap a raw placement id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A filling in the composition: the catalog ingredient plus its
/// placement identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorIngredient {
    /// Placement identity, unique within the composition
    pub placement: PlacementId,
    /// The catalog ingredient occupying this slot
    pub ingredient: Ingredient,
}

/// The composition under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorState {
    bun: Option<Ingredient>,
    fillings: Vec<ConstructorIngredient>,
    total: u64,
}

impl ConstructorState {
    /// The selected bun, if any.
    #[must_use]
    pub fn bun(&self) -> Option<&Ingredient> {
        self.bun.as_ref()
    }

    /// The fillings in presentation order.
    #[must_use]
    pub fn fillings(&self) -> &[ConstructorIngredient] {
        &self.fillings
    }

    /// The running price: twice the bun plus every filling, zero while
    /// no bun is selected.
    #[must_use]
    pub const fn total_price(&self) -> u64 {
        self.total
    }

    /// True when nothing has been composed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.fillings.is_empty()
    }

    /// Catalog ids in submission order: bun first, fillings in
    /// presentation order, bun again. `None` when no bun is selected.
    #[must_use]
    pub fn ordered_ids(&self) -> Option<Vec<IngredientId>> {
        let bun = self.bun.as_ref()?;
        let mut ids = Vec::with_capacity(self.fillings.len() + 2);
        ids.push(bun.id.clone());
        ids.extend(self.fillings.iter().map(|f| f.ingredient.id.clone()));
        ids.push(bun.id.clone());
        Some(ids)
    }

    // A burger without a bun is not priceable, so the total stays zero
    // until one is selected.
    fn recompute_total(&mut self) {
        self.total = match &self.bun {
            Some(bun) => {
                bun.price * 2
                    + self
                        .fillings
                        .iter()
                        .map(|f| f.ingredient.price)
                        .sum::<u64>()
            },
            None => 0,
        };
    }
}

/// Mutations of the composition.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorAction {
    /// Select or replace the bun; ignored for non-bun ingredients
    SetBun(Ingredient),
    /// Append an ingredient; a bun routes to the bun slot instead
    AddIngredient(Ingredient),
    /// Remove the filling with this placement id, if present
    RemoveIngredient(PlacementId),
    /// Relocate the filling at `from` so it lands at index `to`.
    /// Out-of-range indexes leave the composition untouched.
    MoveIngredient {
        /// Current index of the filling
        from: usize,
        /// Target index after removal
        to: usize,
    },
    /// Discard the whole composition
    Clear,
}

/// Reducer over [`ConstructorState`]. Entirely pure; placement ids come
/// from the environment's generator so tests stay deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructorReducer;

impl Reducer for ConstructorReducer {
    type State = ConstructorState;
    type Action = ConstructorAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            ConstructorAction::SetBun(ingredient) => {
                if ingredient.kind.is_filling() {
                    tracing::warn!(id = %ingredient.id, "refusing non-bun in bun slot");
                    return smallvec![];
                }
                state.bun = Some(ingredient);
                state.recompute_total();
            },
            ConstructorAction::AddIngredient(ingredient) => {
                if ingredient.kind.is_filling() {
                    state.fillings.push(ConstructorIngredient {
                        placement: PlacementId::new(env.ids.generate()),
                        ingredient,
                    });
                } else {
                    state.bun = Some(ingredient);
                }
                state.recompute_total();
            },
            ConstructorAction::RemoveIngredient(placement) => {
                state.fillings.retain(|f| f.placement != placement);
                state.recompute_total();
            },
            ConstructorAction::MoveIngredient { from, to } => {
                if from >= state.fillings.len() || to >= state.fillings.len() {
                    return smallvec![];
                }
                let moved = state.fillings.remove(from);
                state.fillings.insert(to, moved);
                // Reordering never changes the total.
            },
            ConstructorAction::Clear => {
                state.bun = None;
                state.fillings.clear();
                state.total = 0;
            },
        }
        smallvec![]
    }
}
