//! The caller's order history and order placement.
//!
//! Placement shares the history resource's lifecycle flag, so at most one
//! submission can be in flight and a fetch cannot race a placement. A
//! successful placement is prepended to the history and parked in
//! `last_created` until the caller acknowledges it.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, RemoteData, async_effect, smallvec};

use crate::environment::AppEnvironment;
use crate::types::{IngredientId, Order};

const FETCH_FALLBACK: &str = "failed to load orders";
const SUBMIT_FALLBACK: &str = "failed to place order";

/// Order history state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersState {
    /// The caller's orders, newest first
    pub history: RemoteData<Vec<Order>>,
    /// The most recently placed order, until acknowledged
    pub last_created: Option<Order>,
}

impl OrdersState {
    /// True while a fetch or a placement is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.history.is_loading()
    }
}

/// History and placement actions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrdersAction {
    /// Load the caller's order history
    FetchMine,
    /// The history arrived
    FetchedMine(Vec<Order>),
    /// Loading the history failed
    FetchMineFailed(Option<String>),
    /// Place an order with these catalog ids, already in submission order
    Submit(Vec<IngredientId>),
    /// The order was accepted
    Submitted(Order),
    /// The order was refused or the request failed
    SubmitFailed(Option<String>),
    /// Forget the most recently placed order
    ResetLastCreated,
}

/// Reducer over [`OrdersState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdersReducer;

impl Reducer for OrdersReducer {
    type State = OrdersState;
    type Action = OrdersAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            OrdersAction::FetchMine => {
                state.history.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.get_my_orders().await {
                        Ok(orders) => Some(OrdersAction::FetchedMine(orders)),
                        Err(error) => Some(OrdersAction::FetchMineFailed(error.message())),
                    }
                }]
            },
            OrdersAction::FetchedMine(orders) => {
                state.history.resolve(orders);
                smallvec![]
            },
            OrdersAction::FetchMineFailed(message) => {
                state.history.fail(message, FETCH_FALLBACK);
                smallvec![]
            },
            OrdersAction::Submit(ingredient_ids) => {
                if state.history.is_loading() {
                    tracing::warn!("order submission already in flight, dropping");
                    return smallvec![];
                }
                state.history.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.create_order(ingredient_ids).await {
                        Ok(order) => Some(OrdersAction::Submitted(order)),
                        Err(error) => Some(OrdersAction::SubmitFailed(error.message())),
                    }
                }]
            },
            OrdersAction::Submitted(order) => {
                tracing::info!(number = order.number, "order placed");
                let mut orders = state.history.data().cloned().unwrap_or_default();
                orders.insert(0, order.clone());
                state.history.resolve(orders);
                state.last_created = Some(order);
                smallvec![]
            },
            OrdersAction::SubmitFailed(message) => {
                state.history.fail(message, SUBMIT_FALLBACK);
                smallvec![]
            },
            OrdersAction::ResetLastCreated => {
                state.last_created = None;
                smallvec![]
            },
        }
    }
}
