//! Lookup of a single order by its public number.
//!
//! The server answers with a list; the first element is the match, and an
//! empty list means the number is unknown.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, RemoteData, async_effect, smallvec};

use crate::environment::AppEnvironment;
use crate::types::Order;

const FETCH_FALLBACK: &str = "failed to load order";

/// Lookup state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailsState {
    /// The looked-up order
    pub order: RemoteData<Order>,
}

/// Lookup actions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDetailsAction {
    /// Look up an order by number
    Fetch(u32),
    /// The order was found
    Loaded(Order),
    /// The lookup failed or the number is unknown
    FetchFailed(Option<String>),
    /// Discard the current lookup
    Clear,
}

/// Reducer over [`OrderDetailsState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDetailsReducer;

impl Reducer for OrderDetailsReducer {
    type State = OrderDetailsState;
    type Action = OrderDetailsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            OrderDetailsAction::Fetch(number) => {
                state.order.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.get_order_by_number(number).await {
                        Ok(orders) => match orders.into_iter().next() {
                            Some(order) => Some(OrderDetailsAction::Loaded(order)),
                            None => Some(OrderDetailsAction::FetchFailed(None)),
                        },
                        Err(error) => Some(OrderDetailsAction::FetchFailed(error.message())),
                    }
                }]
            },
            OrderDetailsAction::Loaded(order) => {
                state.order.resolve(order);
                smallvec![]
            },
            OrderDetailsAction::FetchFailed(message) => {
                state.order.fail(message, FETCH_FALLBACK);
                smallvec![]
            },
            OrderDetailsAction::Clear => {
                state.order.reset();
                smallvec![]
            },
        }
    }
}
