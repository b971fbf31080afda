//! The public order feed with its running counters.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, RemoteData, async_effect, smallvec};

use crate::environment::AppEnvironment;
use crate::types::{Order, OrderStatus, OrdersData};

const FETCH_FALLBACK: &str = "failed to load feed";

/// Feed state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedState {
    /// The feed resource: recent orders plus all-time and daily totals
    pub feed: RemoteData<OrdersData>,
}

impl FeedState {
    /// The feed's orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.feed.data().map_or(&[], |data| data.orders.as_slice())
    }

    /// All-time order count, zero while unloaded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.feed.data().map_or(0, |data| data.total)
    }

    /// Today's order count, zero while unloaded.
    #[must_use]
    pub fn total_today(&self) -> u64 {
        self.feed.data().map_or(0, |data| data.total_today)
    }

    /// Numbers of completed orders, in feed order.
    pub fn done_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.orders()
            .iter()
            .filter(|o| o.status == OrderStatus::Done)
            .map(|o| o.number)
    }

    /// Numbers of orders still being worked on, in feed order.
    pub fn in_progress_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.orders()
            .iter()
            .filter(|o| o.status != OrderStatus::Done)
            .map(|o| o.number)
    }
}

/// Feed lifecycle actions.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    /// Load the public feed
    Fetch,
    /// The feed arrived
    Loaded(OrdersData),
    /// Loading failed
    FetchFailed(Option<String>),
}

/// Reducer over [`FeedState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedReducer;

impl Reducer for FeedReducer {
    type State = FeedState;
    type Action = FeedAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            FeedAction::Fetch => {
                state.feed.begin();
                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.get_feed().await {
                        Ok(data) => Some(FeedAction::Loaded(data)),
                        Err(error) => Some(FeedAction::FetchFailed(error.message())),
                    }
                }]
            },
            FeedAction::Loaded(data) => {
                state.feed.resolve(data);
                smallvec![]
            },
            FeedAction::FetchFailed(message) => {
                state.feed.fail(message, FETCH_FALLBACK);
                smallvec![]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use stellar_core::Phase;
    use stellar_testing::{ReducerTest, assertions::assert_has_future_effect};

    use super::{FeedAction, FeedReducer, FeedState};
    use crate::environment::AppEnvironment;
    use crate::mock_api::MockApi;
    use crate::types::{IngredientId, Order, OrderStatus, OrdersData};

    fn test_env() -> AppEnvironment {
        AppEnvironment::in_memory(Arc::new(MockApi::new()))
    }

    fn order(number: u32, status: OrderStatus) -> Order {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        Order {
            id: format!("order-{number}"),
            number,
            status,
            name: "Feed burger".to_owned(),
            created_at: at,
            updated_at: at,
            ingredients: vec![IngredientId::new("bun-1")],
        }
    }

    #[test]
    fn test_fetch_goes_pending() {
        ReducerTest::new(FeedReducer)
            .with_env(test_env())
            .given_state(FeedState::default())
            .when_action(FeedAction::Fetch)
            .then_state(|state| assert_eq!(state.feed.phase(), Phase::Pending))
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_loaded_exposes_counters_and_status_buckets() {
        ReducerTest::new(FeedReducer)
            .with_env(test_env())
            .given_state(FeedState::default())
            .when_action(FeedAction::Loaded(OrdersData {
                orders: vec![
                    order(3, OrderStatus::Done),
                    order(2, OrderStatus::InProgress),
                    order(1, OrderStatus::Done),
                ],
                total: 120,
                total_today: 12,
            }))
            .then_state(|state| {
                assert_eq!(state.total(), 120);
                assert_eq!(state.total_today(), 12);
                assert_eq!(state.done_numbers().collect::<Vec<_>>(), [3, 1]);
                assert_eq!(state.in_progress_numbers().collect::<Vec<_>>(), [2]);
            })
            .run();
    }

    #[test]
    fn test_failure_uses_fallback() {
        ReducerTest::new(FeedReducer)
            .with_env(test_env())
            .given_state(FeedState::default())
            .when_action(FeedAction::FetchFailed(None))
            .then_state(|state| {
                assert_eq!(state.feed.error(), Some("failed to load feed"));
                assert!(state.orders().is_empty());
            })
            .run();
    }
}
