//! The root state, action, and reducer composing every slice.
//!
//! Cross-slice behavior lives here: startup loads the catalog and probes
//! the session, placing an order consults the composition, identity, and
//! history together, and acknowledging a placed order clears both the
//! acknowledgement and the composition.

use serde::{Deserialize, Serialize};
use stellar_core::{Effects, Reducer, async_effect, smallvec};
use stellar_runtime::Store;

use crate::constructor::{ConstructorAction, ConstructorReducer, ConstructorState};
use crate::environment::AppEnvironment;
use crate::feed::{FeedAction, FeedReducer, FeedState};
use crate::ingredients::{IngredientsAction, IngredientsReducer, IngredientsState};
use crate::order_details::{OrderDetailsAction, OrderDetailsReducer, OrderDetailsState};
use crate::orders::{OrdersAction, OrdersReducer, OrdersState};
use crate::submission::{SubmissionPlan, plan_submission};
use crate::user::{UserAction, UserReducer, UserState};

/// The whole application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// The ingredient catalog
    pub ingredients: IngredientsState,
    /// The in-progress composition
    pub constructor: ConstructorState,
    /// The authenticated identity
    pub user: UserState,
    /// Order history and placement
    pub orders: OrdersState,
    /// The public feed
    pub feed: FeedState,
    /// Single-order lookup
    pub order_details: OrderDetailsState,
}

/// Every action the application understands.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Catalog slice
    Ingredients(IngredientsAction),
    /// Composition slice
    Constructor(ConstructorAction),
    /// Identity slice
    User(UserAction),
    /// History and placement slice
    Orders(OrdersAction),
    /// Feed slice
    Feed(FeedAction),
    /// Lookup slice
    OrderDetails(OrderDetailsAction),
    /// Load the catalog and probe the stored session, in parallel
    Bootstrap,
    /// Ask to place the current composition as an order
    PlaceOrder,
    /// Signal that placing requires signing in first; carries no state
    /// change and exists to be observed on the action broadcast
    AuthenticationRequired,
    /// Acknowledge the most recently placed order, clearing it and the
    /// composition
    AcknowledgeOrder,
}

fn lift<A, B>(effects: Effects<A>, wrap: fn(A) -> B) -> Effects<B>
where
    A: Send + 'static,
    B: 'static,
{
    effects.into_iter().map(|effect| effect.map(wrap)).collect()
}

/// The root reducer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer {
    ingredients: IngredientsReducer,
    constructor: ConstructorReducer,
    user: UserReducer,
    orders: OrdersReducer,
    feed: FeedReducer,
    order_details: OrderDetailsReducer,
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::Ingredients(action) => lift(
                self.ingredients.reduce(&mut state.ingredients, action, env),
                AppAction::Ingredients,
            ),
            AppAction::Constructor(action) => lift(
                self.constructor.reduce(&mut state.constructor, action, env),
                AppAction::Constructor,
            ),
            AppAction::User(action) => lift(
                self.user.reduce(&mut state.user, action, env),
                AppAction::User,
            ),
            AppAction::Orders(action) => lift(
                self.orders.reduce(&mut state.orders, action, env),
                AppAction::Orders,
            ),
            AppAction::Feed(action) => lift(
                self.feed.reduce(&mut state.feed, action, env),
                AppAction::Feed,
            ),
            AppAction::OrderDetails(action) => lift(
                self.order_details
                    .reduce(&mut state.order_details, action, env),
                AppAction::OrderDetails,
            ),
            AppAction::Bootstrap => {
                let mut effects = lift(
                    self.ingredients
                        .reduce(&mut state.ingredients, IngredientsAction::Fetch, env),
                    AppAction::Ingredients,
                );
                effects.extend(lift(
                    self.user.reduce(&mut state.user, UserAction::Fetch, env),
                    AppAction::User,
                ));
                effects
            },
            AppAction::PlaceOrder => {
                let plan = plan_submission(
                    &state.constructor,
                    state.user.user(),
                    state.orders.is_busy(),
                );
                match plan {
                    SubmissionPlan::Refused(reason) => {
                        tracing::warn!(?reason, "refusing order submission");
                        smallvec![]
                    },
                    SubmissionPlan::AuthRequired => {
                        smallvec![async_effect! { Some(AppAction::AuthenticationRequired) }]
                    },
                    SubmissionPlan::Proceed(ids) => lift(
                        self.orders
                            .reduce(&mut state.orders, OrdersAction::Submit(ids), env),
                        AppAction::Orders,
                    ),
                }
            },
            AppAction::AuthenticationRequired => smallvec![],
            AppAction::AcknowledgeOrder => {
                let mut effects = lift(
                    self.orders
                        .reduce(&mut state.orders, OrdersAction::ResetLastCreated, env),
                    AppAction::Orders,
                );
                effects.extend(lift(
                    self.constructor
                        .reduce(&mut state.constructor, ConstructorAction::Clear, env),
                    AppAction::Constructor,
                ));
                effects
            },
        }
    }
}

/// The application store: [`AppReducer`] running on the async runtime.
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Build an [`AppStore`] over `env` with empty initial state.
#[must_use]
pub fn app_store(env: AppEnvironment) -> AppStore {
    Store::new(AppState::default(), AppReducer::default(), env)
}
