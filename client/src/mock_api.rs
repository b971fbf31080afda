//! Scriptable in-memory [`BurgerApi`] for tests and demos.

use std::sync::{Mutex, PoisonError};

use crate::api::{
    ApiError, ApiFuture, AuthPayload, BurgerApi, LoginRequest, RegisterRequest, UserUpdate,
};
use crate::types::{Ingredient, IngredientId, Order, OrdersData, User};

/// Scripted outcome for one endpoint: either a canned value or a server
/// failure carrying an optional message.
type Scripted<T> = Result<T, Option<String>>;

fn to_api<T>(scripted: Scripted<T>) -> Result<T, ApiError> {
    scripted.map_err(|message| ApiError::Server { message })
}

/// How often each endpoint has been hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `GET /ingredients`
    pub ingredients: usize,
    /// `POST /auth/register`
    pub register: usize,
    /// `POST /auth/login`
    pub login: usize,
    /// `GET /auth/user`
    pub get_user: usize,
    /// `PATCH /auth/user`
    pub update_user: usize,
    /// `POST /auth/logout`
    pub logout: usize,
    /// `POST /orders`
    pub create_order: usize,
    /// `GET /orders`
    pub my_orders: usize,
    /// `GET /orders/all`
    pub feed: usize,
    /// `GET /orders/{number}`
    pub order_lookup: usize,
}

struct MockState {
    ingredients: Scripted<Vec<Ingredient>>,
    auth: Scripted<AuthPayload>,
    user: Scripted<User>,
    logout: Scripted<()>,
    created_order: Scripted<Order>,
    my_orders: Scripted<Vec<Order>>,
    feed: Scripted<OrdersData>,
    order_lookup: Scripted<Vec<Order>>,
    last_order_ids: Option<Vec<IngredientId>>,
    calls: CallCounts,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            ingredients: Ok(Vec::new()),
            auth: Ok(AuthPayload {
                user: User {
                    name: "Test User".to_owned(),
                    email: "test@example.test".to_owned(),
                },
                access_token: "Bearer access".to_owned(),
                refresh_token: "refresh".to_owned(),
            }),
            user: Ok(User {
                name: "Test User".to_owned(),
                email: "test@example.test".to_owned(),
            }),
            logout: Ok(()),
            created_order: Err(None),
            my_orders: Ok(Vec::new()),
            feed: Ok(OrdersData {
                orders: Vec::new(),
                total: 0,
                total_today: 0,
            }),
            order_lookup: Ok(Vec::new()),
            last_order_ids: None,
            calls: CallCounts::default(),
        }
    }
}

/// In-memory [`BurgerApi`] whose responses are scripted per endpoint.
///
/// Every call is counted, and order submissions record the id list they
/// were given so tests can assert the exact transmission.
#[derive(Default)]
pub struct MockApi {
    inner: Mutex<MockState>,
}

impl MockApi {
    /// Mock with neutral defaults: empty collections, a canned test
    /// identity, and order creation scripted to fail until set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the catalog response.
    pub fn set_ingredients(&self, scripted: Scripted<Vec<Ingredient>>) {
        self.lock().ingredients = scripted;
    }

    /// Script the registration/login response.
    pub fn set_auth(&self, scripted: Scripted<AuthPayload>) {
        self.lock().auth = scripted;
    }

    /// Script the profile fetch/update response.
    pub fn set_user(&self, scripted: Scripted<User>) {
        self.lock().user = scripted;
    }

    /// Script the logout response.
    pub fn set_logout(&self, scripted: Scripted<()>) {
        self.lock().logout = scripted;
    }

    /// Script the order submission response.
    pub fn set_created_order(&self, scripted: Scripted<Order>) {
        self.lock().created_order = scripted;
    }

    /// Script the order history response.
    pub fn set_my_orders(&self, scripted: Scripted<Vec<Order>>) {
        self.lock().my_orders = scripted;
    }

    /// Script the public feed response.
    pub fn set_feed(&self, scripted: Scripted<OrdersData>) {
        self.lock().feed = scripted;
    }

    /// Script the order-by-number lookup response.
    pub fn set_order_lookup(&self, scripted: Scripted<Vec<Order>>) {
        self.lock().order_lookup = scripted;
    }

    /// Per-endpoint hit counts so far.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// The id list of the most recent order submission, if any.
    #[must_use]
    pub fn last_order_ids(&self) -> Option<Vec<IngredientId>> {
        self.lock().last_order_ids.clone()
    }
}

impl BurgerApi for MockApi {
    fn get_ingredients(&self) -> ApiFuture<'_, Vec<Ingredient>> {
        let result = {
            let mut state = self.lock();
            state.calls.ingredients += 1;
            to_api(state.ingredients.clone())
        };
        Box::pin(async move { result })
    }

    fn register(&self, _request: RegisterRequest) -> ApiFuture<'_, AuthPayload> {
        let result = {
            let mut state = self.lock();
            state.calls.register += 1;
            to_api(state.auth.clone())
        };
        Box::pin(async move { result })
    }

    fn login(&self, _request: LoginRequest) -> ApiFuture<'_, AuthPayload> {
        let result = {
            let mut state = self.lock();
            state.calls.login += 1;
            to_api(state.auth.clone())
        };
        Box::pin(async move { result })
    }

    fn get_user(&self) -> ApiFuture<'_, User> {
        let result = {
            let mut state = self.lock();
            state.calls.get_user += 1;
            to_api(state.user.clone())
        };
        Box::pin(async move { result })
    }

    fn update_user(&self, update: UserUpdate) -> ApiFuture<'_, User> {
        let result = {
            let mut state = self.lock();
            state.calls.update_user += 1;
            // Echo the requested changes back, as the real server does.
            to_api(state.user.clone()).map(|mut user| {
                if let Some(name) = update.name {
                    user.name = name;
                }
                if let Some(email) = update.email {
                    user.email = email;
                }
                user
            })
        };
        Box::pin(async move { result })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            state.calls.logout += 1;
            to_api(state.logout.clone())
        };
        Box::pin(async move { result })
    }

    fn create_order(&self, ingredient_ids: Vec<IngredientId>) -> ApiFuture<'_, Order> {
        let result = {
            let mut state = self.lock();
            state.calls.create_order += 1;
            state.last_order_ids = Some(ingredient_ids);
            to_api(state.created_order.clone())
        };
        Box::pin(async move { result })
    }

    fn get_my_orders(&self) -> ApiFuture<'_, Vec<Order>> {
        let result = {
            let mut state = self.lock();
            state.calls.my_orders += 1;
            to_api(state.my_orders.clone())
        };
        Box::pin(async move { result })
    }

    fn get_feed(&self) -> ApiFuture<'_, OrdersData> {
        let result = {
            let mut state = self.lock();
            state.calls.feed += 1;
            to_api(state.feed.clone())
        };
        Box::pin(async move { result })
    }

    fn get_order_by_number(&self, _number: u32) -> ApiFuture<'_, Vec<Order>> {
        let result = {
            let mut state = self.lock();
            state.calls.order_lookup += 1;
            to_api(state.order_lookup.clone())
        };
        Box::pin(async move { result })
    }
}
