//! End-to-end flows through the store: compose, sign in, place, and
//! acknowledge an order against a scripted transport.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use stellar_client::app::app_store;
use stellar_client::constructor::ConstructorAction;
use stellar_client::environment::AppEnvironment;
use stellar_client::mock_api::MockApi;
use stellar_client::session::{CredentialStorage, MemoryCredentials};
use stellar_client::types::{Ingredient, IngredientId, IngredientKind, Order, OrderStatus};
use stellar_client::user::UserAction;
use stellar_client::{AppAction, AppStore};
use stellar_core::Phase;

const IDLE: Duration = Duration::from_secs(2);

fn ingredient(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
    Ingredient {
        id: IngredientId::new(id),
        kind,
        name: id.to_owned(),
        proteins: 10,
        fat: 10,
        carbohydrates: 10,
        calories: 100,
        price,
        image: String::new(),
        image_mobile: String::new(),
        image_large: String::new(),
    }
}

fn accepted_order(number: u32, ids: &[&str]) -> Order {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Order {
        id: format!("order-{number}"),
        number,
        status: OrderStatus::Done,
        name: "Stellar burger".to_owned(),
        created_at: at,
        updated_at: at,
        ingredients: ids.iter().map(|id| IngredientId::new(*id)).collect(),
    }
}

struct Harness {
    api: Arc<MockApi>,
    credentials: Arc<MemoryCredentials>,
    store: AppStore,
}

fn harness() -> Harness {
    let api = Arc::new(MockApi::new());
    let credentials = Arc::new(MemoryCredentials::new());
    let store = app_store(AppEnvironment::new(api.clone(), credentials.clone()));
    Harness {
        api,
        credentials,
        store,
    }
}

async fn compose_burger(store: &AppStore) {
    store
        .send(AppAction::Constructor(ConstructorAction::SetBun(ingredient(
            "bun-1",
            IngredientKind::Bun,
            50,
        ))))
        .await
        .unwrap();
    store
        .send(AppAction::Constructor(ConstructorAction::AddIngredient(
            ingredient("main-1", IngredientKind::Main, 40),
        )))
        .await
        .unwrap();
    store
        .send(AppAction::Constructor(ConstructorAction::AddIngredient(
            ingredient("sauce-1", IngredientKind::Sauce, 25),
        )))
        .await
        .unwrap();
}

#[tokio::test]
async fn composition_price_tracks_edits() {
    let h = harness();
    compose_burger(&h.store).await;

    let total = h.store.state(|s| s.constructor.total_price()).await;
    assert_eq!(total, 165);

    // Dropping the sauce leaves bun twice plus the main.
    let sauce_placement = h
        .store
        .state(|s| s.constructor.fillings()[1].placement.clone())
        .await;
    h.store
        .send(AppAction::Constructor(ConstructorAction::RemoveIngredient(
            sauce_placement,
        )))
        .await
        .unwrap();

    let total = h.store.state(|s| s.constructor.total_price()).await;
    assert_eq!(total, 140);
}

#[tokio::test]
async fn anonymous_submission_demands_authentication_and_sends_nothing() {
    let h = harness();
    compose_burger(&h.store).await;

    let observed = h
        .store
        .send_and_wait_for(
            AppAction::PlaceOrder,
            |action| matches!(action, AppAction::AuthenticationRequired),
            IDLE,
        )
        .await
        .unwrap();
    assert!(matches!(observed, AppAction::AuthenticationRequired));
    h.store.wait_until_idle(IDLE).await.unwrap();

    assert_eq!(h.api.calls().create_order, 0);
    let (fillings, busy) = h
        .store
        .state(|s| (s.constructor.fillings().len(), s.orders.is_busy()))
        .await;
    assert_eq!(fillings, 2);
    assert!(!busy);
}

#[tokio::test]
async fn signed_in_submission_transmits_bracketed_ids_and_prepends_history() {
    let h = harness();
    h.api.set_created_order(Ok(accepted_order(
        4242,
        &["bun-1", "main-1", "sauce-1", "bun-1"],
    )));

    h.store
        .send(AppAction::User(UserAction::Login(
            stellar_client::api::LoginRequest {
                email: "ada@example.test".to_owned(),
                password: "secret".to_owned(),
            },
        )))
        .await
        .unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();
    assert!(h.credentials.access_token().is_some());

    compose_burger(&h.store).await;
    h.store.send(AppAction::PlaceOrder).await.unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();

    let sent = h.api.last_order_ids().expect("order was transmitted");
    let raw: Vec<_> = sent.iter().map(|id| id.0.as_str()).collect();
    assert_eq!(raw, ["bun-1", "main-1", "sauce-1", "bun-1"]);

    h.store
        .state(|s| {
            let history = s.orders.history.data().unwrap();
            assert_eq!(history[0].number, 4242);
            assert_eq!(s.orders.last_created.as_ref().unwrap().number, 4242);
        })
        .await;

    // Acknowledging clears both the parked order and the composition.
    h.store.send(AppAction::AcknowledgeOrder).await.unwrap();
    h.store
        .state(|s| {
            assert!(s.orders.last_created.is_none());
            assert!(s.constructor.is_empty());
            // History keeps the placed order.
            assert_eq!(s.orders.history.data().unwrap().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn messageless_submission_failure_reports_the_fallback() {
    let h = harness();
    h.api.set_created_order(Err(None));

    h.store
        .send(AppAction::User(UserAction::LoggedIn(
            stellar_client::types::User {
                name: "Ada".to_owned(),
                email: "ada@example.test".to_owned(),
            },
        )))
        .await
        .unwrap();
    compose_burger(&h.store).await;
    h.store.send(AppAction::PlaceOrder).await.unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();

    h.store
        .state(|s| {
            assert_eq!(s.orders.history.phase(), Phase::Rejected);
            assert_eq!(s.orders.history.error(), Some("failed to place order"));
            // The composition is untouched so the caller can retry.
            assert_eq!(s.constructor.fillings().len(), 2);
        })
        .await;
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_server_fails() {
    let h = harness();
    h.api.set_logout(Err(Some("revocation service down".to_owned())));

    h.store
        .send(AppAction::User(UserAction::Login(
            stellar_client::api::LoginRequest {
                email: "ada@example.test".to_owned(),
                password: "secret".to_owned(),
            },
        )))
        .await
        .unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();
    assert!(h.credentials.access_token().is_some());

    h.store
        .send(AppAction::User(UserAction::Logout))
        .await
        .unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();

    assert!(h.credentials.access_token().is_none());
    assert!(h.credentials.refresh_token().is_none());
    h.store
        .state(|s| {
            assert!(s.user.user().is_none());
            assert!(s.user.auth_checked);
        })
        .await;
}

#[tokio::test]
async fn bootstrap_loads_catalog_and_probes_a_stored_session() {
    let h = harness();
    h.api
        .set_ingredients(Ok(vec![ingredient("bun-1", IngredientKind::Bun, 50)]));
    h.credentials.store("Bearer access", "refresh");

    h.store.send(AppAction::Bootstrap).await.unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();

    assert_eq!(h.api.calls().ingredients, 1);
    assert_eq!(h.api.calls().get_user, 1);
    h.store
        .state(|s| {
            assert_eq!(s.ingredients.catalog.phase(), Phase::Fulfilled);
            assert_eq!(s.user.user().unwrap().name, "Test User");
            assert!(s.user.auth_checked);
        })
        .await;
}

#[tokio::test]
async fn dead_session_probe_discards_credentials() {
    let h = harness();
    h.credentials.store("Bearer stale", "stale");
    h.api.set_user(Err(Some("jwt expired".to_owned())));

    h.store
        .send(AppAction::User(UserAction::Fetch))
        .await
        .unwrap();
    h.store.wait_until_idle(IDLE).await.unwrap();

    assert!(h.credentials.access_token().is_none());
    h.store
        .state(|s| {
            assert_eq!(s.user.identity.phase(), Phase::Rejected);
            assert_eq!(s.user.identity.error(), Some("jwt expired"));
            assert!(s.user.auth_checked);
        })
        .await;
}
