//! Domain types shared across the state slices.
//!
//! Catalog ingredients and orders are immutable once fetched; only the
//! collections holding them change. Serde attributes mirror the REST API
//! wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned catalog identifier of an ingredient.
///
/// Distinct from the per-placement instance id used inside a composition:
/// the same `IngredientId` may appear several times in one burger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub String);

impl IngredientId {
    /// Build an id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for IngredientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a catalog ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// Bread; selected exclusively and counted twice in the price
    Bun,
    /// Filling
    Main,
    /// Also a filling for composition purposes
    Sauce,
}

impl IngredientKind {
    /// Whether this ingredient goes into the filling sequence
    /// (anything that is not a bun).
    #[must_use]
    pub const fn is_filling(self) -> bool {
        !matches!(self, Self::Bun)
    }
}

/// A catalog entry. Owned by the catalog slice, never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog identifier
    #[serde(rename = "_id")]
    pub id: IngredientId,
    /// Display name
    pub name: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    /// Proteins, grams
    pub proteins: u32,
    /// Fat, grams
    pub fat: u32,
    /// Carbohydrates, grams
    pub carbohydrates: u32,
    /// Energy value
    pub calories: u32,
    /// Unit price
    pub price: u64,
    /// Card image
    pub image: String,
    /// Mobile-size image
    pub image_mobile: String,
    /// Large image for detail views
    pub image_large: String,
}

/// Lifecycle status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Accepted, not yet being prepared
    #[serde(rename = "pending")]
    Pending,
    /// Being prepared
    #[serde(rename = "in-progress")]
    InProgress,
    /// Ready
    #[serde(rename = "done")]
    Done,
}

/// A placed order as returned by the server. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Server record id
    #[serde(rename = "_id")]
    pub id: String,
    /// Sequential human-facing order number
    pub number: u32,
    /// Current status
    pub status: OrderStatus,
    /// Display name derived from the composition
    pub name: String,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Catalog ids of the components, in submission order
    pub ingredients: Vec<IngredientId>,
}

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Contact identifier
    pub email: String,
}

/// The public order feed: recent orders plus running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersData {
    /// Most recent public orders
    pub orders: Vec<Order>,
    /// All-time completed order count
    pub total: u64,
    /// Orders completed today
    #[serde(rename = "totalToday")]
    pub total_today: u64,
}
