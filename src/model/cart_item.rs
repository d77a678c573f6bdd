use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Type-safe identifier for catalog products in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a line in the shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for CartItem`](#impl-ActorEntity-for-CartItem) for details on:
/// - Creation parameters ([`NewCartItem`])
/// - Custom actions ([`CartAction`](crate::cart_actor::CartAction))
///
/// The serialized field names match the JSON array persisted by earlier releases of the
/// app, so carts saved before an upgrade load unchanged. Fields this type doesn't know are
/// kept in `extra` and written back with the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Creates a new CartItem instance.
    ///
    /// # Arguments
    /// * `id` - Catalog product identifier
    /// * `title` - Display title
    /// * `image_url` - Product image reference
    /// * `price` - Unit price
    /// * `quantity` - Units in the cart
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity,
            extra: Map::new(),
        }
    }

    /// `price × quantity` for this line.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A product being put into the cart: every field of [`CartItem`] except the quantity,
/// which the cart owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewCartItem {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// The cart line this product becomes when first added.
    pub fn into_item(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
            extra: Map::new(),
        }
    }
}

/// Totals over a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartSummary {
    /// Number of lines.
    pub distinct_items: usize,
    /// Sum of all quantities.
    pub total_quantity: u32,
    /// Sum of `price × quantity` over all lines.
    pub subtotal: f64,
}

impl CartSummary {
    pub fn from_items(items: &[CartItem]) -> Self {
        items.iter().fold(
            Self {
                distinct_items: items.len(),
                ..Self::default()
            },
            |summary, item| Self {
                total_quantity: summary.total_quantity.saturating_add(item.quantity),
                subtotal: summary.subtotal + item.line_total(),
                ..summary
            },
        )
    }
}
