//! ActorEntity trait implementation for the CartItem domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`CartItem`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! - Adding a product that is already in the cart increments its line.
//! - A line whose quantity reaches zero is not retained.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::framework::ActorEntity;
use crate::model::{CartItem, NewCartItem, ProductId};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for CartItem {
    type Id = ProductId;
    type Create = NewCartItem;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn create_id(params: &NewCartItem) -> &ProductId {
        &params.id
    }

    /// Creates a line with a quantity of one.
    fn from_create_params(params: NewCartItem) -> Result<Self, CartError> {
        if params.id.as_str().is_empty() {
            return Err(CartError::InvalidItem {
                id: params.id,
                reason: "empty product id".to_string(),
            });
        }
        // NaN and infinities serialize as JSON null and would make the cart unloadable.
        if !params.price.is_finite() {
            return Err(CartError::InvalidItem {
                id: params.id,
                reason: format!("price {} is not a finite number", params.price),
            });
        }
        Ok(params.into_item(1))
    }

    /// Adding an existing product counts as one more unit; title, image and price keep the
    /// values from when the line was created.
    async fn on_merge(&mut self, _params: NewCartItem, ctx: &()) -> Result<(), CartError> {
        self.handle_action(CartAction::Increment, ctx).await?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &(),
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Increment => {
                self.quantity = self
                    .quantity
                    .checked_add(1)
                    .ok_or_else(|| CartError::QuantityOverflow(self.id.clone()))?;
                Ok(CartActionResult::Increment(self.quantity))
            }
            CartAction::Decrement => {
                self.quantity = self.quantity.saturating_sub(1);
                Ok(CartActionResult::Decrement(self.quantity))
            }
        }
    }

    fn is_retained(&self) -> bool {
        self.quantity > 0
    }

    fn absorb_duplicate(&mut self, duplicate: Self) {
        self.quantity = self.quantity.saturating_add(duplicate.quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug(quantity: u32) -> CartItem {
        CartItem::new("1", "Mug", "mug.png", 10.0, quantity)
    }

    #[test]
    fn test_created_line_has_quantity_one() {
        let item = CartItem::from_create_params(NewCartItem::new("1", "Mug", "mug.png", 10.0))
            .unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.is_retained());
    }

    #[test]
    fn test_rejects_unpersistable_items() {
        let nan = CartItem::from_create_params(NewCartItem::new("1", "Mug", "mug.png", f64::NAN));
        assert!(matches!(nan, Err(CartError::InvalidItem { .. })));

        let empty = CartItem::from_create_params(NewCartItem::new("", "Mug", "mug.png", 1.0));
        assert!(matches!(empty, Err(CartError::InvalidItem { .. })));
    }

    #[tokio::test]
    async fn test_merge_increments_and_keeps_original_fields() {
        let mut item = mug(1);
        item.on_merge(NewCartItem::new("1", "Other", "other.png", 99.0), &())
            .await
            .unwrap();

        assert_eq!(item.quantity, 2);
        assert_eq!(item.title, "Mug");
        assert_eq!(item.price, 10.0);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_is_not_retained() {
        let mut item = mug(1);
        let result = item.handle_action(CartAction::Decrement, &()).await.unwrap();

        assert_eq!(result, CartActionResult::Decrement(0));
        assert!(!item.is_retained());
    }

    #[tokio::test]
    async fn test_increment_overflow() {
        let mut item = mug(u32::MAX);
        let err = item
            .handle_action(CartAction::Increment, &())
            .await
            .unwrap_err();

        assert_eq!(err, CartError::QuantityOverflow(ProductId::from("1")));
        assert_eq!(item.quantity, u32::MAX);
    }

    #[test]
    fn test_absorb_duplicate_sums_quantities() {
        let mut item = mug(2);
        item.absorb_duplicate(mug(3));
        assert_eq!(item.quantity, 5);
    }
}
