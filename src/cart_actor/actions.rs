//! Custom actions for the Cart actor.
//!
//! This module defines the quantity operations that can be performed on a single
//! [`CartItem`](crate::model::CartItem) line. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

/// Custom actions for cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Adds one unit to the line.
    Increment,
    /// Removes one unit from the line. A line that reaches zero leaves the cart.
    Decrement,
}

/// Results from CartActions - variants match 1:1 with CartAction.
/// Each carries the line's quantity after the action; `Decrement(0)` means the line was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartActionResult {
    Increment(u32),
    Decrement(u32),
}
