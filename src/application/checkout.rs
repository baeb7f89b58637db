//! The checkout workflow: a state machine over basket mutation, summary
//! preview, and order confirmation.
//!
//! The console layer parses raw input into [`Command`]s; this module owns
//! every transition. Each handled command returns either an [`Event`]
//! describing what happened or a [`DomainError`], in which case neither
//! the state nor the basket has changed and the session can retry.

use std::str::FromStr;

use chrono::Utc;

use crate::domain::basket::{Added, Basket};
use crate::domain::discount::{self, Quote};
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{OrderStore, ProductCatalog};
use crate::domain::product::Product;

/// Resting states of a checkout session.
///
/// Adding an item is not a resting state: `Command::AddItem` is handled
/// atomically from `Browsing` or `ReviewingBasket`, and a failed add
/// leaves the session exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Browsing,
    ReviewingBasket,
    ReviewingSummary,
    ConfirmingOrder,
    Completed,
}

/// A recognized answer to the confirmation prompt. Anything else is
/// rejected as `InvalidInput` and re-prompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmReply {
    Yes,
    No,
}

impl FromStr for ConfirmReply {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(ConfirmReply::Yes),
            "no" => Ok(ConfirmReply::No),
            other => Err(DomainError::InvalidInput(other.to_string())),
        }
    }
}

/// A parsed user action. Item positions are 1-based, as displayed.
#[derive(Debug, Clone)]
pub enum Command {
    AddItem { product_id: i32, quantity: i32 },
    OpenBasket,
    BackToBrowsing,
    SetQuantity { item: usize, quantity: i32 },
    RemoveItem { item: usize },
    OpenSummary,
    BackToBasket,
    PlaceOrder,
    Confirm(ConfirmReply),
}

/// What a successfully handled command did.
#[derive(Debug)]
pub enum Event {
    ItemAdded { product_name: String, quantity: i32 },
    QuantityMerged { product_name: String, quantity: i32 },
    QuantityChanged { product_name: String, quantity: i32 },
    ItemRemoved { product_name: String },
    Moved,
    ConfirmationDeclined,
    OrderPlaced(Order),
}

/// One interactive checkout session. Owns its basket exclusively; a new
/// session starts with a fresh basket.
pub struct Checkout<C, S> {
    catalog: C,
    store: S,
    basket: Basket,
    state: CheckoutState,
}

impl<C: ProductCatalog, S: OrderStore> Checkout<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Checkout {
            catalog,
            store,
            basket: Basket::new(),
            state: CheckoutState::Browsing,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn is_complete(&self) -> bool {
        self.state == CheckoutState::Completed
    }

    /// Products available on the browse screen.
    pub fn products(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog.list_products()
    }

    /// Price preview for the summary screen. Recomputed from the current
    /// basket on every call, never cached.
    pub fn summary(&self) -> Quote {
        discount::compute_discount(self.basket.total(), self.basket.items())
    }

    /// Apply one command to the current state.
    pub fn handle(&mut self, command: Command) -> Result<Event, DomainError> {
        use CheckoutState::{Browsing, ConfirmingOrder, ReviewingBasket, ReviewingSummary};

        match (self.state, command) {
            (
                Browsing | ReviewingBasket,
                Command::AddItem {
                    product_id,
                    quantity,
                },
            ) => self.add_item(product_id, quantity),
            (Browsing, Command::OpenBasket) => self.move_to(ReviewingBasket),
            (ReviewingBasket, Command::BackToBrowsing) => self.move_to(Browsing),
            (ReviewingBasket, Command::SetQuantity { item, quantity }) => {
                let entry = self.basket.set_quantity(item, quantity)?;
                Ok(Event::QuantityChanged {
                    product_name: entry.product_name.clone(),
                    quantity: entry.quantity,
                })
            }
            (ReviewingBasket, Command::RemoveItem { item }) => {
                let removed = self.basket.remove(item)?;
                Ok(Event::ItemRemoved {
                    product_name: removed.product_name,
                })
            }
            (ReviewingBasket, Command::OpenSummary) => self.move_to(ReviewingSummary),
            (ReviewingSummary, Command::BackToBasket) => self.move_to(ReviewingBasket),
            (ReviewingSummary, Command::PlaceOrder) => self.move_to(ConfirmingOrder),
            (ConfirmingOrder, Command::Confirm(ConfirmReply::No)) => {
                self.state = ReviewingSummary;
                Ok(Event::ConfirmationDeclined)
            }
            (ConfirmingOrder, Command::Confirm(ConfirmReply::Yes)) => self.place_order(),
            (state, command) => Err(DomainError::InvalidInput(format!(
                "{command:?} is not available while {state:?}"
            ))),
        }
    }

    fn move_to(&mut self, next: CheckoutState) -> Result<Event, DomainError> {
        self.state = next;
        Ok(Event::Moved)
    }

    /// Validate the product id and quantity, then merge into the basket.
    /// Nothing is applied unless both checks pass.
    fn add_item(&mut self, product_id: i32, quantity: i32) -> Result<Event, DomainError> {
        let product = self
            .catalog
            .get_product(product_id)?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        match self.basket.add(&product, quantity)? {
            Added::New => Ok(Event::ItemAdded {
                product_name: product.name,
                quantity,
            }),
            Added::Merged { quantity } => Ok(Event::QuantityMerged {
                product_name: product.name,
                quantity,
            }),
        }
    }

    /// Build the immutable order from the basket snapshot and hand it to
    /// the store. The basket is cleared only after the save succeeds, so
    /// a persistence failure leaves everything in place for a retry.
    fn place_order(&mut self) -> Result<Event, DomainError> {
        let quote = self.summary();
        let draft = NewOrder {
            order_date: Utc::now(),
            items: self.basket.items().to_vec(),
            subtotal: quote.subtotal,
            total: quote.total,
        };

        let order = self.store.save(&draft)?;
        self.basket.clear();
        self.state = CheckoutState::Completed;
        log::info!("Order {} saved, total {} PLN", order.id, order.total);
        Ok(Event::OrderPlaced(order))
    }
}
