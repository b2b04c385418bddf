//! Cart state store.
//!
//! Single source of truth for the local cart mirror: line items, selected
//! country and currency, the remote cart reference, and the checkout state
//! once one exists. All mutation goes through [`reduce`], a pure function
//! over [`CartAction`] values; [`CartStore`] is the explicit context object
//! the workflow steps receive by reference.
//!
//! The store also owns the local-id to remote-id mapping for cart lines.
//! Local ids are minted client-side when an item is added; remote line ids
//! only become known when the remote cart is refreshed (`UpdateCart`), and
//! the mapping is consulted wherever a remote line-item id is required
//! (shipping resolution).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use seastack_core::{CartId, CheckoutId, LineItemId, LocalItemId, Money, ProductId, VariantId};

use crate::commerce::types::{Address, Cart as RemoteCart, LineItemInput};
use crate::commerce::{CommerceApi, CommerceError};

/// Top-level screens the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Product browsing.
    Products,
    /// Checkout workflow.
    Checkout,
    /// Payment provider selection.
    Payment,
}

/// A line item in the local cart mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Synthetic client-side id.
    pub local_id: LocalItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Variant ID, when a variant was chosen.
    pub variant_id: Option<VariantId>,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Quantity (>= 1).
    pub quantity: u32,
    /// Image URL.
    pub image: Option<String>,
}

/// Checkout state persisted after a successful checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Remote checkout id.
    pub id: CheckoutId,
    /// Buyer email.
    pub email: String,
    /// Billing address.
    pub billing_address: Address,
    /// Shipping address.
    pub shipping_address: Address,
    /// Buyer accepted the terms and conditions.
    pub accepts_terms_conditions: bool,
    /// Buyer accepted the purchase conditions.
    pub accepts_purchase_conditions: bool,
}

/// The identifying fields of a remote cart line, used to reconcile local
/// items with remote line ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRef {
    /// Remote line-item id.
    pub line_item_id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Variant ID.
    pub variant_id: Option<VariantId>,
}

impl LineRef {
    /// Extract the line refs from a remote cart snapshot.
    #[must_use]
    pub fn from_remote(cart: &RemoteCart) -> Vec<Self> {
        cart.line_items
            .iter()
            .map(|line| Self {
                line_item_id: line.id.clone(),
                product_id: line.product_id,
                variant_id: line.variant_id,
            })
            .collect()
    }
}

/// The cart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Remote cart id, once a cart exists.
    pub cart_id: Option<CartId>,
    /// Customer session the cart was created for.
    pub customer_session_id: Option<String>,
    /// Local cart line mirror.
    pub items: Vec<CartItem>,
    /// Local-id to remote line-id mapping.
    line_ids: HashMap<LocalItemId, LineItemId>,
    /// Selected shipping country (ISO 3166-1 alpha-2).
    pub selected_country: String,
    /// Selected currency (ISO 4217).
    pub selected_currency: String,
    /// Checkout state, once submission succeeded.
    pub checkout: Option<CheckoutState>,
    /// Currently shown screen.
    pub selected_screen: Screen,
}

impl CartState {
    /// An empty cart for the given country and currency.
    #[must_use]
    pub fn new(country: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            cart_id: None,
            customer_session_id: None,
            items: Vec::new(),
            line_ids: HashMap::new(),
            selected_country: country.into(),
            selected_currency: currency.into(),
            checkout: None,
            selected_screen: Screen::Products,
        }
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The remote line id a local item maps to, if known.
    #[must_use]
    pub fn remote_line_id(&self, local_id: LocalItemId) -> Option<&LineItemId> {
        self.line_ids.get(&local_id)
    }

    /// Sum of line totals, in the currency of the first line.
    ///
    /// Returns `None` for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Option<Money> {
        let first = self.items.first()?;
        let currency = first.price.currency_code.clone();
        let amount = self
            .items
            .iter()
            .map(|item| item.price.times(item.quantity).amount)
            .sum();
        Some(Money::new(amount, currency))
    }
}

/// Actions accepted by the cart reducer.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Append a line to the cart. Never merges with an existing
    /// product/variant pair; repeated adds stay separate lines.
    AddItem(CartItem),
    /// Remove a line. Removing an unknown id is a no-op.
    RemoveItem(LocalItemId),
    /// Switch the visible screen.
    SetSelectedScreen(Screen),
    /// Persist the checkout produced by a successful submission.
    SetCheckoutState(CheckoutState),
    /// Record the remote cart created for this session.
    CartCreated {
        /// Remote cart id.
        cart_id: CartId,
        /// Customer session the cart belongs to.
        customer_session_id: String,
    },
    /// Record a confirmed shipping country and reconcile line ids against
    /// the refreshed remote cart.
    SetShippingCountry {
        /// ISO 3166-1 alpha-2 country code.
        country: String,
        /// ISO 4217 currency the cart now prices in.
        currency: String,
        /// Line refs from the refreshed remote cart.
        lines: Vec<LineRef>,
    },
    /// Drop all cart and checkout state (after payment, or on demand).
    ResetCart,
}

/// Pure reducer over the cart state.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(item) => {
            state.items.push(item);
        }
        CartAction::RemoveItem(local_id) => {
            state.items.retain(|item| item.local_id != local_id);
            state.line_ids.remove(&local_id);
        }
        CartAction::SetSelectedScreen(screen) => {
            state.selected_screen = screen;
        }
        CartAction::SetCheckoutState(checkout) => {
            state.checkout = Some(checkout);
        }
        CartAction::CartCreated {
            cart_id,
            customer_session_id,
        } => {
            state.cart_id = Some(cart_id);
            state.customer_session_id = Some(customer_session_id);
        }
        CartAction::SetShippingCountry {
            country,
            currency,
            lines,
        } => {
            state.selected_country = country;
            state.selected_currency = currency;
            state.line_ids = reconcile_line_ids(&state.items, &state.line_ids, &lines);
        }
        CartAction::ResetCart => {
            state.cart_id = None;
            state.customer_session_id = None;
            state.items.clear();
            state.line_ids.clear();
            state.checkout = None;
            state.selected_screen = Screen::Products;
        }
    }
    state
}

/// Pair local items with remote lines.
///
/// Mappings that still point at a line present in the snapshot are kept.
/// Unmapped local items claim the first unclaimed remote line with the same
/// product/variant pair, in insertion order. Items left without a match stay
/// unmapped; shipping resolution treats them as soft failures.
fn reconcile_line_ids(
    items: &[CartItem],
    existing: &HashMap<LocalItemId, LineItemId>,
    lines: &[LineRef],
) -> HashMap<LocalItemId, LineItemId> {
    let mut mapped = HashMap::new();
    let mut claimed: HashSet<&LineItemId> = HashSet::new();

    // Keep mappings that survived the refresh
    for item in items {
        if let Some(line_id) = existing.get(&item.local_id)
            && lines.iter().any(|line| line.line_item_id == *line_id)
            && claimed.insert(line_id)
        {
            mapped.insert(item.local_id, line_id.clone());
        }
    }

    // Claim fresh lines for unmapped items
    for item in items {
        if mapped.contains_key(&item.local_id) {
            continue;
        }
        let candidate = lines.iter().find(|line| {
            line.product_id == item.product_id
                && line.variant_id == item.variant_id
                && !claimed.contains(&line.line_item_id)
        });
        if let Some(line) = candidate {
            claimed.insert(&line.line_item_id);
            mapped.insert(item.local_id, line.line_item_id.clone());
        }
    }

    mapped
}

/// The cart store: owned state plus a dispatch interface.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: CartState,
}

impl CartStore {
    /// A store with an empty cart for the given country and currency.
    #[must_use]
    pub fn new(country: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            state: CartState::new(country, currency),
        }
    }

    /// Read access to the current state.
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply an action through the reducer.
    pub fn dispatch(&mut self, action: CartAction) {
        debug!(?action, "dispatch");
        let state = std::mem::replace(&mut self.state, CartState::new("", ""));
        self.state = reduce(state, action);
    }
}

// =============================================================================
// Cart services (remote orchestration)
// =============================================================================

/// What to add to the cart.
#[derive(Debug, Clone)]
pub struct AddToCartRequest {
    /// Product ID.
    pub product_id: ProductId,
    /// Variant ID, when a variant was chosen.
    pub variant_id: Option<VariantId>,
    /// Product title for the local mirror.
    pub title: String,
    /// Unit price for the local mirror.
    pub price: Money,
    /// Quantity (>= 1).
    pub quantity: u32,
    /// Image URL for the local mirror.
    pub image: Option<String>,
}

/// Add an item to the cart, creating the remote cart first if none exists.
///
/// On success the local mirror gains an appended line and the line-id map is
/// refreshed from the remote cart.
///
/// # Errors
///
/// Returns an error if any remote call fails; the local mirror is only
/// updated after the remote add succeeded.
#[instrument(skip(api, store, request), fields(product_id = %request.product_id))]
pub async fn add_to_cart(
    api: &dyn CommerceApi,
    store: &mut CartStore,
    request: AddToCartRequest,
) -> Result<LocalItemId, CommerceError> {
    let cart_id = match store.state().cart_id.clone() {
        Some(cart_id) => cart_id,
        None => {
            let session_id = Uuid::new_v4().to_string();
            let currency = store.state().selected_currency.clone();
            let created = api.create_cart(&session_id, &currency).await?;
            store.dispatch(CartAction::CartCreated {
                cart_id: created.cart_id.clone(),
                customer_session_id: created.customer_session_id,
            });
            created.cart_id
        }
    };

    let mut line = LineItemInput::new(request.product_id, request.quantity);
    if let Some(variant_id) = request.variant_id {
        line = line.with_variant(variant_id);
    }
    api.add_item(&cart_id, vec![line]).await?;

    let local_id = LocalItemId::generate();
    store.dispatch(CartAction::AddItem(CartItem {
        local_id,
        product_id: request.product_id,
        variant_id: request.variant_id,
        title: request.title,
        price: request.price,
        quantity: request.quantity,
        image: request.image,
    }));

    // Refresh the remote snapshot so the new line gets a remote id mapping.
    // UpdateCart is the one operation that returns the full line list.
    let country = store.state().selected_country.clone();
    let cart = api.update_cart(&cart_id, &country).await?;
    let currency = cart
        .currency
        .clone()
        .unwrap_or_else(|| store.state().selected_currency.clone());
    store.dispatch(CartAction::SetShippingCountry {
        country,
        currency,
        lines: LineRef::from_remote(&cart),
    });

    Ok(local_id)
}

/// Change the cart's shipping country.
///
/// With no remote cart yet, only the local selection changes. Otherwise the
/// remote cart is updated and the local mirror re-synced from its response.
///
/// # Errors
///
/// Returns an error if the remote update fails; the local selection is left
/// unchanged in that case.
#[instrument(skip(api, store))]
pub async fn select_shipping_country(
    api: &dyn CommerceApi,
    store: &mut CartStore,
    country: &str,
) -> Result<(), CommerceError> {
    let Some(cart_id) = store.state().cart_id.clone() else {
        let currency = store.state().selected_currency.clone();
        store.dispatch(CartAction::SetShippingCountry {
            country: country.to_string(),
            currency,
            lines: Vec::new(),
        });
        return Ok(());
    };

    let cart = api.update_cart(&cart_id, country).await?;
    let currency = cart
        .currency
        .clone()
        .unwrap_or_else(|| store.state().selected_currency.clone());
    store.dispatch(CartAction::SetShippingCountry {
        country: country.to_string(),
        currency,
        lines: LineRef::from_remote(&cart),
    });

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(title: &str, amount: Decimal, quantity: u32) -> CartItem {
        CartItem {
            local_id: LocalItemId::generate(),
            product_id: ProductId::new(1),
            variant_id: None,
            title: title.to_string(),
            price: Money::new(amount, "NOK"),
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_add_appends_remove_matches() {
        let mut store = CartStore::new("NO", "NOK");
        let first = item("Candle", Decimal::new(1000, 2), 1);
        let second = item("Candle", Decimal::new(1000, 2), 1);
        let second_id = second.local_id;

        store.dispatch(CartAction::AddItem(first));
        store.dispatch(CartAction::AddItem(second));
        assert_eq!(store.state().item_count(), 2);

        store.dispatch(CartAction::RemoveItem(second_id));
        assert_eq!(store.state().item_count(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = CartStore::new("NO", "NOK");
        store.dispatch(CartAction::AddItem(item("Candle", Decimal::new(1000, 2), 1)));

        store.dispatch(CartAction::RemoveItem(LocalItemId::generate()));
        assert_eq!(store.state().item_count(), 1);
    }

    #[test]
    fn test_repeated_add_does_not_merge_quantities() {
        // Same product twice stays two lines; no dedup semantics
        let mut store = CartStore::new("NO", "NOK");
        store.dispatch(CartAction::AddItem(item("Candle", Decimal::new(1000, 2), 1)));
        store.dispatch(CartAction::AddItem(item("Candle", Decimal::new(1000, 2), 1)));

        assert_eq!(store.state().item_count(), 2);
        assert!(store.state().items.iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut store = CartStore::new("NO", "NOK");
        store.dispatch(CartAction::AddItem(item("Candle", Decimal::new(1000, 2), 2)));

        let subtotal = store.state().subtotal().unwrap();
        assert_eq!(subtotal.amount, Decimal::new(2000, 2));
        assert_eq!(subtotal.currency_code, "NOK");
    }

    #[test]
    fn test_subtotal_empty_cart_is_none() {
        let store = CartStore::new("NO", "NOK");
        assert!(store.state().subtotal().is_none());
    }

    #[test]
    fn test_line_id_reconciliation_pairs_in_order() {
        let mut store = CartStore::new("NO", "NOK");
        let first = item("Candle", Decimal::new(1000, 2), 1);
        let second = item("Candle", Decimal::new(1000, 2), 1);
        let (first_id, second_id) = (first.local_id, second.local_id);
        store.dispatch(CartAction::AddItem(first));
        store.dispatch(CartAction::AddItem(second));

        store.dispatch(CartAction::SetShippingCountry {
            country: "NO".to_string(),
            currency: "NOK".to_string(),
            lines: vec![
                LineRef {
                    line_item_id: LineItemId::new("line-a"),
                    product_id: ProductId::new(1),
                    variant_id: None,
                },
                LineRef {
                    line_item_id: LineItemId::new("line-b"),
                    product_id: ProductId::new(1),
                    variant_id: None,
                },
            ],
        });

        assert_eq!(
            store.state().remote_line_id(first_id),
            Some(&LineItemId::new("line-a"))
        );
        assert_eq!(
            store.state().remote_line_id(second_id),
            Some(&LineItemId::new("line-b"))
        );
    }

    #[test]
    fn test_reconciliation_keeps_surviving_mappings() {
        let mut store = CartStore::new("NO", "NOK");
        let first = item("Candle", Decimal::new(1000, 2), 1);
        let first_id = first.local_id;
        store.dispatch(CartAction::AddItem(first));

        let lines = vec![LineRef {
            line_item_id: LineItemId::new("line-a"),
            product_id: ProductId::new(1),
            variant_id: None,
        }];
        store.dispatch(CartAction::SetShippingCountry {
            country: "NO".to_string(),
            currency: "NOK".to_string(),
            lines: lines.clone(),
        });

        // A second refresh with the same line keeps the mapping stable
        store.dispatch(CartAction::SetShippingCountry {
            country: "SE".to_string(),
            currency: "SEK".to_string(),
            lines,
        });
        assert_eq!(
            store.state().remote_line_id(first_id),
            Some(&LineItemId::new("line-a"))
        );
        assert_eq!(store.state().selected_country, "SE");
    }

    #[test]
    fn test_unmatched_item_stays_unmapped() {
        let mut store = CartStore::new("NO", "NOK");
        let first = item("Candle", Decimal::new(1000, 2), 1);
        let first_id = first.local_id;
        store.dispatch(CartAction::AddItem(first));

        store.dispatch(CartAction::SetShippingCountry {
            country: "NO".to_string(),
            currency: "NOK".to_string(),
            lines: vec![LineRef {
                line_item_id: LineItemId::new("line-z"),
                product_id: ProductId::new(99),
                variant_id: None,
            }],
        });

        assert!(store.state().remote_line_id(first_id).is_none());
    }

    #[test]
    fn test_reset_clears_cart_and_checkout() {
        let mut store = CartStore::new("NO", "NOK");
        store.dispatch(CartAction::CartCreated {
            cart_id: CartId::new("cart-1"),
            customer_session_id: "session-1".to_string(),
        });
        store.dispatch(CartAction::AddItem(item("Candle", Decimal::new(1000, 2), 1)));
        store.dispatch(CartAction::SetSelectedScreen(Screen::Payment));

        store.dispatch(CartAction::ResetCart);

        assert!(store.state().is_empty());
        assert!(store.state().cart_id.is_none());
        assert!(store.state().checkout.is_none());
        assert_eq!(store.state().selected_screen, Screen::Products);
    }
}
