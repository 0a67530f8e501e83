//! # Bill Draft State
//!
//! The in-progress bill being assembled on the billing screen.
//!
//! ## Bill Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Draft Operations                                │
//! │                                                                         │
//! │  Frontend Action          Engine Call              Draft State Change   │
//! │  ───────────────          ───────────              ──────────────────   │
//! │                                                                         │
//! │  Click "Add Service" ────► add_item() ───────────► items.push(blank)   │
//! │                                                                         │
//! │  Pick a service ─────────► edit_item(Select..) ──► resolve name/price  │
//! │                                                                         │
//! │  Change quantity ────────► edit_item(SetQty..) ──► qty = n             │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ────────► items.retain(..)    │
//! │                                                                         │
//! │  Any change ─────────────► totals(discount) ─────► fresh BillTotals    │
//! │                                                                         │
//! │  NOTE: totals() is a pure recomputation from current inputs on every   │
//! │        call. Nothing is cached, so stale totals cannot exist.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `line_total == unit_price × quantity` for every item, after every edit
//! - Item order is insertion order (append-only; the display and billing order)
//! - An item with `service_id == 0` is incomplete: it still contributes its
//!   line total to the subtotal, but blocks submission

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percent};
use crate::types::{Patient, Service};

/// Sentinel service id for an item whose service has not been picked yet.
pub const UNSELECTED_SERVICE: u64 = 0;

// =============================================================================
// Line Item
// =============================================================================

/// One service entry on the bill being drafted.
///
/// ## Design Notes
/// - `id` is a draft-local identifier (monotonic counter), NOT a server id;
///   it only has to be stable for the lifetime of the draft so the UI can
///   address rows.
/// - `service_name` and `unit_price` are resolved from the catalog when the
///   service is selected and then kept on the item, so the row renders
///   consistently even if the catalog list is refreshed underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Draft-local row identifier.
    pub id: u64,

    /// Selected service id, or [`UNSELECTED_SERVICE`] while incomplete.
    pub service_id: u64,

    /// Service name at selection time.
    pub service_name: String,

    /// Units of the service.
    pub quantity: i64,

    /// Unit price at selection time.
    pub unit_price: Money,

    /// Always `unit_price × quantity`; recomputed on every edit.
    pub line_total: Money,
}

impl LineItem {
    /// Returns true if no service has been selected yet.
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        self.service_id == UNSELECTED_SERVICE
    }

    fn recompute_total(&mut self) {
        self.line_total = self.unit_price.multiply_quantity(self.quantity);
    }
}

// =============================================================================
// Item Edits
// =============================================================================

/// A single mutation to one line item.
///
/// Edits are tagged variants rather than a field-name string so that the
/// reducer in [`BillDraft::edit_item`] is exhaustive: adding a new editable
/// field is a compile error until every consumer handles it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum ItemEdit {
    /// Select a service; resolves name and unit price from the catalog.
    SelectService(u64),
    /// Set the quantity.
    SetQuantity(i64),
    /// Override the unit price (only meaningful before a service is picked).
    SetUnitPrice(Money),
}

// =============================================================================
// Discount
// =============================================================================

/// Discount type discriminator as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DiscountKind {
    Percentage,
    Amount,
}

/// A discount applied to the whole bill.
///
/// Neither form is clamped: a percentage above 100% or a flat amount above
/// the subtotal produces a negative grand total. That matches current product
/// behavior; the form validator rejects percentage > 100 before submission,
/// but the arithmetic itself stays faithful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount {
    /// Percentage of the subtotal.
    Percentage(Percent),
    /// Fixed amount off the subtotal.
    Flat(Money),
}

impl Discount {
    /// No discount.
    pub const fn none() -> Self {
        Discount::Percentage(Percent::from_bps(0))
    }

    /// The wire discriminator for this discount.
    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percentage(_) => DiscountKind::Percentage,
            Discount::Flat(_) => DiscountKind::Amount,
        }
    }

    /// The wire value for this discount: percent for percentage discounts,
    /// decimal rupees for flat ones.
    pub fn wire_value(&self) -> f64 {
        match self {
            Discount::Percentage(rate) => rate.percentage(),
            Discount::Flat(amount) => amount.rupees(),
        }
    }

    /// The discount amount for a given subtotal.
    pub fn amount_of(&self, subtotal: Money) -> Money {
        match self {
            Discount::Percentage(rate) => subtotal.percentage_share(*rate),
            Discount::Flat(amount) => *amount,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Derived totals for the bill summary panel.
///
/// Never stored: always recomputed from the current items and discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    /// `subtotal - discount_amount`; may be negative (not clamped).
    pub grand_total: Money,
}

// =============================================================================
// Bill Draft
// =============================================================================

/// The bill under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillDraft {
    items: Vec<LineItem>,
    next_item_id: u64,
}

impl BillDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        BillDraft {
            items: Vec::new(),
            next_item_id: 1,
        }
    }

    /// Appends a new incomplete item and returns its draft-local id.
    ///
    /// The new row starts unselected: service id 0, quantity 1, price 0.
    pub fn add_item(&mut self) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(LineItem {
            id,
            service_id: UNSELECTED_SERVICE,
            service_name: String::new(),
            quantity: 1,
            unit_price: Money::zero(),
            line_total: Money::zero(),
        });
        id
    }

    /// Applies one edit to the item with the given id.
    ///
    /// ## Behavior
    /// - `SelectService`: stores the service id; if the id is found in the
    ///   catalog, the name and unit price are resolved from it. An id absent
    ///   from the catalog (including re-selecting the placeholder) keeps the
    ///   previous name and price.
    /// - `SetQuantity` / `SetUnitPrice`: overwrite the field.
    /// - After ANY edit, `line_total` is recomputed as `unit_price × quantity`.
    /// - An unknown item id is a no-op; the draft is left untouched.
    pub fn edit_item(&mut self, id: u64, edit: ItemEdit, catalog: &[Service]) {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return;
        };

        match edit {
            ItemEdit::SelectService(service_id) => {
                item.service_id = service_id;
                if let Some(service) = catalog.iter().find(|s| s.id == service_id) {
                    item.service_name = service.name.clone();
                    item.unit_price = service.price;
                }
            }
            ItemEdit::SetQuantity(quantity) => {
                item.quantity = quantity;
            }
            ItemEdit::SetUnitPrice(price) => {
                item.unit_price = price;
            }
        }

        item.recompute_total();
    }

    /// Removes the item with the given id. Unknown id is a no-op.
    pub fn remove_item(&mut self, id: u64) {
        self.items.retain(|i| i.id != id);
    }

    /// Clears all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns true if no items have been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Computes the bill totals for the current items and the given discount.
    ///
    /// Pure and deterministic: same inputs, same totals. Incomplete items
    /// contribute their (usually zero) line totals to the subtotal.
    pub fn totals(&self, discount: &Discount) -> BillTotals {
        let subtotal: Money = self.items.iter().map(|i| i.line_total).sum();
        let discount_amount = discount.amount_of(subtotal);
        BillTotals {
            subtotal,
            discount_amount,
            grand_total: subtotal - discount_amount,
        }
    }

    /// The submission gate: checks whether the draft can be sent.
    ///
    /// ## Blocking Reasons (in check order)
    /// 1. No patient selected
    /// 2. No items on the bill
    /// 3. Any item without a selected service
    ///
    /// Returns the first blocking reason. This runs BEFORE any request is
    /// built, so an invalid bill never reaches the network layer.
    pub fn validate_for_submission(&self, patient: Option<&Patient>) -> CoreResult<()> {
        if patient.is_none() {
            return Err(CoreError::NoPatientSelected);
        }
        if self.items.is_empty() {
            return Err(CoreError::EmptyBill);
        }
        if let Some(item) = self.items.iter().find(|i| i.is_incomplete()) {
            return Err(CoreError::IncompleteItem { item_id: item.id });
        }
        Ok(())
    }
}

impl Default for BillDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
