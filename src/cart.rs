//! Session cart: product id → line snapshot.
//!
//! Lines capture the product's title, price and image at the moment it was
//! first added. A stored line always has a quantity of at least one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::watches::Model as WatchModel,
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub unit_price: i64,
    pub image_url: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CartOp {
    Increase,
    Decrease,
    Remove,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<Uuid, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, product_id: &Uuid) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    /// Add one unit of `product`. An existing line keeps its original price snapshot.
    pub fn add(&mut self, product: &WatchModel) -> &CartLine {
        self.lines
            .entry(product.id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                name: product.title.clone(),
                unit_price: product.price,
                image_url: product.image_url.clone(),
                quantity: 1,
            })
    }

    /// Apply `op` to an existing line. Returns the remaining quantity (0 when removed).
    pub fn apply(&mut self, product_id: Uuid, op: CartOp) -> AppResult<u32> {
        let line = self.lines.get_mut(&product_id).ok_or(AppError::NotInCart)?;
        let remaining = match op {
            CartOp::Increase => {
                line.quantity += 1;
                line.quantity
            }
            CartOp::Decrease => line.quantity.saturating_sub(1),
            CartOp::Remove => 0,
        };

        if remaining == 0 {
            self.lines.remove(&product_id);
        } else {
            line.quantity = remaining;
        }
        Ok(remaining)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn snapshot(&self) -> CartSnapshot {
        let items: Vec<CartItemView> = self
            .lines
            .iter()
            .map(|(product_id, line)| CartItemView {
                product_id: *product_id,
                name: line.name.clone(),
                unit_price: line.unit_price,
                image_url: line.image_url.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();
        let total_price = items.iter().map(|item| item.line_total).sum();
        let item_count = items.iter().map(|item| item.quantity).sum();
        CartSnapshot {
            items,
            total_price,
            item_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartItemView {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: i64,
    pub image_url: String,
    pub quantity: u32,
    pub line_total: i64,
}

/// Read-only copy of a cart. The cart view and checkout both price from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartSnapshot {
    pub items: Vec<CartItemView>,
    pub total_price: i64,
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn watch(title: &str, price: i64) -> WatchModel {
        WatchModel {
            id: Uuid::new_v4(),
            title: title.to_string(),
            brand_id: Uuid::new_v4(),
            gender_id: Uuid::new_v4(),
            type_id: Uuid::new_v4(),
            image_url: format!("https://img.example/{title}.png"),
            price,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn adding_twice_increments_and_leaves_others_alone() {
        let other = watch("Other", 1500);
        let target = watch("Target", 2000);
        let mut cart = Cart::new();
        cart.add(&other);
        let before = cart.get(&other.id).cloned();

        cart.add(&target);
        cart.add(&target);

        assert_eq!(cart.get(&target.id).map(|l| l.quantity), Some(2));
        assert_eq!(cart.get(&other.id).cloned(), before);
    }

    #[test]
    fn readd_keeps_original_price_snapshot() {
        let mut product = watch("Diver", 10000);
        let mut cart = Cart::new();
        cart.add(&product);
        product.price = 12000;
        cart.add(&product);

        let line = cart.get(&product.id).cloned().unwrap();
        assert_eq!(line.unit_price, 10000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn decrease_at_one_removes_the_line() {
        let product = watch("Pilot", 5000);
        let mut cart = Cart::new();
        cart.add(&product);

        let remaining = cart.apply(product.id, CartOp::Decrease).unwrap();

        assert_eq!(remaining, 0);
        assert!(cart.get(&product.id).is_none());
        assert!(cart.snapshot().items.iter().all(|i| i.quantity > 0));
    }

    #[test]
    fn ops_on_missing_line_fail_with_not_in_cart() {
        let mut cart = Cart::new();
        for op in [CartOp::Increase, CartOp::Decrease, CartOp::Remove] {
            let err = cart.apply(Uuid::new_v4(), op).unwrap_err();
            assert!(matches!(err, AppError::NotInCart));
        }
    }

    #[test]
    fn increase_and_remove() {
        let product = watch("Field", 3000);
        let mut cart = Cart::new();
        cart.add(&product);

        assert_eq!(cart.apply(product.id, CartOp::Increase).unwrap(), 2);
        assert_eq!(cart.apply(product.id, CartOp::Decrease).unwrap(), 1);
        assert_eq!(cart.apply(product.id, CartOp::Remove).unwrap(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_any_cart() {
        let mut cart = Cart::new();
        cart.add(&watch("A", 100));
        cart.add(&watch("B", 200));
        cart.clear();

        let snapshot = cart.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_price, 0);
        assert_eq!(snapshot.item_count, 0);
    }

    #[test]
    fn snapshot_sums_line_totals() {
        let a = watch("A", 10000);
        let b = watch("B", 4999);
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_price, 24999);
        assert_eq!(snapshot.item_count, 3);
        assert_eq!(snapshot.items.len(), 2);
    }
}
