//! The cart engine.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s, one per distinct product,
//! kept in the order products were first added. Totals are derived on every
//! call rather than stored, so they can never drift from the lines.
//!
//! Invariants:
//! - at most one line per product id
//! - every line has quantity >= 1
//!
//! Lines are dropped by [`Cart::remove`], [`Cart::clear`] or
//! [`Cart::remove_ordered`]; decrementing a quantity-1 line leaves it at 1.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product on this line.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for `product.id`, or appends a new
    /// quantity-1 line after the existing ones.
    pub fn add(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product.clone())),
        }
    }

    /// Add `product` only if it is not in the cart yet ("buy now").
    ///
    /// Returns `true` if a new line was inserted. An existing line keeps its
    /// quantity.
    pub fn add_if_absent(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.lines.push(CartLine::new(product.clone()));
        true
    }

    /// Delete the line for `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
    }

    /// Shift the quantity of the line for `id` by `delta`, never below 1.
    ///
    /// A delta that would take the quantity to zero or below clamps it to 1;
    /// the line is not removed. Absent ids are ignored.
    pub fn set_quantity_delta(&mut self, id: ProductId, delta: i64) {
        if let Some(line) = self.line_mut(id) {
            let next = i64::from(line.quantity).saturating_add(delta).max(1);
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take the units of an accepted order out of the cart.
    ///
    /// Each ordered line removes that many units of its product. Units added
    /// after the order was snapshotted stay in the cart.
    pub fn remove_ordered(&mut self, ordered: &[CartLine]) {
        for sold in ordered {
            let id = sold.product.id;
            let Some(line) = self.line_mut(id) else {
                continue;
            };
            if line.quantity > sold.quantity {
                line.quantity -= sold.quantity;
            } else {
                self.remove(id);
            }
        }
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_value(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    /// Whether a line for `id` exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: u32, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Panjabi {id}"),
            price: Price::new(price),
            original_price: None,
            category: "Casual Panjabi".to_string(),
            image: format!("https://picsum.photos/seed/panjabi{id}/600/800"),
            badge: None,
        }
    }

    fn quantity_of(cart: &Cart, id: u32) -> Option<u32> {
        cart.line(ProductId::new(id)).map(CartLine::quantity)
    }

    fn assert_totals_consistent(cart: &Cart) {
        let value: u64 = cart
            .lines()
            .iter()
            .map(|l| l.product().price.amount() * u64::from(l.quantity()))
            .sum();
        let count: u32 = cart.lines().iter().map(CartLine::quantity).sum();
        assert_eq!(cart.total_value(), Price::new(value));
        assert_eq!(cart.total_count(), count);
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_count(), 0);
        assert_eq!(cart.total_value(), Price::ZERO);
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let p = product(1, 3450);
        for n in 1..=25 {
            let mut cart = Cart::new();
            for _ in 0..n {
                cart.add(&p);
            }
            assert_eq!(cart.len(), 1);
            assert_eq!(quantity_of(&cart, 1), Some(n));
        }
    }

    #[test]
    fn test_distinct_products_never_merge_and_keep_insertion_order() {
        let (a, b, c) = (product(3, 2800), product(1, 3450), product(2, 5200));
        let mut cart = Cart::new();
        for p in [&a, &b, &a, &c, &b, &a] {
            cart.add(p);
        }

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product().id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(quantity_of(&cart, 3), Some(3));
        assert_eq!(quantity_of(&cart, 1), Some(2));
        assert_eq!(quantity_of(&cart, 2), Some(1));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_delta_never_goes_below_one() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));

        cart.set_quantity_delta(ProductId::new(1), -5);
        assert_eq!(quantity_of(&cart, 1), Some(1));

        for delta in [-1, -100, i64::MIN, 0, -1] {
            cart.set_quantity_delta(ProductId::new(1), delta);
            assert_eq!(quantity_of(&cart, 1), Some(1));
        }
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_delta_arbitrary_sequence() {
        let mut cart = Cart::new();
        cart.add(&product(4, 4800));
        let id = ProductId::new(4);

        let mut expected: i64 = 1;
        for delta in [3, -2, 7, -20, 1, 1, -1, 12, -3] {
            cart.set_quantity_delta(id, delta);
            expected = (expected + delta).max(1);
            assert_eq!(i64::from(quantity_of(&cart, 4).unwrap()), expected);
            assert_totals_consistent(&cart);
        }
    }

    #[test]
    fn test_delta_saturates_at_max() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1));
        cart.set_quantity_delta(ProductId::new(1), i64::MAX);
        assert_eq!(quantity_of(&cart, 1), Some(u32::MAX));
        cart.add(&product(1, 1));
        assert_eq!(quantity_of(&cart, 1), Some(u32::MAX));
    }

    #[test]
    fn test_delta_on_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));
        let before = cart.clone();
        cart.set_quantity_delta(ProductId::new(99), 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let p = product(6, 8500);
        let mut cart = Cart::new();
        cart.add(&p);
        cart.add(&p);
        cart.set_quantity_delta(p.id, 4);
        assert_eq!(quantity_of(&cart, 6), Some(6));

        cart.remove(p.id);
        assert!(!cart.contains(p.id));

        cart.add(&p);
        assert_eq!(quantity_of(&cart, 6), Some(1));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));
        cart.remove(ProductId::new(2));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut cart = Cart::new();
        for id in [5, 2, 9] {
            cart.add(&product(id, 1000));
        }
        cart.remove(ProductId::new(2));
        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product().id.get()).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_add_if_absent() {
        let p = product(2, 5200);
        let mut cart = Cart::new();
        assert!(cart.add_if_absent(&p));
        cart.add(&p);
        assert!(!cart.add_if_absent(&p));
        assert_eq!(quantity_of(&cart, 2), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));
        cart.add(&product(2, 5200));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_count(), 0);
        assert_eq!(cart.total_value(), Price::ZERO);
    }

    #[test]
    fn test_remove_ordered_keeps_later_additions() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));
        cart.add(&product(2, 5200));
        let ordered = cart.lines().to_vec();

        cart.add(&product(2, 5200));
        cart.add(&product(3, 2800));
        cart.remove_ordered(&ordered);

        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.line(ProductId::new(2)).map(CartLine::quantity), Some(1));
        assert_eq!(cart.line(ProductId::new(3)).map(CartLine::quantity), Some(1));
        assert_eq!(cart.total_count(), 2);
    }

    #[test]
    fn test_remove_ordered_of_whole_cart_empties_it() {
        let mut cart = Cart::new();
        cart.add(&product(1, 3450));
        cart.add(&product(1, 3450));
        let ordered = cart.lines().to_vec();

        cart.set_quantity_delta(ProductId::new(1), -1);
        cart.remove_ordered(&ordered);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_worked_example_totals() {
        let p = product(1, 3450);
        let mut cart = Cart::new();
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.total_count(), 2);
        assert_eq!(cart.total_value(), Price::new(6900));

        cart.set_quantity_delta(p.id, -1);
        assert_eq!(quantity_of(&cart, 1), Some(1));
        assert_eq!(cart.total_value(), Price::new(3450));
    }

    #[test]
    fn test_session_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&product(3, 2800));
        cart.add(&product(1, 3450));
        cart.set_quantity_delta(ProductId::new(3), 2);

        let json = serde_json::to_value(&cart).unwrap();
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
