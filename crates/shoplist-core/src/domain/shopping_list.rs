//! The in-memory shopping list.
//!
//! An ordered sequence of at most [`MAX_ITEMS`] products addressed by
//! zero-based slot. No two members are the same item (see
//! [`Product::is_equal`]). Every operation either applies completely or
//! leaves the list untouched and returns the reason.

use crate::domain::price::Price;
use crate::domain::product::{Category, Product};
use crate::domain::values::Quantity;
use crate::errors::ShoppingListError;

pub const MAX_ITEMS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<Product>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(MAX_ITEMS),
        }
    }

    /// Number of items currently in the list.
    pub fn items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Result<&Product, ShoppingListError> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn add_smartphone(&mut self, smartphone: Product) -> Result<(), ShoppingListError> {
        Self::expect_category(&smartphone, Category::Smartphone)?;
        self.add(smartphone)
    }

    pub fn add_computer(&mut self, computer: Product) -> Result<(), ShoppingListError> {
        Self::expect_category(&computer, Category::Computer)?;
        self.add(computer)
    }

    /// Appends a product of either variant.
    pub fn add(&mut self, product: Product) -> Result<(), ShoppingListError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(ShoppingListError::Capacity { max: MAX_ITEMS });
        }
        if self.items.iter().any(|existing| product.is_equal(existing)) {
            return Err(ShoppingListError::DuplicateItem {
                name: product.name().to_string(),
                manufacturer: product.manufacturer().to_string(),
            });
        }
        self.items.push(product);
        Ok(())
    }

    /// Removes the item at `index`, shifting later items down one slot.
    pub fn remove_item(&mut self, index: usize) -> Result<Product, ShoppingListError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Replaces the item at `index` with a copy carrying the new quantity.
    pub fn change_quantity(
        &mut self,
        index: usize,
        quantity: Quantity,
    ) -> Result<(), ShoppingListError> {
        self.check_index(index)?;
        let updated = self.items[index].with_quantity(quantity);
        self.items[index] = updated;
        Ok(())
    }

    pub fn sort_by_manufacturer(&mut self) {
        self.items
            .sort_by(|a, b| a.manufacturer().cmp(b.manufacturer()));
    }

    pub fn sort_by_price(&mut self) {
        self.items.sort_by_key(|p| p.price());
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all items.
    pub fn total_price(&self) -> Result<Price, ShoppingListError> {
        let mut total = Price::zero();
        for product in &self.items {
            for _ in 0..product.quantity().value() {
                total = total.add(&product.price())?;
            }
        }
        Ok(total)
    }

    fn check_index(&self, index: usize) -> Result<(), ShoppingListError> {
        if index >= self.items.len() {
            return Err(ShoppingListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn expect_category(product: &Product, expected: Category) -> Result<(), ShoppingListError> {
        if product.category() != expected {
            return Err(ShoppingListError::validation(
                "category",
                format!("expected a {}, got a {}", expected, product.category()),
            ));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ShoppingList {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
