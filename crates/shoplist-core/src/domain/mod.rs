//! The shopping list domain: validated values, products and the list itself.
//!
//! Nothing in here performs I/O or logs. Every rejected input comes back to
//! the caller as a [`ShoppingListError`](crate::errors::ShoppingListError).

pub mod price;
pub mod product;
pub mod shopping_list;
pub mod values;

pub use price::Price;
pub use product::{Category, Product};
pub use shopping_list::{ShoppingList, MAX_ITEMS};
pub use values::{Description, Email, Manufacturer, Name, Password, Quantity, Username};
