//! Persistence of the shopping list between sessions.
//!
//! The list is stored as an ordered sequence of [`ListRecord`]s, one per
//! item. Backends only move records around; turning records back into
//! products goes through the same validation and list rules as user input.

pub mod file;
pub mod remote;

pub use file::FileStore;
pub use remote::RemoteStore;

use crate::auth::Session;
use crate::config::{ShopConfig, StorageBackend};
use crate::domain::{
    Category, Description, Manufacturer, Name, Price, Product, Quantity, ShoppingList,
};
use crate::errors::{AppError, ShoppingListError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Persisted form of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub category: String,
    pub name: String,
    pub manufacturer: String,
    pub price: String,
    pub quantity: u32,
    pub description: String,
}

impl ListRecord {
    pub fn from_product(product: &Product) -> Self {
        Self {
            category: product.category().as_str().to_string(),
            name: product.name().to_string(),
            manufacturer: product.manufacturer().to_string(),
            price: product.price().to_string(),
            quantity: product.quantity().value(),
            description: product.description().to_string(),
        }
    }

    pub fn to_product(&self) -> Result<Product, ShoppingListError> {
        Ok(Product::new(
            self.category.parse::<Category>()?,
            Name::new(self.name.as_str())?,
            Manufacturer::new(self.manufacturer.as_str())?,
            Price::parse(&self.price)?,
            Quantity::new(self.quantity)?,
            Description::new(self.description.as_str())?,
        ))
    }
}

/// Records for every item, in list order.
pub fn snapshot(list: &ShoppingList) -> Vec<ListRecord> {
    list.iter().map(ListRecord::from_product).collect()
}

/// Rebuild a list from stored records, enforcing capacity and duplicate
/// rules. Stops at the first record that cannot be added.
pub fn restore(records: &[ListRecord]) -> Result<ShoppingList, AppError> {
    let mut list = ShoppingList::new();
    for record in records {
        let product = record.to_product()?;
        match product.category() {
            Category::Smartphone => list.add_smartphone(product)?,
            Category::Computer => list.add_computer(product)?,
        }
    }
    Ok(list)
}

#[async_trait]
pub trait ListStore: Send + Sync {
    async fn load(&self) -> Result<Vec<ListRecord>, AppError>;
    async fn save(&self, records: &[ListRecord]) -> Result<(), AppError>;
    /// Human readable location, for log and status lines.
    fn describe(&self) -> String;
    fn attach_session(&mut self, _session: &Session) {}
}

/// Build the store selected by the configuration.
pub fn from_config(config: &ShopConfig) -> Result<Box<dyn ListStore>, AppError> {
    match config.storage.backend {
        StorageBackend::File => Ok(Box::new(FileStore::new(
            config.storage.path.clone(),
            config.storage.delimiter_byte(),
        ))),
        StorageBackend::Remote => Ok(Box::new(RemoteStore::new(&config.api)?)),
    }
}
