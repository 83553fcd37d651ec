//! Smartphone and Computer items.
//!
//! Both variants carry exactly the same fields, so they share one [`Product`]
//! record tagged with a [`Category`].

use crate::domain::price::Price;
use crate::domain::values::{Description, Manufacturer, Name, Quantity};
use crate::errors::ShoppingListError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Smartphone,
    Computer,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Smartphone => "Smartphone",
            Category::Computer => "Computer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ShoppingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Smartphone" => Ok(Category::Smartphone),
            "Computer" => Ok(Category::Computer),
            other => Err(ShoppingListError::validation(
                "category",
                format!("unknown item type '{}'", other),
            )),
        }
    }
}

/// An immutable shopping list item.
///
/// `PartialEq` compares every field. Use [`Product::is_equal`] to ask whether
/// two products are the same item for the purpose of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    category: Category,
    name: Name,
    manufacturer: Manufacturer,
    price: Price,
    quantity: Quantity,
    description: Description,
}

impl Product {
    pub fn new(
        category: Category,
        name: Name,
        manufacturer: Manufacturer,
        price: Price,
        quantity: Quantity,
        description: Description,
    ) -> Self {
        Self {
            category,
            name,
            manufacturer,
            price,
            quantity,
            description,
        }
    }

    pub fn smartphone(
        name: Name,
        manufacturer: Manufacturer,
        price: Price,
        quantity: Quantity,
        description: Description,
    ) -> Self {
        Self::new(Category::Smartphone, name, manufacturer, price, quantity, description)
    }

    pub fn computer(
        name: Name,
        manufacturer: Manufacturer,
        price: Price,
        quantity: Quantity,
        description: Description,
    ) -> Self {
        Self::new(Category::Computer, name, manufacturer, price, quantity, description)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Same variant, same name and same manufacturer. Price, quantity and
    /// description are ignored.
    pub fn is_equal(&self, other: &Product) -> bool {
        self.category == other.category
            && self.name == other.name
            && self.manufacturer == other.manufacturer
    }

    /// Copy of this product with only the quantity replaced.
    pub fn with_quantity(&self, quantity: Quantity) -> Product {
        Product {
            quantity,
            ..self.clone()
        }
    }
}
