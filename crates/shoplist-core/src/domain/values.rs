//! Validated value types for product fields and user credentials.
//!
//! Every type here is a thin wrapper around a primitive that can only be
//! obtained through a checking constructor. Once built the value never
//! changes, so holding one is proof that it satisfied its constraints.

use crate::errors::ShoppingListError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 \-_]+$").unwrap());
static MANUFACTURER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z _\-&]+$").unwrap());
static DESCRIPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-z0-9_\-().,;&:=è'"! ]*$"#).unwrap());
static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+\.*[A-Za-z]*@[A-Za-z]+\.[a-z]+$").unwrap());

const PASSWORD_SYMBOLS: &str = "@$!#*?&";

/// Length (in characters) and pattern check shared by all text values.
fn check_text(
    field: &'static str,
    value: &str,
    min_len: usize,
    max_len: usize,
    pattern: &Regex,
) -> Result<(), ShoppingListError> {
    let len = value.chars().count();
    if len < min_len {
        return Err(ShoppingListError::validation(
            field,
            format!("must be at least {} characters long (got {})", min_len, len),
        ));
    }
    if len > max_len {
        return Err(ShoppingListError::validation(
            field,
            format!("must be at most {} characters long (got {})", max_len, len),
        ));
    }
    if !pattern.is_match(value) {
        return Err(ShoppingListError::validation(
            field,
            format!("'{}' contains characters that are not allowed", value),
        ));
    }
    Ok(())
}

/// Conversions every text value shares. Construction always goes through
/// the type's own `new`, including deserialisation.
macro_rules! text_value {
    ($ty:ident) => {
        impl $ty {
            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ShoppingListError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                $ty::new(value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = ShoppingListError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                $ty::new(value)
            }
        }

        impl FromStr for $ty {
            type Err = ShoppingListError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::new(s)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

/// Product name: 1 to 25 letters, digits, spaces, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        check_text("name", &value, 1, 25, &NAME_PATTERN)?;
        Ok(Self(value))
    }
}

text_value!(Name);

/// Manufacturer: 2 to 20 letters, spaces, `_`, `-` or `&`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Manufacturer(String);

impl Manufacturer {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        check_text("manufacturer", &value, 2, 20, &MANUFACTURER_PATTERN)?;
        Ok(Self(value))
    }
}

text_value!(Manufacturer);

/// Free text description, up to 100 characters, may be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        check_text("description", &value, 0, 100, &DESCRIPTION_PATTERN)?;
        Ok(Self(value))
    }
}

text_value!(Description);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        check_text("username", &value, 8, 25, &USERNAME_PATTERN)?;
        Ok(Self(value))
    }
}

text_value!(Username);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        check_text("email", &value, 8, 25, &EMAIL_PATTERN)?;
        Ok(Self(value))
    }
}

text_value!(Email);

/// Account password.
///
/// 6 to 25 characters drawn from letters, digits and `@$!#*?&`, with at
/// least one lowercase letter, one uppercase letter, one digit and one of
/// the symbols. The secret is never printed or serialised: `Debug` and
/// `Display` are masked and only `Deserialize` is provided. Use
/// [`Password::expose`] to hand it to a transport.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Result<Self, ShoppingListError> {
        let value = value.into();
        let len = value.chars().count();
        if !(6..=25).contains(&len) {
            return Err(ShoppingListError::validation(
                "password",
                format!("must be between 6 and 25 characters long (got {})", len),
            ));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SYMBOLS.contains(*c))
        {
            return Err(ShoppingListError::validation(
                "password",
                format!("character '{}' is not allowed", c),
            ));
        }
        let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
        if !(has_lower && has_upper && has_digit && has_symbol) {
            return Err(ShoppingListError::validation(
                "password",
                format!(
                    "must contain a lowercase letter, an uppercase letter, a digit and one of {}",
                    PASSWORD_SYMBOLS
                ),
            ));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("****")
    }
}

impl TryFrom<String> for Password {
    type Error = ShoppingListError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Password::new(value)
    }
}

impl TryFrom<&str> for Password {
    type Error = ShoppingListError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Password::new(value)
    }
}

impl FromStr for Password {
    type Err = ShoppingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Password::new(s)
    }
}

/// Number of units of an item, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 5;

    pub fn new(value: u32) -> Result<Self, ShoppingListError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ShoppingListError::validation(
                "quantity",
                format!("must be between {} and {} (got {})", Self::MIN, Self::MAX, value),
            ));
        }
        Ok(Self(value))
    }

    /// Parses free text such as a prompt answer or a stored field.
    pub fn cast(text: &str) -> Result<Self, ShoppingListError> {
        let value = text.trim().parse::<u32>().map_err(|_| {
            ShoppingListError::validation("quantity", format!("'{}' is not a whole number", text))
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = ShoppingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::cast(s)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ShoppingListError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}
