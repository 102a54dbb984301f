//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, transaction::TransactionType};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single glyph shown next to a category name, usually an emoji.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct CategoryIcon(String);

impl CategoryIcon {
    /// Create a category icon.
    ///
    /// Emoji built from several code points, such as flags or skin tone
    /// variants, count as one glyph.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategoryIcon] if `icon` is
    /// empty or has more than one glyph.
    pub fn new(icon: &str) -> Result<Self, Error> {
        let icon = icon.trim();

        if icon.graphemes(true).count() == 1 {
            Ok(Self(icon.to_owned()))
        } else {
            Err(Error::InvalidCategoryIcon(icon.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryIcon {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryIcon {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryIcon::new(&value)
    }
}

impl Display for CategoryIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-defined category for transactions of one type (e.g., '🛒 Groceries').
///
/// Names are unique per user and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The name of the category.
    pub name: CategoryName,
    /// The icon shown next to the name.
    pub icon: CategoryIcon,
    /// The type of transaction the category applies to.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Category {
    /// Create a category from unvalidated form input.
    ///
    /// # Errors
    ///
    /// This function will return an:
    /// - [Error::EmptyCategoryName] if `name` is empty,
    /// - or [Error::InvalidCategoryIcon] if `icon` is not a single glyph.
    pub fn new(name: &str, icon: &str, kind: TransactionType) -> Result<Self, Error> {
        Ok(Self {
            name: CategoryName::new(name)?,
            icon: CategoryIcon::new(icon)?,
            kind,
        })
    }
}
