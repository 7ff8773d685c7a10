//! Menu Item and Option Type Models

use crate::util::opt_f64;
use serde::{Deserialize, Serialize};

/// Menu item entity (Catalog Service)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "opt_f64")]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    /// Option types the customer picks from for this item
    #[serde(default)]
    pub option_types: Vec<OptionType>,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Option types that must have a selection before the item can be added to a cart
    pub fn required_option_types(&self) -> impl Iterator<Item = &OptionType> {
        self.option_types.iter().filter(|t| t.is_required)
    }
}

/// Option type entity (e.g. "Size", "Sauce")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionType {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub options: Vec<MenuOption>,
}

/// Selectable option inside an option type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "additionalPrice", deserialize_with = "opt_f64")]
    pub price: Option<f64>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}
