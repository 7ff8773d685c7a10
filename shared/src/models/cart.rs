//! Cart Model

use super::menu::MenuItem;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/Cart/AddToCart`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub menu_item_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub selected_option_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AddToCartRequest {
    pub fn new(menu_item_id: i64, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
            selected_option_ids: Vec::new(),
            notes: None,
        }
    }

    pub fn with_option(mut self, option_id: i64) -> Self {
        if !self.selected_option_ids.contains(&option_id) {
            self.selected_option_ids.push(option_id);
        }
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Names of `item`'s required option types with no selected option
    ///
    /// Same shape as the backend's `MissingRequiredOptions` list, so the
    /// console can refuse the add before sending it.
    pub fn missing_required_options(&self, item: &MenuItem) -> Vec<String> {
        item.required_option_types()
            .filter(|t| {
                !t.options.iter().any(|o| {
                    o.id.is_some_and(|id| self.selected_option_ids.contains(&id))
                })
            })
            .map(|t| t.name.clone().unwrap_or_else(|| "Option".to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuOption, OptionType};

    #[test]
    fn test_add_to_cart_body() {
        let req = AddToCartRequest::new(12, 2).with_option(5).with_option(5).with_option(9);
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"menuItemId":12,"quantity":2,"selectedOptionIds":[5,9]}"#
        );
    }

    #[test]
    fn test_missing_required_options() {
        let opt = |id: i64| MenuOption {
            id: Some(id),
            ..Default::default()
        };
        let item = MenuItem {
            id: Some(1),
            option_types: vec![
                OptionType {
                    name: Some("Size".into()),
                    is_required: true,
                    options: vec![opt(1), opt(2)],
                    ..Default::default()
                },
                OptionType {
                    name: Some("Sauce".into()),
                    is_required: true,
                    options: vec![opt(3)],
                    ..Default::default()
                },
                OptionType {
                    name: Some("Extras".into()),
                    is_required: false,
                    options: vec![opt(4)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let req = AddToCartRequest::new(1, 1);
        assert_eq!(req.missing_required_options(&item), vec!["Size", "Sauce"]);
        let req = req.with_option(2).with_option(4);
        assert_eq!(req.missing_required_options(&item), vec!["Sauce"]);
        let req = req.with_option(3);
        assert!(req.missing_required_options(&item).is_empty());
    }
}
