use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Value>,
    pub category: Option<String>,
    /// Only `false` or `"false"` hide the product.
    #[schema(value_type = Option<bool>)]
    pub active: Option<Value>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub uploaded_image: Option<String>,
}

impl ProductInput {
    pub fn price(&self) -> Option<f64> {
        self.price.as_ref().map(coerce_price)
    }

    pub fn is_active(&self) -> bool {
        !self.active.as_ref().is_some_and(is_explicit_false)
    }

    pub fn image(&self) -> Option<&str> {
        self.uploaded_image
            .as_deref()
            .or_else(|| self.image_url.as_deref().filter(|url| !url.is_empty()))
    }

    pub fn set_text_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = Some(value),
            "nameEn" => self.name_en = Some(value),
            "description" => self.description = Some(value),
            "price" => self.price = Some(Value::String(value)),
            "category" => self.category = Some(value),
            "active" => self.active = Some(Value::String(value)),
            "imageUrl" => self.image_url = Some(value),
            _ => tracing::debug!(field = name, "ignoring unknown product form field"),
        }
    }
}

/// Lenient numeric parse: JSON numbers as-is, strings by their leading
/// numeric prefix. Unparsable, non-finite and negative values become 0.
pub fn coerce_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_leading_float(raw),
        _ => None,
    };
    parsed
        .filter(|price| price.is_finite() && *price >= 0.0)
        .unwrap_or(0.0)
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map_or(s.len(), |(i, _)| i);
    (1..=end).rev().find_map(|len| s[..len].parse::<f64>().ok())
}

fn is_explicit_false(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => !flag,
        Value::String(raw) => raw == "false",
        _ => false,
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResult {
    pub removed: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn price_parses_like_a_form_field() {
        assert_eq!(coerce_price(&json!(12.5)), 12.5);
        assert_eq!(coerce_price(&json!("99")), 99.0);
        assert_eq!(coerce_price(&json!("  42.75 SAR")), 42.75);
        assert_eq!(coerce_price(&json!("1e3")), 1000.0);
        assert_eq!(coerce_price(&json!("abc")), 0.0);
        assert_eq!(coerce_price(&json!("")), 0.0);
        assert_eq!(coerce_price(&json!(null)), 0.0);
        assert_eq!(coerce_price(&json!(-5)), 0.0);
    }

    #[test]
    fn only_literal_false_deactivates() {
        let mut input = ProductInput::default();
        assert!(input.is_active());

        input.active = Some(json!("true"));
        assert!(input.is_active());
        input.active = Some(json!("off"));
        assert!(input.is_active());
        input.active = Some(json!(false));
        assert!(!input.is_active());
        input.active = Some(json!("false"));
        assert!(!input.is_active());
    }

    #[test]
    fn uploaded_image_beats_url() {
        let mut input = ProductInput {
            image_url: Some("https://cdn.example.com/a.png".into()),
            ..Default::default()
        };
        assert_eq!(input.image(), Some("https://cdn.example.com/a.png"));

        input.uploaded_image = Some("/uploads/1-b.png".into());
        assert_eq!(input.image(), Some("/uploads/1-b.png"));

        let blank = ProductInput {
            image_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank.image(), None);
    }

    #[test]
    fn text_fields_map_to_inputs() {
        let mut input = ProductInput::default();
        input.set_text_field("nameEn", "Oud".into());
        input.set_text_field("price", "150".into());
        input.set_text_field("active", "false".into());
        input.set_text_field("bogus", "x".into());

        assert_eq!(input.name_en.as_deref(), Some("Oud"));
        assert_eq!(input.price(), Some(150.0));
        assert!(!input.is_active());
    }
}
