//! Product records
//!
//! Shapes of the records the backend owns. Nothing is validated locally;
//! every field the backend may omit decodes to its default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a product or material is made or stored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Absent for records not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A product and, recursively, the materials it is made of
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Harmonized System classification code
    #[serde(default)]
    pub hs_code: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub recycled_pct: Option<f64>,
    #[serde(default)]
    pub waste_pct: Option<f64>,
    #[serde(default)]
    pub lifetime_amount: Option<f64>,
    #[serde(default)]
    pub materials: Vec<Product>,
}

impl Product {
    /// Number of materials including nested ones
    pub fn material_count(&self) -> usize {
        self.materials
            .iter()
            .map(|m| 1 + m.material_count())
            .sum()
    }
}

/// Pull the record array out of a list response.
/// Accepts a bare array or a `{ "data": [...] }` envelope.
pub fn list_records(response: &Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .get("data")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Total announced by the backend, falling back to the record count
pub fn list_total(response: &Value) -> usize {
    response
        .get("total")
        .and_then(|v| v.as_u64())
        .map(|t| t as usize)
        .unwrap_or_else(|| list_records(response).len())
}

/// Decode a list response into typed products
pub fn decode_products(response: &Value) -> Result<Vec<Product>, serde_json::Error> {
    list_records(response)
        .into_iter()
        .map(serde_json::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn beanie() -> Value {
        json!({
            "id": "0a9f9b42-6b65-47b7-833b-cd3f8c6d64a0",
            "name": "Organic Cotton Fine Knit Beanie",
            "description": "Made from 100% organic cotton",
            "hs_code": "650500",
            "location": {
                "id": "7a6cf93c-ccfb-464f-8970-3c9f8b03b758",
                "name": "Beechfield Brands Warehouse",
                "country_code": "UK"
            },
            "weight_kg": 0.1,
            "recycled_pct": 30,
            "waste_pct": 5,
            "lifetime_amount": 2,
            "materials": [
                {
                    "id": "166e8b08-0c9e-44bc-95e2-d33b501b19d5",
                    "name": "Organic Cotton Yarn",
                    "weight_kg": 0.05,
                    "materials": [{"name": "Raw Cotton"}]
                }
            ]
        })
    }

    #[test]
    fn test_decode_nested_product() {
        let product: Product = serde_json::from_value(beanie()).unwrap();
        assert_eq!(product.name, "Organic Cotton Fine Knit Beanie");
        assert_eq!(product.recycled_pct, Some(30.0));
        assert_eq!(
            product.location.as_ref().and_then(|l| l.country_code.as_deref()),
            Some("UK")
        );
        assert_eq!(product.materials[0].name, "Organic Cotton Yarn");
        assert_eq!(product.material_count(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let product: Product = serde_json::from_value(json!({"name": "Bare"})).unwrap();
        assert!(product.id.is_none());
        assert!(product.location.is_none());
        assert!(product.materials.is_empty());
    }

    #[test]
    fn test_new_product_serializes_without_id() {
        let product = Product {
            name: "Draft".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_records_from_bare_array() {
        let response = json!([beanie(), {"name": "Other"}]);
        assert_eq!(list_records(&response).len(), 2);
        assert_eq!(list_total(&response), 2);
    }

    #[test]
    fn test_records_from_envelope() {
        let response = json!({"data": [beanie()], "total": 7});
        let products = decode_products(&response).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(list_total(&response), 7);
    }

    #[test]
    fn test_records_from_unexpected_shape() {
        assert!(list_records(&json!("nope")).is_empty());
        assert!(list_records(&json!({"items": []})).is_empty());
    }
}
