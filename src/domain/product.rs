use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
///
/// Serialized with the catalog's storage keys (`Id`, `Name`, `Reference`, `Price`,
/// `Rating`). Unknown keys are ignored so rows carrying extra grid fields still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reference: String,
    pub price: f64,
    pub rating: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier (assigned by the catalog actor for new products)
    /// * `name` - Display name
    /// * `reference` - Unique reference code
    /// * `price` - Unit price in euros
    /// * `rating` - Score between 0 and 5
    #[allow(dead_code)]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        reference: impl Into<String>,
        price: f64,
        rating: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            reference: reference.into(),
            price,
            rating,
        }
    }

    /// Returns a copy of this product with the patch applied. The id never changes.
    pub fn patched(&self, patch: ProductPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            reference: patch.reference.unwrap_or_else(|| self.reference.clone()),
            price: patch.price.unwrap_or(self.price),
            rating: patch.rating.unwrap_or(self.rating),
        }
    }
}

/// Payload for adding a product. Carries no id; the catalog assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub reference: String,
    pub price: f64,
    pub rating: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, reference: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            price,
            rating,
        }
    }

    /// Builds a draft from raw form input.
    ///
    /// Price and rating are parsed after trimming. Text that is not a number becomes
    /// `NaN`, which validation rejects as out of range.
    pub fn from_form(name: impl Into<String>, reference: impl Into<String>, price: &str, rating: &str) -> Self {
        Self::new(name, reference, parse_number(price), parse_number(rating))
    }
}

/// A grid edit: each `Some` field replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub reference: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.reference.is_none() && self.price.is_none() && self.rating.is_none()
    }
}

/// Parses numeric cell or form text. Non-numeric or non-finite text (`inf`, `1e400`)
/// yields `NaN`, since snapshots can only hold finite numbers.
pub fn parse_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_storage_keys() {
        let product = Product::new(3, "Desk", "D-1", 120.0, 4.5);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["Id"], 3);
        assert_eq!(json["Name"], "Desk");
        assert_eq!(json["Reference"], "D-1");
        assert_eq!(json["Price"], 120.0);
        assert_eq!(json["Rating"], 4.5);
    }

    #[test]
    fn test_ignores_grid_row_id() {
        let raw = r#"{"Id":1,"id":1,"Name":"Lamp","Reference":"L-1","Price":9.5,"Rating":2}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product, Product::new(1, "Lamp", "L-1", 9.5, 2.0));
    }

    #[test]
    fn test_form_input_parsing() {
        let draft = ProductDraft::from_form("Chair", "C-1", " 12.5 ", "4");
        assert_eq!(draft.price, 12.5);
        assert_eq!(draft.rating, 4.0);

        let draft = ProductDraft::from_form("Chair", "C-1", "twelve", "");
        assert!(draft.price.is_nan());
        assert!(draft.rating.is_nan());

        for text in ["inf", "-infinity", "1e400", "NaN"] {
            assert!(parse_number(text).is_nan(), "{text}");
        }
        assert_eq!(parse_number("1e300"), 1e300);
    }

    #[test]
    fn test_patch_keeps_id_and_untouched_fields() {
        let product = Product::new(7, "Sofa", "S-7", 300.0, 3.0);
        let patched = product.patched(ProductPatch {
            price: Some(250.0),
            ..ProductPatch::default()
        });
        assert_eq!(patched, Product::new(7, "Sofa", "S-7", 250.0, 3.0));
        assert!(ProductPatch::default().is_empty());
    }
}
