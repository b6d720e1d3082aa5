//! Product - Catalog records returned by the search and detail lookups
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ProductId;

/// ProductSummary - One row of a search result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Unique identifier of the product
    pub id: ProductId,
    /// Display name
    pub name: String,
}

impl ProductSummary {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
        }
    }
}

/// Product - Full record returned by the detail lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier of the product
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Image reference (URL); `null` and missing both mean "no image"
    #[serde(default)]
    pub image: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: f64,
}

impl Product {
    /// Create a product without image or description
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            image: None,
            description: String::new(),
            price,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Image reference, or `placeholder` when the product has none
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image.as_deref().unwrap_or(placeholder)
    }

    /// Project down to the fields a result list carries
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_payload_with_null_image() {
        let json = r#"{"id":1,"name":"Laptop","price":999,"description":"Thin","image":null,"stock":4}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, 999.0);
        assert_eq!(product.image, None);
        assert_eq!(product.image_or("placeholder.png"), "placeholder.png");
    }

    #[test]
    fn test_detail_payload_missing_optional_fields() {
        let json = r#"{"id":7,"name":"Mouse","price":19.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.description, "");
        assert_eq!(product.image, None);
        assert_eq!(product.summary(), ProductSummary::new(7, "Mouse"));
    }

    #[test]
    fn test_summary_ignores_extra_fields() {
        let json = r#"[{"id":1,"name":"Laptop","price":999,"category":"tech"}]"#;
        let items: Vec<ProductSummary> = serde_json::from_str(json).unwrap();

        assert_eq!(items, vec![ProductSummary::new(1, "Laptop")]);
    }
}
