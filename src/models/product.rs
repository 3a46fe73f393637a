//! Storefront product model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::FetchParams;
use crate::models::filter::FilterChoice;
use crate::models::listing::ListingItem;

/// Products requested from the backend in one call; further paging is local.
pub const PRODUCT_FETCH_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub count_in_stock: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.count_in_stock > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub category: FilterChoice<String>,
    pub stock: FilterChoice<StockStatus>,
}

impl ListingItem for Product {
    type Filters = ProductFilters;

    const ENDPOINT: &'static str = "products";
    const NOUN: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn matches_filters(&self, filters: &ProductFilters) -> bool {
        filters.category.admits_str(&self.category) && filters.stock.admits(&self.stock_status())
    }

    fn fetch_params() -> FetchParams {
        FetchParams {
            page: Some(1),
            limit: Some(PRODUCT_FETCH_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_shape() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Oak Chair",
            "category": "Chairs",
            "price": 129.5,
            "countInStock": 0,
            "numReviews": 4,
            "createdAt": "2024-03-01T10:00:00Z",
            "model3d": "ignored.glb"
        }))
        .unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.count_in_stock, 0);
        assert_eq!(product.stock_status(), StockStatus::OutOfStock);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn filters_combine_with_and() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1", "name": "Oak Chair", "category": "Chairs", "countInStock": 3
        }))
        .unwrap();

        let mut filters = ProductFilters::default();
        assert!(product.matches_filters(&filters));

        filters.category = FilterChoice::Only("chairs".to_string());
        assert!(product.matches_filters(&filters));

        filters.stock = FilterChoice::Only(StockStatus::OutOfStock);
        assert!(!product.matches_filters(&filters));
    }

    #[test]
    fn requests_bounded_batch() {
        let params = Product::fetch_params();
        assert_eq!(params.limit, Some(500));
    }
}
