//! Filter/search evaluation over an in-memory collection.
//!
//! The filtered view is a pure function of (collection, query, filters)
//! and is recomputed on every call; nothing is cached between calls.

use crate::models::filter::FilterState;
use crate::models::listing::ListingItem;

/// Whether any search field contains the lowercased query.
pub fn matches_query<T: ListingItem>(item: &T, query_lower: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(query_lower))
}

/// Whether an item passes the query and every active categorical filter.
pub fn matches<T: ListingItem>(item: &T, state: &FilterState<T::Filters>) -> bool {
    let text_ok = match state.normalized_query() {
        Some(q) => matches_query(item, &q),
        None => true,
    };
    text_ok && item.matches_filters(&state.filters)
}

/// Items of `collection` passing `state`, in collection order.
pub fn filtered_view<'a, T: ListingItem>(
    collection: &'a [T],
    state: &FilterState<T::Filters>,
) -> Vec<&'a T> {
    let query = state.normalized_query();
    collection
        .iter()
        .filter(|item| {
            query.as_deref().map_or(true, |q| matches_query(*item, q))
                && item.matches_filters(&state.filters)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::{Blog, BlogFilters, PublishStatus};
    use crate::models::filter::FilterChoice;
    use crate::models::order::{DeliveryStatus, Order, OrderFilters, PaymentStatus};
    use crate::models::product::{Product, ProductFilters};
    use serde_json::json;

    fn product(id: &str, name: &str, category: &str) -> Product {
        serde_json::from_value(json!({
            "_id": id, "name": name, "category": category, "countInStock": 1
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Oak Chair", "Chairs"),
            product("p2", "Walnut Table", "Tables"),
            product("p3", "Rocking CHAIR", "Chairs"),
            product("p4", "Pine Shelf", "Storage"),
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let items = catalog();
        let state = FilterState::<ProductFilters>::default();
        assert_eq!(filtered_view(&items, &state).len(), 4);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let items = catalog();
        let state = FilterState {
            query: "chair".to_string(),
            filters: ProductFilters::default(),
        };
        let ids: Vec<_> = filtered_view(&items, &state).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn query_and_filters_combine_with_and() {
        let items = catalog();
        let state = FilterState {
            query: "oak".to_string(),
            filters: ProductFilters {
                category: FilterChoice::Only("Tables".to_string()),
                ..Default::default()
            },
        };
        assert!(filtered_view(&items, &state).is_empty());
    }

    #[test]
    fn empty_collection_gives_empty_view() {
        let items: Vec<Product> = vec![];
        let state = FilterState {
            query: "anything".to_string(),
            filters: ProductFilters::default(),
        };
        assert!(filtered_view(&items, &state).is_empty());
    }

    #[test]
    fn view_is_sound_and_complete() {
        let items = catalog();
        let states = [
            FilterState::default(),
            FilterState {
                query: "a".to_string(),
                filters: ProductFilters::default(),
            },
            FilterState {
                query: "".to_string(),
                filters: ProductFilters {
                    category: FilterChoice::Only("Chairs".to_string()),
                    ..Default::default()
                },
            },
            FilterState {
                query: "xyz".to_string(),
                filters: ProductFilters::default(),
            },
        ];

        for state in &states {
            let view = filtered_view(&items, state);
            for item in &view {
                assert!(items.iter().any(|i| i.id == item.id));
                assert!(matches(*item, state));
            }
            for item in &items {
                if !view.iter().any(|v| v.id == item.id) {
                    assert!(!matches(item, state), "{} wrongly excluded", item.id);
                }
            }
        }
    }

    #[test]
    fn blog_status_filter() {
        let blogs: Vec<Blog> = serde_json::from_value(json!([
            { "_id": "b1", "title": "Spring collection", "published": true },
            { "_id": "b2", "title": "Draft notes", "published": false },
        ]))
        .unwrap();
        let state = FilterState {
            query: String::new(),
            filters: BlogFilters {
                status: FilterChoice::Only(PublishStatus::Published),
                ..Default::default()
            },
        };
        let view = filtered_view(&blogs, &state);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "b1");
    }

    #[test]
    fn order_search_matches_customer_email() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            { "_id": "o1", "user": { "name": "Ada", "email": "ada@example.com" }, "isPaid": true },
            { "_id": "o2", "user": { "name": "Bob", "email": "bob@example.com" }, "isPaid": true },
        ]))
        .unwrap();
        let state = FilterState {
            query: "ADA@".to_string(),
            filters: OrderFilters {
                payment: FilterChoice::Only(PaymentStatus::Paid),
                delivery: FilterChoice::Only(DeliveryStatus::Pending),
            },
        };
        let view = filtered_view(&orders, &state);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "o1");
    }
}
