//! Blog post model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::filter::FilterChoice;
use crate::models::listing::{ListingItem, Publishable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub views: u64,
    /// Remaining backend fields (slug, author, timestamps, body), sent back
    /// exactly as received on update, nulls included.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Publish status as shown in the status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishStatus {
    Published,
    Draft,
}

impl From<bool> for PublishStatus {
    fn from(published: bool) -> Self {
        if published {
            Self::Published
        } else {
            Self::Draft
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogFilters {
    pub status: FilterChoice<PublishStatus>,
    pub category: FilterChoice<String>,
}

impl ListingItem for Blog {
    type Filters = BlogFilters;

    const ENDPOINT: &'static str = "blogs";
    const NOUN: &'static str = "blog";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn matches_filters(&self, filters: &BlogFilters) -> bool {
        filters.status.admits(&PublishStatus::from(self.published))
            && filters.category.admits_str(&self.category)
    }
}

impl Publishable for Blog {
    fn is_published(&self) -> bool {
        self.published
    }

    fn with_published(&self, published: bool) -> Self {
        Self {
            published,
            ..self.clone()
        }
    }
}
