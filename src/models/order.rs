//! Customer order model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::filter::FilterChoice;
use crate::models::listing::{DeletePolicy, Deliverable, ListingItem};

/// Seconds an order delete stays disabled after the dialog opens.
pub const ORDER_DELETE_COUNTDOWN_SECS: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// `None` when the customer account no longer exists.
    #[serde(default)]
    pub user: Option<Customer>,
    #[serde(default)]
    pub order_items: Vec<OrderLine>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.order_items.iter().map(|l| l.qty).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Delivered,
    Pending,
}

impl From<bool> for PaymentStatus {
    fn from(is_paid: bool) -> Self {
        if is_paid {
            Self::Paid
        } else {
            Self::Unpaid
        }
    }
}

impl From<bool> for DeliveryStatus {
    fn from(is_delivered: bool) -> Self {
        if is_delivered {
            Self::Delivered
        } else {
            Self::Pending
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilters {
    pub payment: FilterChoice<PaymentStatus>,
    pub delivery: FilterChoice<DeliveryStatus>,
}

impl ListingItem for Order {
    type Filters = OrderFilters;

    const ENDPOINT: &'static str = "orders";
    const NOUN: &'static str = "order";
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Countdown(ORDER_DELETE_COUNTDOWN_SECS);

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        if let Some(user) = &self.user {
            fields.push(user.name.as_str());
            fields.push(user.email.as_str());
        }
        fields
    }

    fn matches_filters(&self, filters: &OrderFilters) -> bool {
        filters.payment.admits(&PaymentStatus::from(self.is_paid))
            && filters.delivery.admits(&DeliveryStatus::from(self.is_delivered))
    }
}

impl Deliverable for Order {
    fn is_delivered(&self) -> bool {
        self.is_delivered
    }
}
