pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

use std::sync::Arc;

use backend::{Backend, FetchParams};
use models::blog::Blog;
use models::order::Order;
use models::product::Product;
use services::list_view::ListView;
use services::notifier::Notifier;

/// The three admin list views, sharing one backend and one notification sink.
pub struct Dashboard<B: Backend + Clone> {
    pub products: ListView<Product, B>,
    pub blogs: ListView<Blog, B>,
    pub orders: ListView<Order, B>,
}

impl<B: Backend + Clone> Dashboard<B> {
    pub fn new(backend: B, notifier: Arc<dyn Notifier>, config: &config::AppConfig) -> Self {
        let product_params = FetchParams {
            page: Some(1),
            limit: Some(config.product_fetch_limit),
        };
        Self {
            products: ListView::new(backend.clone(), notifier.clone())
                .with_fetch_params(product_params),
            blogs: ListView::new(backend.clone(), notifier.clone()),
            orders: ListView::new(backend, notifier),
        }
    }

    /// Load all three collections concurrently.
    pub async fn mount_all(&mut self) {
        tokio::join!(
            self.products.mount(),
            self.blogs.mount(),
            self.orders.mount()
        );
    }
}
