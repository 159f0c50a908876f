//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Products backed by the application's MongoDB database
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(state.db.clone());
    routes(ProductService::new(repository))
}

/// Mount the products handlers at `/products`
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", handlers::router(service))
}
