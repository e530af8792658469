//! HTTP surface for uploading survey images and reading back their records

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
