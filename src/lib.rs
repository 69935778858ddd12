//! shop-api - a document-backed REST service for products and items

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod observability;
pub mod store;
