// o2ctl-api: Async Rust client for the OpenObserve management API

pub mod client;
pub mod dashboards;
pub mod error;
pub mod health;
pub mod models;
pub mod orgs;
pub mod roles;
pub mod schema;
pub mod service_accounts;
pub mod streams;
pub mod transport;
pub mod users;

pub use client::{AdminCredentials, ApiClient};
pub use error::Error;
pub use schema::SchemaGeneration;
