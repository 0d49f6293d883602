//! User service library: relays the name-service's list of names on `GET /users`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod name_service;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use name_service::{ForwardError, NameList, NameServiceClient};
