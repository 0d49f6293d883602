//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route table)
//!     → request.rs (request ID assigned / read)
//!     → users.rs (GET /users → name-service → JSON array)
//!     → response.rs (downstream failures → 502/504 JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod users;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
