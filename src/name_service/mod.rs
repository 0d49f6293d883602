//! Downstream name-service integration.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (GET names_url, deadline, size limit)
//!     → types.rs (decode into NameList / classify ForwardError)
//!     → handler
//! ```

pub mod client;
pub mod types;

pub use client::NameServiceClient;
pub use types::{ForwardError, NameList};
