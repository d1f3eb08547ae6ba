//! Storefront API client
//!
//! Defines the [`StorefrontApi`] contract the editor core consumes, plus
//! an HTTP implementation backed by reqwest with cookie-based session
//! credentials. A 401 from any endpoint maps to
//! [`ClientError::Unauthorized`], which the editor treats as fatal for
//! the whole save sequence rather than a per-operation failure.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::StorefrontApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpStorefrontClient;
