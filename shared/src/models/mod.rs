//! Data models
//!
//! Shared between the editor core and the API client. Entity ids are
//! server-assigned opaque strings; an empty id means "never persisted"
//! and such an entity must not be targeted by update/delete calls.

pub mod event;
pub mod media;
pub mod product;
pub mod shop_profile;

// Re-exports
pub use event::*;
pub use media::*;
pub use product::*;
pub use shop_profile::*;
