//! Shared types for the bazaar storefront
//!
//! Domain models and API payloads used by both the editor core and the
//! HTTP client crate.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    AvatarResponse, Event, EventUpdate, Feature, HeroAboutResponse, HeroAboutUpdate, MediaFile,
    Product, ProductUpdate, ShopInfoUpdate, ShopProfile, SocialMediaEntry, MAX_FEATURES,
};
