//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned id; empty means never persisted
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category reference (String ID)
    pub category: String,
    pub original_price: Decimal,
    pub discount_price: Decimal,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub sold_out: i32,
    /// Canonical image URLs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
}

impl ProductUpdate {
    /// True when no field has been set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.original_price.is_none()
            && self.discount_price.is_none()
            && self.stock.is_none()
    }
}
