//! Shop Profile Model (singleton per seller)

use serde::{Deserialize, Serialize};

/// Maximum number of feature entries on a shop profile.
pub const MAX_FEATURES: usize = 4;

/// Shop feature entry (title + icon key), shown in the about section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub icon_key: String,
}

/// Social media link entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaEntry {
    pub icon_key: String,
    pub url: String,
}

/// Shop profile entity
///
/// The server models this as three independent resources (avatar,
/// hero/about, info); the client sees one merged entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopProfile {
    pub id: String,
    /// Shop display name (required before save)
    pub name: String,
    /// Street address (required before save)
    pub address: String,
    /// Contact phone (required before save)
    pub phone: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hero_tagline: String,
    #[serde(default)]
    pub hero_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// At most [`MAX_FEATURES`] entries
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub social_media: Vec<SocialMediaEntry>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            description: String::new(),
            hero_tagline: String::new(),
            hero_description: String::new(),
            hero_image_url: None,
            about_image_url: None,
            logo_url: None,
            features: Vec::new(),
            social_media: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Update shop info payload (name, description, contact, links)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<Vec<SocialMediaEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
}

/// Update hero/about payload
///
/// The server treats hero + about as one resource; image files ride
/// alongside as multipart parts, not in this JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeroAboutUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
}

/// Avatar upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

/// Hero/about update response (canonical image URLs after upload)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeroAboutResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_info_update_skips_unset_fields() {
        let update = ShopInfoUpdate {
            name: Some("Acme".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Acme"}"#);
    }

    #[test]
    fn test_shop_profile_roundtrip() {
        let profile = ShopProfile {
            id: "shop:1".to_string(),
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            features: vec![Feature {
                title: "Free shipping".to_string(),
                icon_key: "truck".to_string(),
            }],
            ..Default::default()
        };

        let json = serde_json::to_string(&profile).unwrap();
        let back: ShopProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Acme");
        assert_eq!(back.features.len(), 1);
        assert!(back.logo_url.is_none());
    }
}
