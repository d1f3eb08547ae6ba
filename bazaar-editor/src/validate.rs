//! Validation gate
//!
//! Checks the fixed set of required shop fields before a save may
//! proceed. A failure means the save never starts — zero network calls,
//! the session stays in editing mode, and the host UI gets the exact
//! failing field set to highlight.

use std::collections::BTreeSet;

use crate::draft::ShopDraft;

/// Required shop-profile field names, as surfaced to the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopFieldName {
    Name,
    Address,
    Phone,
}

impl ShopFieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopFieldName::Name => "name",
            ShopFieldName::Address => "address",
            ShopFieldName::Phone => "phone",
        }
    }
}

impl std::fmt::Display for ShopFieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check the required fields (name, address, phone).
///
/// Returns the set of failing fields; whitespace-only values count as
/// empty.
pub fn validate_shop(draft: &ShopDraft) -> Result<(), BTreeSet<ShopFieldName>> {
    let profile = draft.profile();
    let mut fields = BTreeSet::new();

    if profile.name.trim().is_empty() {
        fields.insert(ShopFieldName::Name);
    }
    if profile.address.trim().is_empty() {
        fields.insert(ShopFieldName::Address);
    }
    if profile.phone.trim().is_empty() {
        fields.insert(ShopFieldName::Phone);
    }

    if fields.is_empty() { Ok(()) } else { Err(fields) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;
    use shared::models::ShopProfile;

    fn draft_with(name: &str, address: &str, phone: &str) -> DraftStore {
        DraftStore::new(
            ShopProfile {
                id: "shop:1".to_string(),
                name: name.to_string(),
                address: address.to_string(),
                phone: phone.to_string(),
                ..Default::default()
            },
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_complete_profile_passes() {
        let draft = draft_with("Acme", "1 Main St", "555-0100");
        assert!(validate_shop(draft.shop()).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let draft = draft_with("", "1 Main St", "  ");
        let fields = validate_shop(draft.shop()).unwrap_err();

        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&ShopFieldName::Name));
        assert!(fields.contains(&ShopFieldName::Phone));
        assert!(!fields.contains(&ShopFieldName::Address));
    }
}
