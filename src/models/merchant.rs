//! Merchant record and its write payloads.

use serde::{Deserialize, Serialize};

use super::{MerchantId, MerchantStatus};

/// A business record managed through the admin API.
///
/// `id` and the timestamps are owned by the server. The client never edits a
/// `Merchant` in place; writes go through [`MerchantFormData`] or
/// [`MerchantPatch`] and the collection is re-fetched afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Server-assigned identifier.
    pub id: MerchantId,
    /// Business name.
    pub name: String,
    /// Registration number, unique across merchants (checked by the backend).
    pub business_registration_number: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Lifecycle status.
    pub status: MerchantStatus,
    /// Creation timestamp, as sent by the server.
    pub created_at: String,
    /// Last modification timestamp, as sent by the server.
    pub updated_at: String,
}

/// The mutable subset of a [`Merchant`], sent on create and full update.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantFormData {
    /// Business name.
    pub name: String,
    /// Registration number.
    pub business_registration_number: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Lifecycle status. Defaults to `Pending`.
    pub status: MerchantStatus,
}

impl From<&Merchant> for MerchantFormData {
    #[inline]
    fn from(merchant: &Merchant) -> Self {
        Self {
            name: merchant.name.clone(),
            business_registration_number: merchant.business_registration_number.clone(),
            email: merchant.email.clone(),
            phone: merchant.phone.clone(),
            status: merchant.status,
        }
    }
}

/// Partial update payload. Unset fields are left out of the request body.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantPatch {
    /// New business name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_registration_number: Option<String>,
    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MerchantStatus>,
}

impl MerchantPatch {
    /// Creates a patch that only changes the status.
    #[inline]
    #[must_use]
    pub fn status(status: MerchantStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch would change nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.business_registration_number.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_merchant() {
        let json = r#"{
            "id": 5,
            "name": "Acme",
            "business_registration_number": "BRN1",
            "email": "a@b.com",
            "phone": "+100",
            "status": "Pending",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }"#;
        let merchant: Merchant = serde_json::from_str(json).unwrap();
        assert_eq!(merchant.id, MerchantId::new(5));
        assert_eq!(merchant.name, "Acme");
        assert_eq!(merchant.status, MerchantStatus::Pending);
        assert_eq!(merchant.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn form_data_default_is_blank_pending() {
        let data = MerchantFormData::default();
        assert!(data.name.is_empty());
        assert!(data.business_registration_number.is_empty());
        assert_eq!(data.status, MerchantStatus::Pending);
    }

    #[test]
    fn form_data_has_no_server_fields() {
        let data = MerchantFormData {
            name: "Acme".to_owned(),
            business_registration_number: "BRN1".to_owned(),
            email: "a@b.com".to_owned(),
            phone: "+100".to_owned(),
            status: MerchantStatus::Pending,
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Acme",
                "business_registration_number": "BRN1",
                "email": "a@b.com",
                "phone": "+100",
                "status": "Pending"
            })
        );
    }

    #[test]
    fn form_data_from_merchant_copies_editable_fields() {
        let merchant = Merchant {
            id: MerchantId::new(9),
            name: "Globex".to_owned(),
            business_registration_number: "BRN9".to_owned(),
            email: "g@x.com".to_owned(),
            phone: "+999".to_owned(),
            status: MerchantStatus::Suspended,
            created_at: "c".to_owned(),
            updated_at: "u".to_owned(),
        };
        let data = MerchantFormData::from(&merchant);
        assert_eq!(data.name, "Globex");
        assert_eq!(data.business_registration_number, "BRN9");
        assert_eq!(data.status, MerchantStatus::Suspended);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = MerchantPatch::status(MerchantStatus::Active);
        assert!(!patch.is_empty());
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"Active"}"#);
        assert!(MerchantPatch::default().is_empty());
    }
}
