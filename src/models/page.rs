//! Response shapes of the list endpoint.

use serde::{Deserialize, Serialize};

use super::Merchant;

/// Body of `GET /merchants/`.
///
/// The backend answers with a bare array, or with a paginated envelope when
/// pagination is enabled on its side. Only the first page is ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MerchantPage {
    /// Paginated envelope; `results` holds the merchants.
    Paginated {
        /// Total number of matching merchants, if reported.
        #[serde(default)]
        count: Option<u64>,
        /// URL of the next page, if any.
        #[serde(default)]
        next: Option<String>,
        /// URL of the previous page, if any.
        #[serde(default)]
        previous: Option<String>,
        /// Merchants on this page.
        results: Vec<Merchant>,
    },
    /// Plain JSON array of merchants.
    Bare(Vec<Merchant>),
}

impl MerchantPage {
    /// Unwraps the envelope, keeping the server's order.
    #[inline]
    #[must_use]
    pub fn into_merchants(self) -> Vec<Merchant> {
        match self {
            Self::Paginated { results, .. } => results,
            Self::Bare(merchants) => merchants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MerchantId;

    /// JSON for a single merchant with the given id and name.
    fn merchant_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "business_registration_number": format!("BRN{id}"),
            "email": format!("{name}@example.com"),
            "phone": "+1234567890",
            "status": "Active",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn bare_array_keeps_order() {
        let body = serde_json::json!([merchant_json(2, "b"), merchant_json(1, "a")]);
        let page: MerchantPage = serde_json::from_value(body).unwrap();
        let ids: Vec<MerchantId> = page.into_merchants().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MerchantId::new(2), MerchantId::new(1)]);
    }

    #[test]
    fn envelope_is_unwrapped() {
        let body = serde_json::json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [merchant_json(3, "c")]
        });
        let page: MerchantPage = serde_json::from_value(body).unwrap();
        assert!(matches!(page, MerchantPage::Paginated { count: Some(1), .. }));
        let merchants = page.into_merchants();
        assert_eq!(merchants.len(), 1);
        assert_eq!(merchants.first().map(|m| m.id), Some(MerchantId::new(3)));
    }

    #[test]
    fn empty_results_stay_empty() {
        let body = serde_json::json!({"results": []});
        let page: MerchantPage = serde_json::from_value(body).unwrap();
        assert!(page.into_merchants().is_empty());
    }

    #[test]
    fn unrelated_object_is_rejected() {
        let body = serde_json::json!({"detail": "nope"});
        assert!(serde_json::from_value::<MerchantPage>(body).is_err());
    }
}
