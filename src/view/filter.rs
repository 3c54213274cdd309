//! Local status filtering.

use crate::models::{Merchant, MerchantStatus};

/// Returns the merchants whose status equals `status`, keeping order.
///
/// `None` keeps everything. Purely local: no request is made.
#[inline]
#[must_use]
pub fn filter_by_status(merchants: &[Merchant], status: Option<MerchantStatus>) -> Vec<&Merchant> {
    merchants
        .iter()
        .filter(|merchant| status.is_none_or(|wanted| merchant.status == wanted))
        .collect()
}
