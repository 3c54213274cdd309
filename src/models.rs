//! Data models for the merchant REST API.
//!
//! This module contains the merchant record, the form payloads sent on
//! create/update, the statistics snapshot and the list query/envelope types.

mod ids;
mod merchant;
mod page;
mod query;
mod statistics;
mod status;

pub use ids::MerchantId;
pub use merchant::{Merchant, MerchantFormData, MerchantPatch};
pub use page::MerchantPage;
pub use query::MerchantQuery;
pub use statistics::MerchantStatistics;
pub use status::{MerchantStatus, ParseStatusError};
