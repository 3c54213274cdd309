//! Merchant lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a merchant. The backend owns transitions.
///
/// Serialized with the exact spellings the backend expects: `"Active"`,
/// `"Pending"`, `"Suspended"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantStatus {
    /// Merchant is approved and trading.
    Active,
    /// Merchant awaits review. New merchants start here.
    #[default]
    Pending,
    /// Merchant has been suspended.
    Suspended,
}

impl MerchantStatus {
    /// Every status, in the order the form offers them.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Active, Self::Suspended];

    /// Returns the wire spelling of the status.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
        }
    }
}

impl core::fmt::Display for MerchantStatus {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status must be one of: Active, Pending, Suspended (got {0:?})")]
pub struct ParseStatusError(String);

impl core::str::FromStr for MerchantStatus {
    type Err = ParseStatusError;

    /// Parses a status name, ignoring ASCII case.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}
