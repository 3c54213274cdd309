//! Aggregate merchant counts.

use serde::{Deserialize, Serialize};

use super::MerchantStatus;

/// Server-computed merchant counts. Treated as a read-only snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantStatistics {
    /// Total number of merchants.
    pub total: u64,
    /// Merchants with status `Active`.
    pub active: u64,
    /// Merchants with status `Pending`.
    pub pending: u64,
    /// Merchants with status `Suspended`.
    pub suspended: u64,
}

impl MerchantStatistics {
    /// Returns the count for one status.
    #[inline]
    #[must_use]
    pub const fn count_for(&self, status: MerchantStatus) -> u64 {
        match status {
            MerchantStatus::Active => self.active,
            MerchantStatus::Pending => self.pending,
            MerchantStatus::Suspended => self.suspended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_statistics() {
        let json = r#"{"total": 10, "active": 6, "pending": 3, "suspended": 1}"#;
        let stats: MerchantStatistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.count_for(MerchantStatus::Active), 6);
        assert_eq!(stats.count_for(MerchantStatus::Pending), 3);
        assert_eq!(stats.count_for(MerchantStatus::Suspended), 1);
    }

    #[test]
    fn default_is_all_zero() {
        let stats = MerchantStatistics::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.active + stats.pending + stats.suspended, 0);
    }
}
