//! Statistics cards.

use crate::error::Result;
use crate::models::{MerchantStatistics, MerchantStatus};

/// One statistics card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    /// Card heading.
    pub label: &'static str,
    /// Count shown on the card.
    pub count: u64,
    /// Status filter reported to the parent when the card is picked.
    /// `None` means "all merchants".
    pub filter: Option<MerchantStatus>,
}

/// Snapshot of server-side counts, fetched once per mount.
///
/// The snapshot is never merged with the merchant collection. A failed
/// fetch is logged and leaves the zero snapshot in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsPanel {
    /// Last fetched counts (zeros until a fetch succeeds).
    stats: MerchantStatistics,
    /// Whether the fetch is in flight.
    loading: bool,
}

impl StatisticsPanel {
    /// Freshly mounted panel: zero counts, loading.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stats: MerchantStatistics {
                total: 0,
                active: 0,
                pending: 0,
                suspended: 0,
            },
            loading: true,
        }
    }

    /// Current counts.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &MerchantStatistics {
        &self.stats
    }

    /// Whether the fetch is in flight. Nothing is rendered meanwhile.
    #[inline]
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Applies the outcome of the statistics fetch.
    #[inline]
    pub fn finish_load(&mut self, result: Result<MerchantStatistics>) {
        self.loading = false;
        match result {
            Ok(stats) => self.stats = stats,
            Err(err) => tracing::error!(error = %err, "Failed to fetch statistics"),
        }
    }

    /// The four cards, in display order.
    #[inline]
    #[must_use]
    pub const fn cards(&self) -> [StatCard; 4] {
        [
            StatCard {
                label: "Total Merchants",
                count: self.stats.total,
                filter: None,
            },
            StatCard {
                label: "Active",
                count: self.stats.active,
                filter: Some(MerchantStatus::Active),
            },
            StatCard {
                label: "Pending",
                count: self.stats.pending,
                filter: Some(MerchantStatus::Pending),
            },
            StatCard {
                label: "Suspended",
                count: self.stats.suspended,
                filter: Some(MerchantStatus::Suspended),
            },
        ]
    }
}

impl Default for StatisticsPanel {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
