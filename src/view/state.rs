//! Flat UI state of the merchant board.

use crate::error::{MerchantError, Result};
use crate::models::{Merchant, MerchantId, MerchantStatus};

use super::{MerchantForm, filter_by_status};

/// Top-level pane of the board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Merchant table.
    #[default]
    Merchants,
    /// Statistics cards.
    Statistics,
}

/// Everything the merchant page shows, as independent fields.
///
/// The collection is either "not yet loaded" (loading, empty) or exactly
/// what the last successful list call returned. It is never patched
/// locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Last successfully listed merchants, in server order.
    merchants: Vec<Merchant>,
    /// Whether a list call is in flight.
    loading: bool,
    /// Banner message of the last failure.
    error: Option<String>,
    /// Active pane.
    tab: Tab,
    /// Local status filter.
    status_filter: Option<MerchantStatus>,
    /// Open form, if visible.
    form: Option<MerchantForm>,
}

impl BoardState {
    /// Initial state: loading, nothing fetched yet.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            merchants: Vec::new(),
            loading: true,
            error: None,
            tab: Tab::Merchants,
            status_filter: None,
            form: None,
        }
    }

    /// The full collection, ignoring the status filter.
    #[inline]
    #[must_use]
    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    /// The collection with the status filter applied.
    #[inline]
    #[must_use]
    pub fn visible_merchants(&self) -> Vec<&Merchant> {
        filter_by_status(&self.merchants, self.status_filter)
    }

    /// Looks up a listed merchant by id.
    #[inline]
    #[must_use]
    pub fn merchant(&self, id: MerchantId) -> Option<&Merchant> {
        self.merchants.iter().find(|merchant| merchant.id == id)
    }

    /// Whether a list call is in flight.
    #[inline]
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Banner message, if the last operation failed.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Active pane.
    #[inline]
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Current local status filter.
    #[inline]
    #[must_use]
    pub const fn status_filter(&self) -> Option<MerchantStatus> {
        self.status_filter
    }

    /// Marks a list call as started and clears the banner.
    #[inline]
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies the outcome of a list call.
    ///
    /// Success replaces the collection wholesale. Failure keeps the previous
    /// collection and sets the banner.
    #[inline]
    pub fn finish_load(&mut self, result: Result<Vec<Merchant>>) {
        self.loading = false;
        match result {
            Ok(merchants) => {
                tracing::debug!(count = merchants.len(), "merchant list replaced");
                self.merchants = merchants;
            }
            Err(err) => self.record_failure(&err),
        }
    }

    /// Shows a failed operation's message. The collection is untouched.
    #[inline]
    pub fn record_failure(&mut self, err: &MerchantError) {
        tracing::warn!(error = %err, "merchant operation failed");
        self.error = Some(err.to_string());
    }

    /// Hides the banner.
    #[inline]
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Switches pane. Navigating dismisses the banner.
    #[inline]
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.error = None;
    }

    /// Sets the local status filter. No request is made.
    #[inline]
    pub const fn set_status_filter(&mut self, status: Option<MerchantStatus>) {
        self.status_filter = status;
    }

    /// Applies a status picked on a statistics card: filter, then show the
    /// merchant table.
    #[inline]
    pub fn apply_statistics_selection(&mut self, status: Option<MerchantStatus>) {
        self.status_filter = status;
        self.set_tab(Tab::Merchants);
    }

    /// Whether the form is shown.
    #[inline]
    #[must_use]
    pub const fn is_form_visible(&self) -> bool {
        self.form.is_some()
    }

    /// The open form, if any.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> Option<&MerchantForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form, if any.
    #[inline]
    pub const fn form_mut(&mut self) -> Option<&mut MerchantForm> {
        self.form.as_mut()
    }

    /// The merchant being edited, if an edit form is open.
    #[inline]
    #[must_use]
    pub fn editing(&self) -> Option<MerchantId> {
        self.form.as_ref().and_then(MerchantForm::editing)
    }

    /// Opens a blank create form, replacing any open form.
    #[inline]
    pub fn open_create_form(&mut self) {
        self.form = Some(MerchantForm::create());
    }

    /// Opens an edit form pre-filled from `merchant`.
    #[inline]
    pub fn open_edit_form(&mut self, merchant: &Merchant) {
        self.form = Some(MerchantForm::edit(merchant));
    }

    /// Shows a create form if none is open, otherwise closes the open one.
    #[inline]
    pub fn toggle_form(&mut self) {
        if self.form.is_some() {
            self.close_form();
        } else {
            self.open_create_form();
        }
    }

    /// Closes the form and forgets the edit target.
    #[inline]
    pub fn close_form(&mut self) {
        self.form = None;
    }
}

impl Default for BoardState {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a merchant with the given id and status.
    fn merchant(id: i64, status: MerchantStatus) -> Merchant {
        Merchant {
            id: MerchantId::new(id),
            name: format!("Merchant {id}"),
            business_registration_number: format!("BRN{id}"),
            email: format!("m{id}@example.com"),
            phone: "+1234567890".to_owned(),
            status,
            created_at: "2024-01-01T00:00:00Z".to_owned(),
            updated_at: "2024-01-01T00:00:00Z".to_owned(),
        }
    }

    /// A state holding two listed merchants.
    fn loaded() -> BoardState {
        let mut state = BoardState::new();
        state.finish_load(Ok(vec![
            merchant(1, MerchantStatus::Active),
            merchant(2, MerchantStatus::Pending),
        ]));
        state
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = BoardState::new();
        assert!(state.is_loading());
        assert!(state.merchants().is_empty());
        assert_eq!(state.error(), None);
        assert_eq!(state.tab(), Tab::Merchants);
    }

    #[test]
    fn successful_load_replaces_collection_in_order() {
        let mut state = loaded();
        state.begin_load();
        state.finish_load(Ok(vec![
            merchant(7, MerchantStatus::Suspended),
            merchant(3, MerchantStatus::Active),
        ]));
        assert!(!state.is_loading());
        let ids: Vec<i64> = state.merchants().iter().map(|m| m.id.into_inner()).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn failed_load_keeps_prior_collection() {
        let mut state = loaded();
        let before = state.merchants().to_vec();
        state.begin_load();
        state.finish_load(Err(MerchantError::Api {
            status: 500,
            message: "Failed to fetch merchants".to_owned(),
        }));
        assert!(!state.is_loading());
        assert_eq!(state.merchants(), before.as_slice());
        assert_eq!(state.error(), Some("Failed to fetch merchants"));
    }

    #[test]
    fn begin_load_clears_banner() {
        let mut state = loaded();
        state.record_failure(&MerchantError::Config("x".to_owned()));
        assert!(state.error().is_some());
        state.begin_load();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn status_filter_round_trip_restores_collection() {
        let mut state = loaded();
        let all: Vec<Merchant> = state.visible_merchants().into_iter().cloned().collect();
        state.set_status_filter(Some(MerchantStatus::Active));
        assert_eq!(state.visible_merchants().len(), 1);
        state.set_status_filter(None);
        let restored: Vec<Merchant> = state.visible_merchants().into_iter().cloned().collect();
        assert_eq!(restored, all);
    }

    #[test]
    fn navigation_dismisses_banner() {
        let mut state = loaded();
        state.record_failure(&MerchantError::Config("bad".to_owned()));
        state.set_tab(Tab::Statistics);
        assert_eq!(state.error(), None);
        assert_eq!(state.tab(), Tab::Statistics);
    }

    #[test]
    fn statistics_selection_filters_and_shows_table() {
        let mut state = loaded();
        state.set_tab(Tab::Statistics);
        state.apply_statistics_selection(Some(MerchantStatus::Pending));
        assert_eq!(state.tab(), Tab::Merchants);
        assert_eq!(state.status_filter(), Some(MerchantStatus::Pending));
        let visible = state.visible_merchants();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().map(|m| m.id), Some(MerchantId::new(2)));
    }

    #[test]
    fn toggle_and_edit_form() {
        let mut state = loaded();
        assert!(!state.is_form_visible());
        state.toggle_form();
        assert!(state.is_form_visible());
        assert_eq!(state.editing(), None);
        state.toggle_form();
        assert!(!state.is_form_visible());

        let target = merchant(2, MerchantStatus::Pending);
        state.open_edit_form(&target);
        assert_eq!(state.editing(), Some(MerchantId::new(2)));
        state.toggle_form();
        assert_eq!(state.editing(), None);
        state.toggle_form();
        assert_eq!(state.editing(), None);
    }

    #[test]
    fn merchant_lookup() {
        let state = loaded();
        assert!(state.merchant(MerchantId::new(2)).is_some());
        assert!(state.merchant(MerchantId::new(99)).is_none());
    }
}
