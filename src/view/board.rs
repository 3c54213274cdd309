//! Board drivers: view state bound to a client.
//!
//! Generated for the async and blocking clients from one macro, mirroring
//! [`crate::client`].


/// Generates a board driver (async or blocking) over the matching client.
#[cfg(any(feature = "async", feature = "blocking"))]
macro_rules! define_board {
    (
        board_name: $board:ident,
        client_type: $client:ty,
        board_doc: $board_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $board_doc]
        #[derive(Debug)]
        pub struct $board {
            /// Data client.
            client: $client,
            /// Merchant table, banner, filter, tab and form.
            state: BoardState,
            /// Statistics cards.
            statistics: StatisticsPanel,
        }

        impl $board {
            /// Creates an unmounted board; call [`Self::mount`] to load it.
            #[inline]
            #[must_use]
            pub const fn new(client: $client) -> Self {
                Self {
                    client,
                    state: BoardState::new(),
                    statistics: StatisticsPanel::new(),
                }
            }

            /// The underlying client.
            #[inline]
            #[must_use]
            pub const fn client(&self) -> &$client {
                &self.client
            }

            /// Current view state.
            #[inline]
            #[must_use]
            pub const fn state(&self) -> &BoardState {
                &self.state
            }

            /// Mutable view state, for local-only changes (tab, filter,
            /// form inputs).
            #[inline]
            pub const fn state_mut(&mut self) -> &mut BoardState {
                &mut self.state
            }

            /// Statistics cards.
            #[inline]
            #[must_use]
            pub const fn statistics(&self) -> &StatisticsPanel {
                &self.statistics
            }

            /// Mounts the page: resets all view state, fetches statistics
            /// once, then lists merchants.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn mount(&mut self) {
                self.state = BoardState::new();
                self.statistics = StatisticsPanel::new();
                let stats = self.client.statistics() $( .$await_ext )?;
                self.statistics.finish_load(stats);
                self.refresh() $( .$await_ext )?;
            }

            /// Re-fetches the whole collection. On failure the banner is set
            /// and the previous collection stays.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn refresh(&mut self) {
                self.state.begin_load();
                let result = self.client.list_merchants() $( .$await_ext )?;
                self.state.finish_load(result);
            }

            /// Picks a statistics card: sets the status filter, shows the
            /// merchant table and re-lists.
            #[tracing::instrument(skip_all, fields(status = ?status))]
            pub $($async_kw)? fn select_statistic(&mut self, status: Option<MerchantStatus>) {
                self.state.apply_statistics_selection(status);
                self.refresh() $( .$await_ext )?;
            }

            /// Submits the open form: create without an edit target, update
            /// with one. On success the form closes and the collection is
            /// re-fetched. On failure the form stays open with the message.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::InvalidForm`] if no form is open or
            /// an input is blank, or the client's error.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn submit_form(&mut self) -> Result<Merchant> {
                let (editing, data) = match self.state.form_mut() {
                    Some(form) => form.begin_submit()?,
                    None => {
                        return Err(MerchantError::InvalidForm {
                            field: "form",
                            message: "No form is open".to_owned(),
                        })
                    }
                };
                let result = match editing {
                    Some(id) => self.client.update_merchant(id, &data) $( .$await_ext )?,
                    None => self.client.create_merchant(&data) $( .$await_ext )?,
                };
                match result {
                    Ok(merchant) => {
                        tracing::info!(id = %merchant.id, "merchant saved");
                        self.state.close_form();
                        self.refresh() $( .$await_ext )?;
                        Ok(merchant)
                    }
                    Err(err) => {
                        if let Some(form) = self.state.form_mut() {
                            form.fail_submit(&err);
                        }
                        Err(err)
                    }
                }
            }

            /// Changes a merchant's status, then re-lists.
            ///
            /// # Errors
            ///
            /// Returns the client's error; the banner shows it and the
            /// collection is untouched.
            #[tracing::instrument(skip_all, fields(id = %id, status = %status))]
            pub $($async_kw)? fn set_status(
                &mut self,
                id: MerchantId,
                status: MerchantStatus,
            ) -> Result<Merchant> {
                let patch = MerchantPatch::status(status);
                match self.client.patch_merchant(id, &patch) $( .$await_ext )? {
                    Ok(merchant) => {
                        self.refresh() $( .$await_ext )?;
                        Ok(merchant)
                    }
                    Err(err) => {
                        self.state.record_failure(&err);
                        Err(err)
                    }
                }
            }

            /// Deletes a merchant, then re-lists.
            ///
            /// # Errors
            ///
            /// Returns the client's error; the banner shows it and the
            /// collection (including the row) is untouched.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_merchant(&mut self, id: MerchantId) -> Result<()> {
                match self.client.delete_merchant(id) $( .$await_ext )? {
                    Ok(()) => {
                        tracing::info!("merchant deleted");
                        self.refresh() $( .$await_ext )?;
                        Ok(())
                    }
                    Err(err) => {
                        self.state.record_failure(&err);
                        Err(err)
                    }
                }
            }

            /// Downloads the CSV export.
            ///
            /// # Errors
            ///
            /// Returns the client's error, which is also shown in the banner.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn export_csv(&mut self) -> Result<Download> {
                let result = self.client.export_csv() $( .$await_ext )?;
                self.note_failure(result)
            }

            /// Downloads the JSON report.
            ///
            /// # Errors
            ///
            /// Returns the client's error, which is also shown in the banner.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn generate_report(&mut self) -> Result<Download> {
                let result = self.client.generate_report() $( .$await_ext )?;
                self.note_failure(result)
            }

            /// Shows the banner for a failed result and passes it through.
            fn note_failure<T>(&mut self, result: Result<T>) -> Result<T> {
                if let Err(ref err) = result {
                    self.state.record_failure(err);
                }
                result
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_board {
    //! Board driver over the async client.

    use super::super::{BoardState, StatisticsPanel};
    use crate::client::MerchantClient;
    use crate::download::Download;
    use crate::error::{MerchantError, Result};
    use crate::models::{Merchant, MerchantId, MerchantPatch, MerchantStatus};

    define_board! {
        board_name: MerchantBoard,
        client_type: MerchantClient,
        board_doc: "Merchant page state driven by the async [`MerchantClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_board {
    //! Board driver over the blocking client.

    use super::super::{BoardState, StatisticsPanel};
    use crate::client::MerchantBlockingClient;
    use crate::download::Download;
    use crate::error::{MerchantError, Result};
    use crate::models::{Merchant, MerchantId, MerchantPatch, MerchantStatus};

    define_board! {
        board_name: MerchantBlockingBoard,
        client_type: MerchantBlockingClient,
        board_doc: "Merchant page state driven by the blocking [`MerchantBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_board::MerchantBoard;
#[cfg(feature = "blocking")]
pub use blocking_board::MerchantBlockingBoard;
