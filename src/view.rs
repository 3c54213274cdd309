//! View state kept by a merchant front end.
//!
//! [`BoardState`] holds the merchant collection and the flat UI fields
//! around it. [`MerchantForm`] and [`StatisticsPanel`] hold the create/edit
//! form and the statistics cards. The board drivers own a client and apply
//! the re-fetch-after-mutation policy: every successful write is followed by
//! a full list call, and every failure leaves the collection untouched.

mod board;
mod filter;
mod form;
mod state;
mod statistics;

#[cfg(feature = "blocking")]
pub use board::MerchantBlockingBoard;
#[cfg(feature = "async")]
pub use board::MerchantBoard;
pub use filter::filter_by_status;
pub use form::{FormField, MerchantForm};
pub use state::{BoardState, Tab};
pub use statistics::{StatCard, StatisticsPanel};
