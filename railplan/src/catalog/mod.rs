//! Train catalog client.
//!
//! This module provides access to the train catalog API, which serves the
//! universe of trains and the stop-by-stop route each train runs on a given
//! journey date.
//!
//! Key characteristics of the catalog:
//! - Payloads arrive in a `{success, data, message}` envelope, and
//!   `success: false` under a 200 status is how the API reports most
//!   failures
//! - Scheduled times are raw `HHMM` integers and may be malformed
//!   (minute >= 60, hour >= 24); conversion normalizes them
//! - Day offsets are 1-based: `day: 2` means the second calendar day
//!   of the train's run

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{TrainIdentity, TrainRoute};

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{CatalogConfig, HttpCatalog};
pub use convert::ConvertError;
pub use error::CatalogError;
pub use mock::{MockCatalog, StaticCatalog};
pub use types::{RawStop, TrainDetailData, TrainDetailEnvelope, TrainListEnvelope};

/// A source of trains and their routes.
///
/// Implemented by the live [`HttpCatalog`] and by the in-memory
/// [`MockCatalog`] and [`StaticCatalog`]. The graph builder is generic over
/// this trait, so the planning pipeline runs identically against live and
/// canned data.
pub trait CatalogSource: Send + Sync {
    /// List every train in the catalog's universe, in catalog order.
    fn list_trains(&self) -> impl Future<Output = Result<Vec<TrainIdentity>, CatalogError>> + Send;

    /// Fetch the route `train` runs on `journey_date`.
    fn train_route(
        &self,
        train: &TrainIdentity,
        journey_date: NaiveDate,
    ) -> impl Future<Output = Result<TrainRoute, CatalogError>> + Send;
}
