//! Wire types for catalog responses.
//!
//! These mirror the catalog's JSON payloads as-is: camelCase field names,
//! `HHMM` integer times, and liberal use of `Option` because the upstream
//! omits fields freely. Conversion to validated domain types happens in
//! [`super::convert`]; nothing else should consume these directly.

use serde::Deserialize;

/// Envelope for the train-list endpoint.
///
/// The `data` array holds `[train_number, train_name]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<(String, String)>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for the train-detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainDetailEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<TrainDetailData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a train-detail response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDetailData {
    #[serde(default)]
    pub train_number: Option<String>,
    #[serde(default)]
    pub train_name: Option<String>,
    /// Ordered stop sequence; empty when the catalog has no schedule.
    #[serde(default)]
    pub route: Vec<RawStop>,
}

/// One stop row in a train-detail payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStop {
    #[serde(default)]
    pub station_code: Option<String>,
    #[serde(default)]
    pub station_name: Option<String>,
    /// Scheduled arrival as an `HHMM` integer; absent at the origin.
    #[serde(default)]
    pub scheduled_arrival: Option<i64>,
    /// Scheduled departure as an `HHMM` integer; absent at the final stop.
    #[serde(default)]
    pub scheduled_departure: Option<i64>,
    /// 1-based day of the run on which this stop occurs.
    #[serde(default)]
    pub day: Option<i64>,
    /// Whether passengers can board or alight here.
    #[serde(default)]
    pub is_halt: Option<bool>,
}
