//! Conversion from catalog wire payloads to validated domain types.
//!
//! The catalog is dirty in predictable ways: stray whitespace, inconsistent
//! case, malformed `HHMM` integers, missing halt flags. This layer cleans
//! what it can, converts the rest through the domain constructors, and
//! reports anything unusable so the graph build can skip that train.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{
    InvalidStationCode, MalformedRoute, SchedTime, StationCode, Stop, TimeError, TrainIdentity,
    TrainNumber, TrainRoute,
};

use super::error::CatalogError;
use super::types::{RawStop, TrainDetailData, TrainDetailEnvelope, TrainListEnvelope};

/// Error converting a train-detail payload into a domain route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A stop row has no station code.
    #[error("stop {index}: missing station code")]
    MissingStationCode { index: usize },

    /// A stop row's station code does not parse.
    #[error("stop {index}: {reason}")]
    BadStationCode {
        index: usize,
        reason: InvalidStationCode,
    },

    /// A stop row's scheduled time does not normalize.
    #[error("stop {index}: {reason}")]
    BadTime { index: usize, reason: TimeError },

    /// A stop row's day offset is outside the representable range.
    #[error("stop {index}: day offset out of range")]
    BadDayOffset { index: usize },

    /// The stop sequence does not form a valid route.
    #[error(transparent)]
    Route(#[from] MalformedRoute),
}

/// Extract the train universe from a list envelope.
///
/// Rows with unparseable or duplicate train numbers are skipped with a debug
/// log; an unsuccessful envelope fails the whole listing, since there is no
/// per-train recovery for a dead catalog.
pub fn trains_from_list(envelope: &TrainListEnvelope) -> Result<Vec<TrainIdentity>, CatalogError> {
    if !envelope.success {
        return Err(CatalogError::Unsuccessful {
            message: envelope
                .message
                .clone()
                .unwrap_or_else(|| "train list marked unsuccessful".to_string()),
        });
    }

    let mut seen = HashSet::new();
    let mut trains = Vec::with_capacity(envelope.data.len());
    for (number, name) in &envelope.data {
        match TrainNumber::parse(number.trim()) {
            Ok(parsed) => {
                if seen.insert(parsed) {
                    trains.push(TrainIdentity::new(parsed, name.trim()));
                } else {
                    debug!(train_number = %parsed, "skipping duplicate train number in list");
                }
            }
            Err(e) => {
                debug!(train_number = %number, error = %e, "skipping train with unusable number");
            }
        }
    }
    Ok(trains)
}

/// Turn a train-detail envelope into a validated route for `train`.
///
/// An unsuccessful or empty envelope means the catalog has no route for the
/// train; anything present but unusable surfaces as
/// [`CatalogError::MalformedRoute`] so the caller can count it.
pub fn route_from_envelope(
    train: &TrainIdentity,
    envelope: &TrainDetailEnvelope,
) -> Result<TrainRoute, CatalogError> {
    if !envelope.success {
        return Err(CatalogError::TrainNotFound {
            train_number: train.number.to_string(),
        });
    }
    let Some(data) = envelope.data.as_ref() else {
        return Err(CatalogError::TrainNotFound {
            train_number: train.number.to_string(),
        });
    };

    // Prefer the listing's name; the detail payload fills it in when the
    // listing had none.
    let name = if train.name.trim().is_empty() {
        data.train_name.as_deref().unwrap_or_default().trim()
    } else {
        train.name.as_str()
    };

    route_from_detail(TrainIdentity::new(train.number, name), data).map_err(|e| {
        CatalogError::MalformedRoute {
            train_number: train.number.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Convert the raw stop rows of a detail payload into a validated route.
pub fn route_from_detail(
    identity: TrainIdentity,
    data: &TrainDetailData,
) -> Result<TrainRoute, ConvertError> {
    let mut stops = Vec::with_capacity(data.route.len());
    for (index, raw) in data.route.iter().enumerate() {
        stops.push(stop_from_raw(index, raw)?);
    }
    Ok(TrainRoute::new(identity, stops)?)
}

/// Convert one raw stop row.
fn stop_from_raw(index: usize, raw: &RawStop) -> Result<Stop, ConvertError> {
    let code_text = raw
        .station_code
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ConvertError::MissingStationCode { index })?;
    let station_code = StationCode::parse(code_text)
        .map_err(|reason| ConvertError::BadStationCode { index, reason })?;

    let station_name = raw
        .station_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(code_text)
        .to_string();

    let day = raw.day.unwrap_or(1);
    let mut day_offset =
        u8::try_from(day).map_err(|_| ConvertError::BadDayOffset { index })?;

    let mut wrapped = false;
    let scheduled_arrival = match raw.scheduled_arrival {
        None => None,
        Some(value) => {
            let normalized = SchedTime::from_raw(value)
                .map_err(|reason| ConvertError::BadTime { index, reason })?;
            wrapped |= normalized.wrapped_midnight;
            Some(normalized.time)
        }
    };
    let scheduled_departure = match raw.scheduled_departure {
        None => None,
        Some(value) => {
            let normalized = SchedTime::from_raw(value)
                .map_err(|reason| ConvertError::BadTime { index, reason })?;
            wrapped |= normalized.wrapped_midnight;
            Some(normalized.time)
        }
    };

    // An hour that wrapped past midnight belongs to the next day of the run.
    // The stop carries a single day offset, so one wrap bumps the whole stop.
    if wrapped {
        day_offset = day_offset
            .checked_add(1)
            .ok_or(ConvertError::BadDayOffset { index })?;
    }

    Ok(Stop {
        station_code,
        station_name,
        scheduled_arrival,
        scheduled_departure,
        day_offset,
        // Catalogs that omit the flag list passenger halts only.
        is_halt: raw.is_halt.unwrap_or(true),
    })
}
