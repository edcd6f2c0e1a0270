//! Catalog client error types.

use std::fmt;

/// Errors from the train catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Catalog returned an error status code
    Api { status: u16, message: String },

    /// Catalog answered with an unsuccessful envelope
    Unsuccessful { message: String },

    /// Rate limited by the catalog
    RateLimited,

    /// Invalid credentials or access denied
    Unauthorized,

    /// The catalog has no route for the requested train
    TrainNotFound { train_number: String },

    /// The catalog's route data for a train is unusable
    MalformedRoute {
        train_number: String,
        reason: String,
    },
}

impl CatalogError {
    /// True when the catalog itself is unreachable or answering garbage.
    ///
    /// Per-train conditions (`TrainNotFound`, `MalformedRoute`) are not
    /// availability problems: the graph build skips those trains and keeps
    /// going, while an unavailable catalog aborts the whole build.
    pub fn is_unavailable(&self) -> bool {
        !matches!(
            self,
            CatalogError::TrainNotFound { .. } | CatalogError::MalformedRoute { .. }
        )
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Http(e) => write!(f, "HTTP error: {e}"),
            CatalogError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            CatalogError::Api { status, message } => {
                write!(f, "catalog error {status}: {message}")
            }
            CatalogError::Unsuccessful { message } => {
                write!(f, "catalog reported failure: {message}")
            }
            CatalogError::RateLimited => write!(f, "rate limited by the catalog"),
            CatalogError::Unauthorized => write!(f, "unauthorized (invalid credentials)"),
            CatalogError::TrainNotFound { train_number } => {
                write!(f, "no route found for train {train_number}")
            }
            CatalogError::MalformedRoute {
                train_number,
                reason,
            } => {
                write!(f, "unusable route for train {train_number}: {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::TrainNotFound {
            train_number: "12951".into(),
        };
        assert_eq!(err.to_string(), "no route found for train 12951");

        let err = CatalogError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "catalog error 500: Internal Server Error");

        let err = CatalogError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));

        let err = CatalogError::MalformedRoute {
            train_number: "04620".into(),
            reason: "fewer than two stops".into(),
        };
        assert!(err.to_string().contains("04620"));
        assert!(err.to_string().contains("fewer than two stops"));
    }

    #[test]
    fn unavailability_classification() {
        assert!(
            CatalogError::Api {
                status: 502,
                message: "bad gateway".into()
            }
            .is_unavailable()
        );
        assert!(CatalogError::RateLimited.is_unavailable());
        assert!(
            CatalogError::Unsuccessful {
                message: "maintenance".into()
            }
            .is_unavailable()
        );

        assert!(
            !CatalogError::TrainNotFound {
                train_number: "12951".into()
            }
            .is_unavailable()
        );
        assert!(
            !CatalogError::MalformedRoute {
                train_number: "12951".into(),
                reason: "bad time".into()
            }
            .is_unavailable()
        );
    }
}
