//! Mock catalogs for testing without API access.
//!
//! [`MockCatalog`] loads sample catalog payloads from JSON files and serves
//! them as if they were live API responses. [`StaticCatalog`] serves routes
//! built directly in code, for exercising the graph and planner layers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::{TrainIdentity, TrainNumber, TrainRoute};

use super::CatalogSource;
use super::convert::{route_from_envelope, trains_from_list};
use super::error::CatalogError;
use super::types::{TrainDetailEnvelope, TrainListEnvelope};

/// Mock catalog that serves data from JSON files.
///
/// This is useful for development and testing without a live catalog.
#[derive(Clone)]
pub struct MockCatalog {
    /// The train universe, from `trains.json`.
    trains: Arc<RwLock<Vec<TrainIdentity>>>,
    /// Pre-loaded detail payloads, keyed by train number.
    details: Arc<RwLock<HashMap<TrainNumber, TrainDetailEnvelope>>>,
}

impl MockCatalog {
    /// Create a new mock catalog by loading JSON files from a directory.
    ///
    /// Expects a `trains.json` list payload plus one `{NUMBER}.json` detail
    /// payload per train (e.g., `12951.json`). Detail payloads are kept raw
    /// and converted per request, so fixtures with unsuccessful or malformed
    /// routes behave exactly as they would from the live catalog.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let data_dir = data_dir.as_ref();

        let list_path = data_dir.join("trains.json");
        let json = std::fs::read_to_string(&list_path).map_err(|e| CatalogError::Api {
            status: 0,
            message: format!("Failed to read {:?}: {}", list_path, e),
        })?;
        let envelope: TrainListEnvelope =
            serde_json::from_str(&json).map_err(|e| CatalogError::Api {
                status: 0,
                message: format!("Failed to parse {:?}: {}", list_path, e),
            })?;
        let trains = trains_from_list(&envelope)?;

        let mut details = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| CatalogError::Api {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::Api {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract the train number from the filename
            // (e.g., "12951.json" -> "12951").
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| CatalogError::Api {
                    status: 0,
                    message: format!("Invalid filename: {:?}", path),
                })?;

            if stem == "trains" {
                continue;
            }

            let number = TrainNumber::parse(stem).map_err(|_| CatalogError::Api {
                status: 0,
                message: format!("Invalid train number in filename: {}", stem),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| CatalogError::Api {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let envelope: TrainDetailEnvelope =
                serde_json::from_str(&json).map_err(|e| CatalogError::Api {
                    status: 0,
                    message: format!("Failed to parse {:?}: {}", path, e),
                })?;

            details.insert(number, envelope);
        }

        Ok(Self {
            trains: Arc::new(RwLock::new(trains)),
            details: Arc::new(RwLock::new(details)),
        })
    }

    /// Reload mock data from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), CatalogError> {
        let fresh = Self::load(data_dir)?;
        let new_trains = fresh.trains.read().await.clone();
        let new_details = fresh.details.read().await.clone();
        *self.trains.write().await = new_trains;
        *self.details.write().await = new_details;
        Ok(())
    }
}

impl CatalogSource for MockCatalog {
    /// List the trains in the mock universe.
    async fn list_trains(&self) -> Result<Vec<TrainIdentity>, CatalogError> {
        Ok(self.trains.read().await.clone())
    }

    /// Serve a pre-loaded route.
    ///
    /// Mimics the real client interface. The date parameter is ignored;
    /// mock data is static.
    async fn train_route(
        &self,
        train: &TrainIdentity,
        _journey_date: NaiveDate,
    ) -> Result<TrainRoute, CatalogError> {
        let details = self.details.read().await;

        let envelope = details
            .get(&train.number)
            .ok_or_else(|| CatalogError::TrainNotFound {
                train_number: train.number.to_string(),
            })?;

        route_from_envelope(train, envelope)
    }
}

/// In-memory catalog serving routes built directly in code.
///
/// The train universe is every route's identity plus any trains added with
/// [`StaticCatalog::with_missing_route`], which are listed but have no
/// route and so fetch as [`CatalogError::TrainNotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    trains: Vec<TrainIdentity>,
    routes: HashMap<TrainNumber, TrainRoute>,
}

impl StaticCatalog {
    /// Build a catalog from the given routes.
    pub fn new(routes: impl IntoIterator<Item = TrainRoute>) -> Self {
        let mut trains = Vec::new();
        let mut by_number = HashMap::new();
        for route in routes {
            trains.push(route.identity().clone());
            by_number.insert(route.identity().number, route);
        }
        Self {
            trains,
            routes: by_number,
        }
    }

    /// List a train without giving it a route.
    pub fn with_missing_route(mut self, train: TrainIdentity) -> Self {
        self.trains.push(train);
        self
    }
}

impl CatalogSource for StaticCatalog {
    async fn list_trains(&self) -> Result<Vec<TrainIdentity>, CatalogError> {
        Ok(self.trains.clone())
    }

    async fn train_route(
        &self,
        train: &TrainIdentity,
        _journey_date: NaiveDate,
    ) -> Result<TrainRoute, CatalogError> {
        self.routes
            .get(&train.number)
            .cloned()
            .ok_or_else(|| CatalogError::TrainNotFound {
                train_number: train.number.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &Path, name: &str, json: &str) {
        std::fs::write(dir.join(name), json).unwrap();
    }

    fn seed_mock_dir(dir: &Path) {
        write_fixture(
            dir,
            "trains.json",
            r#"{
                "success": true,
                "data": [
                    ["12951", "MUMBAI RAJDHANI"],
                    ["12301", "HOWRAH RAJDHANI"]
                ]
            }"#,
        );
        write_fixture(
            dir,
            "12951.json",
            r#"{
                "success": true,
                "data": {
                    "trainNumber": "12951",
                    "trainName": "MUMBAI RAJDHANI",
                    "route": [
                        {"stationCode": "BCT", "stationName": "Mumbai Central",
                         "scheduledDeparture": 1700, "day": 1, "isHalt": true},
                        {"stationCode": "NDLS", "stationName": "New Delhi",
                         "scheduledArrival": 832, "day": 2, "isHalt": true}
                    ]
                }
            }"#,
        );
        write_fixture(
            dir,
            "12301.json",
            r#"{"success": false, "message": "train not found"}"#,
        );
    }

    fn identity(number: &str, name: &str) -> TrainIdentity {
        TrainIdentity::new(TrainNumber::parse(number).unwrap(), name)
    }

    #[tokio::test]
    async fn load_mock_data() {
        let dir = tempfile::tempdir().unwrap();
        seed_mock_dir(dir.path());

        let catalog = MockCatalog::load(dir.path()).unwrap();
        let trains = catalog.list_trains().await.unwrap();

        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].number.as_str(), "12951");
    }

    #[tokio::test]
    async fn served_route_is_converted() {
        let dir = tempfile::tempdir().unwrap();
        seed_mock_dir(dir.path());

        let catalog = MockCatalog::load(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();

        let route = catalog
            .train_route(&identity("12951", "MUMBAI RAJDHANI"), date)
            .await
            .unwrap();

        assert_eq!(route.stops().len(), 2);
        assert_eq!(route.stops()[1].day_offset, 2);
    }

    #[tokio::test]
    async fn unknown_and_unsuccessful_trains_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        seed_mock_dir(dir.path());

        let catalog = MockCatalog::load(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();

        let missing = catalog.train_route(&identity("99999", "GHOST"), date).await;
        assert!(matches!(missing, Err(CatalogError::TrainNotFound { .. })));

        let unsuccessful = catalog
            .train_route(&identity("12301", "HOWRAH RAJDHANI"), date)
            .await;
        assert!(matches!(
            unsuccessful,
            Err(CatalogError::TrainNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn missing_list_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockCatalog::load(dir.path());
        assert!(matches!(result, Err(CatalogError::Api { status: 0, .. })));
    }

    #[tokio::test]
    async fn bad_filename_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        seed_mock_dir(dir.path());
        write_fixture(dir.path(), "not a train!.json", r#"{"success": true}"#);

        let result = MockCatalog::load(dir.path());
        assert!(matches!(result, Err(CatalogError::Api { status: 0, .. })));
    }

    #[tokio::test]
    async fn reload_replaces_data() {
        let first = tempfile::tempdir().unwrap();
        seed_mock_dir(first.path());
        let catalog = MockCatalog::load(first.path()).unwrap();

        let second = tempfile::tempdir().unwrap();
        write_fixture(
            second.path(),
            "trains.json",
            r#"{"success": true, "data": [["22222", "DURONTO"]]}"#,
        );
        catalog.reload(second.path()).await.unwrap();

        let trains = catalog.list_trains().await.unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].number.as_str(), "22222");
    }

    #[tokio::test]
    async fn static_catalog_serves_routes() {
        use crate::domain::{SchedTime, StationCode, Stop};

        let stops = vec![
            Stop {
                station_code: StationCode::parse("AAA").unwrap(),
                station_name: "AAA".into(),
                scheduled_arrival: None,
                scheduled_departure: Some(SchedTime::parse("0900").unwrap()),
                day_offset: 1,
                is_halt: true,
            },
            Stop {
                station_code: StationCode::parse("BBB").unwrap(),
                station_name: "BBB".into(),
                scheduled_arrival: Some(SchedTime::parse("1200").unwrap()),
                scheduled_departure: None,
                day_offset: 1,
                is_halt: true,
            },
        ];
        let route = TrainRoute::new(identity("11111", "TEST EXP"), stops).unwrap();

        let catalog =
            StaticCatalog::new([route]).with_missing_route(identity("22222", "GHOST EXP"));
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();

        let trains = catalog.list_trains().await.unwrap();
        assert_eq!(trains.len(), 2);

        assert!(
            catalog
                .train_route(&trains[0], date)
                .await
                .is_ok()
        );
        assert!(matches!(
            catalog.train_route(&trains[1], date).await,
            Err(CatalogError::TrainNotFound { .. })
        ));
    }
}
