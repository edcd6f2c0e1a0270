//! Planner configuration.

use crate::cache::CacheConfig;
use crate::graph::BuildConfig;

/// Configuration for the route planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Graph construction settings.
    pub build: BuildConfig,

    /// Graph cache settings.
    pub cache: CacheConfig,

    /// Cap on ride combinations evaluated per station path.
    /// `None` removes the cap entirely.
    pub max_combinations: Option<usize>,
}

impl PlannerConfig {
    /// Replace the graph build settings.
    pub fn with_build(mut self, build: BuildConfig) -> Self {
        self.build = build;
        self
    }

    /// Replace the graph cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set or remove the per-path combination cap.
    pub fn with_max_combinations(mut self, cap: Option<usize>) -> Self {
        self.max_combinations = cap;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            cache: CacheConfig::default(),
            max_combinations: Some(10_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.build.max_trains, 1000);
        assert_eq!(config.max_combinations, Some(10_000));
    }

    #[test]
    fn config_builder() {
        let config = PlannerConfig::default()
            .with_build(BuildConfig::default().with_max_trains(100))
            .with_max_combinations(None);

        assert_eq!(config.build.max_trains, 100);
        assert_eq!(config.max_combinations, None);
    }
}
