use futures::future::join_all;
use std::collections::BTreeMap;

use crate::{
    error::WeatherError,
    model::WeatherReading,
    provider::WeatherProvider,
    service::WeatherService,
};

/// Per-index outcome of a comparison. Blank inputs appear in neither map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub results: BTreeMap<usize, WeatherReading>,
    pub errors: BTreeMap<usize, WeatherError>,
}

impl<P: WeatherProvider> WeatherService<P> {
    /// Look up every non-blank location concurrently and wait for all of them.
    /// One location failing never affects the others.
    pub async fn compare_all<S: AsRef<str>>(&self, locations: &[S]) -> Comparison {
        let lookups = locations
            .iter()
            .enumerate()
            .filter(|(_, location)| !location.as_ref().trim().is_empty())
            .map(|(index, location)| async move { (index, self.lookup(location.as_ref()).await) });

        let mut comparison = Comparison::default();
        for (index, outcome) in join_all(lookups).await {
            match outcome {
                Ok(reading) => {
                    comparison.results.insert(index, reading);
                }
                Err(err) => {
                    comparison.errors.insert(index, err);
                }
            }
        }

        tracing::debug!(
            succeeded = comparison.results.len(),
            failed = comparison.errors.len(),
            "Comparison settled"
        );

        comparison
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ErrorKind,
        service::{ServiceOptions, WeatherService, tests::StubProvider},
    };
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn blank_entries_are_skipped_and_errors_kept_per_index() {
        let provider = StubProvider {
            unknown: vec!["Unknown City"],
            ..Default::default()
        };
        let service = WeatherService::new(provider, ServiceOptions::default());

        let comparison = service.compare_all(&["London", "  ", "Unknown City"]).await;

        assert_eq!(comparison.results.keys().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(comparison.errors.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(comparison.results[&0].city, "London");
        assert_eq!(comparison.errors[&2].kind(), ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_lookups_share_the_limiter() {
        let service = WeatherService::new(StubProvider::default(), ServiceOptions::default());
        let start = Instant::now();

        let comparison = service.compare_all(&["Berlin", "Paris", "Rome"]).await;

        assert_eq!(comparison.results.len(), 3);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_after_cache_fill_is_free() {
        let service = WeatherService::new(StubProvider::default(), ServiceOptions::default());
        service.lookup("Oslo").await.unwrap();

        let comparison = service.compare_all(&["oslo", "OSLO "]).await;

        assert_eq!(comparison.results.len(), 2);
        assert_eq!(service.provider().calls(), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_yields_empty_comparison() {
        let service = WeatherService::new(StubProvider::default(), ServiceOptions::default());
        let none: [&str; 0] = [];

        let comparison = service.compare_all(&none).await;

        assert!(comparison.results.is_empty());
        assert!(comparison.errors.is_empty());
    }
}
