use route_batch_lib::{
    geometry::{decode_route_geometry, to_wkt, GeometryError},
    place::{Place, PlaceError, PlaceTable},
    route::{seconds_to_minutes, RouteRecord},
};

use crate::{
    config::RunConfig,
    openroute::{types::DirectionsRequest, RouteProvider, ServiceError},
    throttle::RateLimiter,
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Place(#[from] PlaceError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// An origin/destination pair that produced no route.
#[derive(Debug)]
pub struct PairFailure {
    pub origin_id: String,
    pub destination_id: String,
    pub reason: FetchError,
}

#[derive(Debug, Default)]
pub struct FetchReport {
    pub routes: Vec<RouteRecord>,
    pub failures: Vec<PairFailure>,
}

impl FetchReport {
    pub fn attempted(&self) -> usize {
        self.routes.len() + self.failures.len()
    }
}

/// Requests a route for every origin x destination pair, origin-major. A failing pair
/// is recorded and skipped.
pub async fn fetch_routes<P: RouteProvider>(
    provider: &P,
    limiter: &mut RateLimiter,
    origins: &PlaceTable,
    destinations: &PlaceTable,
    config: &RunConfig,
) -> FetchReport {
    let mut report = FetchReport::default();

    for origin in origins.places(config.origin_columns) {
        for destination in destinations.places(config.destination_columns) {
            match fetch_pair(provider, limiter, origin, destination, config).await {
                Ok(route) => report.routes.push(route),
                Err(reason) => {
                    let origin_id = origin.id().unwrap_or_default().to_string();
                    let destination_id = destination.id().unwrap_or_default().to_string();
                    tracing::error!("{origin_id} -> {destination_id}: {reason}");
                    report.failures.push(PairFailure {
                        origin_id,
                        destination_id,
                        reason,
                    });
                }
            }
        }
    }

    tracing::info!("Plotted {} routes...", report.routes.len());
    report
}

async fn fetch_pair<P: RouteProvider>(
    provider: &P,
    limiter: &mut RateLimiter,
    origin: Place<'_>,
    destination: Place<'_>,
    config: &RunConfig,
) -> Result<RouteRecord, FetchError> {
    let origin_id = origin.id()?;
    let origin_name = origin.name()?;
    let destination_id = destination.id()?;
    let destination_name = destination.name()?;
    let start = origin.coordinate()?;
    let end = destination.coordinate()?;

    let request = DirectionsRequest {
        profile: config.travel_mode,
        coordinates: [[start.x, start.y], [end.x, end.y]],
        preference: config.preference,
        units: config.units,
        instructions: false,
    };

    limiter.acquire().await;
    let route = provider.directions(&request).await?;

    let line = decode_route_geometry(&route.geometry)?;

    Ok(RouteRecord::new(
        origin_id.to_string(),
        origin_name.to_string(),
        destination_id.to_string(),
        destination_name.to_string(),
        route.summary.distance,
        seconds_to_minutes(route.summary.duration),
        to_wkt(&line),
    ))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, time::Duration};

    use route_batch_lib::{geometry::from_wkt, place::ColumnMap};

    use crate::{
        config::RateLimit,
        openroute::types::{Route, Summary},
    };

    use super::*;

    const ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    /// Answers every request, failing those whose start longitude is listed.
    #[derive(Default)]
    struct FakeProvider {
        failing_starts: Vec<f64>,
        requests: RefCell<Vec<DirectionsRequest>>,
    }

    impl RouteProvider for FakeProvider {
        async fn directions(&self, request: &DirectionsRequest) -> Result<Route, ServiceError> {
            self.requests.borrow_mut().push(request.clone());

            if self.failing_starts.contains(&request.coordinates[0][0]) {
                return Err(ServiceError::Status {
                    status: 403,
                    message: "Quota exceeded".into(),
                });
            }

            Ok(Route {
                summary: Summary {
                    distance: 1.25,
                    duration: 450.0,
                },
                geometry: ENCODED.into(),
            })
        }
    }

    fn table(rows: &[[&str; 4]]) -> PlaceTable {
        PlaceTable::new(
            ["id", "name", "lon", "lat"].iter().map(|f| f.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|f| f.to_string()).collect()).collect(),
        )
    }

    fn origins() -> PlaceTable {
        table(&[["1", "SciLi", "-71.4004", "41.8270"], ["2", "Rock", "-71.4052", "41.8259"]])
    }

    fn destinations() -> PlaceTable {
        table(&[
            ["a", "Hay", "-71.4033", "41.8268"],
            ["b", "Orwig", "-71.3962", "41.8236"],
            ["c", "Champlin", "-71.4026", "41.8291"],
        ])
    }

    fn limiter() -> RateLimiter {
        RateLimiter::new(RateLimit {
            requests: 40,
            window: Duration::from_secs(60),
        })
    }

    #[tokio::test]
    async fn every_pair_is_routed() {
        let provider = FakeProvider::default();
        let mut limiter = limiter();

        let report = fetch_routes(&provider, &mut limiter, &origins(), &destinations(), &RunConfig::default()).await;

        assert_eq!(report.routes.len(), 6);
        assert!(report.failures.is_empty());
        assert_eq!(limiter.issued(), 6);

        let pairs: Vec<_> = report
            .routes
            .iter()
            .map(|r| (r.origin_id.as_str(), r.destination_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "a"), ("1", "b"), ("1", "c"), ("2", "a"), ("2", "b"), ("2", "c")]);

        let first = &report.routes[0];
        assert_eq!(first.origin_name, "SciLi");
        assert_eq!(first.destination_name, "Hay");
        assert_eq!(first.distance, 1.25);
        assert_eq!(first.travel_time, 7.5);
        assert_eq!(from_wkt(&first.route).unwrap(), decode_route_geometry(ENCODED).unwrap());
    }

    #[tokio::test]
    async fn request_carries_run_settings() {
        let provider = FakeProvider::default();
        let config = RunConfig::default();

        fetch_routes(&provider, &mut limiter(), &origins(), &destinations(), &config).await;

        let requests = provider.requests.borrow();
        let first = &requests[0];
        assert_eq!(first.profile, config.travel_mode);
        assert_eq!(first.preference, config.preference);
        assert_eq!(first.units, config.units);
        assert!(!first.instructions);
        assert_eq!(first.coordinates, [[-71.4004, 41.827], [-71.4033, 41.8268]]);
    }

    #[tokio::test]
    async fn failed_pairs_are_reported_and_skipped() {
        let provider = FakeProvider {
            failing_starts: vec![-71.4052],
            ..Default::default()
        };
        let mut limiter = limiter();

        let report = fetch_routes(&provider, &mut limiter, &origins(), &destinations(), &RunConfig::default()).await;

        assert_eq!(report.routes.len(), 3);
        assert_eq!(report.failures.len(), 3);
        assert_eq!(report.attempted(), 6);
        // Failed requests still count against the limit
        assert_eq!(limiter.issued(), 6);

        let failure = &report.failures[0];
        assert_eq!(failure.origin_id, "2");
        assert_eq!(failure.destination_id, "a");
        assert!(matches!(failure.reason, FetchError::Service(ServiceError::Status { status: 403, .. })));
    }

    #[tokio::test]
    async fn unparseable_place_fails_without_request() {
        let provider = FakeProvider::default();
        let mut limiter = limiter();
        let origins = table(&[["1", "SciLi", "n/a", "41.8270"]]);

        let report = fetch_routes(&provider, &mut limiter, &origins, &destinations(), &RunConfig::default()).await;

        assert!(report.routes.is_empty());
        assert_eq!(report.failures.len(), 3);
        assert!(matches!(report.failures[0].reason, FetchError::Place(PlaceError::InvalidCoordinate { .. })));
        assert_eq!(limiter.issued(), 0);
        assert!(provider.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn missing_name_column_fails_without_request() {
        let provider = FakeProvider::default();
        let mut limiter = limiter();
        let config = RunConfig {
            destination_columns: ColumnMap {
                name: 5,
                ..ColumnMap::default()
            },
            ..RunConfig::default()
        };

        let report = fetch_routes(&provider, &mut limiter, &origins(), &destinations(), &config).await;

        assert!(report.routes.is_empty());
        assert_eq!(report.failures.len(), 6);
        assert_eq!(report.failures[0].destination_id, "a");
        assert!(matches!(
            report.failures[0].reason,
            FetchError::Place(PlaceError::MissingColumn { position: 5, width: 4 })
        ));
        assert_eq!(limiter.issued(), 0);
        assert!(provider.requests.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn large_batches_are_throttled() {
        let provider = FakeProvider::default();
        let mut limiter = limiter();
        let origins = table(&[["1", "SciLi", "-71.4004", "41.8270"]; 9]);
        let destinations = table(&[["a", "Hay", "-71.4033", "41.8268"]; 9]);

        let report = fetch_routes(&provider, &mut limiter, &origins, &destinations, &RunConfig::default()).await;

        assert_eq!(report.routes.len(), 81);
        assert_eq!(limiter.pauses(), 2);
    }
}
