use route_batch_lib::place::PlaceTable;

use crate::{
    config::RunConfig,
    credential::ApiKey,
    csv_loader::read_places,
    fetcher::{fetch_routes, FetchReport},
    openroute::{client::Client, RouteProvider},
    plot::plot_routes,
    point_table::coords_to_points,
    report::write_failures,
    route_table::write_routes,
    throttle::RateLimiter,
    RouteBatchError,
};

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: FetchReport,
    pub origins: usize,
    pub destinations: usize,
}

/// A loaded batch: both place tables and the provider that routes between them.
pub struct RouteBatch<P> {
    config: RunConfig,
    origins: PlaceTable,
    destinations: PlaceTable,
    provider: P,
}

impl RouteBatch<Client> {
    /// Loads both place files and reads the service key.
    pub fn start(config: RunConfig) -> Result<Self, RouteBatchError> {
        let origins = read_places(&config.origin_file)?;
        let destinations = read_places(&config.destination_file)?;

        let key = ApiKey::read(&config.key_file)?;
        let provider = Client::new(&config.service_url, key)?;

        Ok(Self {
            config,
            origins,
            destinations,
            provider,
        })
    }
}

impl<P: RouteProvider> RouteBatch<P> {
    /// Routes every pair, then writes the route, origin and destination shapefiles and the plot.
    pub async fn run(self) -> Result<RunSummary, RouteBatchError> {
        let RouteBatch {
            config,
            origins,
            destinations,
            provider,
        } = self;

        let mut limiter = RateLimiter::new(config.rate_limit);
        let report = fetch_routes(&provider, &mut limiter, &origins, &destinations, &config).await;
        // Releases the service key
        drop(provider);

        let routes = write_routes(&report.routes, &config.route_output())?;

        let origin_points = coords_to_points(
            &origins,
            config.origin_columns.longitude,
            config.origin_columns.latitude,
            &config.origin_output(),
        )?;
        let destination_points = coords_to_points(
            &destinations,
            config.destination_columns.longitude,
            config.destination_columns.latitude,
            &config.destination_output(),
        )?;

        if !report.failures.is_empty() {
            write_failures(&report.failures, &config.failures_output())?;
        }

        plot_routes(&routes, &origin_points, &destination_points, &config.plot_output())?;

        Ok(RunSummary {
            origins: origin_points.len(),
            destinations: destination_points.len(),
            report,
        })
    }
}
