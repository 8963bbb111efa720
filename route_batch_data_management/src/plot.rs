use std::{collections::BTreeMap, path::Path};

use geo::{BoundingRect, MultiPoint, Point, Rect};
use plotters::prelude::*;

use crate::{point_table::PointTable, route_table::RouteTable, RouteBatchError};

// Categorical palette, one color per destination id
const SET1: [RGBColor; 9] = [
    RGBColor(228, 26, 28),
    RGBColor(55, 126, 184),
    RGBColor(77, 175, 74),
    RGBColor(152, 78, 163),
    RGBColor(255, 127, 0),
    RGBColor(255, 255, 51),
    RGBColor(166, 86, 40),
    RGBColor(247, 129, 191),
    RGBColor(153, 153, 153),
];

const SIZE: (u32, u32) = (1024, 1024);

/// Renders routes colored by destination id with origin circles and destination crosses.
pub fn plot_routes(
    routes: &RouteTable,
    origins: &PointTable,
    destinations: &PointTable,
    export: &Path,
) -> Result<(), RouteBatchError> {
    let Some(bounds) = bounds(routes, origins, destinations) else {
        tracing::info!("Nothing to plot");
        return Ok(());
    };

    draw(routes, origins, destinations, bounds, export).map_err(|e| RouteBatchError::Plot(e.to_string()))?;
    tracing::info!("Wrote plot {}", export.display());
    Ok(())
}

fn bounds(routes: &RouteTable, origins: &PointTable, destinations: &PointTable) -> Option<Rect<f64>> {
    let points: MultiPoint<f64> = routes
        .rows
        .iter()
        .flat_map(|row| row.geometry.points())
        .chain(origins.points.iter().copied())
        .chain(destinations.points.iter().copied())
        .collect::<Vec<Point<f64>>>()
        .into();

    points.bounding_rect()
}

// Pads the extent so single points and straight lines stay visible
fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
    let pad = ((max - min) * 0.05).max(0.001);
    (min - pad)..(max + pad)
}

/// Categories in sorted order, as a categorical color map assigns them.
fn destination_colors(routes: &RouteTable) -> BTreeMap<&str, RGBColor> {
    let mut ids: Vec<&str> = routes.rows.iter().map(|r| r.destination_id.as_str()).collect();
    ids.sort();
    ids.dedup();

    ids.into_iter()
        .enumerate()
        .map(|(i, id)| (id, SET1[i % SET1.len()]))
        .collect()
}

fn draw(
    routes: &RouteTable,
    origins: &PointTable,
    destinations: &PointTable,
    bounds: Rect<f64>,
    export: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(export, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(padded(bounds.min().x, bounds.max().x), padded(bounds.min().y, bounds.max().y))?;

    let colors = destination_colors(routes);
    for row in &routes.rows {
        let color = colors[row.destination_id.as_str()];
        chart.draw_series(LineSeries::new(
            row.geometry.coords().map(|c| (c.x, c.y)),
            color.stroke_width(2),
        ))?;
    }

    chart.draw_series(
        origins
            .points
            .iter()
            .map(|p| Circle::new((p.x(), p.y()), 5, BLACK.filled())),
    )?;

    chart.draw_series(
        destinations
            .points
            .iter()
            .map(|p| Cross::new((p.x(), p.y()), 6, RED.stroke_width(2))),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point};
    use route_batch_lib::CRS;

    use crate::route_table::RouteRow;

    use super::*;

    fn route(destination: &str) -> RouteRow {
        RouteRow {
            origin_id: "1".into(),
            origin_name: "SciLi".into(),
            destination_id: destination.into(),
            destination_name: "Hay".into(),
            distance: 0.3,
            travel_time: 2.1,
            geometry: line_string![(x: -71.4004, y: 41.827), (x: -71.4033, y: 41.8268)],
        }
    }

    fn points(points: Vec<Point<f64>>) -> PointTable {
        PointTable {
            columns: vec![],
            rows: vec![vec![]; points.len()],
            points,
            crs: CRS,
        }
    }

    #[test]
    fn colors_follow_sorted_destination_ids() {
        let routes = RouteTable {
            rows: vec![route("b"), route("a"), route("b")],
            crs: CRS,
        };

        let colors = destination_colors(&routes);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["a"], SET1[0]);
        assert_eq!(colors["b"], SET1[1]);
    }

    #[test]
    fn writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("routes.svg");
        let routes = RouteTable {
            rows: vec![route("a")],
            crs: CRS,
        };

        plot_routes(
            &routes,
            &points(vec![point!(x: -71.4004, y: 41.827)]),
            &points(vec![point!(x: -71.4033, y: 41.8268)]),
            &export,
        )
        .unwrap();

        let svg = std::fs::read_to_string(&export).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("circle"));
    }

    #[test]
    fn empty_tables_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("routes.svg");
        let routes = RouteTable { rows: vec![], crs: CRS };

        plot_routes(&routes, &points(vec![]), &points(vec![]), &export).unwrap();
        assert!(!export.exists());
    }
}
