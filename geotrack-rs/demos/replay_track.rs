use std::sync::Arc;
use tokio::time::Duration;

use common::constants::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};

use geotrack_rs::accuracy::{position_errors, ErrorSummary, ReferenceRoute};
use geotrack_rs::adapters::file_picker::DirectoryPicker;
use geotrack_rs::presenters::{ChannelPresenter, UiUpdate};
use geotrack_rs::{codec, services, SaveOutcome, TrackerConfig};
use test_utils::csv_loader;

#[tokio::main]
async fn main() {
    env_logger::init();

    let route_csv = concat!(env!("CARGO_MANIFEST_DIR"), "/../test-utils/test_data/route.csv");
    let sensor_csv = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../test-utils/test_data/sensor_readings.csv"
    );
    let export_dir = tempfile::tempdir().unwrap();

    let mut config = TrackerConfig::default();
    config.location.interval_millis = 250;

    // Start mock service. Tracking is stopped before the replay ends.
    let (handle, service) = services::run_mock_service(
        route_csv,
        sensor_csv,
        Arc::new(DirectoryPicker::new(export_dir.path())),
        config,
        true,
        Some(4000),
    )
    .unwrap();

    let (presenter, mut updates) = ChannelPresenter::new();
    service.logger.attach_presenter(Arc::new(presenter)).await;
    service.logger.request_permissions();
    service.logger.start_collecting().await.unwrap();
    service.logger.start_tracking().await.unwrap();

    // UI task. The map shows the default view until the first marker arrives.
    let ui = tokio::spawn(async move {
        println!(
            "Map at {:.4}, {:.4} zoom {}",
            DEFAULT_MAP_CENTER.0, DEFAULT_MAP_CENTER.1, DEFAULT_MAP_ZOOM
        );
        while let Some(update) = updates.recv().await {
            match update {
                UiUpdate::SensorText { text, .. } => println!("{}", text),
                UiUpdate::Marker {
                    latitude,
                    longitude,
                } => println!("Marker at {:.6}, {:.6}", latitude, longitude),
                UiUpdate::Toast(message) => println!("** {} **", message),
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(2500)).await;
    service.logger.stop_collecting().await;
    let outcome = service.logger.stop_tracking().await.unwrap();
    handle.await.unwrap();
    ui.abort();

    if let Some(SaveOutcome::Saved { destination, .. }) = outcome {
        let path = destination.trim_start_matches("file://");
        let saved = codec::deserialize(&tokio::fs::read(path).await.unwrap()).unwrap();
        let route = ReferenceRoute::new(csv_loader::load_route(route_csv).unwrap()).unwrap();
        let errors = position_errors(&saved, &route);
        if let Some(summary) = ErrorSummary::from_errors(&errors) {
            println!(
                "{} fixes over {:.0} m, mean error {:.2} m, median {:.2} m, 95% interval {:.2}..{:.2} m",
                saved.len(),
                saved.length_meters(),
                summary.mean,
                summary.median,
                summary.ci_95.0,
                summary.ci_95.1
            );
        }
    }
}
