use log::{debug, error, info, warn};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use crate::adapters::mock::{MockLocationSource, MockSensorSource, StaticPermissions};
use crate::codec;
use crate::constants::MOCK_SENSOR_PERIOD_MILLIS;
use crate::models::config::TrackerConfig;
use crate::models::errors::TrackerError;
use crate::models::session::{
    CollectingSession, CollectingState, SaveOutcome, TrackingSession, TrackingState,
};
use crate::models::shutdown;
use common::traits::{DestinationPicker, LocationSource, PermissionGate, Presenter, SensorSource};
use common::types::{
    Notice, Permission, PositionFix, PresentationEvent, SensorReading, SensorType, Track,
};
use publisher::{listener, Listener, Publishable, Publisher};

/// Owns the track of the current tracking session and the sensor listeners of the
/// current collecting session. Cloning yields a handle to the same logger.
#[derive(Clone)]
pub struct SessionLogger {
    location_source: Arc<dyn LocationSource>,
    sensor_source: Arc<dyn SensorSource>,
    permissions: Arc<dyn PermissionGate>,
    picker: Arc<dyn DestinationPicker>,
    presenters: Publisher<PresentationEvent>,
    tracking: Arc<Mutex<Option<TrackingSession>>>,
    collecting: Arc<Mutex<Option<CollectingSession>>>,
    last_track: Arc<Mutex<Option<Track>>>,
    config: Arc<TrackerConfig>,
}

impl SessionLogger {
    pub fn new(
        location_source: Arc<dyn LocationSource>,
        sensor_source: Arc<dyn SensorSource>,
        permissions: Arc<dyn PermissionGate>,
        picker: Arc<dyn DestinationPicker>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            location_source,
            sensor_source,
            permissions,
            picker,
            presenters: Publisher::new(),
            tracking: Arc::new(Mutex::new(None)),
            collecting: Arc::new(Mutex::new(None)),
            last_track: Arc::new(Mutex::new(None)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Prompts for the permissions not granted yet. Returns the ones that were requested.
    pub fn request_permissions(&self) -> Vec<Permission> {
        let missing: Vec<Permission> = Permission::REQUIRED
            .iter()
            .copied()
            .filter(|permission| !self.permissions.is_granted(*permission))
            .collect();
        if !missing.is_empty() {
            info!("Requesting permissions {:?}", missing);
            self.permissions.request(&missing);
        }
        missing
    }

    /// Subscribes `presenter` to sensor text, location and notice updates.
    pub async fn attach_presenter(&self, presenter: Arc<dyn Presenter>) -> Uuid {
        let mut listener = Listener::new(move |_id, event: Arc<PresentationEvent>| {
            let presenter = presenter.clone();
            async move {
                present(presenter.as_ref(), &event);
            }
        });
        self.presenters.register_listener(&mut listener).await
    }

    pub async fn detach_presenter(&self, id: Uuid) -> bool {
        self.presenters.unregister_listener(id).await
    }

    async fn publish(&self, event: PresentationEvent) {
        self.presenters.notify_listeners(Arc::new(event)).await;
    }

    async fn notify(&self, notice: Notice) {
        self.publish(PresentationEvent::Notice(notice)).await;
    }

    pub async fn tracking_state(&self) -> TrackingState {
        match self.tracking.lock().await.as_ref() {
            Some(_) => TrackingState::Tracking,
            None => TrackingState::Idle,
        }
    }

    pub async fn collecting_state(&self) -> CollectingState {
        match self.collecting.lock().await.as_ref() {
            Some(_) => CollectingState::Collecting,
            None => CollectingState::Idle,
        }
    }

    /// Snapshot of the track being recorded. `None` while idle.
    pub async fn current_track(&self) -> Option<Track> {
        self.tracking
            .lock()
            .await
            .as_ref()
            .map(|session| session.track().clone())
    }

    /// Track of the most recently stopped session.
    pub async fn last_track(&self) -> Option<Track> {
        self.last_track.lock().await.clone()
    }

    /// Starts recording position fixes into a fresh track.
    ///
    /// Returns the id of the new session, or of the running one when already tracking.
    /// Fails with `PermissionDenied` without fine location permission, and with `Source`
    /// when the location source refuses the listener. The logger stays idle on failure.
    pub async fn start_tracking(&self) -> Result<Uuid, TrackerError> {
        let mut tracking = self.tracking.lock().await;
        if let Some(session) = tracking.as_ref() {
            debug!("Already tracking in session {}", session.id());
            return Ok(session.id());
        }

        if !self.permissions.is_granted(Permission::FineLocation) {
            drop(tracking);
            warn!("Tracking not started: location permission not granted");
            self.notify(Notice::PermissionDenied(Permission::FineLocation))
                .await;
            return Err(TrackerError::PermissionDenied(Permission::FineLocation));
        }

        let mut listener = listener!(self.handle_fix);
        let listener_id = self
            .location_source
            .register_listener(&mut listener, &self.config.location_request())
            .await
            .map_err(|e| {
                error!("Error registering location listener: {}", e);
                TrackerError::Source(e)
            })?;

        let session = TrackingSession::new(listener_id);
        let session_id = session.id();
        *tracking = Some(session);
        info!("Tracking session {} started", session_id);
        Ok(session_id)
    }

    pub async fn start_location_updates(&self) -> Result<Uuid, TrackerError> {
        self.start_tracking().await
    }

    async fn handle_fix(&self, listener_id: Uuid, fix: Arc<PositionFix>) {
        if !self.record_fix(*fix, Some(listener_id)).await {
            debug!("Fix from listener {} dropped", listener_id);
        }
    }

    /// Records a fix delivered by the platform. Returns false when the fix is dropped,
    /// either because the logger is idle or because a coordinate is not finite.
    pub async fn on_position_fix(&self, latitude: f64, longitude: f64) -> bool {
        self.record_fix(PositionFix::new(latitude, longitude), None)
            .await
    }

    async fn record_fix(&self, fix: PositionFix, listener_id: Option<Uuid>) -> bool {
        if !fix.latitude().is_finite() || !fix.longitude().is_finite() {
            warn!("Non-finite fix {:?} dropped", fix);
            return false;
        }
        {
            let mut tracking = self.tracking.lock().await;
            match tracking.as_mut() {
                Some(session) if listener_id.map_or(true, |id| id == session.listener_id()) => {
                    session.record(fix);
                }
                _ => return false,
            }
        }
        self.publish(PresentationEvent::LocationUpdated(fix)).await;
        true
    }

    /// Closes the running session and keeps its track as the last track.
    async fn end_tracking_session(&self) -> Option<Track> {
        let session = self.tracking.lock().await.take()?;
        self.location_source
            .unregister_listener(session.listener_id())
            .await;
        let track = session.into_track();
        *self.last_track.lock().await = Some(track.clone());
        Some(track)
    }

    /// Stops recording and saves the track to a destination picked by the user.
    ///
    /// Returns `Ok(None)` when not tracking. A failed save leaves the track available
    /// to [`save_current_track`](Self::save_current_track).
    pub async fn stop_tracking(&self) -> Result<Option<SaveOutcome>, TrackerError> {
        let track = match self.end_tracking_session().await {
            Some(track) => track,
            None => {
                debug!("Not tracking, nothing to stop");
                return Ok(None);
            }
        };
        info!(
            "Tracking stopped with {} fixes over {:.0} m",
            track.len(),
            track.length_meters()
        );
        self.save_track(&track).await.map(Some)
    }

    pub async fn stop_location_updates(&self) -> Result<Option<SaveOutcome>, TrackerError> {
        self.stop_tracking().await
    }

    /// Saves the running session's track so far, or else the last stopped track.
    pub async fn save_current_track(&self) -> Result<Option<SaveOutcome>, TrackerError> {
        let snapshot = self.current_track().await;
        let track = match snapshot {
            Some(track) => track,
            None => match self.last_track().await {
                Some(track) => track,
                None => {
                    info!("No track to save");
                    return Ok(None);
                }
            },
        };
        self.save_track(&track).await.map(Some)
    }

    async fn save_track(&self, track: &Track) -> Result<SaveOutcome, TrackerError> {
        let request = self.config.destination_request();
        let mut destination = match self.picker.pick_destination(&request).await {
            Ok(Some(destination)) => destination,
            Ok(None) => {
                info!("Save cancelled, no destination picked");
                return Ok(SaveOutcome::Cancelled);
            }
            Err(e) => return Err(self.save_failed("pick destination", e).await),
        };

        let bytes = match codec::serialize(track) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to save data: {}", e);
                self.notify(Notice::SaveFailed(e.to_string())).await;
                return Err(e);
            }
        };
        if let Err(e) = destination.write_all(&bytes).await {
            return Err(self.save_failed("write track", e).await);
        }

        let uri = destination.uri().to_string();
        info!("Data saved: {} fixes to {}", track.len(), uri);
        self.notify(Notice::Saved {
            destination: uri.clone(),
            fixes: track.len(),
        })
        .await;
        Ok(SaveOutcome::Saved {
            destination: uri,
            fixes: track.len(),
        })
    }

    async fn save_failed(&self, operation: &str, e: io::Error) -> TrackerError {
        error!("Failed to save data: {}", e);
        self.notify(Notice::SaveFailed(e.to_string())).await;
        TrackerError::io(operation, e)
    }

    /// Registers for readings of every captured sensor the source provides.
    /// Registrations already made are rolled back if one fails.
    pub async fn start_collecting(&self) -> Result<(), TrackerError> {
        let mut collecting = self.collecting.lock().await;
        if collecting.is_some() {
            debug!("Already collecting");
            return Ok(());
        }

        let available = self.sensor_source.get_available_sensors().await;
        let mut listener_ids = Vec::new();
        for sensor_type in SensorType::CAPTURED {
            if !available.contains(&sensor_type) {
                warn!("{} not available, skipped", sensor_type);
                continue;
            }
            let rate = self.config.sensors.rate_for(sensor_type);
            let mut listener = listener!(self.handle_reading);
            match self
                .sensor_source
                .register_listener(&mut listener, sensor_type, rate)
                .await
            {
                Ok(id) => listener_ids.push(id),
                Err(e) => {
                    error!("Error registering {} listener: {}", sensor_type, e);
                    for id in listener_ids {
                        self.sensor_source.unregister_listener(id).await;
                    }
                    return Err(TrackerError::Source(e));
                }
            }
        }

        info!("Collecting {} sensors", listener_ids.len());
        *collecting = Some(CollectingSession::new(listener_ids));
        Ok(())
    }

    pub async fn stop_collecting(&self) {
        let session = self.collecting.lock().await.take();
        match session {
            Some(session) => {
                for id in session.into_listener_ids() {
                    self.sensor_source.unregister_listener(id).await;
                }
                info!("Sensor collection stopped");
            }
            None => debug!("Not collecting, nothing to stop"),
        }
    }

    async fn handle_reading(&self, listener_id: Uuid, reading: Arc<SensorReading>) {
        let owned = self
            .collecting
            .lock()
            .await
            .as_ref()
            .map_or(false, |session| session.owns(&listener_id));
        if !owned {
            return;
        }
        let data = reading.formatted();
        debug!("Sensor: {}, Data: {}", reading.sensor_type(), data);
        self.publish(PresentationEvent::SensorData {
            sensor_type: reading.sensor_type(),
            data,
        })
        .await;
    }

    /// Last fix known to the location source. `None` without location permission.
    pub async fn get_current_location(&self) -> Option<PositionFix> {
        if !self.permissions.is_granted(Permission::FineLocation) {
            error!("Location permission not granted");
            return None;
        }
        match self.location_source.last_location().await {
            Ok(fix) => fix,
            Err(e) => {
                error!("Failed to get current location: {}", e);
                None
            }
        }
    }

    /// Releases every source registration. A running track is kept as the last
    /// track and is not saved.
    pub async fn shutdown(&self) {
        self.stop_collecting().await;
        if let Some(track) = self.end_tracking_session().await {
            info!("Tracking ended by shutdown with {} unsaved fixes", track.len());
        }
        self.presenters.unregister_all().await;
    }
}

fn present(presenter: &dyn Presenter, event: &PresentationEvent) {
    match event {
        PresentationEvent::SensorData { sensor_type, data } => {
            presenter.on_sensor_data_collected(sensor_type.name(), data)
        }
        PresentationEvent::LocationUpdated(fix) => {
            presenter.on_location_updated(fix.latitude(), fix.longitude())
        }
        PresentationEvent::Notice(notice) => presenter.on_notice(notice),
    }
}

/// Logger wired to mock sources, with handles to drive them.
pub struct MockService {
    pub logger: SessionLogger,
    pub location_source: Arc<MockLocationSource>,
    pub sensor_source: Arc<MockSensorSource>,
    pub permissions: Arc<StaticPermissions>,
}

/// Starts a session logger fed by recorded data.
///
/// The route in `route_csv` is replayed at the configured location interval and the
/// readings in `sensor_csv` every 100 ms, until Ctrl+C or until `run_for_millis` elapsed.
/// The logger is shut down when the replay ends.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` representing the spawned replay task.
/// - A [`MockService`] with the logger and the mock collaborators.
pub fn run_mock_service(
    route_csv: &str,
    sensor_csv: &str,
    picker: Arc<dyn DestinationPicker>,
    config: TrackerConfig,
    add_noise: bool,
    run_for_millis: Option<u64>,
) -> Result<(tokio::task::JoinHandle<()>, MockService), TrackerError> {
    let location_source = Arc::new(MockLocationSource::from_csv(route_csv, add_noise)?);
    let sensor_source = Arc::new(MockSensorSource::from_csv(
        sensor_csv,
        SensorType::CAPTURED.to_vec(),
        add_noise,
    )?);
    let permissions = Arc::new(StaticPermissions::all_granted());
    let location_period = config.location_request().interval.max(Duration::from_millis(1));

    let logger = SessionLogger::new(
        location_source.clone(),
        sensor_source.clone(),
        permissions.clone(),
        picker,
        config,
    );

    let abort_signal = Arc::new(Notify::new());
    shutdown::listen_for_shutdown(Arc::clone(&abort_signal), run_for_millis);

    let handle = tokio::spawn({
        let location_source = location_source.clone();
        let sensor_source = sensor_source.clone();
        let logger = logger.clone();
        async move {
            let (location_result, sensor_result) = tokio::join!(
                location_source.start(location_period, abort_signal.clone()),
                sensor_source.start(
                    Duration::from_millis(MOCK_SENSOR_PERIOD_MILLIS),
                    abort_signal.clone()
                ),
            );
            if let Err(e) = location_result {
                error!("Error in location replay loop: {:?}", e);
            }
            if let Err(e) = sensor_result {
                error!("Error in sensor replay loop: {:?}", e);
            }
            logger.shutdown().await;
        }
    });

    Ok((
        handle,
        MockService {
            logger,
            location_source,
            sensor_source,
            permissions,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::DeliveryRate;
    use test_utils::picker_mock::MemoryPicker;

    fn logger_with(
        location_source: Arc<MockLocationSource>,
        permissions: StaticPermissions,
    ) -> SessionLogger {
        SessionLogger::new(
            location_source,
            Arc::new(MockSensorSource::new(SensorType::CAPTURED.to_vec(), vec![], false).unwrap()),
            Arc::new(permissions),
            Arc::new(MemoryPicker::new()),
            TrackerConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sessions_start_with_fresh_tracks() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let logger = logger_with(source.clone(), StaticPermissions::all_granted());

        let first = logger.start_tracking().await.unwrap();
        source.push_fix(PositionFix::new(1.0, 1.0)).await;
        logger.stop_tracking().await.unwrap();

        let second = logger.start_tracking().await.unwrap();
        assert_ne!(first, second);
        assert_eq!(logger.current_track().await, Some(Track::new()));
        assert_eq!(logger.last_track().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_start_tracking_twice_keeps_session() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let logger = logger_with(source.clone(), StaticPermissions::all_granted());

        let first = logger.start_tracking().await.unwrap();
        let again = logger.start_tracking().await.unwrap();
        assert_eq!(first, again);
        assert_eq!(source.listener_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_listener_fixes_are_dropped() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let logger = logger_with(source, StaticPermissions::all_granted());
        logger.start_tracking().await.unwrap();

        logger
            .handle_fix(Uuid::new_v4(), Arc::new(PositionFix::new(1.0, 1.0)))
            .await;
        assert!(logger.current_track().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_location_request_follows_config() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let mut config = TrackerConfig::default();
        config.location.interval_millis = 5000;
        let logger = SessionLogger::new(
            source.clone(),
            Arc::new(MockSensorSource::new(vec![], vec![], false).unwrap()),
            Arc::new(StaticPermissions::all_granted()),
            Arc::new(MemoryPicker::new()),
            config,
        );
        logger.start_tracking().await.unwrap();

        let listener_id = logger.tracking.lock().await.as_ref().unwrap().listener_id();
        let request = source.request_for(&listener_id).unwrap();
        assert_eq!(request.interval, Duration::from_millis(5000));
        assert_eq!(request.fastest_interval, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_collecting_uses_configured_rates() {
        let sensors = Arc::new(
            MockSensorSource::new(SensorType::CAPTURED.to_vec(), vec![], false).unwrap(),
        );
        let mut config = TrackerConfig::default();
        config.sensors.set_rate(SensorType::Gyroscope, DeliveryRate::Fastest);
        let logger = SessionLogger::new(
            Arc::new(MockLocationSource::new(vec![], false).unwrap()),
            sensors.clone(),
            Arc::new(StaticPermissions::all_granted()),
            Arc::new(MemoryPicker::new()),
            config,
        );

        logger.start_collecting().await.unwrap();
        assert_eq!(
            sensors.registered_rates(SensorType::Gyroscope),
            vec![DeliveryRate::Fastest]
        );
        assert_eq!(
            sensors.registered_rates(SensorType::Accelerometer),
            vec![DeliveryRate::Ui]
        );
    }

    #[tokio::test]
    async fn test_request_permissions_only_asks_missing() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let permissions = Arc::new(StaticPermissions::new(&[Permission::FineLocation], true));
        let logger = SessionLogger::new(
            source,
            Arc::new(MockSensorSource::new(vec![], vec![], false).unwrap()),
            permissions.clone(),
            Arc::new(MemoryPicker::new()),
            TrackerConfig::default(),
        );

        assert_eq!(logger.request_permissions(), vec![Permission::StorageWrite]);
        assert_eq!(permissions.prompts(), 1);
        assert!(logger.request_permissions().is_empty());
        assert_eq!(permissions.prompts(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_keeps_track_without_saving() {
        let source = Arc::new(MockLocationSource::new(vec![], false).unwrap());
        let picker = Arc::new(MemoryPicker::new());
        let logger = SessionLogger::new(
            source.clone(),
            Arc::new(MockSensorSource::new(vec![], vec![], false).unwrap()),
            Arc::new(StaticPermissions::all_granted()),
            picker.clone(),
            TrackerConfig::default(),
        );
        logger.start_tracking().await.unwrap();
        source.push_fix(PositionFix::new(1.0, 2.0)).await;

        logger.shutdown().await;
        assert_eq!(logger.tracking_state().await, TrackingState::Idle);
        assert_eq!(source.listener_count(), 0);
        assert_eq!(logger.last_track().await.unwrap().len(), 1);
        assert!(picker.documents().is_empty());
    }
}
