// Emulates a platform location provider by replaying a recorded route

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use super::gaussian::GaussianNoise;
use crate::constants::MOCK_NOISE_STDEV_DEGREES;
use crate::models::errors::TrackerError;
use common::traits::{LocationSource, Notifiable};
use common::types::{LocationRequest, PositionFix};
use publisher::{Publishable, Publisher};
use test_utils::csv_loader;

/// Configures mock position fix delivery
pub struct MockLocationSource {
    route: Vec<PositionFix>,
    cursor: Mutex<usize>,
    publisher: Publisher<PositionFix>,
    requests: DashMap<Uuid, LocationRequest>,
    last_fix: Mutex<Option<PositionFix>>,
    noise: Option<GaussianNoise>,
    unavailable: AtomicBool,
}

impl MockLocationSource {
    /// Creates a source replaying `route` in a loop, optionally jittering every fix.
    pub fn new(route: Vec<PositionFix>, add_noise: bool) -> Result<Self, TrackerError> {
        let noise = if add_noise {
            Some(GaussianNoise::new(0.0, MOCK_NOISE_STDEV_DEGREES).map_err(TrackerError::Source)?)
        } else {
            None
        };
        Ok(Self {
            route,
            cursor: Mutex::new(0),
            publisher: Publisher::new(),
            requests: DashMap::new(),
            last_fix: Mutex::new(None),
            noise,
            unavailable: AtomicBool::new(false),
        })
    }

    /// Creates a source replaying a `latitude,longitude` CSV file.
    pub fn from_csv(file_path: &str, add_noise: bool) -> Result<Self, TrackerError> {
        let route = csv_loader::load_route(file_path)
            .map_err(|e| TrackerError::Source(format!("Cannot load route {}: {}", file_path, e)))?;
        Self::new(route, add_noise)
    }

    /// Makes further registrations fail, as a disabled provider would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn listener_count(&self) -> usize {
        self.publisher.len()
    }

    /// Request a registered listener asked for.
    pub fn request_for(&self, id: &Uuid) -> Option<LocationRequest> {
        self.requests.get(id).map(|entry| entry.value().clone())
    }

    /// Delivers one fix to every registered listener right away.
    pub async fn push_fix(&self, fix: PositionFix) {
        *self.last_fix.lock().await = Some(fix);
        self.publisher.notify_listeners(Arc::new(fix)).await;
    }

    /// Next route point, wrapping around at the end of the route.
    async fn next_fix(&self) -> Option<PositionFix> {
        if self.route.is_empty() {
            return None;
        }
        let mut cursor = self.cursor.lock().await;
        let fix = self.route[*cursor % self.route.len()];
        *cursor += 1;
        Some(match &self.noise {
            Some(noise) => noise.jitter(&mut StdRng::from_entropy(), fix),
            None => fix,
        })
    }

    /// Replays the route every `period` until `abort_signal` fires.
    /// Fixes are only produced while someone listens.
    pub async fn start(
        &self,
        period: Duration,
        abort_signal: Arc<Notify>,
    ) -> Result<(), TrackerError> {
        info!("Replaying {} route points every {:?}", self.route.len(), period);
        let mut interval = tokio::time::interval(period);
        // Registered once so a signal fired while a tick is handled is not lost.
        let aborted = abort_signal.notified();
        tokio::pin!(aborted);
        aborted.as_mut().enable();
        loop {
            tokio::select! {
                _ = &mut aborted => {
                    info!("Location replay stopped");
                    break;
                }
                _ = interval.tick() => {
                    if self.publisher.is_empty() {
                        continue;
                    }
                    if let Some(fix) = self.next_fix().await {
                        self.push_fix(fix).await;
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LocationSource for MockLocationSource {
    async fn register_listener(
        &self,
        listener: &mut dyn Notifiable<PositionFix>,
        request: &LocationRequest,
    ) -> Result<Uuid, String> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err("Location provider unavailable".to_string());
        }
        let id = self.publisher.register_listener(listener).await;
        debug!("Location listener {} registered with {:?}", id, request);
        self.requests.insert(id, request.clone());
        Ok(id)
    }

    async fn unregister_listener(&self, id: Uuid) {
        if self.publisher.unregister_listener(id).await {
            debug!("Location listener {} unregistered", id);
        }
        self.requests.remove(&id);
    }

    async fn last_location(&self) -> Result<Option<PositionFix>, String> {
        Ok(*self.last_fix.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use publisher::Listener;
    use std::sync::Mutex as StdMutex;

    fn recording_listener(received: Arc<StdMutex<Vec<PositionFix>>>) -> Listener<PositionFix> {
        Listener::new(move |_id: Uuid, fix: Arc<PositionFix>| {
            let received = received.clone();
            async move {
                received.lock().unwrap().push(*fix);
            }
        })
    }

    #[tokio::test]
    async fn test_from_csv() {
        let source = MockLocationSource::from_csv("../test-utils/test_data/route.csv", false).unwrap();
        assert_eq!(source.route.len(), 8);
        assert!(MockLocationSource::from_csv("../test-utils/test_data/nope.csv", false).is_err());
    }

    #[tokio::test]
    async fn test_next_fix_wraps_around() {
        let route = vec![PositionFix::new(1.0, 1.0), PositionFix::new(2.0, 2.0)];
        let source = MockLocationSource::new(route.clone(), false).unwrap();
        let fixes = vec![
            source.next_fix().await.unwrap(),
            source.next_fix().await.unwrap(),
            source.next_fix().await.unwrap(),
        ];
        assert_eq!(fixes, vec![route[0], route[1], route[0]]);
    }

    #[tokio::test]
    async fn test_push_fix_reaches_listener_and_last_location() {
        let source = MockLocationSource::new(vec![], false).unwrap();
        let received = Arc::new(StdMutex::new(Vec::new()));
        let mut listener = recording_listener(received.clone());
        let id = source
            .register_listener(&mut listener, &LocationRequest::default())
            .await
            .unwrap();
        assert_eq!(source.request_for(&id), Some(LocationRequest::default()));

        let fix = PositionFix::new(52.52, 13.405);
        source.push_fix(fix).await;
        assert_eq!(*received.lock().unwrap(), vec![fix]);
        assert_eq!(source.last_location().await.unwrap(), Some(fix));

        source.unregister_listener(id).await;
        source.push_fix(PositionFix::new(0.0, 0.0)).await;
        assert_eq!(received.lock().unwrap().len(), 1);
        assert_eq!(source.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_provider_refuses_listeners() {
        let source = MockLocationSource::new(vec![], false).unwrap();
        source.set_unavailable(true);
        let mut listener = recording_listener(Arc::new(StdMutex::new(Vec::new())));
        let result = source
            .register_listener(&mut listener, &LocationRequest::default())
            .await;
        assert!(result.is_err());
    }

    async fn wait_for_fixes(received: &Arc<StdMutex<Vec<PositionFix>>>, count: usize) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while received.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("replay loop produced no fixes");
    }

    #[tokio::test]
    async fn test_replay_until_abort() {
        let route = vec![PositionFix::new(1.0, 1.0), PositionFix::new(2.0, 2.0)];
        let source = Arc::new(MockLocationSource::new(route, false).unwrap());
        let received = Arc::new(StdMutex::new(Vec::new()));
        let mut listener = recording_listener(received.clone());
        source
            .register_listener(&mut listener, &LocationRequest::default())
            .await
            .unwrap();

        // A single signal must stop the loop, even with a tick due on every poll.
        for _ in 0..20 {
            let abort_signal = Arc::new(Notify::new());
            let handle = tokio::spawn({
                let source = source.clone();
                let abort_signal = abort_signal.clone();
                async move { source.start(Duration::from_millis(1), abort_signal).await }
            });

            let seen = received.lock().unwrap().len();
            wait_for_fixes(&received, seen + 1).await;
            abort_signal.notify_waiters();
            tokio::time::timeout(Duration::from_millis(500), handle)
                .await
                .expect("replay loop did not stop")
                .unwrap()
                .unwrap();
        }

        let received = received.lock().unwrap();
        assert!(received.len() >= 20);
        assert_eq!(received[0], PositionFix::new(1.0, 1.0));
        assert_eq!(received[1], PositionFix::new(2.0, 2.0));
    }
}
