use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[derive(Clone)]
pub struct Listener<T> {
    callback: Callback<T>,
    id: Option<Uuid>,
}

impl<T> Listener<T>
where
    T: Send + Sync + 'static,
{
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(Uuid, Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback = Arc::new(move |id: Uuid, data: Arc<T>| {
            let fut = callback(id, data);
            Box::pin(fut) as Pin<Box<dyn Future<Output = ()> + Send>>
        });

        Listener { callback, id: None }
    }

    /// Id assigned by the last publisher this listener was registered with.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl<T> Notifiable<T> for Listener<T>
where
    T: Send + Sync,
{
    fn get_callback(&self) -> Callback<T> {
        self.callback.clone()
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener;
    use common::types::PositionFix;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FixRecorder {
        fixes: Arc<Mutex<Vec<(Uuid, PositionFix)>>>,
    }

    impl FixRecorder {
        async fn record(&self, id: Uuid, fix: Arc<PositionFix>) {
            self.fixes.lock().await.push((id, *fix));
        }
    }

    #[tokio::test]
    async fn test_new_listener() {
        let listener = Listener::new(|_id: Uuid, fix: Arc<PositionFix>| async move {
            assert_eq!(*fix, PositionFix::new(52.52, 13.405));
        });

        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(PositionFix::new(52.52, 13.405))).await;
    }

    #[tokio::test]
    async fn test_listener_with_method() {
        let recorder = Arc::new(FixRecorder::default());

        let listener = Listener::new({
            let recorder = recorder.clone();
            move |id: Uuid, fix: Arc<PositionFix>| {
                let recorder = recorder.clone();
                async move { recorder.record(id, fix).await }
            }
        });

        let id = Uuid::new_v4();
        listener.get_callback()(id, Arc::new(PositionFix::new(1.0, 2.0))).await;
        assert_eq!(*recorder.fixes.lock().await, vec![(id, PositionFix::new(1.0, 2.0))]);
    }

    #[tokio::test]
    async fn test_listener_with_macro() {
        let recorder = Arc::new(FixRecorder::default());
        let listener = listener!(recorder.record);

        let callback = listener.get_callback();
        let id = Uuid::new_v4();
        callback(id, Arc::new(PositionFix::new(1.0, 2.0))).await;
        callback(id, Arc::new(PositionFix::new(3.0, 4.0))).await;
        assert_eq!(recorder.fixes.lock().await.len(), 2);
    }

    #[test]
    fn test_set_id() {
        let mut listener = Listener::new(|_id: Uuid, _fix: Arc<PositionFix>| async {});
        assert!(listener.id().is_none());
        let id = Uuid::new_v4();
        listener.set_id(id);
        assert_eq!(listener.id(), Some(id));
    }
}
