use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[async_trait]
pub trait Publishable<T> {
    async fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid;
    /// Returns false if no listener was registered with `listener_id`.
    async fn unregister_listener(&self, listener_id: Uuid) -> bool;
    async fn unregister_all(&self);
    async fn notify_listeners(&self, data: Arc<T>);
}

/// Record of registered listeners that will be notified of new events.
#[derive(Clone, Default)]
pub struct Publisher<T> {
    listeners: Arc<DashMap<Uuid, Callback<T>>>,
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait]
impl<T> Publishable<T> for Publisher<T>
where
    T: Send + Sync + 'static,
{
    async fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid {
        let callback = listener.get_callback();
        let listener_id = Uuid::new_v4();
        listener.set_id(listener_id);
        self.listeners.insert(listener_id, callback);
        listener_id
    }

    async fn unregister_all(&self) {
        self.listeners.clear();
    }

    async fn unregister_listener(&self, listener_id: Uuid) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    /// Calls every registered listener with `data` and waits until all of them are done.
    async fn notify_listeners(&self, data: Arc<T>) {
        // Callbacks are collected first so no map guard is held across an await.
        let listeners: Vec<(Uuid, Callback<T>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        join_all(
            listeners
                .into_iter()
                .map(|(id, callback)| callback(id, data.clone())),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{listener, listener::Listener};
    use std::sync::Mutex;

    struct TestHandler {
        data: Arc<Mutex<Vec<i32>>>,
    }

    impl TestHandler {
        fn new() -> Self {
            Self {
                data: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn handle(&self, _id: Uuid, value: Arc<i32>) {
            let mut data = self.data.lock().unwrap();
            data.push(*value);
        }
    }

    #[tokio::test]
    async fn test_register_and_notify_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = Listener::new({
            let handler = handler.clone();
            move |id: Uuid, value| {
                let handler = handler.clone();
                async move { handler.handle(id, value).await }
            }
        });

        let listener_id = publisher.register_listener(&mut listener).await;
        assert_eq!(listener.id(), Some(listener_id));
        publisher.notify_listeners(Arc::new(42)).await;

        assert_eq!(*handler.data.lock().unwrap(), vec![42]);
    }

    #[tokio::test]
    async fn test_register_and_notify_listener_macro() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = listener!(handler.handle);

        publisher.register_listener(&mut listener).await;
        for value in [1, 2, 3] {
            publisher.notify_listeners(Arc::new(value)).await;
        }

        assert_eq!(*handler.data.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_notify_multiple_listeners() {
        let publisher = Publisher::new();
        let handler_a = Arc::new(TestHandler::new());
        let handler_b = Arc::new(TestHandler::new());

        publisher.register_listener(&mut listener!(handler_a.handle)).await;
        publisher.register_listener(&mut listener!(handler_b.handle)).await;
        assert_eq!(publisher.len(), 2);

        publisher.notify_listeners(Arc::new(7)).await;

        assert_eq!(*handler_a.data.lock().unwrap(), vec![7]);
        assert_eq!(*handler_b.data.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_unregister_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = listener!(handler.handle);

        let listener_id = publisher.register_listener(&mut listener).await;
        assert!(publisher.unregister_listener(listener_id).await);
        assert!(!publisher.unregister_listener(listener_id).await);
        publisher.notify_listeners(Arc::new(100)).await;

        // Should remain unchanged since listener was removed
        assert!(handler.data.lock().unwrap().is_empty());
        assert!(publisher.is_empty());
    }

    #[tokio::test]
    async fn test_notify_without_listeners() {
        let publisher = Publisher::<i32>::new();
        publisher.notify_listeners(Arc::new(1)).await;
        assert!(publisher.is_empty());
    }
}
