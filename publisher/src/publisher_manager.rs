use dashmap::DashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

use crate::Publishable;

use super::publisher::Publisher;
use common::traits::publisher::Notifiable;

/// This module defines the `PublisherManager` struct, which manages publishers and their listeners.
/// It provides functionality to add and remove publishers, as well as to add and remove listeners
/// to/from specific publishers. Every publisher is identified by a publisher type (for example the
/// sensor a reading comes from) and every listener id remembers which publisher it belongs to.
///
/// # Example
///
/// ```rust
/// use uuid::Uuid;
/// use publisher::PublisherManager;
/// use publisher::listener;
/// use common::types::{SensorReading, SensorType};
/// use std::sync::Arc;
/// use tokio::runtime::Runtime;
///
/// let rt = Runtime::new().unwrap();
/// rt.block_on(async {
///
///     // Test struct
///     #[derive(Debug, Clone)]
///     struct TestBuffer;
///
///     impl TestBuffer {
///         fn new() -> Self {
///             Self
///         }
///
///         async fn handle(&self, _id: Uuid, reading: Arc<SensorReading>) {
///             println!("Reading: {:?}", reading);
///         }
///     }
///
///     // Create PublisherManager
///     let mut manager = PublisherManager::<SensorReading, SensorType>::new(&[]);
///     // Add new publisher for Accelerometers
///     manager.add_publisher(SensorType::Accelerometer);
///
///     // Prepare to create listener
///     let test_buffer = Arc::new(TestBuffer::new());
///     let mut listener = listener!(test_buffer.handle);
///
///     // add listener to existing Accelerometer publisher
///     let id = manager.add_listener(&mut listener, &SensorType::Accelerometer).await.unwrap();
///
///     // remove listener from Accelerometer publisher
///     manager.remove_listener(id).await.unwrap();
/// });
/// ```
#[derive(Clone)]
pub struct PublisherManager<T, S> {
    publishers: Arc<DashMap<S, Publisher<T>>>,
    control: Arc<DashMap<Uuid, S>>,
}

impl<T, S> PublisherManager<T, S>
where
    T: Send + Sync + Clone + 'static,
    S: Send + Sync + Hash + Eq + Clone + Into<usize>,
{
    pub fn new(publisher_types: &[S]) -> Self {
        let collection = DashMap::<S, Publisher<T>>::new();
        for publisher_type in publisher_types {
            collection.insert(publisher_type.clone(), Publisher::new());
        }

        Self {
            publishers: Arc::new(collection),
            control: Arc::new(DashMap::new()),
        }
    }

    /// Adds an empty publisher. An existing publisher of the same type keeps its listeners.
    pub fn add_publisher(&mut self, publisher_type: S) {
        self.publishers
            .entry(publisher_type)
            .or_insert_with(Publisher::new);
    }

    pub async fn remove_publisher(&mut self, publisher_type: &S) {
        if let Some((_, publisher)) = self.publishers.remove(publisher_type) {
            self.control.retain(|_, owner| *owner != *publisher_type);
            publisher.unregister_all().await;
        }
    }

    /// Publisher types sorted by their index.
    pub fn get_available_publisher_types(&self) -> Vec<S> {
        let mut publisher_types: Vec<S> = self
            .publishers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        publisher_types.sort_by_key(|publisher_type| publisher_type.clone().into());
        publisher_types
    }

    pub async fn add_listener(
        &self,
        listener: &mut dyn Notifiable<T>,
        publisher_type: &S,
    ) -> Result<Uuid, String> {
        let publisher = match self.publishers.get(publisher_type) {
            Some(publisher) => publisher.clone(),
            None => return Err("Publisher doesnt exist".to_string()),
        };
        let id = publisher.register_listener(listener).await;
        self.control.insert(id, publisher_type.clone());
        Ok(id)
    }

    pub async fn remove_listener(&self, id: Uuid) -> Result<(), String> {
        if let Some((_, publisher_type)) = self.control.remove(&id) {
            let publisher = match self.publishers.get(&publisher_type) {
                Some(publisher) => publisher.clone(),
                None => return Err("Publisher doesnt exist".to_string()),
            };
            publisher.unregister_listener(id).await;
            return Ok(());
        }
        Err("Listener Id not found".to_string())
    }

    /// Publisher type a listener was added to.
    pub fn get_listener_type(&self, id: &Uuid) -> Option<S> {
        self.control.get(id).map(|entry| entry.value().clone())
    }

    /// Number of listeners attached to `publisher_type`.
    pub fn count_listeners(&self, publisher_type: &S) -> usize {
        self.publishers
            .get(publisher_type)
            .map(|publisher| publisher.len())
            .unwrap_or(0)
    }

    pub async fn notify_listeners(&self, publisher_type: S, data: Arc<T>) {
        let publisher = self
            .publishers
            .get(&publisher_type)
            .map(|publisher| publisher.clone());
        if let Some(publisher) = publisher {
            publisher.notify_listeners(data).await;
        }
    }
}
