//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`.
//!
//! Listeners wrap async callbacks (`Fn(Uuid, Arc<T>) -> Future`). A [`Publisher`] keeps
//! the registered callbacks and awaits all of them on every notification, so events
//! reach each listener in the order they were published. [`PublisherManager`] keys a
//! set of publishers by a channel type (e.g. the sensor a reading comes from).
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use publisher::{Listener, Publishable, Publisher};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let publisher = Publisher::<String>::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id: Uuid, data: Arc<String>| async move {
//!     println!("Listener received: {}", data);
//! });
//! let listener_id = publisher.register_listener(&mut listener).await;
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new("Hello, World!".to_string())).await;
//!
//! // Unregister the listener
//! assert!(publisher.unregister_listener(listener_id).await);
//! assert!(publisher.is_empty());
//! # });
//! ```

pub mod listener;
mod macros;
pub mod publisher;
pub mod publisher_manager;

pub use listener::Listener;
pub use publisher::{Publishable, Publisher};
pub use publisher_manager::PublisherManager;
