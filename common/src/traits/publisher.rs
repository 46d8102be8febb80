use crate::types::Callback;
use uuid::Uuid;

/// Something that can be registered with a publisher and called back with new events.
pub trait Notifiable<T>: Sync + Send {
    fn get_callback(&self) -> Callback<T>;
    fn set_id(&mut self, id: Uuid);
}
