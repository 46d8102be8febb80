use async_trait::async_trait;
use uuid::Uuid;

use crate::traits::Notifiable;
use crate::types::{DeliveryRate, LocationRequest, Permission, PositionFix, SensorReading, SensorType};

/// Platform location provider.
///
/// Listeners receive every fix the provider produces until they are unregistered.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Subscribes `listener` to position fixes. Returns the registration id.
    async fn register_listener(
        &self,
        listener: &mut dyn Notifiable<PositionFix>,
        request: &LocationRequest,
    ) -> Result<Uuid, String>;

    async fn unregister_listener(&self, id: Uuid);

    /// Last fix known to the provider, if any.
    async fn last_location(&self) -> Result<Option<PositionFix>, String>;
}

/// Platform motion sensors.
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Sensors present on the device.
    async fn get_available_sensors(&self) -> Vec<SensorType>;

    async fn register_listener(
        &self,
        listener: &mut dyn Notifiable<SensorReading>,
        sensor_type: SensorType,
        rate: DeliveryRate,
    ) -> Result<Uuid, String>;

    async fn unregister_listener(&self, id: Uuid);
}

/// Runtime permission checks and prompts.
pub trait PermissionGate: Send + Sync {
    fn is_granted(&self, permission: Permission) -> bool;
    /// Asks the user for `permissions`. The outcome is observed through later `is_granted` calls.
    fn request(&self, permissions: &[Permission]);
}
