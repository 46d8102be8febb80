use std::fmt;

/// Runtime capability the application asks the platform for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    FineLocation,
    StorageWrite,
}

impl Permission {
    /// Permissions requested once at startup.
    pub const REQUIRED: [Permission; 2] = [Permission::FineLocation, Permission::StorageWrite];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::FineLocation => f.write_str("fine location"),
            Permission::StorageWrite => f.write_str("storage write"),
        }
    }
}
