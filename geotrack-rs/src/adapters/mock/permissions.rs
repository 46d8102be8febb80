use dashmap::DashSet;
use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::traits::PermissionGate;
use common::types::Permission;

/// Permission gate with a fixed set of grants.
///
/// With `grant_on_request` the emulated user accepts every prompt.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    granted: DashSet<Permission>,
    grant_on_request: bool,
    prompts: AtomicUsize,
}

impl StaticPermissions {
    pub fn new(granted: &[Permission], grant_on_request: bool) -> Self {
        let set = DashSet::new();
        for permission in granted {
            set.insert(*permission);
        }
        Self {
            granted: set,
            grant_on_request,
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn all_granted() -> Self {
        Self::new(&Permission::REQUIRED, false)
    }

    pub fn none_granted() -> Self {
        Self::new(&[], false)
    }

    pub fn grant(&self, permission: Permission) {
        self.granted.insert(permission);
    }

    pub fn revoke(&self, permission: Permission) {
        self.granted.remove(&permission);
    }

    /// Number of prompts shown so far.
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl PermissionGate for StaticPermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    fn request(&self, permissions: &[Permission]) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if self.grant_on_request {
            for permission in permissions {
                info!("Granting {} permission", permission);
                self.granted.insert(*permission);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_revoke() {
        let permissions = StaticPermissions::none_granted();
        assert!(!permissions.is_granted(Permission::FineLocation));
        permissions.grant(Permission::FineLocation);
        assert!(permissions.is_granted(Permission::FineLocation));
        permissions.revoke(Permission::FineLocation);
        assert!(!permissions.is_granted(Permission::FineLocation));
    }

    #[test]
    fn test_request_grants_when_configured() {
        let declining = StaticPermissions::new(&[], false);
        declining.request(&[Permission::StorageWrite]);
        assert!(!declining.is_granted(Permission::StorageWrite));
        assert_eq!(declining.prompts(), 1);

        let accepting = StaticPermissions::new(&[], true);
        accepting.request(&Permission::REQUIRED);
        assert!(accepting.is_granted(Permission::FineLocation));
        assert!(accepting.is_granted(Permission::StorageWrite));
    }
}
