//! Platform permission seam

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    CallPhone,
    ReadContacts,
}

/// Platform permission subsystem
pub trait PermissionChecker: Send + Sync {
    fn has_permission(&self, permission: Permission) -> bool;
}

/// Checker with a fixed answer per permission
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPermissions {
    pub call_phone: bool,
    pub read_contacts: bool,
}

impl PermissionChecker for StaticPermissions {
    fn has_permission(&self, permission: Permission) -> bool {
        match permission {
            Permission::CallPhone => self.call_phone,
            Permission::ReadContacts => self.read_contacts,
        }
    }
}

/// How to ask for the contacts permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPrompt {
    /// System permission popup
    Popup,
    /// App settings screen (for permanently denied permissions)
    OpenSettings,
}

/// Always tries the system popup first, even after a permanent denial.
pub fn contacts_permission_prompt(_permanently_denied: bool) -> PermissionPrompt {
    PermissionPrompt::Popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_first_even_when_permanently_denied() {
        assert_eq!(contacts_permission_prompt(false), PermissionPrompt::Popup);
        assert_eq!(contacts_permission_prompt(true), PermissionPrompt::Popup);
    }

    #[test]
    fn test_static_permissions() {
        let perms = StaticPermissions {
            call_phone: true,
            read_contacts: false,
        };
        assert!(perms.has_permission(Permission::CallPhone));
        assert!(!perms.has_permission(Permission::ReadContacts));
    }
}
