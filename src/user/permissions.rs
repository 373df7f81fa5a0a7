use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    AccessCatalog,
    OwnPlaylists,
    ImportMusic,
    ManageCatalog,
    ManageNotices,
    ManageUsers,
}

impl Permission {
    pub fn as_int(self) -> i32 {
        match self {
            Permission::AccessCatalog => 1,
            Permission::OwnPlaylists => 2,
            Permission::ImportMusic => 3,
            Permission::ManageCatalog => 4,
            Permission::ManageNotices => 5,
            Permission::ManageUsers => 6,
        }
    }

    pub fn from_int(value: i32) -> Option<Self> {
        match value {
            1 => Some(Permission::AccessCatalog),
            2 => Some(Permission::OwnPlaylists),
            3 => Some(Permission::ImportMusic),
            4 => Some(Permission::ManageCatalog),
            5 => Some(Permission::ManageNotices),
            6 => Some(Permission::ManageUsers),
            _ => None,
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AccessCatalog,
    Permission::OwnPlaylists,
    Permission::ImportMusic,
    Permission::ManageCatalog,
    Permission::ManageNotices,
    Permission::ManageUsers,
];
const REGULAR_PERMISSIONS: &[Permission] = &[Permission::AccessCatalog, Permission::OwnPlaylists];

/// A user's role, persisted as its role number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Regular,
    Admin,
}

impl UserRole {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            UserRole::Admin => ADMIN_PERMISSIONS,
            UserRole::Regular => REGULAR_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn role_no(self) -> i32 {
        match self {
            UserRole::Regular => 1,
            UserRole::Admin => 2,
        }
    }

    pub fn from_role_no(value: i32) -> Option<Self> {
        match value {
            1 => Some(UserRole::Regular),
            2 => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Regular => "Regular",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "regular" => Some(UserRole::Regular),
            _ => None,
        }
    }
}
