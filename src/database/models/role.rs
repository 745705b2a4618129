use serde::{Deserialize, Serialize};

/// Fixed role set. Ids match the `roles` table seeded by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl Role {
    pub const DEFAULT: Role = Role::User;

    pub fn id(self) -> i32 {
        match self {
            Role::User => 1,
            Role::Manager => 2,
            Role::Admin => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Role> {
        match id {
            1 => Some(Role::User),
            2 => Some(Role::Manager),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Manager => "Manager",
            Role::Admin => "Admin",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles a caller may pick for themselves at registration.
    pub fn is_self_assignable(self) -> bool {
        matches!(self, Role::User | Role::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
