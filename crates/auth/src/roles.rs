use core::str::FromStr;

use serde::{Deserialize, Serialize};

use plannr_core::DomainError;

/// Role held by a principal inside one scope (workspace or group).
///
/// Both scope kinds share this single ranking. The variant order is the rank order, so
/// the derived `Ord` agrees with [`Role::rank`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
    Owner,
}

impl Role {
    /// All roles, lowest rank first.
    pub const ALL: [Role; 4] = [Role::Viewer, Role::Editor, Role::Admin, Role::Owner];

    pub fn rank(self) -> u8 {
        match self {
            Role::Viewer => 0,
            Role::Editor => 1,
            Role::Admin => 2,
            Role::Owner => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    /// `true` if this role ranks at or above `minimum`.
    pub fn at_least(self, minimum: Role) -> bool {
        self.rank() >= minimum.rank()
    }
}

/// Minimum-role check over a possibly absent role.
///
/// "Not a member" never satisfies anything, not even [`Role::Viewer`].
pub fn satisfies(role: Option<Role>, minimum: Role) -> bool {
    role.is_some_and(|r| r.at_least(minimum))
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
