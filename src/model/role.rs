use serde::{Deserialize, Serialize};

/// The closed set of account roles.
///
/// Role dispatch is always an exhaustive match on this enum; the
/// role-to-dashboard mapping lives here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Advisor,
    Student,
    Judge,
    Director,
    Manager,
}

impl Role {
    /// String tag stored on the user row.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advisor => "advisor",
            Self::Student => "student",
            Self::Judge => "judge",
            Self::Director => "director",
            Self::Manager => "manager",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "advisor" => Some(Self::Advisor),
            "student" => Some(Self::Student),
            "judge" => Some(Self::Judge),
            "director" => Some(Self::Director),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    /// Dashboard path a user of this role lands on after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Advisor => "/advisor/dashboard",
            Self::Student => "/student/dashboard",
            Self::Judge => "/judge/dashboard",
            Self::Director | Self::Manager => "/admin/dashboard",
        }
    }

    /// Directors and managers share the administrator surface.
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Director | Self::Manager => true,
            Self::Advisor | Self::Student | Self::Judge => false,
        }
    }

    /// Roles that may create an account through the public registration
    /// endpoint. Admin accounts are provisioned operationally.
    pub fn self_registrable(&self) -> bool {
        !self.is_admin()
    }
}
