use serde::Serialize;
use uuid::Uuid;

use crate::entities::users::Role;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may view a design.
    #[must_use]
    pub fn can_view(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.id == owner_id
    }

    /// Owners and admins may delete a design.
    #[must_use]
    pub fn can_delete(&self, owner_id: Uuid) -> bool {
        self.can_view(owner_id)
    }

    /// Only admins approve or reject.
    #[must_use]
    pub fn can_review(&self) -> bool {
        self.is_admin()
    }
}
