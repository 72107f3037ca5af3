//! Caller identity passed explicitly into operations that need it

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiveWatchRole {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    #[serde(default)]
    pub roles: HashSet<HiveWatchRole>,
    /// Environments a non-admin may see
    #[serde(default)]
    pub visible_environments: HashSet<Uuid>,
}

impl Session {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            roles: HashSet::from([HiveWatchRole::Admin]),
            visible_environments: HashSet::new(),
        }
    }

    pub fn user(username: impl Into<String>, visible: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            username: username.into(),
            roles: HashSet::from([HiveWatchRole::User]),
            visible_environments: visible.into_iter().collect(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&HiveWatchRole::Admin)
    }

    pub fn can_see(&self, environment_id: Uuid) -> bool {
        self.is_admin() || self.visible_environments.contains(&environment_id)
    }

    /// Expected sets are admin-managed configuration
    pub fn can_edit_expected_sets(&self) -> bool {
        self.is_admin()
    }
}
