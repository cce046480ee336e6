use serde::{Deserialize, Serialize};

use crate::post::Post;

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

/// Identity of whoever is driving the views. Resolved once at startup and
/// handed to every view that gates owner-only actions.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    pub fn is_owner(&self, post: &Post) -> bool {
        match (self.user_id(), post.owner_id.as_deref()) {
            (Some(user_id), Some(owner_id)) => user_id == owner_id,
            _ => false,
        }
    }
}
