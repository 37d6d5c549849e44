use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId};

/// Body sent with create and update requests. The id travels in the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

pub fn users_route() -> &'static str {
    "/users"
}

pub fn user_route(id: UserId) -> String {
    format!("{}/{id}", users_route())
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}
