use std::sync::Arc;

use shared::{
    domain::{User, UserId},
    error::ApiError,
    protocol::UserPayload,
};
use tokio::sync::RwLock;

/// In-memory users collection, kept in insertion order.
#[derive(Clone, Default)]
pub struct ApiContext {
    users: Arc<RwLock<Vec<User>>>,
}

impl ApiContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

pub fn demo_users() -> Vec<User> {
    vec![
        User::new(UserId(1), "Leanne Graham", "Sincere@april.biz"),
        User::new(UserId(2), "Ervin Howell", "Shanna@melissa.tv"),
        User::new(UserId(3), "Clementine Bauch", "Nathan@yesenia.net"),
        User::new(UserId(4), "Patricia Lebsack", "Julianne.OConner@kory.org"),
        User::new(UserId(5), "Chelsey Dietrich", "Lucio_Hettinger@annie.ca"),
    ]
}

pub async fn list_users(ctx: &ApiContext) -> Vec<User> {
    ctx.users.read().await.clone()
}

pub async fn get_user(ctx: &ApiContext, id: UserId) -> Result<User, ApiError> {
    ctx.users
        .read()
        .await
        .iter()
        .find(|user| user.id == id)
        .cloned()
        .ok_or_else(|| user_not_found(id))
}

pub async fn create_user(ctx: &ApiContext, payload: UserPayload) -> Result<User, ApiError> {
    validate_payload(&payload)?;
    let mut users = ctx.users.write().await;
    let next_id = users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
    let user = payload.into_user(UserId(next_id));
    users.push(user.clone());
    Ok(user)
}

pub async fn update_user(
    ctx: &ApiContext,
    id: UserId,
    payload: UserPayload,
) -> Result<User, ApiError> {
    validate_payload(&payload)?;
    let mut users = ctx.users.write().await;
    let slot = users
        .iter_mut()
        .find(|user| user.id == id)
        .ok_or_else(|| user_not_found(id))?;
    *slot = payload.into_user(id);
    Ok(slot.clone())
}

pub async fn delete_user(ctx: &ApiContext, id: UserId) -> Result<(), ApiError> {
    let mut users = ctx.users.write().await;
    let before = users.len();
    users.retain(|user| user.id != id);
    if users.len() == before {
        return Err(user_not_found(id));
    }
    Ok(())
}

/// Both fields are required; the email only has to look like one.
fn validate_payload(payload: &UserPayload) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if !payload.email.trim().contains('@') {
        return Err(ApiError::validation("email must contain '@'"));
    }
    Ok(())
}

fn user_not_found(id: UserId) -> ApiError {
    ApiError::not_found(format!("user {id} not found"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
