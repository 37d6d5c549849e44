use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{User, UserId},
    protocol::UserPayload,
};
use tracing::debug;

pub mod collection;
pub mod config;
pub mod controller;
pub mod error;

pub use collection::{
    CollectionView, DraftMode, FormDraft, FormVisibility, RemoteOutcome, RemoteRequest,
    UserCollection,
};
pub use config::{load_settings, ClientSettings};
pub use controller::{execute, CollectionController};
pub use error::{RemoteCallError, RemoteOperation};

/// The remote users collection resource.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> std::result::Result<Vec<User>, RemoteCallError>;
    async fn create_user(&self, payload: &UserPayload)
        -> std::result::Result<User, RemoteCallError>;
    async fn update_user(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> std::result::Result<User, RemoteCallError>;
    async fn delete_user(&self, id: UserId) -> std::result::Result<(), RemoteCallError>;
}

pub struct HttpUsersApi {
    http: Client,
    base_url: String,
}

impl HttpUsersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("building HTTP client")?;
        Ok(Self::with_client(http, settings.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        debug!(url = %self.base_url, "users: GET");
        let users = self
            .http
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    async fn post_user(&self, payload: &UserPayload) -> Result<User> {
        debug!(url = %self.base_url, "users: POST");
        let user = self
            .http
            .post(&self.base_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }

    async fn put_user(&self, id: UserId, payload: &UserPayload) -> Result<User> {
        let url = self.item_url(id);
        debug!(%url, user_id = id.0, "users: PUT");
        let user = self
            .http
            .put(&url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user)
    }

    async fn send_delete(&self, id: UserId) -> Result<()> {
        let url = self.item_url(id);
        debug!(%url, user_id = id.0, "users: DELETE");
        self.http.delete(&url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> std::result::Result<Vec<User>, RemoteCallError> {
        self.fetch_users()
            .await
            .map_err(|err| RemoteCallError::new(RemoteOperation::Load, err))
    }

    async fn create_user(
        &self,
        payload: &UserPayload,
    ) -> std::result::Result<User, RemoteCallError> {
        self.post_user(payload)
            .await
            .map_err(|err| RemoteCallError::new(RemoteOperation::Create, err))
    }

    async fn update_user(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> std::result::Result<User, RemoteCallError> {
        self.put_user(id, payload)
            .await
            .map_err(|err| RemoteCallError::new(RemoteOperation::Update, err))
    }

    async fn delete_user(&self, id: UserId) -> std::result::Result<(), RemoteCallError> {
        self.send_delete(id)
            .await
            .map_err(|err| RemoteCallError::new(RemoteOperation::Delete, err))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
