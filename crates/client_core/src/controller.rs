use shared::domain::UserId;
use tracing::{error, info};

use crate::{
    collection::{CollectionView, FormDraft, RemoteOutcome, RemoteRequest},
    UsersApi,
};

/// Runs one request against the users resource. This is the single place
/// remote failures are caught: they are logged and reported as
/// [`RemoteOutcome::Failed`], never propagated.
pub async fn execute<A>(api: &A, request: RemoteRequest) -> RemoteOutcome
where
    A: UsersApi + ?Sized,
{
    let operation = request.operation();
    let result = match request {
        RemoteRequest::Load => api.list_users().await.map(RemoteOutcome::Loaded),
        RemoteRequest::Create(payload) => api.create_user(&payload).await.map(RemoteOutcome::Created),
        RemoteRequest::Update { id, payload } => api
            .update_user(id, &payload)
            .await
            .map(|user| RemoteOutcome::Updated { id, user }),
        RemoteRequest::Delete(id) => api.delete_user(id).await.map(|()| RemoteOutcome::Deleted(id)),
    };

    match result {
        Ok(outcome) => {
            info!(operation = operation.as_str(), "users: remote call succeeded");
            outcome
        }
        Err(err) => {
            error!(operation = operation.as_str(), "users: {err}");
            RemoteOutcome::Failed(operation)
        }
    }
}

/// Drives a [`CollectionView`] by awaiting each remote call in place. Used by
/// the command-line front end and tests; the GUI runs the same requests on a
/// worker and feeds outcomes back itself.
pub struct CollectionController<A: UsersApi> {
    api: A,
    view: CollectionView,
}

impl<A: UsersApi> CollectionController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: CollectionView::new(),
        }
    }

    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        self.view.draft_mut()
    }

    pub async fn load(&mut self) -> bool {
        self.run(RemoteRequest::Load).await
    }

    pub fn begin_create(&mut self) {
        self.view.begin_create();
    }

    /// Opens the form on the local record with `id`. Returns false when the
    /// collection has no such record.
    pub fn begin_edit(&mut self, id: UserId) -> bool {
        let Some(user) = self.view.users().get(id).cloned() else {
            return false;
        };
        self.view.begin_edit(&user);
        true
    }

    pub fn cancel(&mut self) {
        self.view.cancel();
    }

    pub async fn submit(&mut self) -> bool {
        let request = self.view.submit_request();
        self.run(request).await
    }

    pub async fn delete(&mut self, id: UserId) -> bool {
        self.run(RemoteRequest::Delete(id)).await
    }

    async fn run(&mut self, request: RemoteRequest) -> bool {
        let outcome = execute(&self.api, request).await;
        let applied = outcome.is_success();
        self.view.apply(outcome);
        applied
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
