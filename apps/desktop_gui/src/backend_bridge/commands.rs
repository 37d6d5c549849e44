//! Backend commands queued from UI to backend worker.

use client_core::RemoteRequest;
use shared::{domain::UserId, protocol::UserPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadUsers,
    CreateUser(UserPayload),
    UpdateUser { id: UserId, payload: UserPayload },
    DeleteUser(UserId),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadUsers => "load_users",
            BackendCommand::CreateUser(_) => "create_user",
            BackendCommand::UpdateUser { .. } => "update_user",
            BackendCommand::DeleteUser(_) => "delete_user",
        }
    }

    pub fn into_request(self) -> RemoteRequest {
        match self {
            BackendCommand::LoadUsers => RemoteRequest::Load,
            BackendCommand::CreateUser(payload) => RemoteRequest::Create(payload),
            BackendCommand::UpdateUser { id, payload } => RemoteRequest::Update { id, payload },
            BackendCommand::DeleteUser(id) => RemoteRequest::Delete(id),
        }
    }
}

impl From<RemoteRequest> for BackendCommand {
    fn from(request: RemoteRequest) -> Self {
        match request {
            RemoteRequest::Load => BackendCommand::LoadUsers,
            RemoteRequest::Create(payload) => BackendCommand::CreateUser(payload),
            RemoteRequest::Update { id, payload } => BackendCommand::UpdateUser { id, payload },
            RemoteRequest::Delete(id) => BackendCommand::DeleteUser(id),
        }
    }
}
