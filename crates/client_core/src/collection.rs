//! Local mirror of the remote users collection, the entry form draft, and the
//! reducer that folds confirmed remote outcomes into them.
//!
//! Nothing in here talks to the network. Callers turn user intent into a
//! [`RemoteRequest`], run it somewhere, and hand the resulting
//! [`RemoteOutcome`] back to [`CollectionView::apply`]. Only successful
//! outcomes mutate state.

use shared::{
    domain::{User, UserId},
    protocol::UserPayload,
};

use crate::error::RemoteOperation;

/// Ordered cache of the remote collection. Order is whatever the server
/// returned, extended by appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCollection {
    users: Vec<User>,
}

impl UserCollection {
    pub fn append(&mut self, user: User) {
        self.users.push(user);
    }

    /// Swaps the record stored under `id` for `user`. Returns false when no
    /// record carries that id.
    pub fn replace(&mut self, id: UserId, user: User) -> bool {
        match self.users.iter_mut().find(|existing| existing.id == id) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl From<Vec<User>> for UserCollection {
    fn from(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftMode {
    #[default]
    New,
    Editing(UserId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub mode: DraftMode,
    pub name: String,
    pub email: String,
}

impl FormDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn editing(user: &User) -> Self {
        Self {
            mode: DraftMode::Editing(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn payload(&self) -> UserPayload {
        UserPayload::new(self.name.clone(), self.email.clone())
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            DraftMode::New => "Add User",
            DraftMode::Editing(_) => "Edit User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            DraftMode::New => "Add User",
            DraftMode::Editing(_) => "Save Changes",
        }
    }

    /// The request a submit of this draft turns into.
    pub fn submit_request(&self) -> RemoteRequest {
        match self.mode {
            DraftMode::New => RemoteRequest::Create(self.payload()),
            DraftMode::Editing(id) => RemoteRequest::Update {
                id,
                payload: self.payload(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVisibility {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    Load,
    Create(UserPayload),
    Update { id: UserId, payload: UserPayload },
    Delete(UserId),
}

impl RemoteRequest {
    pub fn operation(&self) -> RemoteOperation {
        match self {
            Self::Load => RemoteOperation::Load,
            Self::Create(_) => RemoteOperation::Create,
            Self::Update { .. } => RemoteOperation::Update,
            Self::Delete(_) => RemoteOperation::Delete,
        }
    }
}

/// Result of running a [`RemoteRequest`]. `Failed` carries no detail: the
/// error has already been logged where it was caught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Loaded(Vec<User>),
    Created(User),
    Updated { id: UserId, user: User },
    Deleted(UserId),
    Failed(RemoteOperation),
}

impl RemoteOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionView {
    users: UserCollection,
    draft: FormDraft,
    form: FormVisibility,
}

impl CollectionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn form(&self) -> FormVisibility {
        self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form == FormVisibility::Open
    }

    pub fn begin_create(&mut self) {
        self.draft = FormDraft::empty();
        self.form = FormVisibility::Open;
    }

    pub fn begin_edit(&mut self, user: &User) {
        self.draft = FormDraft::editing(user);
        self.form = FormVisibility::Open;
    }

    pub fn cancel(&mut self) {
        self.close_form();
    }

    pub fn submit_request(&self) -> RemoteRequest {
        self.draft.submit_request()
    }

    pub fn apply(&mut self, outcome: RemoteOutcome) {
        match outcome {
            RemoteOutcome::Loaded(users) => self.users = UserCollection::from(users),
            RemoteOutcome::Created(user) => {
                self.users.append(user);
                self.close_form();
            }
            RemoteOutcome::Updated { id, user } => {
                if !self.users.replace(id, user) {
                    tracing::debug!(user_id = id.0, "updated user is not in the local collection");
                }
                self.close_form();
            }
            RemoteOutcome::Deleted(id) => {
                self.users.remove(id);
            }
            // write-through only on success; a failed submit keeps the form open
            RemoteOutcome::Failed(_) => {}
        }
    }

    fn close_form(&mut self) {
        self.form = FormVisibility::Closed;
        self.draft = FormDraft::empty();
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
