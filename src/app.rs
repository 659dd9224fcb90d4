use std::sync::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    Error,
    error::Result,
    api_client::ContactApi,
    contact::{Contact, ContactId, Draft},
    form::SubmitHandler,
};

pub const LOAD_FAILED   : &str = "Could not load contacts. Check that the server is running and try again.";
pub const CREATE_FAILED : &str = "Could not save the contact. Check your connection or the server status and try again.";
pub const DELETE_FAILED : &str = "Could not delete the contact. Try again or check the server.";

struct AppState {
    contacts: Vec<Contact>,
    loading : bool,
    error   : String,
}

/// Owner of the canonical contact list.
///
/// `load`, `add_contact` and `delete_contact` are the only mutators. They
/// take `&self` so several of them can be pending at once; the state lock
/// is only held between awaits, never across one.
pub struct App<A> {
    api     : A,
    state   : Mutex<AppState>,
    started : AtomicBool,
}

impl<A: ContactApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(AppState {
                contacts: Vec::new(),
                loading : true,
                error   : String::new(),
            }),
            started: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fail(&self, message: &str) {
        self.state().error = message.to_string();
    }

    /// Initial load. Accepted once; a failed listing is reported through
    /// `error()` and leaves the list empty.
    pub async fn load(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::State("Contacts were already loaded".into()));
        }

        {
            let mut state = self.state();
            state.loading = true;
            state.error.clear();
        }

        let rc = self.api.list().await;

        let mut state = self.state();
        match rc {
            Ok(contacts) => {
                log::info!("Loaded {} contacts", contacts.len());
                state.contacts = contacts;
            }
            Err(e) => {
                log::error!("Loading contacts error: {e}");
                state.error = LOAD_FAILED.to_string();
            }
        }
        state.loading = false;
        Ok(())
    }

    /// Creates `draft` on the backend and appends the returned record.
    /// On failure the error message is set and the error is handed back.
    pub async fn add_contact(&self, draft: &Draft) -> Result<Contact> {
        self.state().error.clear();

        match self.api.create(draft).await {
            Ok(contact) => {
                log::info!("Contact {} created", contact.id());
                self.state().contacts.push(contact.clone());
                Ok(contact)
            }
            Err(e) => {
                log::error!("Creating contact error: {e}");
                self.fail(CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Deletes on the backend first; the local list only changes once the
    /// server confirms.
    pub async fn delete_contact(&self, id: &ContactId) {
        self.state().error.clear();

        match self.api.delete_by_id(id).await {
            Ok(_) => {
                log::info!("Contact {} deleted", id);
                self.state().contacts.retain(|c| c.id() != id);
            }
            Err(e) => {
                log::error!("Deleting contact {} error: {e}", id);
                self.fail(DELETE_FAILED);
            }
        }
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.state().contacts.clone()
    }

    pub fn find(&self, id: &ContactId) -> Option<Contact> {
        self.state().contacts.iter()
            .find(|c| c.id() == id)
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        let state = self.state();
        match state.error.is_empty() {
            true => None,
            false => Some(state.error.clone()),
        }
    }
}

impl<A: ContactApi> SubmitHandler for App<A> {
    async fn submit(&self, draft: &Draft) -> Result<()> {
        self.add_contact(draft).await.map(|_| ())
    }
}
