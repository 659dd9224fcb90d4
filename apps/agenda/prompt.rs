use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

use agenda::{ApiClient, App, ContactForm};

/// `agenda$ ` on the left; the book's state on the right: the loading
/// phase, a pending save, or the contact count, flagged when the last
/// operation failed.
pub(crate) struct AgendaPrompt<'a> {
    app     : &'a App<ApiClient>,
    form    : &'a ContactForm,
}

impl<'a> AgendaPrompt<'a> {
    pub(crate) fn new(app: &'a App<ApiClient>, form: &'a ContactForm) -> Self {
        Self { app, form }
    }

    fn status(&self) -> String {
        let mut status = if self.app.is_loading() {
            "loading...".to_string()
        } else if self.form.is_submitting() {
            "Saving...".to_string()
        } else {
            match self.app.contacts().len() {
                1 => "1 contact".to_string(),
                n => format!("{} contacts", n),
            }
        };

        if self.app.error().is_some() {
            status.push_str(" | error");
        }
        status
    }
}

impl Prompt for AgendaPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        "agenda$ ".into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        self.status().into()
    }

    fn render_prompt_indicator(&self, _: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(&self, search: PromptHistorySearch) -> Cow<'_, str> {
        format!("(search: {}) ", search.term).into()
    }
}
