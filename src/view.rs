use std::fmt::{self, Write};

use crate::{
    app::App,
    api_client::ContactApi,
    contact::{Contact, ContactId, Field},
    form::ContactForm,
};

/// Render-ready view of one contact with a delete trigger bound to its id.
pub struct ContactCard<'a, A> {
    app     : &'a App<A>,
    id      : ContactId,
    name    : String,
    phone   : String,
    email   : String,
    tag     : String,
}

impl<'a, A: ContactApi> ContactCard<'a, A> {
    fn new(app: &'a App<A>, contact: Contact) -> Self {
        Self {
            app,
            id      : contact.id().clone(),
            name    : contact.name().to_string(),
            phone   : contact.phone().to_string(),
            email   : contact.email().to_string(),
            tag     : contact.tag().to_string(),
        }
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub async fn delete(&self) {
        self.app.delete_contact(&self.id).await
    }
}

impl<A> fmt::Display for ContactCard<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.name)?;
        writeln!(f, "    phone: {}", self.phone)?;
        write!(f, "    email: {}", self.email)?;
        if !self.tag.is_empty() {
            write!(f, "\n    tag  : {}", self.tag)?;
        }
        Ok(())
    }
}

impl<A: ContactApi> App<A> {
    pub fn cards(&self) -> Vec<ContactCard<'_, A>> {
        self.contacts().into_iter()
            .map(|c| ContactCard::new(self, c))
            .collect()
    }
}

pub fn render_form(form: &ContactForm) -> String {
    let draft = form.draft();
    let errors = form.errors();
    let mut out = String::new();

    _ = writeln!(out, "New contact");
    for field in Field::ALL {
        let marker = match field {
            Field::Tag => " (optional)",
            _ => " *",
        };
        _ = writeln!(out, "  {:<6}{:<12}: {}", field.as_str(), marker, draft.field(field));
        let msg = errors.get(field);
        if !msg.is_empty() {
            _ = writeln!(out, "        ! {}", msg);
        }
    }

    _ = write!(out, "  [{}]", match form.is_submitting() {
        true => "Saving...",
        false => "Add contact",
    });
    out
}
