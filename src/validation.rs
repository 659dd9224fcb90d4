use crate::contact::{Draft, Field};

pub const REQUIRED      : &str = "required";
pub const MISSING_AT    : &str = "must contain @";

/// Per-field validation messages for `name`, `phone` and `email`.
/// An empty message means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    name    : String,
    phone   : String,
    email   : String,
}

impl ValidationErrors {
    /// Message for `field`. `tag` is never validated, so it is always "".
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name     => &self.name,
            Field::Phone    => &self.phone,
            Field::Email    => &self.email,
            Field::Tag      => "",
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty() && self.email.is_empty()
    }

    /// Fields carrying a message, in form order.
    pub fn failed(&self) -> Vec<(Field, &str)> {
        Field::ALL.iter()
            .map(|f| (*f, self.get(*f)))
            .filter(|(_, msg)| !msg.is_empty())
            .collect()
    }
}

pub fn validate(draft: &Draft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.name = REQUIRED.to_string();
    }

    if draft.phone.trim().is_empty() {
        errors.phone = REQUIRED.to_string();
    }

    let email = draft.email.trim();
    if email.is_empty() {
        errors.email = REQUIRED.to_string();
    } else if !email.contains('@') {
        errors.email = MISSING_AT.to_string();
    }

    errors
}
