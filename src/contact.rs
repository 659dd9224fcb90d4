use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Deserializer};

use crate::{
    Error,
    error::Result,
};

/// Server-assigned contact identifier.
///
/// The backend may hand out strings or integers; both are kept in their
/// textual form and compared as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where D: Deserializer<'de> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(v) => ContactId(v),
            Raw::Number(v) => ContactId(v.to_string()),
        })
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        ContactId(id.to_string())
    }
}

impl From<String> for ContactId {
    fn from(id: String) -> Self {
        ContactId(id)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted contact as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Contact {
    id      : ContactId,
    #[serde(rename = "name", alias = "nombre")]
    name    : String,
    #[serde(rename = "phone", alias = "telefono")]
    phone   : String,
    #[serde(rename = "email", alias = "correo")]
    email   : String,
    #[serde(rename = "tag", alias = "etiqueta", default, deserialize_with = "optional_text")]
    tag     : String,
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where D: Deserializer<'de> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Contact {
    pub fn new(id: ContactId, draft: Draft) -> Self {
        Self {
            id,
            name    : draft.name,
            phone   : draft.phone,
            email   : draft.email,
            tag     : draft.tag,
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
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{},{}", self.id, self.name, self.phone, self.email)?;
        if !self.tag.is_empty() {
            write!(f, ",#{}", self.tag)?;
        }
        Ok(())
    }
}

/// A contact not yet persisted. It has no identifier and serializes to the
/// request body of a create call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    #[serde(rename = "name")]
    pub name    : String,
    #[serde(rename = "phone")]
    pub phone   : String,
    #[serde(rename = "email")]
    pub email   : String,
    #[serde(rename = "tag")]
    pub tag     : String,
}

impl Draft {
    pub fn new(name: &str, phone: &str, email: &str, tag: &str) -> Self {
        Self {
            name    : name.to_string(),
            phone   : phone.to_string(),
            email   : email.to_string(),
            tag     : tag.to_string(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name     => &self.name,
            Field::Phone    => &self.phone,
            Field::Email    => &self.email,
            Field::Tag      => &self.tag,
        }
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name     => &mut self.name,
            Field::Phone    => &mut self.phone,
            Field::Email    => &mut self.email,
            Field::Tag      => &mut self.tag,
        };
        *slot = value.to_string();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Tag,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Phone, Field::Email, Field::Tag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name     => "name",
            Field::Phone    => "phone",
            Field::Email    => "email",
            Field::Tag      => "tag",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name"  => Ok(Field::Name),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            "tag"   => Ok(Field::Tag),
            _ => Err(Error::Argument(format!("Unknown contact field: {}", s))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
