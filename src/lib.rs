pub mod core;
pub mod contact;
pub mod validation;
pub mod api_client;
pub mod app;
pub mod form;
pub mod view;

pub use crate::core::{
    error::{self, Error},
    config::{self, Config, AppInfo},
    default_configuration as configuration,
    logger,
};

pub use crate::contact::{
    Contact,
    ContactId,
    Draft,
    Field,
};

pub use crate::validation::{
    validate,
    ValidationErrors,
};

pub use crate::api_client::{
    ApiClient,
    ContactApi,
};

pub use crate::app::App;

pub use crate::form::{
    ContactForm,
    SubmitHandler,
    Submission,
};

pub use crate::view::ContactCard;
