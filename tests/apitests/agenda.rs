use agenda::{
    ApiClient,
    App,
    ContactForm,
    Field,
    Submission,
    app::{LOAD_FAILED, CREATE_FAILED},
};

use crate::backend::{self, Backend, record};

#[tokio::test]
async fn test_load_submit_delete() {
    let backend = Backend::with_contacts(vec![record("1", "Bea")]);
    let url = backend.clone().spawn().await;

    let app = App::new(ApiClient::new(&url).unwrap());
    app.load().await.unwrap();
    assert!(!app.is_loading());
    assert_eq!(app.contacts().len(), 1);

    let form = ContactForm::new();
    form.set_field(Field::Name, "Ana");
    form.set_field(Field::Phone, "300");
    form.set_field(Field::Email, "ana@x.co");
    assert!(form.submit(&app).await.is_submitted());
    assert!(!form.is_submitting());
    assert_eq!(form.draft().name, "");

    let contacts = app.contacts();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1].id().as_str(), "2");
    assert_eq!(contacts[1].name(), "Ana");

    app.cards()[0].delete().await;
    let names: Vec<_> = app.contacts().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["Ana"]);
    assert_eq!(backend.contacts().len(), 1);
    assert!(app.error().is_none());
}

#[tokio::test]
async fn test_server_down() {
    let url = backend::closed_url().await;
    let app = App::new(ApiClient::new(&url).unwrap());

    app.load().await.unwrap();
    assert!(!app.is_loading());
    assert_eq!(app.error().as_deref(), Some(LOAD_FAILED));
    assert!(app.contacts().is_empty());

    let form = ContactForm::new();
    form.set_field(Field::Name, "Ana");
    form.set_field(Field::Phone, "300");
    form.set_field(Field::Email, "ana@x.co");
    assert!(matches!(form.submit(&app).await, Submission::Failed(_)));
    assert_eq!(form.draft().name, "Ana");
    assert_eq!(app.error().as_deref(), Some(CREATE_FAILED));
}
