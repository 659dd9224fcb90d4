use std::cell::Cell;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::Notify;

use crate::{
    Error,
    error::Result,
    app::{App, CREATE_FAILED},
    contact::{ContactId, Draft, Field},
    form::{ContactForm, Submission, SubmitHandler},
    validation::REQUIRED,
};
use super::MockApi;

fn fill(form: &ContactForm, name: &str, phone: &str, email: &str, tag: &str) {
    form.set_field(Field::Name, name);
    form.set_field(Field::Phone, phone);
    form.set_field(Field::Email, email);
    form.set_field(Field::Tag, tag);
}

/// Records what the form looked like while the handler ran.
struct Probe<'a> {
    form        : &'a ContactForm,
    in_flight   : Cell<bool>,
    calls       : Cell<usize>,
    fail        : bool,
}

impl<'a> Probe<'a> {
    fn new(form: &'a ContactForm, fail: bool) -> Self {
        Self { form, in_flight: Cell::new(false), calls: Cell::new(0), fail }
    }
}

impl SubmitHandler for Probe<'_> {
    async fn submit(&self, _draft: &Draft) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        self.in_flight.set(self.form.is_submitting());
        match self.fail {
            true => Err(Error::Transport("boom".into())),
            false => Ok(()),
        }
    }
}

struct Gate(Notify);

impl SubmitHandler for Gate {
    async fn submit(&self, _draft: &Draft) -> Result<()> {
        self.0.notified().await;
        Ok(())
    }
}

struct Never;

impl SubmitHandler for Never {
    async fn submit(&self, _draft: &Draft) -> Result<()> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_submit_creates_and_resets() {
    let app = App::new(MockApi::new());
    app.load().await.unwrap();

    let form = ContactForm::new();
    fill(&form, "Ana", "300", "ana@x.co", "");
    let rc = form.submit(&app).await;
    assert!(rc.is_submitted());

    let contacts = app.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id(), &ContactId::from("1"));
    assert_eq!(contacts[0].name(), "Ana");
    assert_eq!(contacts[0].phone(), "300");
    assert_eq!(contacts[0].email(), "ana@x.co");

    assert_eq!(form.draft(), Draft::default());
    assert!(form.errors().is_valid());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_invalid_submit_makes_no_call() {
    let app = App::new(MockApi::new());
    app.load().await.unwrap();

    let form = ContactForm::new();
    fill(&form, "", "300", "a@b.co", "");
    let errors = match form.submit(&app).await {
        Submission::Invalid(errors) => errors,
        other => panic!("expected invalid submission, got {:?}", other),
    };
    assert_eq!(errors.get(Field::Name), REQUIRED);
    assert_eq!(errors.failed().len(), 1);
    assert_eq!(form.errors(), errors);
    assert_eq!(app.api().creates.load(Ordering::SeqCst), 0);
    assert!(app.contacts().is_empty());
    assert_eq!(form.draft().phone, "300");
}

#[tokio::test]
async fn test_failed_submit_keeps_draft() {
    let app = App::new(MockApi::new());
    app.load().await.unwrap();
    app.api().fail_create.store(true, Ordering::SeqCst);

    let form = ContactForm::new();
    fill(&form, "Ana", "300", "ana@x.co", "family");
    let rc = form.submit(&app).await;

    assert!(matches!(rc, Submission::Failed(Error::Transport(_))));
    assert_eq!(form.draft(), Draft::new("Ana", "300", "ana@x.co", "family"));
    assert!(!form.is_submitting());
    assert_eq!(app.error().as_deref(), Some(CREATE_FAILED));

    app.api().fail_create.store(false, Ordering::SeqCst);
    assert!(form.submit(&app).await.is_submitted());
    assert_eq!(app.contacts().len(), 1);
    assert!(app.error().is_none());
}

#[tokio::test]
async fn test_in_flight_flag() {
    let form = ContactForm::new();
    fill(&form, "Ana", "300", "ana@x.co", "");

    let probe = Probe::new(&form, false);
    assert!(form.submit(&probe).await.is_submitted());
    assert!(probe.in_flight.get());
    assert!(!form.is_submitting());

    fill(&form, "Ana", "300", "ana@x.co", "");
    let probe = Probe::new(&form, true);
    assert!(matches!(form.submit(&probe).await, Submission::Failed(_)));
    assert!(probe.in_flight.get());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_edits_keep_errors_until_next_submit() {
    let form = ContactForm::new();
    let probe = Probe::new(&form, false);

    fill(&form, "", "", "abc", "");
    assert!(matches!(form.submit(&probe).await, Submission::Invalid(_)));
    assert_eq!(form.errors().failed().len(), 3);

    form.set_field(Field::Name, "Ana");
    assert_eq!(form.errors().get(Field::Name), REQUIRED);
    assert_eq!(form.draft(), Draft::new("Ana", "", "abc", ""));

    form.set_field(Field::Phone, "300");
    form.set_field(Field::Email, "ana@x.co");
    assert!(form.submit(&probe).await.is_submitted());
    assert_eq!(probe.calls.get(), 1);
}

#[tokio::test]
async fn test_resubmit_while_in_flight_is_busy() {
    let form = ContactForm::new();
    fill(&form, "Ana", "300", "ana@x.co", "");
    let gate = Gate(Notify::new());

    let (first, second) = tokio::join!(
        form.submit(&gate),
        async {
            assert!(form.is_submitting());
            let rc = form.submit(&gate).await;
            gate.0.notify_one();
            rc
        },
    );

    assert!(first.is_submitted());
    assert!(matches!(second, Submission::Busy));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_cancelled_submit_clears_flag() {
    let form = ContactForm::new();
    fill(&form, "Ana", "300", "ana@x.co", "");

    let rc = tokio::time::timeout(Duration::from_millis(20), form.submit(&Never)).await;
    assert!(rc.is_err());
    assert!(!form.is_submitting());
    assert_eq!(form.draft().name, "Ana");
}
