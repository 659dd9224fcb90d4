use reqwest::Client;
use url::Url;

use crate::{
    Error,
    error::Result,
    contact::{Contact, ContactId, Draft},
};

/// The contact collection exposed by the backend. Every failure is an
/// `Error::Transport`, whether the call never completed or the server
/// answered with a non-success status.
#[allow(async_fn_in_trait)]
pub trait ContactApi {
    async fn list(&self) -> Result<Vec<Contact>>;
    async fn create(&self, draft: &Draft) -> Result<Contact>;
    async fn delete_by_id(&self, id: &ContactId) -> Result<()>;
}

pub struct ApiClient {
    base_url    : Url,
    client      : Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Argument(format!("Api base url {} cannot carry a path", base_url)));
        }

        let client = Client::builder().build()?;

        Ok(Self {
            base_url,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn item_url(&self, id: &ContactId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Argument(format!("Api base url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

fn check_status(rsp: reqwest::Response) -> Result<reqwest::Response> {
    match rsp.error_for_status() {
        Ok(rsp) => Ok(rsp),
        Err(e) => Err(Error::Transport(format!("Http error: invalid http response {e}"))),
    }
}

fn send_error(e: reqwest::Error) -> Error {
    Error::Transport(format!("Http error: sending http request error {e}"))
}

fn decode_error(e: reqwest::Error) -> Error {
    Error::Transport(format!("Http error: deserialize json error {e}"))
}

impl ContactApi for ApiClient {
    async fn list(&self) -> Result<Vec<Contact>> {
        log::debug!("GET {}", self.base_url);
        let rsp = self.client.get(self.base_url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp)?
            .json::<Vec<Contact>>()
            .await
            .map_err(decode_error)
    }

    async fn create(&self, draft: &Draft) -> Result<Contact> {
        log::debug!("POST {}", self.base_url);
        let rsp = self.client.post(self.base_url.clone())
            .json(draft)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp)?
            .json::<Contact>()
            .await
            .map_err(decode_error)
    }

    async fn delete_by_id(&self, id: &ContactId) -> Result<()> {
        let url = self.item_url(id)?;
        log::debug!("DELETE {}", url);
        let rsp = self.client.delete(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp).map(|_| ())
    }
}
