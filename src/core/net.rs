// src/core/net.rs

// Blocking JSON-over-HTTP against the case API. The client is cheap to clone
// and safe to share across the scoped threads of one detail batch.

use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Api {
    client: Client,
    base: String,
}

impl Api {
    /// Every request carries `user_agent`. Timeouts are the client defaults.
    pub fn new(base: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, base: base.trim_end_matches('/').to_string() })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.client.get(self.url(path)).send()?;
        Ok(ensure_ok(resp)?.json()?)
    }

    /// Raw body text; the caller decides what counts as a usable body.
    pub fn get_text(&self, path: &str) -> Result<String> {
        let resp = self.client.get(self.url(path)).send()?;
        Ok(ensure_ok(resp)?.text()?)
    }

    pub fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(serde_json::to_vec(body)?)
            .send()?;
        Ok(ensure_ok(resp)?.json()?)
    }
}

/// Only 200 counts as success, like the site's own client.
fn ensure_ok(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.as_u16() != 200 {
        return Err(Error::Status { url: resp.url().to_string(), status: status.as_u16() });
    }
    Ok(resp)
}
