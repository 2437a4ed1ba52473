/// LinkedIn profile source — the only place that talks to the LinkedIn API.
///
/// One blocking GET per run, no retry. A non-2xx answer is surfaced as
/// `ResumeError::Api` with LinkedIn's own message when it sent one.
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::ResumeError;
use crate::profile::ProfileSource;

const LINKEDIN_API_URL: &str = "https://api.linkedin.com/v1/people/~";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body of the v1 API: `{"errorCode":0,"message":"...","status":401}`.
#[derive(Debug, Deserialize)]
struct LinkedInError {
    message: String,
}

pub struct LinkedInSource {
    client: Client,
    access_token: String,
    base_url: String,
}

impl LinkedInSource {
    pub fn new(access_token: String) -> Result<Self, ResumeError> {
        Self::with_base_url(access_token, LINKEDIN_API_URL)
    }

    /// Same as `new` with a different endpoint, e.g. a local stand-in.
    pub fn with_base_url(access_token: String, base_url: &str) -> Result<Self, ResumeError> {
        if access_token.trim().is_empty() {
            return Err(ResumeError::MissingCredential(
                "access_token (config file) or JIT_ACCESS_TOKEN".to_string(),
            ));
        }
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn profile_url(&self, fields: &str) -> String {
        profile_url(&self.base_url, fields)
    }
}

impl ProfileSource for LinkedInSource {
    fn fetch(&self, fields: &str) -> Result<String, ResumeError> {
        let url = self.profile_url(fields);
        debug!(url = %url, "Fetching profile");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("x-li-format", "json")
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<LinkedInError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            warn!("LinkedIn API returned {}: {}", status, message);
            return Err(ResumeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(bytes = body.len(), "Profile fetched");
        Ok(body)
    }
}

/// `{base}:({fields})?format=json&secure-urls=true`, with blanks removed from the selector.
fn profile_url(base: &str, fields: &str) -> String {
    let selector: String = fields.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{base}:({selector})?format=json&secure-urls=true")
}
