use crate::utils::error::Result;
use crate::utils::pace::RateLimiter;
use reqwest::Client;
use std::sync::Arc;

/// The site serves its feeds to browser XHR calls; plain library user agents
/// get empty responses.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// HTTP client that reserves a slot on the shared [`RateLimiter`] before
/// every outbound call. Components never talk to `reqwest` directly so the
/// pacing discipline cannot be bypassed.
#[derive(Clone)]
pub struct PacedClient {
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl PacedClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, limiter })
    }

    /// Client with a fresh cookie jar. Announcement resolution binds one
    /// session per fund; sessions are never shared across funds, so a stale
    /// token breaks at most one fund.
    pub fn fresh_session(limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self { client, limiter })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.limiter.pace().await;
        Ok(self.client.get(url).send().await?)
    }

    pub async fn get_with_query(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        self.limiter.pace().await;
        Ok(self
            .client
            .get(url)
            .query(query)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?)
    }

    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, String)],
        csrf_token: &str,
        referer: &str,
    ) -> Result<reqwest::Response> {
        self.limiter.pace().await;
        Ok(self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-CSRF-Token", csrf_token)
            .header("Referer", referer)
            .form(form)
            .send()
            .await?)
    }
}
