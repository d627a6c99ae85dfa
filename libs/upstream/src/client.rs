use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde::Serialize;
use tracing::*;

use crate::{Fetched, Upstream, UpstreamError, PROFILE_QUERY};

pub const LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql/";

const LEETCODE_ORIGIN: &str = "https://leetcode.com";
const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (compatible; LeetMetric/2.0)";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    url: String,
}

impl LeetCodeClient {
    pub fn new(url: &str) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static(LEETCODE_ORIGIN));
        headers.insert(ORIGIN, HeaderValue::from_static(LEETCODE_ORIGIN));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            url: url.to_owned(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self, username: &str) -> Result<Fetched, UpstreamError> {
        debug!(%username, url = %self.url, "upstream:fetch");

        let response = self
            .http
            .post(&self.url)
            .json(&GraphQlRequest {
                query: PROFILE_QUERY,
                variables: Variables { username },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%username, %status, "upstream:status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;

        Fetched::from_value(serde_json::from_slice(&body)?)
    }
}

impl Upstream for LeetCodeClient {
    fn fetch_profile<'a>(
        &'a self,
        username: &'a str,
    ) -> BoxFuture<'a, Result<Fetched, UpstreamError>> {
        Box::pin(self.fetch(username))
    }
}
