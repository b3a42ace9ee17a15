use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::types::{AddLabels, ChangedFile, Label, Page};
use super::{GitHubError, IssueTracker};
use crate::pr::PullRequestId;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CLIENT_NAME: &str = "pr-size";
const PER_PAGE: u32 = 100;

/// REST client for the GitHub issues and pull requests API.
///
/// Works unauthenticated when no token is given, at the cost of much lower
/// rate limits.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, GitHubError> {
        let parsed =
            Url::parse(api_url).map_err(|_| GitHubError::InvalidUrl(api_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl(api_url.to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_url: parsed,
            token,
        })
    }

    /// Append path segments to the API base URL. Each segment is
    /// percent-encoded on its own, so a label like `size/L` stays one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn issue_labels_url(&self, pr: &PullRequestId) -> Result<Url, GitHubError> {
        let number = pr.number.to_string();
        self.endpoint(&["repos", &pr.owner, &pr.repo, "issues", &number, "labels"])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, CLIENT_NAME)
            .header(ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, GitHubError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::Status { status, body })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        mut url: Url,
        page: u32,
    ) -> Result<Page<T>, GitHubError> {
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());

        let response = Self::send(self.request(Method::GET, url)).await?;
        let last_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_last_page);
        let items = response.json::<Vec<T>>().await?;
        debug!(items = items.len(), ?last_page, "received page");

        Ok(Page {
            items,
            page,
            last_page,
        })
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number))]
    async fn list_pull_request_files(
        &self,
        pr: &PullRequestId,
        page: u32,
    ) -> Result<Page<ChangedFile>, GitHubError> {
        let number = pr.number.to_string();
        let url = self.endpoint(&["repos", &pr.owner, &pr.repo, "pulls", &number, "files"])?;
        self.get_page(url, page).await
    }

    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number))]
    async fn list_issue_labels(
        &self,
        pr: &PullRequestId,
        page: u32,
    ) -> Result<Page<Label>, GitHubError> {
        let url = self.issue_labels_url(pr)?;
        self.get_page(url, page).await
    }

    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number))]
    async fn remove_issue_label(
        &self,
        pr: &PullRequestId,
        label: &str,
    ) -> Result<(), GitHubError> {
        let mut url = self.issue_labels_url(pr)?;
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.api_url.to_string()))?
            .push(label);
        Self::send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number))]
    async fn add_issue_labels(
        &self,
        pr: &PullRequestId,
        labels: &[String],
    ) -> Result<(), GitHubError> {
        let url = self.issue_labels_url(pr)?;
        let builder = self.request(Method::POST, url).json(&AddLabels { labels });
        Self::send(builder).await?;
        Ok(())
    }
}

/// Extract the page number of the `rel="last"` entry of a `Link` header.
///
/// `<https://api.github.com/...?page=2>; rel="next", <https://api.github.com/...?page=5>; rel="last"`
/// yields `Some(5)`.
fn parse_last_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_last = params
            .split(';')
            .any(|param| matches!(param.trim(), r#"rel="last""# | "rel=last"));
        if !is_last {
            return None;
        }

        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}
