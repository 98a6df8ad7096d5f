use crate::GithubClient;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use repo_stats::api::Result;
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("repo-stats"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            headers,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(anyhow::Error::from)?;
        value.set_sensitive(true);
        Ok(self.with_header(header::AUTHORIZATION, value))
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        self.try_with_header(header::USER_AGENT, user_agent)
    }

    pub fn try_with_github_url<STR: AsRef<str>>(mut self, url: STR) -> Result<GithubClientBuilder> {
        let url = Url::parse(url.as_ref()).map_err(anyhow::Error::from)?;
        self.github_url = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> GithubClientBuilder {
        self.timeout = timeout;
        self
    }

    fn try_with_header(self, key: HeaderName, val: impl AsRef<str>) -> Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref()).map_err(anyhow::Error::from)?;
        Ok(self.with_header(key, val))
    }

    fn with_header(mut self, key: HeaderName, val: HeaderValue) -> GithubClientBuilder {
        self.headers.insert(key, val);
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        let client = self
            .client_builder
            .default_headers(self.headers)
            .timeout(self.timeout)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(GithubClient {
            client,
            github_url: self.github_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GithubClientBuilder, DEFAULT_TIMEOUT};
    use std::time::Duration;

    #[test]
    fn timeout_test() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert_eq!(GithubClientBuilder::default().timeout, DEFAULT_TIMEOUT);
        let builder = GithubClientBuilder::default().with_timeout(Duration::from_secs(5));
        assert_eq!(builder.timeout, Duration::from_secs(5));
    }

    #[test]
    fn github_url_test() -> anyhow::Result<()> {
        let client = GithubClientBuilder::default().build()?;
        assert_eq!(client.github_url, "https://api.github.com");

        let client = GithubClientBuilder::default()
            .try_with_github_url("http://127.0.0.1:8080/api/v3/")?
            .build()?;
        assert_eq!(client.github_url, "http://127.0.0.1:8080/api/v3");

        assert!(GithubClientBuilder::default().try_with_github_url("not a url").is_err());
        Ok(())
    }

    #[test]
    fn header_test() {
        assert!(GithubClientBuilder::default().try_with_user_agent("curl").is_ok());
        assert!(GithubClientBuilder::default().try_with_user_agent("bad\nagent").is_err());
        assert!(GithubClientBuilder::default()
            .try_with_token(secrecy::SecretString::new("ghp_token".to_string()))
            .is_ok());
    }
}
