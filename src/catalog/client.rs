use std::time::Duration;

use async_trait::async_trait;
use bookscout_common::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::CatalogConfig;

/// Source of raw catalog pages.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the body at `url`.
    ///
    /// Any failure to obtain a `200 OK` body is an [`Error::Transport`].
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

/// HTTP client for the catalog's volumes endpoint.
///
/// Connecting and reading have separate deadlines. No retries are made.
pub struct CatalogClient {
    client: Client,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Self::with_timeouts(
            config.connect_timeout(),
            config.read_timeout(),
            &config.user_agent,
        )
    }

    pub fn with_timeouts(
        connect_timeout: Duration,
        read_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::config(format!("failed to build catalog HTTP client: {e}")))?;

        Ok(Self {
            client,
            connect_timeout,
            read_timeout,
        })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        debug!(url = %url, "Fetching catalog page");

        // The connector enforces `connect_timeout`, so the response head
        // always gets the full read deadline once connected.
        let response = tokio::time::timeout(
            self.connect_timeout + self.read_timeout,
            self.client.get(url.clone()).send(),
        )
        .await
        .map_err(|_| {
            warn!(url = %url, "Timed out waiting for catalog response");
            Error::transport(format!(
                "timed out waiting for response after {}s",
                self.read_timeout.as_secs_f64()
            ))
        })?
        .map_err(|e| {
            warn!(url = %url, error = %e, "Catalog request failed");
            Error::transport(describe(&e))
        })?;

        // Dropping the response on the early return releases the connection.
        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "Catalog returned unexpected status");
            return Err(Error::transport_status(status.as_u16()));
        }

        let body = tokio::time::timeout(self.read_timeout, response.bytes())
            .await
            .map_err(|_| {
                warn!(url = %url, "Timed out reading catalog response");
                Error::transport(format!(
                    "timed out reading response after {}s",
                    self.read_timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| {
                warn!(url = %url, error = %e, "Failed to read catalog response");
                Error::transport(format!("failed to read response body: {}", describe(&e)))
            })?;

        debug!(url = %url, bytes = body.len(), "Catalog page received");
        Ok(body)
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        assert!(CatalogClient::new(&CatalogConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = CatalogClient::with_timeouts(
            Duration::from_millis(500),
            Duration::from_millis(500),
            "bookscout-test",
        )
        .unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/volumes?q=x")).unwrap();

        match client.fetch(&url).await {
            Err(Error::Transport { status, .. }) => assert_eq!(status, None),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_deadline_is_shorter_than_read_deadline() {
        let client = CatalogClient::with_timeouts(
            Duration::from_millis(200),
            Duration::from_secs(30),
            "bookscout-test",
        )
        .unwrap();
        // Non-routable address: either dropped silently or refused at once.
        let url = Url::parse("http://10.255.255.1:81/volumes?q=x").unwrap();

        let started = std::time::Instant::now();
        let result = client.fetch(&url).await;

        assert!(matches!(result, Err(Error::Transport { status: None, .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn stalled_response_head_hits_read_deadline() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let client = CatalogClient::with_timeouts(
            Duration::from_millis(100),
            Duration::from_millis(300),
            "bookscout-test",
        )
        .unwrap();
        let url = Url::parse(&format!("http://{addr}/volumes?q=x")).unwrap();

        let started = std::time::Instant::now();
        let err = client.fetch(&url).await.unwrap_err();

        assert!(matches!(err, Error::Transport { status: None, .. }));
        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(3));
        server.abort();
    }
}
