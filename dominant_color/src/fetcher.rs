// THEORY:
// The fetcher is the only stage that performs I/O. It is a trait seam so the pipeline
// can be driven by an HTTP client in production and by in-memory bytes in tests. The
// production implementation bounds every request with the configured timeout and treats
// any non-success status as a failed fetch.

use std::future::Future;

use bytes::Bytes;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{ColorError, Result};

/// Retrieves the raw bytes of an image.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Bytes>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ColorError::Client)?;

        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| ColorError::fetch(url, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ColorError::fetch(url, e))?;

        debug!(url, bytes = bytes.len(), "fetched image");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one connection with `response` after `delay`.
    async fn serve_once(response: Vec<u8>, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/cover.png")
    }

    fn http_response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: image/png\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[test]
    fn builds_client_from_config() {
        assert!(HttpFetcher::new(&PipelineConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn malformed_url_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&PipelineConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;

        match result {
            Err(ColorError::Fetch { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn returns_the_body_on_success() {
        let url = serve_once(http_response("200 OK", b"\x89PNG body"), Duration::ZERO).await;
        let fetcher = HttpFetcher::new(&PipelineConfig::default()).unwrap();

        let bytes = fetcher.fetch(&url).await.unwrap();
        assert_eq!(&bytes[..], b"\x89PNG body");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let url = serve_once(http_response("404 Not Found", b""), Duration::ZERO).await;
        let fetcher = HttpFetcher::new(&PipelineConfig::default()).unwrap();

        let error = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(&error, ColorError::Fetch { url: failed, .. } if *failed == url));

        let cause = error.source().expect("status cause").to_string();
        assert!(cause.contains("404"), "unexpected cause: {cause}");
    }

    #[tokio::test]
    async fn stalled_response_hits_the_timeout() {
        let url = serve_once(http_response("200 OK", b"late"), Duration::from_secs(5)).await;
        let config = PipelineConfig {
            fetch_timeout: Duration::from_millis(200),
            ..PipelineConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let started = tokio::time::Instant::now();
        let error = fetcher.fetch(&url).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(3));

        match error {
            ColorError::Fetch { source, .. } => {
                let cause = source.downcast_ref::<reqwest::Error>().expect("reqwest cause");
                assert!(cause.is_timeout());
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
