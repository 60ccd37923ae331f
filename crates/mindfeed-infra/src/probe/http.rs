//! HTTP `HEAD` probe built on reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use tokio_util::sync::CancellationToken;

use mindfeed_core::ports::ReachabilityProbe;

use super::ProbeConfig;

/// Sends one `HEAD` request and treats any final status in `200..400` as
/// reachable. Every failure, including cancellation, collapses to `false`.
#[derive(Debug, Clone)]
pub struct HttpReachabilityProbe {
    client: Client,
}

impl HttpReachabilityProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.connect_timeout + config.read_timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    fn is_success(status: StatusCode) -> bool {
        (200..400).contains(&status.as_u16())
    }
}

#[async_trait]
impl ReachabilityProbe for HttpReachabilityProbe {
    async fn is_reachable(&self, url: &str, cancel: &CancellationToken) -> bool {
        let request = self.client.head(url).send();

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(url = %url, "Source probe cancelled");
                return false;
            }
            response = request => response,
        };

        match response {
            Ok(response) => {
                let status = response.status();
                let reachable = Self::is_success(status);
                tracing::debug!(url = %url, status = status.as_u16(), reachable, "Source probed");
                reachable
            }
            Err(e) => {
                tracing::debug!(
                    url = %url,
                    error = %e,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    "Source probe failed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves every connection with the given raw HTTP response head.
    async fn serve(response: impl Into<String>) -> String {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    /// Accepts connections and never answers.
    async fn serve_silence() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}")
    }

    fn probe(read_timeout: Duration) -> HttpReachabilityProbe {
        HttpReachabilityProbe::new(&ProbeConfig {
            connect_timeout: Duration::from_millis(500),
            read_timeout,
            max_redirects: 3,
        })
        .unwrap()
    }

    /// Response head with an empty body.
    fn empty_response(status: &str, extra_headers: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\n{extra_headers}Content-Length: 0\r\nConnection: close\r\n\r\n"
        )
    }

    async fn reachable(url: &str, read_timeout: Duration) -> bool {
        probe(read_timeout)
            .is_reachable(url, &CancellationToken::new())
            .await
    }

    #[tokio::test]
    async fn test_success_status_is_reachable() {
        let url = serve(empty_response("204 No Content", "")).await;
        assert!(reachable(&url, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_redirect_is_followed() {
        let target = serve(empty_response("200 OK", "")).await;
        let location = format!("Location: {target}/paper\r\n");
        let url = serve(empty_response("301 Moved Permanently", &location)).await;

        assert!(reachable(&url, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_client_error_is_unreachable() {
        let url = serve(empty_response("404 Not Found", "")).await;
        assert!(!reachable(&url, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_server_error_is_unreachable() {
        let url = serve(empty_response("503 Service Unavailable", "")).await;
        assert!(!reachable(&url, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_refused_connection_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}");
        assert!(!reachable(&url, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let url = serve_silence().await;
        let started = std::time::Instant::now();

        assert!(!reachable(&url, Duration::from_millis(200)).await);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_cancellation_ends_probe_early() {
        let url = serve_silence().await;
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        assert!(!probe(Duration::from_secs(30)).is_reachable(&url, &cancel).await);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_malformed_host_is_unreachable() {
        let probe = probe(Duration::from_secs(1));
        assert!(!probe.is_reachable("http://exa mple.org", &CancellationToken::new()).await);
    }
}
