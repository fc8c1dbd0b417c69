//! reqwest-backed [`ChunkFetcher`].

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reelfeed_contracts::fetch::{ChunkFetchError, ChunkFetcher, ChunkRequest};
use reqwest::StatusCode;
use tracing::trace;
use url::Url;

/// Issues `Range: bytes=0-(len-1)` requests over a shared [`reqwest::Client`].
///
/// Servers that ignore the range and answer `200` are read only up to
/// `len` bytes, then the connection is dropped.
#[derive(Debug, Clone, Default)]
pub struct HttpChunkFetcher {
    client: reqwest::Client,
}

impl HttpChunkFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_url(raw: &str) -> Result<Url, ChunkFetchError> {
        let url = Url::parse(raw).map_err(|err| ChunkFetchError::InvalidUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ChunkFetchError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }
}

#[async_trait]
impl ChunkFetcher for HttpChunkFetcher {
    async fn fetch_leading(
        &self,
        request: &ChunkRequest,
    ) -> Result<Bytes, ChunkFetchError> {
        let url = Self::parse_url(&request.url)?;
        let transport = |err: reqwest::Error| ChunkFetchError::Transport {
            url: request.url.clone(),
            message: err.to_string(),
        };

        let mut response = self
            .client
            .get(url)
            .header(reqwest::header::RANGE, request.range_header())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(ChunkFetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let limit = usize::try_from(request.len).unwrap_or(usize::MAX);
        let mut body = BytesMut::new();
        while body.len() < limit {
            let Some(chunk) = response.chunk().await.map_err(transport)? else {
                break;
            };
            body.extend_from_slice(&chunk);
        }
        body.truncate(limit);

        if body.is_empty() {
            return Err(ChunkFetchError::EmptyBody {
                url: request.url.clone(),
            });
        }

        trace!(
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            "fetched leading chunk"
        );
        Ok(body.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            HttpChunkFetcher::parse_url("file:///etc/passwd"),
            Err(ChunkFetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpChunkFetcher::parse_url("not a url"),
            Err(ChunkFetchError::InvalidUrl { .. })
        ));
        assert!(HttpChunkFetcher::parse_url("https://cdn.example/a.mp4").is_ok());
    }
}
