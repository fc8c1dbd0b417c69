//! Transport seam for leading-chunk prefetches.

use async_trait::async_trait;
use bytes::Bytes;
use reelfeed_model::VideoRecord;
use thiserror::Error;

/// A request for the first `len` bytes of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkRequest {
    pub url: String,
    pub len: u64,
}

impl ChunkRequest {
    pub fn new(url: impl Into<String>, len: u64) -> Self {
        Self {
            url: url.into(),
            len,
        }
    }

    /// Leading-chunk request for a record's hosted asset. Records that only
    /// carry an external redirect have nothing to prefetch.
    pub fn for_video(video: &VideoRecord, len: u64) -> Option<Self> {
        video.media_url().map(|url| Self::new(url, len))
    }

    /// Value for an HTTP `Range` header covering the requested prefix.
    pub fn range_header(&self) -> String {
        format!("bytes=0-{}", self.len.saturating_sub(1))
    }
}

/// Reasons a leading-chunk fetch can fail. The prefetch cache swallows all
/// of these; they exist for logging and tests.
#[derive(Debug, Error)]
pub enum ChunkFetchError {
    #[error("invalid asset url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("empty body for {url}")]
    EmptyBody { url: String },
}

/// Fetches the leading byte range of an asset.
///
/// Implementations must accept both full (`200`) and partial (`206`)
/// responses and never return more than `request.len` bytes.
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    async fn fetch_leading(
        &self,
        request: &ChunkRequest,
    ) -> Result<Bytes, ChunkFetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_header_is_inclusive() {
        let request = ChunkRequest::new("https://cdn.example/a.mp4", 2048);
        assert_eq!(request.range_header(), "bytes=0-2047");
        assert_eq!(ChunkRequest::new("x", 0).range_header(), "bytes=0-0");
    }

    #[test]
    fn redirect_only_videos_have_no_request() {
        use reelfeed_model::{VideoId, VideoKind};

        let id = VideoId::new("r").unwrap();
        let redirect = VideoRecord::new(id.clone(), VideoKind::LongForm)
            .with_external_redirect("https://example.com");
        assert_eq!(ChunkRequest::for_video(&redirect, 10), None);

        let hosted = VideoRecord::new(id, VideoKind::LongForm)
            .with_media_url(" https://cdn.example/r.mp4 ");
        assert_eq!(
            ChunkRequest::for_video(&hosted, 10).map(|r| r.url),
            Some("https://cdn.example/r.mp4".to_string())
        );
    }
}
