//! HTTP fetcher and cache against a mock CDN.

use anyhow::Result;
use reelfeed_contracts::fetch::{ChunkFetchError, ChunkFetcher, ChunkRequest};
use reelfeed_core::prefetch::{HttpChunkFetcher, PrefetchCache, PrefetchSettings};
use reelfeed_model::{VideoId, VideoKind, VideoRecord};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_range_header_and_accepts_partial_content() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip.mp4"))
        .and(header("range", "bytes=0-7"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(b"leadings".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpChunkFetcher::new();
    let request = ChunkRequest::new(format!("{}/clip.mp4", server.uri()), 8);
    let body = fetcher.fetch_leading(&request).await?;

    assert_eq!(&body[..], b"leadings");
    Ok(())
}

#[tokio::test]
async fn truncates_full_responses_to_chunk_size() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/full.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 64 * 1024]))
        .mount(&server)
        .await;

    let fetcher = HttpChunkFetcher::new();
    let request = ChunkRequest::new(format!("{}/full.mp4", server.uri()), 1000);
    let body = fetcher.fetch_leading(&request).await?;

    assert_eq!(body.len(), 1000);
    Ok(())
}

#[tokio::test]
async fn rejects_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(416))
        .mount(&server)
        .await;

    let fetcher = HttpChunkFetcher::new();
    let request = ChunkRequest::new(format!("{}/gone.mp4", server.uri()), 10);
    let err = fetcher.fetch_leading(&request).await.unwrap_err();

    assert!(matches!(err, ChunkFetchError::Status { status: 416, .. }));
}

#[tokio::test]
async fn warm_over_http_skips_the_failing_asset() -> Result<()> {
    let server = MockServer::start().await;
    for name in ["1", "2", "4", "5"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}.mp4")))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(name.as_bytes().to_vec()))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/3.mp4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = |name: &str| format!("{}/{name}.mp4", server.uri());
    let videos: Vec<VideoRecord> = ["1", "2", "3", "4", "5"]
        .into_iter()
        .map(|name| {
            VideoRecord::new(VideoId::new(name).unwrap(), VideoKind::ShortForm)
                .with_media_url(url(name))
        })
        .collect();

    let cache = PrefetchCache::new(
        HttpChunkFetcher::new(),
        PrefetchSettings {
            head_count: 5,
            ..PrefetchSettings::default()
        },
    );
    let report = cache.warm(&videos).await?;
    assert_eq!(report.cached, 4);
    assert_eq!(report.failed, 1);
    assert!(cache.get(&url("3")).is_none());
    assert_eq!(cache.get(&url("4")).as_deref(), Some(&b"4"[..]));

    // A second warm hits the store only; `expect(1)` above verifies it.
    let again = cache.warm_now(&videos).await;
    assert_eq!(again.skipped_hits, 4);
    assert_eq!(again.dispatched, 1);
    Ok(())
}
