//! Cursor pagination issues exactly one call per page

use crate::support::mock_api::*;
use channel_harvester::fetcher::{CommentAggregator, VideoEnumerator};
use channel_harvester::Channel;
use serde_json::json;

fn demo_channel() -> Channel {
    Channel {
        id: "UCdemo".to_string(),
        uploads_playlist_id: "UUdemo".to_string(),
    }
}

#[tokio::test]
async fn test_uploads_pages_fetched_in_order() {
    let api = MockApi::new();
    let ids: Vec<String> = (1..=5).map(video_id).collect();
    api.ok(
        "/playlistItems",
        &[("playlistId", "UUdemo")],
        playlist_page(&ids[0..2], Some("p2")),
    );
    api.ok(
        "/playlistItems",
        &[("playlistId", "UUdemo"), ("pageToken", "p2")],
        playlist_page(&ids[2..4], Some("p3")),
    );
    api.ok(
        "/playlistItems",
        &[("playlistId", "UUdemo"), ("pageToken", "p3")],
        playlist_page(&ids[4..5], None),
    );

    let enumerator = VideoEnumerator::new(client(&api));
    let listed = enumerator.list_upload_ids("UUdemo").await.unwrap();

    assert_eq!(listed, ids);
    let calls = api.calls_to("/playlistItems");
    assert_eq!(calls.len(), 3);
    let tokens: Vec<Option<&str>> = calls.iter().map(|c| c.param("pageToken")).collect();
    assert_eq!(tokens, vec![None, Some("p2"), Some("p3")]);
    assert!(calls.iter().all(|c| c.param("maxResults") == Some("50")));
}

#[tokio::test]
async fn test_video_lookup_is_batched() {
    let api = MockApi::new();
    let ids: Vec<String> = (1..=120).map(video_id).collect();
    api.ok(
        "/playlistItems",
        &[("playlistId", "UUdemo")],
        playlist_page(&ids, None),
    );
    api.ok(
        "/videos",
        &[],
        videos_page(ids.iter().map(|id| video(id, json!("1"))).collect()),
    );

    let enumerator = VideoEnumerator::new(client(&api));
    let videos = enumerator.enumerate(&demo_channel()).await.unwrap();

    assert_eq!(videos.len(), 120);
    assert_eq!(videos[0].video_id, ids[0]);
    assert_eq!(videos[119].video_id, ids[119]);

    let batches: Vec<usize> = api
        .calls_to("/videos")
        .iter()
        .map(|c| c.param("id").unwrap().split(',').count())
        .collect();
    assert_eq!(batches, vec![50, 50, 20]);
}

#[tokio::test]
async fn test_missing_uploads_playlist_means_no_videos() {
    let api = MockApi::new();
    api.error("/playlistItems", &[("playlistId", "UUdemo")], 404, "playlistNotFound");

    let enumerator = VideoEnumerator::new(client(&api));
    let videos = enumerator.enumerate(&demo_channel()).await.unwrap();

    assert!(videos.is_empty());
    assert!(api.calls_to("/videos").is_empty());
}

#[tokio::test]
async fn test_comment_thread_pages_fetched_in_order() {
    let api = MockApi::new();
    let vid = video_id(7);
    api.ok(
        "/commentThreads",
        &[("videoId", vid.as_str())],
        page(vec![thread("c1", &[], 0)], Some("t2")),
    );
    api.ok(
        "/commentThreads",
        &[("videoId", vid.as_str()), ("pageToken", "t2")],
        page(vec![thread("c2", &[], 0)], None),
    );

    let aggregator = CommentAggregator::new(client(&api));
    let (comments, _) = aggregator.collect(&vid, 100).await.unwrap();

    assert_eq!(comments.len(), 2);
    let calls = api.calls_to("/commentThreads");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].param("pageToken"), None);
    assert_eq!(calls[1].param("pageToken"), Some("t2"));
    assert!(calls.iter().all(|c| c.param("textFormat") == Some("plainText")));
}
