//! End-to-end pipeline runs against the mock API

use crate::support::mock_api::*;
use channel_harvester::output::MemorySink;
use serde_json::json;
use std::collections::{HashMap, HashSet};

fn two_video_channel(api: &MockApi) -> Vec<String> {
    let ids = vec![video_id(1), video_id(2)];
    channel_with_videos(api, &ids);

    api.ok(
        "/commentThreads",
        &[("videoId", ids[0].as_str())],
        page(
            vec![
                thread("c1", &["c1.r1", "c1.r2"], 2),
                thread("c2", &[], 0),
            ],
            None,
        ),
    );
    api.ok(
        "/commentThreads",
        &[("videoId", ids[1].as_str())],
        page(vec![thread("c3", &["c3.r1"], 1)], None),
    );
    ids
}

#[tokio::test]
async fn test_full_run_collects_videos_and_comments() {
    let api = MockApi::new();
    let ids = two_video_channel(&api);

    let report = executor(&api, 100).run("@demo").await.unwrap();

    assert_eq!(report.channel.id, "UCdemo");
    assert_eq!(report.channel.uploads_playlist_id, "UUdemo");
    let video_ids: Vec<&str> = report.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(video_ids, vec![ids[0].as_str(), ids[1].as_str()]);

    let comment_ids: Vec<&str> = report
        .comments
        .iter()
        .map(|c| c.comment_id.as_str())
        .collect();
    assert_eq!(comment_ids, vec!["c1", "c1.r1", "c1.r2", "c2", "c3", "c3.r1"]);
    assert_eq!(report.reply_count(), 3);
    assert!(!report.budget_exhausted);
}

#[tokio::test]
async fn test_replies_reference_collected_top_level_comments() {
    let api = MockApi::new();
    two_video_channel(&api);

    let report = executor(&api, 100).run("@demo").await.unwrap();

    let top_level: HashMap<&str, &str> = report
        .comments
        .iter()
        .filter(|c| !c.is_reply())
        .map(|c| (c.comment_id.as_str(), c.video_id.as_str()))
        .collect();

    for reply in report.comments.iter().filter(|c| c.is_reply()) {
        let parent = reply.parent_id.as_deref().unwrap();
        assert_eq!(
            top_level.get(parent),
            Some(&reply.video_id.as_str()),
            "reply {} points at {} which is not a collected top-level comment of the same video",
            reply.comment_id,
            parent
        );
    }
}

#[tokio::test]
async fn test_comment_count_never_exceeds_budget() {
    for budget in [0usize, 1, 2, 3, 4, 6, 50] {
        let api = MockApi::new();
        two_video_channel(&api);

        let report = executor(&api, budget).run("@demo").await.unwrap();
        assert!(
            report.comments.len() <= budget,
            "budget {} produced {} comments",
            budget,
            report.comments.len()
        );
        // Video metadata does not depend on the budget
        assert_eq!(report.videos.len(), 2);
    }
}

#[tokio::test]
async fn test_zero_budget_makes_no_comment_calls() {
    let api = MockApi::new();
    two_video_channel(&api);

    let report = executor(&api, 0).run("@demo").await.unwrap();

    assert!(report.comments.is_empty());
    assert!(report.budget_exhausted);
    assert!(api.calls_to("/commentThreads").is_empty());
    assert!(api.calls_to("/comments").is_empty());
}

#[tokio::test]
async fn test_video_ids_are_unique() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2), video_id(1), video_id(3)];
    api.ok("/channels", &[("forHandle", "@demo")], channel_page("UCdemo", "UUdemo"));
    api.ok("/playlistItems", &[("playlistId", "UUdemo")], playlist_page(&ids, None));
    api.ok(
        "/videos",
        &[],
        videos_page(vec![
            video(&video_id(1), json!("1")),
            video(&video_id(2), json!("2")),
            video(&video_id(3), json!("3")),
        ]),
    );

    let report = executor(&api, 0).run("@demo").await.unwrap();

    let unique: HashSet<&str> = report.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(unique.len(), report.videos.len());
    assert_eq!(report.videos.len(), 3);
}

#[tokio::test]
async fn test_invalid_video_is_excluded_and_later_videos_kept() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2), video_id(3)];
    api.ok("/channels", &[("forHandle", "@demo")], channel_page("UCdemo", "UUdemo"));
    api.ok("/playlistItems", &[("playlistId", "UUdemo")], playlist_page(&ids, None));
    api.ok(
        "/videos",
        &[],
        videos_page(vec![
            video(&ids[0], json!("10")),
            video(&ids[1], json!("-5")),
            video(&ids[2], json!("30")),
        ]),
    );

    let report = executor(&api, 0).run("@demo").await.unwrap();

    let kept: Vec<&str> = report.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(kept, vec![ids[0].as_str(), ids[2].as_str()]);
    assert_eq!(report.videos[1].view_count, 30);
}

#[tokio::test]
async fn test_missing_statistics_default_to_zero() {
    let api = MockApi::new();
    let ids = vec![video_id(1)];
    api.ok("/channels", &[("forHandle", "@demo")], channel_page("UCdemo", "UUdemo"));
    api.ok("/playlistItems", &[("playlistId", "UUdemo")], playlist_page(&ids, None));
    let mut raw = video(&ids[0], json!("5"));
    raw["statistics"] = json!({ "viewCount": "5" });
    api.ok("/videos", &[], videos_page(vec![raw]));

    let report = executor(&api, 0).run("@demo").await.unwrap();

    assert_eq!(report.videos[0].view_count, 5);
    assert_eq!(report.videos[0].like_count, 0);
    assert_eq!(report.videos[0].comment_count, 0);
}

#[tokio::test]
async fn test_channel_without_uploads_exports_empty_sheets() {
    let api = MockApi::new();
    api.ok("/channels", &[("forHandle", "@demo")], channel_page("UCdemo", "UUdemo"));
    api.ok("/playlistItems", &[("playlistId", "UUdemo")], page(vec![], None));

    let report = executor(&api, 100).run("@demo").await.unwrap();
    assert!(report.videos.is_empty());
    assert!(report.comments.is_empty());
    assert!(api.calls_to("/videos").is_empty());

    let mut sink = MemorySink::default();
    report.export(&mut sink).unwrap();
    assert_eq!(sink.exports, 1);
    assert!(sink.videos.is_empty());
}
