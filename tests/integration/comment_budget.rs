//! Comment budget and reply collection

use crate::support::mock_api::*;
use channel_harvester::fetcher::CommentAggregator;
use serde_json::Value;

fn threads(prefix: &str, count: usize) -> Vec<Value> {
    (1..=count)
        .map(|n| thread(&format!("{prefix}-{n}"), &[], 0))
        .collect()
}

#[tokio::test]
async fn test_budget_exhausted_on_first_video() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2)];
    channel_with_videos(&api, &ids);
    api.ok(
        "/commentThreads",
        &[("videoId", ids[0].as_str())],
        page(threads("a", 10), None),
    );
    api.ok(
        "/commentThreads",
        &[("videoId", ids[1].as_str())],
        page(threads("b", 10), None),
    );

    let report = executor(&api, 5).run("@demo").await.unwrap();

    assert_eq!(report.comments.len(), 5);
    assert!(report.comments.iter().all(|c| c.video_id == ids[0]));
    assert!(report.budget_exhausted);

    let thread_calls = api.calls_to("/commentThreads");
    assert_eq!(thread_calls.len(), 1);
    assert_eq!(thread_calls[0].param("videoId"), Some(ids[0].as_str()));
    assert_eq!(thread_calls[0].param("maxResults"), Some("5"));
    assert!(thread_calls
        .iter()
        .all(|c| c.param("videoId") != Some(ids[1].as_str())));
}

#[tokio::test]
async fn test_budget_carries_over_to_next_video() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2)];
    channel_with_videos(&api, &ids);
    api.ok(
        "/commentThreads",
        &[("videoId", ids[0].as_str())],
        page(threads("a", 2), None),
    );
    api.ok(
        "/commentThreads",
        &[("videoId", ids[1].as_str())],
        page(threads("b", 5), None),
    );

    let report = executor(&api, 4).run("@demo").await.unwrap();

    let per_video: Vec<usize> = ids
        .iter()
        .map(|id| report.comments.iter().filter(|c| &c.video_id == id).count())
        .collect();
    assert_eq!(per_video, vec![2, 2]);
    // Budget hit zero on the last video, so no video was left unvisited
    assert!(!report.budget_exhausted);

    let second = &api.calls_to("/commentThreads")[1];
    assert_eq!(second.param("maxResults"), Some("2"));
}

#[tokio::test]
async fn test_budget_cuts_inline_replies() {
    let api = MockApi::new();
    let vid = video_id(1);
    api.ok(
        "/commentThreads",
        &[("videoId", vid.as_str())],
        page(vec![thread("c1", &["r1", "r2", "r3", "r4"], 4)], None),
    );

    let aggregator = CommentAggregator::new(client(&api));
    let (comments, consumed) = aggregator.collect(&vid, 3).await.unwrap();

    let ids: Vec<&str> = comments.iter().map(|c| c.comment_id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "r1", "r2"]);
    assert_eq!(consumed, 3);
    assert!(api.calls_to("/comments").is_empty());
}

#[tokio::test]
async fn test_remaining_replies_are_fetched() {
    let api = MockApi::new();
    let vid = video_id(1);
    api.ok(
        "/commentThreads",
        &[("videoId", vid.as_str())],
        page(vec![thread("c1", &["r1", "r2"], 4), thread("c2", &[], 0)], None),
    );
    api.ok(
        "/comments",
        &[("parentId", "c1")],
        page(vec![comment("r1"), comment("r2"), comment("r3")], Some("p2")),
    );
    api.ok(
        "/comments",
        &[("parentId", "c1"), ("pageToken", "p2")],
        page(vec![comment("r4")], None),
    );

    let aggregator = CommentAggregator::new(client(&api));
    let (comments, consumed) = aggregator.collect(&vid, 100).await.unwrap();

    let ids: Vec<&str> = comments.iter().map(|c| c.comment_id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "r1", "r2", "r3", "r4", "c2"]);
    assert_eq!(consumed, 6);
    assert!(comments[1..5]
        .iter()
        .all(|c| c.parent_id.as_deref() == Some("c1")));
    assert_eq!(comments[5].parent_id, None);

    let reply_calls = api.calls_to("/comments");
    assert_eq!(reply_calls.len(), 2);
    assert_eq!(reply_calls[0].param("pageToken"), None);
    assert_eq!(reply_calls[1].param("pageToken"), Some("p2"));
}

#[tokio::test]
async fn test_comments_disabled_yields_empty_result() {
    let api = MockApi::new();
    let vid = video_id(1);
    api.error(
        "/commentThreads",
        &[("videoId", vid.as_str())],
        403,
        "commentsDisabled",
    );

    let aggregator = CommentAggregator::new(client(&api));
    let (comments, consumed) = aggregator.collect(&vid, 10).await.unwrap();

    assert!(comments.is_empty());
    assert_eq!(consumed, 0);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_disabled_video_does_not_stop_the_run() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2)];
    channel_with_videos(&api, &ids);
    api.error(
        "/commentThreads",
        &[("videoId", ids[0].as_str())],
        403,
        "commentsDisabled",
    );
    api.ok(
        "/commentThreads",
        &[("videoId", ids[1].as_str())],
        page(threads("b", 3), None),
    );

    let report = executor(&api, 10).run("@demo").await.unwrap();

    assert_eq!(report.comments.len(), 3);
    assert!(report.comments.iter().all(|c| c.video_id == ids[1]));
}

#[tokio::test]
async fn test_forbidden_video_is_skipped() {
    let api = MockApi::new();
    let ids = vec![video_id(1), video_id(2)];
    channel_with_videos(&api, &ids);
    api.error(
        "/commentThreads",
        &[("videoId", ids[0].as_str())],
        403,
        "forbidden",
    );
    api.ok(
        "/commentThreads",
        &[("videoId", ids[1].as_str())],
        page(threads("b", 2), None),
    );

    let report = executor(&api, 10).run("@demo").await.unwrap();

    assert_eq!(report.videos.len(), 2);
    assert_eq!(report.comments.len(), 2);
    assert!(report.comments.iter().all(|c| c.video_id == ids[1]));
    assert_eq!(api.calls_to("/commentThreads").len(), 2);
}

#[tokio::test]
async fn test_invalid_comment_is_skipped() {
    let api = MockApi::new();
    let vid = video_id(1);
    let mut broken = thread("c2", &[], 0);
    broken["snippet"]["topLevelComment"]["snippet"]["likeCount"] = serde_json::json!(-1);
    api.ok(
        "/commentThreads",
        &[("videoId", vid.as_str())],
        page(vec![thread("c1", &[], 0), broken, thread("c3", &[], 0)], None),
    );

    let aggregator = CommentAggregator::new(client(&api));
    let (comments, _) = aggregator.collect(&vid, 10).await.unwrap();

    let ids: Vec<&str> = comments.iter().map(|c| c.comment_id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c3"]);
}

#[tokio::test]
async fn test_zero_budget_makes_no_call() {
    let api = MockApi::new();
    let aggregator = CommentAggregator::new(client(&api));

    let (comments, consumed) = aggregator.collect(&video_id(1), 0).await.unwrap();

    assert!(comments.is_empty());
    assert_eq!(consumed, 0);
    assert_eq!(api.call_count(), 0);
}
