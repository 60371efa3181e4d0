//! Channel resolution against the mock API

use crate::support::mock_api::*;
use channel_harvester::fetcher::{ApiError, ChannelResolver, ResolveError};
use serde_json::json;

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let api = MockApi::new();
    api.ok("/channels", &[("forHandle", "@demo")], channel_page("UCdemo", "UUdemo"));
    let resolver = ChannelResolver::new(client(&api));

    let first = resolver.resolve("@demo").await.unwrap();
    let second = resolver.resolve("https://www.youtube.com/@demo").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.id, "UCdemo");
    assert_eq!(api.calls_to("/channels").len(), 2);
}

#[tokio::test]
async fn test_resolution_sends_lookup_param_and_key() {
    let api = MockApi::new();
    api.ok("/channels", &[("forUsername", "legacy")], channel_page("UClegacy", "UUlegacy"));
    let resolver = ChannelResolver::new(client(&api));

    let channel = resolver
        .resolve("youtube.com/user/legacy")
        .await
        .unwrap();
    assert_eq!(channel.uploads_playlist_id, "UUlegacy");

    let call = &api.calls_to("/channels")[0];
    assert_eq!(call.param("forUsername"), Some("legacy"));
    assert_eq!(call.param("part"), Some("contentDetails"));
    assert_eq!(call.param("key"), Some(API_KEY));
}

#[tokio::test]
async fn test_empty_lookup_is_channel_not_found() {
    let api = MockApi::new();
    api.ok("/channels", &[("forHandle", "@ghost")], json!({ "items": [] }));
    let resolver = ChannelResolver::new(client(&api));

    let err = resolver.resolve("@ghost").await.unwrap_err();
    assert!(matches!(err, ResolveError::ChannelNotFound(_)));
}

#[tokio::test]
async fn test_invalid_input_makes_no_call() {
    let api = MockApi::new();
    let resolver = ChannelResolver::new(client(&api));

    let err = resolver
        .resolve("https://example.com/somebody")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidInput(_)));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_bad_key_is_unauthorized() {
    let api = MockApi::new();
    api.error("/channels", &[], 400, "keyInvalid");
    let resolver = ChannelResolver::new(client(&api));

    let err = resolver.resolve("@demo").await.unwrap_err();
    assert!(matches!(err, ResolveError::Api(ApiError::Unauthorized(_))));
    assert_eq!(api.call_count(), 1);
}
