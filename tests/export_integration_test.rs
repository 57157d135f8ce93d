use chrono::NaiveDate;
use httpmock::prelude::*;
use mxmc_export::{
    DryRunRemote, ExportConfig, ExportEngine, ExportError, ExportProfile, MxmcClient, Schedule,
};
use std::time::Duration;
use tempfile::TempDir;
use tokio_test::assert_ok;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_profile(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(ExportProfile::file_name(name)), content).unwrap();
}

#[tokio::test]
async fn test_end_to_end_export_against_mock_mxmc() {
    let temp_dir = TempDir::new().unwrap();
    write_profile(&temp_dir, "greenland", r#"{"quality": "medium"}"#);
    let export_dir = temp_dir.path().join("clips");
    std::fs::create_dir(&export_dir).unwrap();

    let server = MockServer::start_async().await;

    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/list").query_param("cameras", "1");
            then.status(200).body("M16 Greenland");
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/exports")
                .query_param("create", "1")
                .query_param("profile", "greenland")
                .query_param("quality", "medium");
            then.status(200).body("OK");
        })
        .await;
    let add_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/exports")
                .query_param("add", "1")
                .query_param_exists("begin")
                .query_param_exists("end")
                .query_param("audio", "off");
            then.status(200).body("OK");
        })
        .await;
    let export_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/exports")
                .query_param("export", "1")
                .query_param("profile", "greenland")
                .query_param_exists("path");
            then.status(200).body("OK");
        })
        .await;
    let status_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/exports").query_param("status", "1");
            then.status(200).body("0\n");
        })
        .await;
    let clear_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/exports").query_param("clear", "1");
            then.status(200).body("OK");
        })
        .await;
    let clear_progress_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/exports")
                .query_param("clearProgress", "1");
            then.status(200).body("OK");
        })
        .await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/exports")
                .query_param("delete", "1")
                .query_param("profile", "greenland");
            then.status(200).body("OK");
        })
        .await;

    let mut config = ExportConfig::new(
        date(2025, 6, 1),
        date(2025, 6, 2),
        export_dir.display().to_string(),
    );
    config.profile_dir = temp_dir.path().to_path_buf();
    config.base_url = server.base_url();
    config.poll_interval_seconds = 0;
    assert_ok!(config.check_paths());

    let profile = config.load_profile().unwrap();
    let client = MxmcClient::new(&config.base_url).unwrap();
    let engine = ExportEngine::from_config(client, profile, config.schedule().unwrap(), &config);

    let summary = assert_ok!(engine.run(config.date_start, config.date_finish).await);

    assert_eq!(summary.days, 2);
    assert_eq!(summary.windows, 48);

    list_mock.assert_hits_async(1).await;
    create_mock.assert_hits_async(1).await;
    add_mock.assert_hits_async(48).await;
    export_mock.assert_hits_async(2).await;
    status_mock.assert_hits_async(2).await;
    clear_mock.assert_hits_async(2).await;
    clear_progress_mock.assert_hits_async(2).await;
    delete_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_export_aborts_on_remote_failure() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/list");
            then.status(200).body("M16");
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/exports").query_param("create", "1");
            then.status(500).body("profile store unavailable");
        })
        .await;
    let add_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/exports").query_param("add", "1");
            then.status(200);
        })
        .await;

    let profile = ExportProfile::from_json_str("greenland", r#"{"quality": "high"}"#).unwrap();
    let client = MxmcClient::new(server.base_url()).unwrap();
    let engine = ExportEngine::new(client, profile, "/data/clips")
        .with_poll_interval(Duration::ZERO);

    let err = engine
        .run(date(2025, 6, 1), date(2025, 6, 1))
        .await
        .unwrap_err();

    create_mock.assert_async().await;
    add_mock.assert_hits_async(0).await;
    assert!(matches!(err, ExportError::RemoteError { status: 500, .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_dry_run_prints_full_plan() {
    let profile = ExportProfile::from_json_str("greenland", r#"{"quality": "medium"}"#).unwrap();
    let remote = DryRunRemote::new("https://localhost:57536");
    let engine = ExportEngine::new(remote, profile, "/data/clips")
        .with_schedule(Schedule::from_minutes(360, 59).unwrap())
        .with_poll_interval(Duration::ZERO);

    engine.run(date(2025, 6, 1), date(2025, 6, 1)).await.unwrap();

    let urls = engine.remote().urls();
    assert_eq!(urls.len(), 1 + 1 + 4 + 1 + 1 + 2 + 1);
    assert_eq!(urls[0], "https://localhost:57536/list?cameras=1");
    assert_eq!(
        urls[2],
        "https://localhost:57536/exports?add=1&begin=2025-06-01+00:00:00&end=2025-06-01+00:59:00&audio=off"
    );
    assert_eq!(
        urls[5],
        "https://localhost:57536/exports?add=1&begin=2025-06-01+18:00:00&end=2025-06-01+18:59:00&audio=off"
    );
    assert_eq!(
        urls.last().unwrap(),
        "https://localhost:57536/exports?delete=1&profile=greenland"
    );
}

#[test]
fn test_missing_export_directory_detected_before_any_request() {
    let temp_dir = TempDir::new().unwrap();
    write_profile(&temp_dir, "greenland", "{}");

    let mut config = ExportConfig::new(
        date(2025, 6, 1),
        date(2025, 6, 1),
        temp_dir.path().join("nope").display().to_string(),
    );
    config.profile_dir = temp_dir.path().to_path_buf();

    let err = config.check_paths().unwrap_err();
    assert!(matches!(err, ExportError::MissingFileError { .. }));
    assert_eq!(err.exit_code(), 1);
}
