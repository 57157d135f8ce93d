use mxmc_export::{LocalStorage, SiteConfigPipeline, SiteOptions};
use std::fs::File;
use tempfile::TempDir;

const FIELD_LOCATIONS: &str = "\
short_name,site_type,latitude,longitude,notes
KAN_L,GNSS-A,67.09,-49.95,lower
KAN_M,GNSS-A,67.07,-48.84,middle
CAM_S,camera,67.10,-50.01,timelapse
KAN_U,GNSS-A,67.00,-47.02,\"upper, near ridge\"
";

const CRYOLOGGER_CONFIG: &str = r#"{
  "uid": "TEMPLATE",
  "sample_interval": 15,
  "transmit_interval": 4,
  "gnss": {
    "constellations": ["GPS", "GLONASS"]
  }
}"#;

#[tokio::test]
async fn test_generates_config_per_gnss_site() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("field_locations.csv");
    std::fs::write(&csv_path, FIELD_LOCATIONS).unwrap();
    let output_dir = temp_dir.path().join("laptop");

    let storage = LocalStorage::new(output_dir.clone());
    let pipeline =
        SiteConfigPipeline::from_template_str(storage, CRYOLOGGER_CONFIG, SiteOptions::default())
            .unwrap();

    let written = pipeline.run(File::open(&csv_path).unwrap()).await.unwrap();

    assert_eq!(
        written,
        vec![
            "KAN_L/config.json",
            "KAN_M/config.json",
            "KAN_U/config.json"
        ]
    );
    assert!(!output_dir.join("CAM_S").exists());

    for site in ["KAN_L", "KAN_M", "KAN_U"] {
        let path = output_dir.join(site).join("config.json");
        let content = std::fs::read_to_string(&path).unwrap();
        let config: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(config["uid"], site);
        assert_eq!(config["sample_interval"], 15);
        assert_eq!(config["gnss"]["constellations"][1], "GLONASS");
    }
}

#[tokio::test]
async fn test_output_is_two_space_indented() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = SiteConfigPipeline::from_template_str(
        storage,
        r#"{"uid": "x", "rate": 1}"#,
        SiteOptions::default(),
    )
    .unwrap();

    pipeline
        .run("short_name,site_type\nKAN_B,GNSS-A\n".as_bytes())
        .await
        .unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("KAN_B/config.json")).unwrap();
    assert_eq!(content, "{\n  \"uid\": \"KAN_B\",\n  \"rate\": 1\n}");
}

#[tokio::test]
async fn test_existing_site_directory_is_reused() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("KAN_L")).unwrap();
    std::fs::write(temp_dir.path().join("KAN_L/config.json"), "stale").unwrap();

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline =
        SiteConfigPipeline::from_template_str(storage, CRYOLOGGER_CONFIG, SiteOptions::default())
            .unwrap();

    pipeline.run(FIELD_LOCATIONS.as_bytes()).await.unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("KAN_L/config.json")).unwrap();
    assert!(content.contains("\"uid\": \"KAN_L\""));
}
