use fontloom_domain::config::LoggingConfig;
use fontloom_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_directory_creates_json_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        console: false,
        directory: Some(log_dir.clone()),
        json: true,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config("integration-file-logging", &config)?;
    assert!(logger.has_file_output());

    tracing::info!(handle = "roboto", "font enqueued");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("font enqueued"));
    assert!(contents.lines().any(|line| line.trim_start().starts_with('{')));

    Ok(())
}
