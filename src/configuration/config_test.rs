use anyhow::Result;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// Config is process global, loads must not interleave.
static LOAD_LOCK: Lazy<Mutex<()>> = Lazy::new(|| return Mutex::new(()));

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    assert!(res.contains("\nbackend = \"gemini\"\n"));
    assert!(res.ends_with("\ntransition-delay = 400"));
    assert!(res.contains("# gemini-token = \"\""));
    assert!(!res.contains("config-file"));
}

#[test]
fn it_documents_possible_values() {
    let res = Config::serialize_default(cli::build());

    insta::assert_snapshot!(res.split("\n\n").find(|e| return e.contains("backend =")).unwrap(), @r###"
    # The backend hosting the models. [possible values: gemini, proxy]
    backend = "gemini"
    "###);
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["shadow-work", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Backend), "proxy");
    assert_eq!(
        Config::get(ConfigKey::ProxyURL),
        "http://localhost:8080/api/generate"
    );
    assert_eq!(Config::get_u64(ConfigKey::TransitionDelay), 0);
    assert_eq!(
        Config::get(ConfigKey::AnalysisModel),
        "models/gemini-2.5-pro"
    );

    return Ok(());
}

#[tokio::test]
async fn it_prefers_arguments_over_the_config_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "shadow-work",
        "-c",
        "./config.example.toml",
        "--backend",
        "gemini",
        "--transition-delay",
        "250",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Backend), "gemini");
    assert_eq!(Config::get_u64(ConfigKey::TransitionDelay), 250);

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["shadow-work", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_rejects_non_numeric_delays() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "shadow-work",
        "-c",
        "./test/bad-delay-config.toml",
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
