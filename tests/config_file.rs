//! Loading generation settings from JSON files.

use delve::{DelveError, DelveResult, GenerationConfig, Generator, RoomCorridorGenerator};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_and_generate() -> DelveResult<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{"width": 30, "height": 16, "max_rooms": 4, "room_min": 3, "room_max": 5, "seed": 77}}"#
    )?;

    let config = GenerationConfig::from_json_file(file.path())?;
    assert_eq!(config.width, 30);
    assert_eq!(config.height, 16);
    assert_eq!(config.max_tries, 1000);
    assert_eq!(config.seed, Some(77));

    let generator = RoomCorridorGenerator::new();
    let first = generator.generate(&config, &mut delve::utils::create_rng(&config))?;
    let second = generator.generate(&config, &mut delve::utils::create_rng(&config))?;

    assert_eq!(first.grid, second.grid);
    assert_eq!(first.render().lines().count(), 16);
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected_at_entry() -> DelveResult<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{"width": 10, "height": 10, "room_min": 4, "room_max": 9}}"#)?;

    let config = GenerationConfig::from_json_file(file.path())?;
    let mut rng = delve::utils::create_rng(&config);
    let result = RoomCorridorGenerator::new().generate(&config, &mut rng);

    assert!(matches!(result, Err(DelveError::InvalidConfiguration(_))));
    Ok(())
}

#[test]
fn test_missing_and_malformed_files() -> DelveResult<()> {
    let dir = tempfile::tempdir()?;
    let missing = GenerationConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(DelveError::Io(_))));

    let mut file = NamedTempFile::new()?;
    write!(file, "width = 30")?;
    let malformed = GenerationConfig::from_json_file(file.path());
    assert!(matches!(malformed, Err(DelveError::Serde(_))));
    Ok(())
}

#[test]
fn test_config_round_trips_through_json() -> DelveResult<()> {
    let config = GenerationConfig::classic().with_seed(5);
    let json = serde_json::to_string(&config)?;
    assert_eq!(GenerationConfig::from_json_str(&json)?, config);
    Ok(())
}
