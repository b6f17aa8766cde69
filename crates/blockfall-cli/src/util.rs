use std::{fs::File, io, path::Path};

use anyhow::Context;
use blockfall_engine::GameConfig;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;
    Ok(value)
}

/// Reads a game configuration file and checks its values.
pub fn read_game_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let config: GameConfig = read_json_file("game config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid game config file: {}", path.display()))?;
    Ok(config)
}
