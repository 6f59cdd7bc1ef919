//! RON loaders for the static battle data. Each definition lives in its own
//! file under `enemies/`, `skills/`, or `items/` inside the data directory.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use schema::{EnemyData, ItemData, SkillData};

use crate::errors::{DataError, DataResult};

/// Load every enemy definition from `<data_path>/enemies/*.ron`.
pub fn load_enemies(data_path: &Path) -> DataResult<Vec<EnemyData>> {
    load_directory(&data_path.join("enemies"))
}

/// Load every skill definition from `<data_path>/skills/*.ron`.
pub fn load_skills(data_path: &Path) -> DataResult<Vec<SkillData>> {
    load_directory(&data_path.join("skills"))
}

/// Load every item definition from `<data_path>/items/*.ron`.
pub fn load_items(data_path: &Path) -> DataResult<Vec<ItemData>> {
    load_directory(&data_path.join("items"))
}

fn load_directory<T: DeserializeOwned>(dir: &Path) -> DataResult<Vec<T>> {
    if !dir.exists() {
        return Err(DataError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("ron"))
        .collect();
    // Stable load order regardless of directory enumeration.
    paths.sort();

    for path in paths {
        let content = fs::read_to_string(&path)?;
        let parsed = ron::from_str(&content).map_err(|err| DataError::Parse {
            file: path.clone(),
            message: err.to_string(),
        })?;
        entries.push(parsed);
    }

    Ok(entries)
}
