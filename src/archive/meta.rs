//! Item metadata sidecars (`<item>.meta`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collector::META_EXTENSION;
use crate::error::{Result, config_parse_failed};

/// Contents of an item's `.meta` sidecar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Logical paths of items this item references
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ItemMeta {
    /// Read the sidecar next to `item`, if there is one
    pub fn load_for(item: &Path) -> Result<Option<Self>> {
        let path = meta_path(item);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))
    }
}

/// Sidecar path of `item`: the item path with `.meta` appended
pub fn meta_path(item: &Path) -> PathBuf {
    let mut name = item.as_os_str().to_os_string();
    name.push(".");
    name.push(META_EXTENSION);
    PathBuf::from(name)
}
