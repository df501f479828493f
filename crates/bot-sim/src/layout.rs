use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON description of a simulation field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldLayout {
    pub spawn: [f32; 3],
    pub blocks: Vec<LayoutBlock>,
    #[serde(default)]
    pub entities: Vec<LayoutEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub pos: [i32; 3],
    pub kind: LayoutKind,
    #[serde(default = "default_hardness")]
    pub hardness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Stone,
    Ore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEntity {
    pub id: u64,
    pub pos: [f32; 3],
}

fn default_hardness() -> f32 {
    1.0
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse layout")]
    Parse(#[from] serde_json::Error),
}

pub fn load_layout(path: &Path) -> Result<WorldLayout, LayoutError> {
    let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
