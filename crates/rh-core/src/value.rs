use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::CellType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    Directory(PathBuf),
    Text(String),
    Flag(bool),
}

impl CellValue {
    pub fn as_directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(path) => Some(path.as_path()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            Self::Directory(_) => CellType::Directory,
            Self::Text(_) => CellType::Text,
            Self::Flag(_) => CellType::Flag,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }
}
