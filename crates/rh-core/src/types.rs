use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RehostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Storage {
    Static,
    Instance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellType {
    Directory,
    Text,
    Flag,
}

// Absolute data root for the hosted client. Computed once at startup and
// immutable afterwards; relative inputs are resolved against the process
// working directory, the way the legacy bootstrap treated its install dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDir(PathBuf);

impl RootDir {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RehostError> {
        let path = path.into();
        if path.is_absolute() {
            return Ok(Self(path));
        }
        let cwd = working_dir()?;
        Ok(Self(cwd.join(path)))
    }

    pub fn from_working_dir() -> Result<Self, RehostError> {
        Ok(Self(working_dir()?))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.0.display()
    }
}

fn working_dir() -> Result<PathBuf, RehostError> {
    std::env::current_dir().map_err(|error| {
        RehostError::new(
            "CORE_WORKING_DIR",
            format!("Failed to read the process working directory: {}", error),
        )
    })
}
