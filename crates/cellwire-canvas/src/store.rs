//! JSON-file persistence for a canvas workspace.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::CanvasWorkspace;

/// Loads and saves one workspace file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unparsable file loads as the empty workspace; the editor
    /// starts from a blank canvas rather than refusing to open.
    pub fn load(&self) -> CanvasWorkspace {
        match File::open(&self.path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).unwrap_or_default(),
            Err(_) => CanvasWorkspace::default(),
        }
    }

    pub fn save(&self, workspace: &CanvasWorkspace) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, workspace)?;
        Ok(())
    }
}

pub fn to_json_string(workspace: &CanvasWorkspace) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(workspace)?)
}

pub fn from_json_str(json: &str) -> Result<CanvasWorkspace, StoreError> {
    Ok(serde_json::from_str(json)?)
}
