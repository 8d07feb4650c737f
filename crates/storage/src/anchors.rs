use std::{collections::BTreeMap, path::PathBuf};

use rugbyprep_domain as domain;

use crate::json_file::{read_json, write_json};

/// Anchor store persisted as a flat JSON object of key to block identifier.
#[derive(Debug, Clone)]
pub struct JsonAnchors {
    path: PathBuf,
}

impl JsonAnchors {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, domain::StorageError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}

impl domain::AnchorRepository for JsonAnchors {
    fn read_anchor(&self, key: &str) -> Result<Option<String>, domain::ReadError> {
        Ok(self.read_all()?.remove(key))
    }

    fn write_anchor(&self, key: &str, block_id: &str) -> Result<(), domain::WriteError> {
        let mut anchors = self.read_all()?;
        if anchors.get(key).is_some_and(|b| b == block_id) {
            return Ok(());
        }
        anchors.insert(key.to_string(), block_id.to_string());
        Ok(write_json(&self.path, &anchors)?)
    }
}
