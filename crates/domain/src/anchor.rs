use std::{collections::BTreeMap, sync::Mutex};

use crate::{AthleteProfile, Intent, Phase, ReadError, RecipeID, WriteError};

/// String-keyed store remembering block choices across compositions.
///
/// Anchors are advisory. Callers treat read and write failures as "no anchor".
pub trait AnchorRepository {
    fn read_anchor(&self, key: &str) -> Result<Option<String>, ReadError>;
    fn write_anchor(&self, key: &str, block_id: &str) -> Result<(), WriteError>;
}

impl<T: AnchorRepository + ?Sized> AnchorRepository for &T {
    fn read_anchor(&self, key: &str) -> Result<Option<String>, ReadError> {
        (**self).read_anchor(key)
    }

    fn write_anchor(&self, key: &str, block_id: &str) -> Result<(), WriteError> {
        (**self).write_anchor(key, block_id)
    }
}

/// Disables anchoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnchors;

impl AnchorRepository for NoAnchors {
    fn read_anchor(&self, _key: &str) -> Result<Option<String>, ReadError> {
        Ok(None)
    }

    fn write_anchor(&self, _key: &str, _block_id: &str) -> Result<(), WriteError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAnchors {
    anchors: Mutex<BTreeMap<String, String>>,
}

impl InMemoryAnchors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.anchors
            .lock()
            .map(|anchors| anchors.clone())
            .unwrap_or_default()
    }
}

impl From<BTreeMap<String, String>> for InMemoryAnchors {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self {
            anchors: Mutex::new(value),
        }
    }
}

impl AnchorRepository for InMemoryAnchors {
    fn read_anchor(&self, key: &str) -> Result<Option<String>, ReadError> {
        let anchors = self
            .anchors
            .lock()
            .map_err(|err| ReadError::Other(err.to_string().into()))?;
        Ok(anchors.get(key).cloned())
    }

    fn write_anchor(&self, key: &str, block_id: &str) -> Result<(), WriteError> {
        let mut anchors = self
            .anchors
            .lock()
            .map_err(|err| WriteError::Other(err.to_string().into()))?;
        anchors.insert(key.to_string(), block_id.to_string());
        Ok(())
    }
}

const ANCHOR_NAMESPACE: &str = "rugbyprep.anchor.v1";

/// Anchor key prefix of an athlete context: position, level, goal, equipment,
/// injuries, phase and recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorKey(String);

impl AnchorKey {
    #[must_use]
    pub fn new(profile: &AthleteProfile, phase: Option<Phase>, recipe: RecipeID) -> Self {
        Self(format!(
            "{ANCHOR_NAMESPACE}:{}:{}:{}:{}:{}:{}:{recipe}",
            profile.position_or_default(),
            profile.level,
            profile.goal.map_or(String::from("none"), |g| g.to_string()),
            profile
                .equipment
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(","),
            profile
                .injuries
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(","),
            phase.map_or(String::from("DELOAD"), |p| p.to_string()),
        ))
    }

    #[must_use]
    pub fn for_intent(&self, intent: Intent) -> String {
        format!("{}:{intent}", self.0)
    }
}
