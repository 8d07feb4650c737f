#![allow(clippy::missing_errors_doc)]

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use rugbyprep_domain as domain;
use uuid::Uuid;

use crate::dto::{Block, BlockLog, Exercise, Profile, SessionLog};

/// File names of the data files inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Files {
    pub blocks: String,
    pub exercises: String,
    pub profile: String,
    pub block_logs: String,
    pub session_logs: String,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            blocks: String::from("blocks.json"),
            exercises: String::from("exercises.json"),
            profile: String::from("profile.json"),
            block_logs: String::from("block_logs.json"),
            session_logs: String::from("session_logs.json"),
        }
    }
}

/// Repository keeping every collection in its own JSON file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: PathBuf,
    files: Files,
}

impl JsonStorage {
    pub fn new(dir: impl Into<PathBuf>, files: Files) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a value, or `None` if the file does not exist.
    pub fn get<R, V>(&self, file: &str) -> Result<Option<R>, domain::StorageError>
    where
        R: TryFrom<V>,
        V: for<'de> serde::Deserialize<'de>,
        <R as TryFrom<V>>::Error: std::error::Error,
    {
        let Some(value) = read_json::<V>(&self.path(file))? else {
            return Ok(None);
        };
        R::try_from(value)
            .map(Some)
            .map_err(|err| domain::StorageError::Corrupt(format!("{file}: {err}")))
    }

    /// Read all entries of a collection. A missing file is an empty collection.
    pub fn get_all<R, V>(&self, file: &str) -> Result<Vec<R>, domain::StorageError>
    where
        R: TryFrom<V>,
        V: for<'de> serde::Deserialize<'de>,
        <R as TryFrom<V>>::Error: std::error::Error,
    {
        read_json::<Vec<V>>(&self.path(file))?
            .unwrap_or_default()
            .into_iter()
            .map(|v| {
                R::try_from(v)
                    .map_err(|err| domain::StorageError::Corrupt(format!("{file}: {err}")))
            })
            .collect()
    }

    pub fn put<V: serde::Serialize>(
        &self,
        file: &str,
        value: &V,
    ) -> Result<(), domain::StorageError> {
        write_json(&self.path(file), value)
    }

    /// Append an entry to a collection, keeping existing entries untouched.
    pub fn add<V>(&self, file: &str, value: V) -> Result<(), domain::StorageError>
    where
        V: serde::Serialize + for<'de> serde::Deserialize<'de>,
    {
        let mut values = read_json::<Vec<V>>(&self.path(file))?.unwrap_or_default();
        values.push(value);
        self.put(file, &values)
    }
}

pub(crate) fn read_json<V>(path: &Path) -> Result<Option<V>, domain::StorageError>
where
    V: for<'de> serde::Deserialize<'de>,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found", path.display());
            return Ok(None);
        }
        Err(err) => return Err(domain::StorageError::Other(Box::new(err))),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|err| domain::StorageError::Corrupt(format!("{}: {err}", path.display())))
}

pub(crate) fn write_json<V: serde::Serialize>(
    path: &Path,
    value: &V,
) -> Result<(), domain::StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| domain::StorageError::Other(Box::new(err)))?;
    }
    let content = serde_json::to_string_pretty(value)
        .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
    fs::write(path, content).map_err(|err| domain::StorageError::Other(Box::new(err)))
}

fn new_id(id: domain::LogID) -> domain::LogID {
    if id.is_nil() {
        Uuid::new_v4().into()
    } else {
        id
    }
}

impl domain::CatalogRepository for JsonStorage {
    fn read_blocks(&self) -> Result<Vec<domain::Block>, domain::ReadError> {
        let blocks = self.get_all::<domain::Block, Block>(&self.files.blocks)?;
        if blocks.is_empty() {
            return Err(domain::ReadError::Storage(domain::StorageError::NoData));
        }
        Ok(blocks)
    }

    fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.get_all::<domain::Exercise, Exercise>(&self.files.exercises)?)
    }
}

impl domain::ProfileRepository for JsonStorage {
    fn read_profile(&self) -> Result<domain::AthleteProfile, domain::ReadError> {
        self.get::<domain::AthleteProfile, Profile>(&self.files.profile)?
            .ok_or(domain::ReadError::Storage(domain::StorageError::NoData))
    }

    fn replace_profile(
        &self,
        profile: domain::AthleteProfile,
    ) -> Result<domain::AthleteProfile, domain::WriteError> {
        self.put(&self.files.profile, &Profile::from(&profile))?;
        Ok(profile)
    }
}

impl domain::LogRepository for JsonStorage {
    fn read_block_logs(&self) -> Result<Vec<domain::BlockLog>, domain::ReadError> {
        Ok(self.get_all::<domain::BlockLog, BlockLog>(&self.files.block_logs)?)
    }

    fn append_block_log(
        &self,
        log: domain::BlockLog,
    ) -> Result<domain::BlockLog, domain::WriteError> {
        let log = domain::BlockLog {
            id: new_id(log.id),
            ..log
        };
        self.add(&self.files.block_logs, BlockLog::from(&log))?;
        Ok(log)
    }

    fn read_session_logs(&self) -> Result<Vec<domain::SessionLog>, domain::ReadError> {
        Ok(self.get_all::<domain::SessionLog, SessionLog>(&self.files.session_logs)?)
    }

    fn append_session_log(
        &self,
        log: domain::SessionLog,
    ) -> Result<domain::SessionLog, domain::WriteError> {
        let log = domain::SessionLog {
            id: new_id(log.id),
            ..log
        };
        self.add(&self.files.session_logs, SessionLog::from(&log))?;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rugbyprep_domain::{CatalogRepository, LogRepository, ProfileRepository};

    use crate::tests::data::{BLOCK, BLOCK_LOG, EMOM_BLOCK, EXERCISE, PROFILE, SESSION_LOG};

    use super::*;

    fn storage(dir: &tempfile::TempDir) -> JsonStorage {
        JsonStorage::new(dir.path(), Files::default())
    }

    #[test]
    fn test_read_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        storage
            .put(
                "blocks.json",
                &vec![Block::from(&*BLOCK), Block::from(&*EMOM_BLOCK)],
            )
            .unwrap();
        assert_eq!(
            storage.read_blocks().unwrap(),
            vec![BLOCK.clone(), EMOM_BLOCK.clone()]
        );
    }

    #[test]
    fn test_read_blocks_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            storage(&dir).read_blocks(),
            Err(domain::ReadError::Storage(domain::StorageError::NoData))
        ));
    }

    #[test]
    fn test_read_blocks_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocks.json"), "[{\"blockId\": 1}]").unwrap();
        assert!(matches!(
            storage(&dir).read_blocks(),
            Err(domain::ReadError::Storage(domain::StorageError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_read_blocks_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut block = Block::from(&*BLOCK);
        block.intent = String::from("cardio");
        storage(&dir).put("blocks.json", &vec![block]).unwrap();
        assert!(matches!(
            storage(&dir).read_blocks(),
            Err(domain::ReadError::Storage(domain::StorageError::Corrupt(message)))
                if message == "blocks.json: invalid intent \"cardio\""
        ));
    }

    #[test]
    fn test_read_exercises() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert_eq!(storage.read_exercises().unwrap(), vec![]);
        storage
            .put("exercises.json", &vec![Exercise::from(&*EXERCISE)])
            .unwrap();
        assert_eq!(storage.read_exercises().unwrap(), vec![EXERCISE.clone()]);
    }

    #[test]
    fn test_profile() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert!(matches!(
            storage.read_profile(),
            Err(domain::ReadError::Storage(domain::StorageError::NoData))
        ));
        assert_eq!(storage.replace_profile(PROFILE.clone()).unwrap(), *PROFILE);
        assert_eq!(storage.read_profile().unwrap(), *PROFILE);
    }

    #[test]
    fn test_block_logs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert_eq!(storage.read_block_logs().unwrap(), vec![]);
        assert_eq!(
            storage.append_block_log(BLOCK_LOG.clone()).unwrap(),
            *BLOCK_LOG
        );
        let created = storage
            .append_block_log(domain::BlockLog {
                id: domain::LogID::nil(),
                ..BLOCK_LOG.clone()
            })
            .unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(
            storage.read_block_logs().unwrap(),
            vec![BLOCK_LOG.clone(), created]
        );
    }

    #[test]
    fn test_session_logs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert_eq!(storage.read_session_logs().unwrap(), vec![]);
        storage.append_session_log(SESSION_LOG.clone()).unwrap();
        assert_eq!(
            storage.read_session_logs().unwrap(),
            vec![SESSION_LOG.clone()]
        );
    }

    #[test]
    fn test_demo_data() {
        let storage = JsonStorage::new(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data"),
            Files::default(),
        );
        let profile = storage.read_profile().unwrap();
        let blocks = storage.read_blocks().unwrap();
        assert!(!storage.read_exercises().unwrap().is_empty());
        let program = domain::build_week_program(
            &profile,
            &blocks,
            &domain::RECIPES,
            domain::CycleWeek::W1,
            None,
            &domain::NoAnchors,
            &domain::ComposeOptions::default(),
        );
        assert_eq!(program.sessions.len(), 3);
        assert_eq!(program.warnings, Vec::<String>::new());
    }

    #[test]
    fn test_custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(
            dir.path().join("athlete"),
            Files {
                profile: String::from("me.json"),
                ..Files::default()
            },
        );
        storage.replace_profile(PROFILE.clone()).unwrap();
        assert!(dir.path().join("athlete").join("me.json").exists());
    }
}
