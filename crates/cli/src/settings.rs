use std::{fs, io, path::PathBuf, str::FromStr};

use log::LevelFilter;
use rugbyprep_domain::{CycleWeek, Fatigue};
use rugbyprep_storage::Files;

pub const SETTINGS_FILE: &str = "settings.json";

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, SettingsError>;
    fn write_settings(&self, settings: &Settings) -> Result<(), SettingsError>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub blocks_file: String,
    pub exercises_file: String,
    pub profile_file: String,
    pub block_logs_file: String,
    pub session_logs_file: String,
    pub anchors_file: String,
    pub anchors: bool,
    pub current_week: String,
    pub last_non_deload_week: Option<String>,
    pub fatigue: String,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn files(&self) -> Files {
        Files {
            blocks: self.blocks_file.clone(),
            exercises: self.exercises_file.clone(),
            profile: self.profile_file.clone(),
            block_logs: self.block_logs_file.clone(),
            session_logs: self.session_logs_file.clone(),
        }
    }

    pub fn current_week(&self) -> Result<CycleWeek, SettingsError> {
        parse("current_week", &self.current_week)
    }

    pub fn last_non_deload_week(&self) -> Result<Option<CycleWeek>, SettingsError> {
        self.last_non_deload_week
            .as_deref()
            .map(|week| parse("last_non_deload_week", week))
            .transpose()
    }

    pub fn fatigue(&self) -> Result<Fatigue, SettingsError> {
        parse("fatigue", &self.fatigue)
    }

    pub fn log_level(&self) -> Result<LevelFilter, SettingsError> {
        parse("log_level", &self.log_level)
    }

    /// Move to the following week of the cycle, remembering the week a
    /// deload reuses the selection of.
    pub fn advance_week(&mut self) -> Result<CycleWeek, SettingsError> {
        let current = self.current_week()?;
        let next = current.next();
        if !current.is_deload() {
            self.last_non_deload_week = Some(current.to_string());
        }
        self.current_week = next.to_string();
        Ok(next)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let files = Files::default();
        Self {
            blocks_file: files.blocks,
            exercises_file: files.exercises,
            profile_file: files.profile,
            block_logs_file: files.block_logs,
            session_logs_file: files.session_logs,
            anchors_file: String::from("anchors.json"),
            anchors: true,
            current_week: CycleWeek::W1.to_string(),
            last_non_deload_week: None,
            fatigue: Fatigue::Ok.to_string(),
            log_level: String::from("warn"),
            log_file: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("invalid {field} {value:?}")]
    InvalidValue { field: &'static str, value: String },
    #[error("corrupt settings: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn parse<T: FromStr>(field: &'static str, value: &str) -> Result<T, SettingsError> {
    T::from_str(value).map_err(|_| SettingsError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Settings stored as JSON inside the data directory.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SETTINGS_FILE),
        }
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SettingsRepository for SettingsFile {
    fn read_settings(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| SettingsError::Corrupt(format!("{}: {err}", self.path.display()))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(settings)
            .map_err(|err| SettingsError::Corrupt(err.to_string()))?;
        Ok(fs::write(&self.path, content)?)
    }
}
