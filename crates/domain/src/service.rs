use std::collections::BTreeMap;

use log::{debug, error};

use crate::{
    AnchorRepository, AthleteProfile, Block, BlockID, BlockLog, BuiltSession, CatalogRepository,
    ComposeOptions, CycleWeek, Delta, DeloadRecommendation, Exercise, ExerciseID, Fatigue,
    LogRepository, MetricType, PersonalBest, ProfileRepository, RECIPES, ReadError, Rer, Scheme,
    SessionLog, SessionRecap, Suggestion, SuggestionInput, WeekProgram, WriteError,
    build_week_program, delta_w1_w4, latest_entry, metric_type, personal_best, recommend_deload,
    session_recap, suggest,
};

pub struct Service<R, A> {
    repository: R,
    anchors: A,
}

impl<R, A> Service<R, A> {
    pub fn new(repository: R, anchors: A) -> Self {
        Self {
            repository,
            anchors,
        }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoData) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

pub trait CatalogService {
    fn get_blocks(&self) -> Result<Vec<Block>, ReadError>;
    fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

pub trait ProfileService {
    fn get_profile(&self) -> Result<AthleteProfile, ReadError>;
    fn replace_profile(&self, profile: AthleteProfile) -> Result<AthleteProfile, WriteError>;
}

pub trait LogService {
    fn get_block_logs(&self) -> Result<Vec<BlockLog>, ReadError>;
    fn add_block_log(&self, log: BlockLog) -> Result<BlockLog, WriteError>;
    fn get_session_logs(&self) -> Result<Vec<SessionLog>, ReadError>;
    fn add_session_log(&self, log: SessionLog) -> Result<SessionLog, WriteError>;
}

impl<R: CatalogRepository, A> CatalogService for Service<R, A> {
    fn get_blocks(&self) -> Result<Vec<Block>, ReadError> {
        log_on_error!(self.repository.read_blocks(), ReadError, "get", "blocks")
    }

    fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }
}

impl<R: ProfileRepository, A> ProfileService for Service<R, A> {
    fn get_profile(&self) -> Result<AthleteProfile, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
    }

    fn replace_profile(&self, profile: AthleteProfile) -> Result<AthleteProfile, WriteError> {
        log_on_error!(
            self.repository.replace_profile(profile),
            WriteError,
            "replace",
            "profile"
        )
    }
}

impl<R: LogRepository, A> LogService for Service<R, A> {
    fn get_block_logs(&self) -> Result<Vec<BlockLog>, ReadError> {
        log_on_error!(
            self.repository.read_block_logs(),
            ReadError,
            "get",
            "block logs"
        )
    }

    fn add_block_log(&self, log: BlockLog) -> Result<BlockLog, WriteError> {
        log_on_error!(
            self.repository.append_block_log(log),
            WriteError,
            "add",
            "block log"
        )
    }

    fn get_session_logs(&self) -> Result<Vec<SessionLog>, ReadError> {
        log_on_error!(
            self.repository.read_session_logs(),
            ReadError,
            "get",
            "session logs"
        )
    }

    fn add_session_log(&self, log: SessionLog) -> Result<SessionLog, WriteError> {
        log_on_error!(
            self.repository.append_session_log(log),
            WriteError,
            "add",
            "session log"
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSuggestion {
    pub block_id: BlockID,
    pub exercise_id: ExerciseID,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub exercise_id: ExerciseID,
    pub metric_type: MetricType,
    pub personal_best: Option<PersonalBest>,
    pub delta: Delta,
}

impl<R, A> Service<R, A>
where
    R: CatalogRepository + ProfileRepository + LogRepository,
    A: AnchorRepository,
{
    pub fn week_program(
        &self,
        week: CycleWeek,
        last_non_deload: Option<CycleWeek>,
        options: &ComposeOptions,
    ) -> Result<WeekProgram, ReadError> {
        let profile = self.get_profile()?;
        let blocks = self.get_blocks()?;
        Ok(build_week_program(
            &profile,
            &blocks,
            &RECIPES,
            week,
            last_non_deload,
            &self.anchors,
            options,
        ))
    }

    pub fn suggestion(
        &self,
        exercise_id: &ExerciseID,
        week: CycleWeek,
        fatigue: Fatigue,
        target_rer: Option<Rer>,
        scheme: Option<&Scheme>,
    ) -> Result<Suggestion, ReadError> {
        let exercises = self.exercise_map()?;
        let logs = self.get_block_logs()?;
        Ok(suggest(&SuggestionInput {
            exercise_id,
            metric_type: metric_type(exercise_id, &exercises),
            week,
            fatigue,
            target_rer,
            scheme,
            last: latest_entry(&logs, exercise_id),
        }))
    }

    /// Suggestions for every exercise of a session, in session order.
    pub fn session_suggestions(
        &self,
        session: &BuiltSession,
        fatigue: Fatigue,
    ) -> Result<Vec<ExerciseSuggestion>, ReadError> {
        let exercises = self.exercise_map()?;
        let logs = self.get_block_logs()?;
        Ok(session
            .blocks
            .iter()
            .flat_map(|b| {
                b.block.exercise_ids().map(|exercise_id| ExerciseSuggestion {
                    block_id: b.block.id.clone(),
                    exercise_id: exercise_id.clone(),
                    suggestion: suggest(&SuggestionInput {
                        exercise_id,
                        metric_type: metric_type(exercise_id, &exercises),
                        week: session.week,
                        fatigue,
                        target_rer: b.version.rer,
                        scheme: Some(&b.version.scheme),
                        last: latest_entry(&logs, exercise_id),
                    }),
                })
            })
            .collect())
    }

    pub fn exercise_progress(&self, exercise_id: &ExerciseID) -> Result<ExerciseProgress, ReadError> {
        let exercises = self.exercise_map()?;
        let logs = self.get_block_logs()?;
        let metric_type = metric_type(exercise_id, &exercises);
        Ok(ExerciseProgress {
            exercise_id: exercise_id.clone(),
            metric_type,
            personal_best: personal_best(&logs, exercise_id, metric_type),
            delta: delta_w1_w4(&logs, exercise_id),
        })
    }

    pub fn session_recap(
        &self,
        session: &BuiltSession,
        week: CycleWeek,
    ) -> Result<SessionRecap, ReadError> {
        Ok(session_recap(&self.get_block_logs()?, session, week))
    }

    pub fn deload_recommendation(
        &self,
        current_week: CycleWeek,
    ) -> Result<DeloadRecommendation, ReadError> {
        Ok(recommend_deload(&self.get_session_logs()?, current_week))
    }

    fn exercise_map(&self) -> Result<BTreeMap<ExerciseID, Exercise>, ReadError> {
        Ok(self
            .get_exercises()?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect())
    }
}
