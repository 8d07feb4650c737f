use std::fmt::Write;

use rugbyprep_domain::{
    BuiltBlock, BuiltSession, DeloadRecommendation, ExerciseID, ExerciseProgress,
    ExerciseSuggestion, SessionRecap, Suggestion, WeekGuidance, WeekProgram, emom_display,
    format_rest, rer_cue,
};

/// Plain text of a week program. `suggestions` holds the suggestions of each
/// session, in session order, and may be shorter than the program.
pub fn program(program: &WeekProgram, suggestions: &[Vec<ExerciseSuggestion>]) -> String {
    let mut out = format!("Week {}\n", program.week);
    out.push_str(&guidance(program.week.guidance()));
    for (i, session) in program.sessions.iter().enumerate() {
        out.push('\n');
        out.push_str(&self::session(
            session,
            suggestions.get(i).map(Vec::as_slice).unwrap_or_default(),
        ));
    }
    if !program.warnings.is_empty() {
        out.push_str("\nTo verify:\n");
        for warning in &program.warnings {
            let _ = writeln!(out, "  ! {warning}");
        }
    }
    out
}

fn guidance(guidance: &WeekGuidance) -> String {
    let mut out = format!(
        "{}: {}\n{}\n",
        guidance.title, guidance.focus, guidance.intensity_cue
    );
    for rule in guidance.key_rules {
        let _ = writeln!(out, "  * {rule}");
    }
    out
}

pub fn session(session: &BuiltSession, suggestions: &[ExerciseSuggestion]) -> String {
    let mut out = format!("== {} ({}) ==\n", session.title, session.week);
    for (i, built) in session.blocks.iter().enumerate() {
        out.push_str(&block(i + 1, built, suggestions));
    }
    for warning in &session.warnings {
        let _ = writeln!(out, "  ! {warning}");
    }
    out
}

fn block(position: usize, built: &BuiltBlock, suggestions: &[ExerciseSuggestion]) -> String {
    let BuiltBlock { block, version } = built;
    let mut out = format!("{position}. {} [{}]\n", block.name, block.intent);

    let mut prescription = vec![version.volume_label()];
    if let Some(rer) = version.rer {
        prescription.push(rer.to_string());
    }
    if version.emom_minutes().is_none() {
        prescription.push(format_rest(version.rest_seconds));
    }
    if let Some(tempo) = &version.tempo {
        prescription.push(format!("Tempo {tempo}"));
    }
    let _ = writeln!(out, "   {}", prescription.join(" · "));
    if let Some(emom) = emom_display(block, version) {
        if emom.exercise_count > 1 {
            let _ = writeln!(out, "   {}", emom.label);
        }
    }
    let _ = writeln!(out, "   {}", rer_cue(block.intent, version.rer));
    if !block.coaching_notes.is_empty() {
        let _ = writeln!(out, "   {}", block.coaching_notes);
    }

    for exercise in &block.exercises {
        let _ = write!(out, "   - {}", exercise.exercise_id);
        if let Some(notes) = &exercise.notes {
            let _ = write!(out, " ({notes})");
        }
        if let Some(s) = suggestions
            .iter()
            .find(|s| s.block_id == block.id && s.exercise_id == exercise.exercise_id)
        {
            let _ = write!(out, ": {}", s.suggestion.text);
        }
        out.push('\n');
    }
    out
}

pub fn suggestion(exercise_id: &ExerciseID, suggestion: &Suggestion) -> String {
    let mut out = format!("{exercise_id}: {}\n", suggestion.text);
    if let Some(kind) = suggestion.kind {
        let _ = writeln!(out, "  Metric: {kind}");
    }
    let _ = writeln!(out, "  {}", suggestion.rationale);
    if let Some(last_text) = &suggestion.last_text {
        let _ = writeln!(out, "  {last_text}");
    }
    out
}

pub fn progress(progress: &ExerciseProgress) -> String {
    let mut out = format!("{} ({})\n", progress.exercise_id, progress.metric_type);
    let _ = writeln!(
        out,
        "  Personal best: {}",
        progress
            .personal_best
            .as_ref()
            .map_or("-", |pb| pb.text.as_str())
    );
    let delta = &progress.delta;
    let _ = writeln!(
        out,
        "  W1 → W4: {} ({} → {})",
        delta.text, delta.from_text, delta.to_text
    );
    out
}

pub fn recap(session: &BuiltSession, recap: &SessionRecap) -> String {
    format!(
        "{}: {}/{} exercises logged · load {}\n",
        session.title, recap.logged_exercises, recap.total_exercises, recap.load_proxy
    )
}

pub fn deload(recommendation: &DeloadRecommendation) -> String {
    match (&recommendation.reason, recommendation.recommend) {
        (Some(reason), true) => format!("Deload recommended: {reason}\n"),
        _ => String::from("No deload needed\n"),
    }
}
