//! # CLI Commands
//!
//! Each `cmd_*` function returns the text to print so that `main.rs` stays
//! a thin dispatcher and the commands can be tested directly.

use crate::scenario::{Outcome, Scenario, ScenarioError};
use campus_core::academic::{is_honor_roll, is_passing_gpa};
use campus_core::{Gpa, GpaParseError, Grade, GradeError, Standing};
use serde_json::json;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario failed: {0}")]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Grade(#[from] GradeError),

    #[error(transparent)]
    Gpa(#[from] GpaParseError),
}

// =============================================================================
// RUN
// =============================================================================

pub fn load_scenario(path: &Path) -> Result<Scenario, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let scenario = Scenario::from_json(&text)?;
    debug!(
        path = %path.display(),
        students = scenario.students.len(),
        courses = scenario.courses.len(),
        actions = scenario.actions.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

/// Run a scenario file and render the outcome.
pub fn cmd_run(path: &Path, as_json: bool) -> Result<String, CliError> {
    let outcome = load_scenario(path)?.run()?;
    if as_json {
        return Ok(serde_json::to_string_pretty(&outcome)?);
    }
    Ok(render_outcome(&outcome))
}

fn render_outcome(outcome: &Outcome) -> String {
    let mut out = String::new();

    for transcript in &outcome.transcripts {
        out.push_str(&transcript.generate_report());
        out.push('\n');
    }

    out.push_str("COURSES:\n");
    for course in &outcome.courses {
        out.push_str(&course.info);
        out.push('\n');
    }

    out.push_str("DIRECTORY:\n");
    for entry in &outcome.directory {
        out.push_str(&format!("  {}  {}  ({})\n", entry.id, entry.name, entry.role));
    }

    out.push_str(&format!("\nAverage GPA: {}\n", outcome.average_gpa));
    if outcome.honor_roll.is_empty() {
        out.push_str("Honor roll: none\n");
    } else {
        out.push_str(&format!("Honor roll: {}\n", outcome.honor_roll.join(", ")));
    }

    if !outcome.rejected.is_empty() {
        out.push_str("\nREJECTED:\n");
        for rejection in &outcome.rejected {
            out.push_str(&format!(
                "  #{} {}: {}\n",
                rejection.step, rejection.action, rejection.reason
            ));
        }
    }
    out
}

// =============================================================================
// LOOKUPS
// =============================================================================

/// Letter grade for a percentage.
pub fn cmd_grade(percentage: i32, as_json: bool) -> Result<String, CliError> {
    let grade = Grade::from_percentage(percentage)?;
    if as_json {
        let value = json!({
            "percentage": percentage,
            "grade": grade.name(),
            "symbol": grade.symbol(),
            "points": grade.grade_point().to_string(),
            "passing": grade.is_passing(),
            "description": grade.description(),
            "status": grade.status_tag(),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(format!(
        "{}\nDescription: {}\nAdvice: {}\nPassing: {}\n",
        grade.formatted_with_status(),
        grade.description(),
        grade.advice(),
        yes_no(grade.is_passing()),
    ))
}

/// Academic standing for a GPA written as a decimal (`3.5`).
pub fn cmd_standing(gpa: &str, as_json: bool) -> Result<String, CliError> {
    let gpa: Gpa = gpa.parse()?;
    let standing = Standing::from_gpa(gpa);
    if as_json {
        let value = json!({
            "gpa": gpa,
            "standing": standing.label(),
            "honor_roll": is_honor_roll(gpa),
            "passing": is_passing_gpa(gpa),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(format!(
        "GPA {gpa}: {standing}\nHonor roll: {}\nPassing: {}\n",
        yes_no(is_honor_roll(gpa)),
        yes_no(is_passing_gpa(gpa)),
    ))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
