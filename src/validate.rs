//validate.rs
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Plan;

/// Rules the consuming app applies when importing a routines file.
pub fn validate(plan: &Plan) -> Result<()> {
    if plan.routines.is_empty() {
        return Err(Error::Validation("File contains no routines.".into()));
    }
    for (i, routine) in plan.routines.iter().enumerate() {
        if routine.name.trim().is_empty() {
            return Err(Error::Validation(format!("Routine {} has an empty name.", i + 1)));
        }
        for (j, exercise) in routine.exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "Exercise {} in \"{}\" has an empty name.",
                    j + 1,
                    routine.name
                )));
            }
            if !exercise.is_rep_based() && exercise.duration_seconds < 1 {
                return Err(Error::Validation(format!(
                    "\"{}\" in \"{}\" must have duration >= 1 second.",
                    exercise.name, routine.name
                )));
            }
            if exercise.sets < 1 {
                return Err(Error::Validation(format!(
                    "\"{}\" in \"{}\" must have sets >= 1.",
                    exercise.name, routine.name
                )));
            }
        }
    }
    Ok(())
}

/// Shape checks on the raw document, before typed decoding hides them.
pub fn validate_document(doc: &Value) -> Result<()> {
    let object = doc
        .as_object()
        .ok_or_else(|| Error::Validation("Document is not a JSON object.".into()))?;
    if object.len() != 1 {
        return Err(Error::Validation(
            "Document must have exactly one top-level key, \"routines\".".into(),
        ));
    }
    let routines = object
        .get("routines")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation("\"routines\" must be an array.".into()))?;

    for routine in routines {
        let routine_name = routine["name"].as_str().unwrap_or("?");
        let Some(exercises) = routine["exercises"].as_array() else {
            return Err(Error::Validation(format!(
                "Routine \"{}\" has no exercises array.",
                routine_name
            )));
        };
        for exercise in exercises {
            let name = exercise["name"].as_str().unwrap_or("?");
            let has_reps = exercise.get("reps").is_some();
            let has_pace = exercise.get("secondsPerRep").is_some();
            if has_reps != has_pace {
                return Err(Error::Validation(format!(
                    "\"{}\" in \"{}\" must set reps and secondsPerRep together.",
                    name, routine_name
                )));
            }
            if exercise["sets"] == 1 && exercise["restSeconds"] != 0 {
                return Err(Error::Validation(format!(
                    "\"{}\" in \"{}\" has a single set but non-zero restSeconds.",
                    name, routine_name
                )));
            }
            if !exercise["images"].is_array() {
                return Err(Error::Validation(format!(
                    "\"{}\" in \"{}\" must have an images array.",
                    name, routine_name
                )));
            }
        }
    }
    Ok(())
}
