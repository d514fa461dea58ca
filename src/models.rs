//models.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON: &str = "figure.walk";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub routines: Vec<Routine>,
}

impl Plan {
    pub fn exercise_count(&self) -> usize {
        self.routines.iter().map(|r| r.exercises.len()).sum()
    }

    pub fn image_count(&self) -> usize {
        self.routines
            .iter()
            .flat_map(|r| &r.exercises)
            .map(|e| e.images.len())
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub name: String,
    pub is_default: bool,
    pub interval_minutes: u32,
    pub is_active: bool,
    pub exercises: Vec<Exercise>,
}

impl Routine {
    /// An inactive, non-default routine on the usual 45 minute interval.
    pub fn new(name: &str, exercises: Vec<Exercise>) -> Self {
        Routine {
            name: name.to_string(),
            is_default: false,
            interval_minutes: 45,
            is_active: false,
            exercises,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub duration_seconds: u32,
    pub description: String,
    pub icon_name: String,
    pub sort_order: u32,
    pub sets: u32,
    pub rest_seconds: u32,
    pub rest_after_seconds: u32,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub repetitions: Option<Repetitions>,
}

/// Present only for repetition-based exercises; `reps` and `secondsPerRep`
/// always travel together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repetitions {
    pub reps: u32,
    pub seconds_per_rep: u32,
}

impl Exercise {
    /// Single set, no fixed duration, 30 seconds of rest afterwards.
    pub fn new(name: &str, sort_order: u32) -> Self {
        Exercise {
            name: name.to_string(),
            duration_seconds: 0,
            description: String::new(),
            icon_name: DEFAULT_ICON.to_string(),
            sort_order,
            sets: 1,
            rest_seconds: 0,
            rest_after_seconds: 30,
            images: Vec::new(),
            repetitions: None,
        }
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon_name = icon.to_string();
        self
    }

    /// Rest between sets only applies when there is more than one set.
    pub fn sets(mut self, sets: u32, rest_seconds: u32) -> Self {
        self.sets = sets;
        self.rest_seconds = if sets > 1 { rest_seconds } else { 0 };
        self
    }

    pub fn rest_after(mut self, seconds: u32) -> Self {
        self.rest_after_seconds = seconds;
        self
    }

    /// `reps == 0` leaves the exercise time-based.
    pub fn reps(mut self, reps: u32, seconds_per_rep: u32) -> Self {
        self.repetitions = (reps > 0).then_some(Repetitions {
            reps,
            seconds_per_rep,
        });
        self
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn is_rep_based(&self) -> bool {
        self.repetitions.is_some_and(|r| r.reps > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn single_set_forces_zero_rest() {
        let exercise = Exercise::new("Plank", 0).sets(1, 15);
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["restSeconds"], 0);
    }

    #[test]
    fn multiple_sets_keep_requested_rest() {
        let exercise = Exercise::new("Plank", 0).sets(3, 10);
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["sets"], 3);
        assert_eq!(value["restSeconds"], 10);
    }

    #[test]
    fn zero_reps_omits_both_keys() {
        let exercise = Exercise::new("Wall slides", 8).reps(0, 5);
        let value = serde_json::to_value(&exercise).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("reps"));
        assert!(!object.contains_key("secondsPerRep"));
        assert!(!exercise.is_rep_based());
    }

    #[test]
    fn rep_based_exercise_serializes_pair_last() {
        let exercise = Exercise::new("Dead bug", 6)
            .icon("figure.core.training")
            .reps(8, 6);
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["reps"], 8);
        assert_eq!(value["secondsPerRep"], 6);

        let text = serde_json::to_string(&exercise).unwrap();
        let images_at = text.find("\"images\"").unwrap();
        assert!(text.find("\"reps\"").unwrap() > images_at);
        assert!(text.find("\"secondsPerRep\"").unwrap() > images_at);
    }

    #[test]
    fn empty_images_serialize_as_empty_array() {
        let value = serde_json::to_value(Exercise::new("Rotacion toracica", 4)).unwrap();
        assert_eq!(value["images"], json!([]));
    }

    #[test]
    fn defaults_match_plain_exercise() {
        let exercise = Exercise::new("Chin tucks", 2);
        assert_eq!(exercise.icon_name, DEFAULT_ICON);
        assert_eq!(exercise.sets, 1);
        assert_eq!(exercise.rest_seconds, 0);
        assert_eq!(exercise.rest_after_seconds, 30);
        assert_eq!(exercise.duration_seconds, 0);
    }

    #[test]
    fn deserializes_with_and_without_repetitions() {
        let raw = json!({
            "name": "Chin tucks",
            "durationSeconds": 0,
            "description": "",
            "iconName": "figure.cooldown",
            "sortOrder": 3,
            "sets": 3,
            "restSeconds": 15,
            "restAfterSeconds": 15,
            "images": [],
            "reps": 10,
            "secondsPerRep": 5
        });
        let exercise: Exercise = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            exercise.repetitions,
            Some(Repetitions { reps: 10, seconds_per_rep: 5 })
        );

        let mut timed = raw;
        let object = timed.as_object_mut().unwrap();
        object.remove("reps");
        object.remove("secondsPerRep");
        let exercise: Exercise = serde_json::from_value(Value::Object(object.clone())).unwrap();
        assert_eq!(exercise.repetitions, None);
    }

    #[test]
    fn routine_defaults() {
        let routine = Routine::new("Fase 1", vec![Exercise::new("Cat-cow", 0)]);
        let value = serde_json::to_value(&routine).unwrap();
        assert_eq!(value["isDefault"], false);
        assert_eq!(value["isActive"], false);
        assert_eq!(value["intervalMinutes"], 45);
        assert_eq!(value["exercises"].as_array().unwrap().len(), 1);
    }
}
