//output.rs
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Plan;
use crate::validate::{validate, validate_document};

#[derive(Debug, Clone)]
pub struct Summary {
    pub path: PathBuf,
    pub routines: usize,
    pub exercises: usize,
    pub images: usize,
    pub file_size: u64,
    pub at: DateTime<Local>,
}

impl Summary {
    fn collect(plan: &Plan, path: &Path) -> io::Result<Self> {
        let file_size = fs::metadata(path)?.len();
        Ok(Summary {
            path: path.to_path_buf(),
            routines: plan.routines.len(),
            exercises: plan.exercise_count(),
            images: plan.image_count(),
            file_size,
            at: Local::now(),
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / 1024.0 / 1024.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Routines: {}", self.routines)?;
        writeln!(f, "  Exercises: {}", self.exercises)?;
        writeln!(f, "  Images: {}", self.images)?;
        writeln!(f, "  File size: {:.1} MB", self.size_mb())?;
        write!(f, "  At: {}", self.at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Writes the plan as two-space indented UTF-8 JSON. Absent repetition data
/// produces no keys at all.
pub fn write_plan(plan: &Plan, path: &Path) -> Result<Summary> {
    let output_err = |source| Error::Output { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plan)?;
    writer.flush().map_err(output_err)?;
    drop(writer);

    debug!(path = ?path, "plan written");
    Summary::collect(plan, path).map_err(output_err)
}

/// Loads a previously generated document and applies the import checks.
pub fn read_plan(path: &Path) -> Result<(Plan, Summary)> {
    let input_err = |source| Error::Input { path: path.to_path_buf(), source };

    let text = fs::read_to_string(path).map_err(input_err)?;
    let doc: Value = serde_json::from_str(&text)?;
    validate_document(&doc)?;
    let plan: Plan = serde_json::from_value(doc)?;
    validate(&plan)?;
    let summary = Summary::collect(&plan, path).map_err(input_err)?;
    Ok((plan, summary))
}
