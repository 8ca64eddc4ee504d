use crate::core::content::LessonContentMap;
use crate::core::models::{Task, Timetable};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Planner state as stored between sessions.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub lesson_contents: LessonContentMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveFileRef<'a> {
    tasks: &'a [Task],
    lesson_contents: &'a LessonContentMap,
}

pub fn save_state(tasks: &[Task], contents: &LessonContentMap, path: &Path) -> Result<PathBuf> {
    write_json(
        path,
        &SaveFileRef {
            tasks,
            lesson_contents: contents,
        },
    )
}

pub fn load_state(path: &Path) -> Result<SaveFile> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Reads a timetable and checks its day bounds.
pub fn load_timetable(path: &Path) -> Result<Timetable> {
    let contents = fs::read_to_string(path)?;
    let timetable: Timetable = serde_json::from_str(&contents)?;
    timetable.validate()?;
    Ok(timetable)
}

pub fn save_timetable(timetable: &Timetable, path: &Path) -> Result<PathBuf> {
    write_json(path, timetable)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}
