use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use classplan::core::context::PlannerContext;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "classplan-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_valid_config(dir: &Path) {
    let cfg = r#"{
      "min_free_minutes": { "value": 30, "description": "Shortest free period worth showing" },
      "overlap_policy": { "value": "render-both", "description": "Overlapping lessons" },
      "task_list_order": { "value": "priority-first", "description": "To-do list order" },
      "file_logging_enabled": { "value": "True", "description": "file logging" }
    }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
}

/// Two-week timetable anchored on Monday 2024-03-04.
pub fn write_timetable(dir: &Path) -> PathBuf {
    let json = r#"{
      "classes": [
        { "id": "7a", "name": "Maths 7a", "size": 28, "room": "B12" },
        { "id": "9c", "name": "Physics 9c" }
      ],
      "lessons": [
        { "classId": "7a", "weekday": 1, "startTime": "09:00", "endTime": "10:00", "rotation": "every" },
        { "classId": "7a", "weekday": 1, "startTime": "10:00", "endTime": "11:00", "rotation": "every" },
        { "classId": "9c", "weekday": 1, "startTime": "11:00", "endTime": "12:00", "rotation": "B" },
        { "classId": "9c", "weekday": 3, "startTime": "13:00", "endTime": "14:00", "rotation": "A" }
      ],
      "duties": [
        { "label": "Break duty", "weekday": 2, "startTime": "10:00", "endTime": "10:20" }
      ],
      "dayBounds": { "startHour": 8, "endHour": 16 },
      "rotationAnchorDate": "2024-03-04"
    }"#;
    let path = dir.join("timetable.json");
    fs::write(&path, json).unwrap();
    path
}

pub fn build_context(dir: &Path) -> PlannerContext {
    PlannerContext::new_with_paths(
        &dir.join("config.json"),
        dir.join("state").join("planner.json"),
        &dir.join("logs"),
    )
    .expect("context should build")
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
