use classplan::core::content::LessonContent;
use classplan::core::models::Slot;
use classplan::core::persist::{SaveFile, load_state, load_timetable};
use classplan::core::types::Priority;
use classplan::errors::Error;

use crate::common::{build_context, make_temp_dir, write_timetable, write_valid_config};
use chrono::NaiveDate;
use std::fs;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

#[test]
fn save_creates_state_file_and_reload_restores_it() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    let a = ctx.add_task("photocopy quiz", Priority::High);
    let b = ctx.add_task("book lab", Priority::Low);
    ctx.schedule_tasks(&[a, b], &Slot::new(monday(), 660, 960));
    ctx.set_lesson_content(
        "7a",
        monday(),
        LessonContent {
            title: Some("Ratios".into()),
            notes: None,
            links: vec!["https://example.org/ratios".into()],
        },
    );
    let path = ctx.save().unwrap();
    assert!(path.exists());

    let reloaded = build_context(&dir);
    assert_eq!(reloaded.tasks, ctx.tasks);
    assert!(reloaded.has_lesson_content("7a", monday()));
    let stack: Vec<i64> = reloaded
        .tasks_in_slot(&Slot::new(monday(), 660, 960))
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(stack, vec![a, b]);
}

#[test]
fn state_file_uses_calendar_day_slots() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let id = ctx.add_task("mark", Priority::Medium);
    ctx.schedule_task(id, &Slot::new(monday(), 660, 960));
    let path = ctx.save().unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["tasks"][0]["scheduledSlot"]["date"], "2024-03-04");
    assert_eq!(json["tasks"][0]["stackOrder"], 0);

    let SaveFile { tasks, .. } = load_state(&path).unwrap();
    assert_eq!(tasks.len(), 1);
}

#[test]
fn corrupt_state_is_reported() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    let state = dir.join("state").join("planner.json");
    fs::create_dir_all(state.parent().unwrap()).unwrap();
    fs::write(&state, "{ not json").unwrap();

    let err = classplan::core::context::PlannerContext::new_with_paths(
        &dir.join("config.json"),
        state,
        &dir.join("logs"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn timetable_file_loads_and_validates() {
    let dir = make_temp_dir("persist");
    let path = write_timetable(&dir);
    let tt = load_timetable(&path).unwrap();
    assert_eq!(tt.classes.len(), 2);
    assert_eq!(tt.class("7a").and_then(|c| c.size), Some(28));
    assert_eq!(tt.rotation_anchor_date, Some(monday()));

    let raw = fs::read_to_string(&path)
        .unwrap()
        .replace("\"endHour\": 16", "\"endHour\": 25");
    fs::write(&path, raw).unwrap();
    assert!(matches!(
        load_timetable(&path),
        Err(Error::InvalidTimetable(_))
    ));
}
