use classplan::core::models::Slot;
use classplan::core::persist::load_timetable;
use classplan::core::types::{DayOfWeek, Priority, RotationWeek};
use classplan::scheduler::slots::stacks_for_date;

use crate::common::{
    build_context, make_temp_dir, read_log_contents, write_timetable, write_valid_config,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn week_a_and_week_b_differ() {
    let dir = make_temp_dir("planner");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    ctx.replace_timetable(load_timetable(&write_timetable(&dir)).unwrap())
        .unwrap();

    let week_a = ctx.plan_week(date(2024, 3, 6));
    let week_b = ctx.plan_week(date(2024, 3, 12));

    let mon_a = week_a.weekday(DayOfWeek::Mon).unwrap();
    assert_eq!(mon_a.rotation, RotationWeek::One);
    assert_eq!(mon_a.blocks.len(), 1);
    assert_eq!(mon_a.blocks[0].parts.len(), 2);

    let mon_b = week_b.weekday(DayOfWeek::Mon).unwrap();
    assert_eq!(mon_b.rotation, RotationWeek::Two);
    assert_eq!(mon_b.blocks.len(), 2);

    assert_eq!(week_a.weekday(DayOfWeek::Wed).unwrap().lessons.len(), 1);
    assert!(week_b.weekday(DayOfWeek::Wed).unwrap().lessons.is_empty());
}

#[test]
fn tasks_land_in_free_periods_of_the_plan() {
    let dir = make_temp_dir("planner");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    ctx.replace_timetable(load_timetable(&write_timetable(&dir)).unwrap())
        .unwrap();

    let tuesday = ctx.plan_day(date(2024, 3, 5));
    let spans: Vec<(u32, u32)> = tuesday
        .free_periods
        .iter()
        .map(|p| (p.start_minutes, p.end_minutes))
        .collect();
    assert_eq!(spans, vec![(480, 600), (620, 960)]);

    let first: Slot = tuesday.free_periods[0].clone();
    let a = ctx.add_task("reply to emails", Priority::Medium);
    let b = ctx.add_task("plan trip", Priority::High);
    ctx.schedule_task(b, &first);
    ctx.schedule_task(a, &first);
    assert!(ctx.unscheduled_tasks().is_empty());

    let stacks = stacks_for_date(&ctx.tasks, date(2024, 3, 5));
    assert_eq!(stacks.len(), 1);
    let ids: Vec<i64> = stacks.values().next().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b, a]);

    ctx.reorder_stack(&[a, b]);
    let ids: Vec<i64> = ctx.tasks_in_slot(&first).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn transitions_are_written_to_the_log_file() {
    let dir = make_temp_dir("planner");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let id = ctx.add_task("logged", Priority::Low);
    ctx.schedule_task(id, &Slot::new(date(2024, 3, 4), 480, 540));

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Task with id 1 created"));
    assert!(log.contains("scheduled in slot 2024-03-04::480 at stack position 0"));
}
