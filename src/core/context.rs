use crate::config::Config;
use crate::core::content::{LessonContent, LessonContentMap};
use crate::core::models::{Slot, Task, TaskId, Timetable};
use crate::core::persist::{load_state, save_state};
use crate::core::types::Priority;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use crate::scheduler::comparator::make_task_order_comparator;
use crate::scheduler::slots::{self, SlotKey};
use crate::scheduler::{DayPlan, WeekPlan, WeekPlanner};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Application state: every transition swaps in the snapshot produced by the
/// pure engine functions. Saving is left to the caller.
#[derive(Debug)]
pub struct PlannerContext {
    pub config: Config,
    pub timetable: Timetable,
    pub tasks: Vec<Task>,
    pub contents: LessonContentMap,
    pub logger: Logger,
    pub state_path: PathBuf,
}

impl PlannerContext {
    pub fn new(config: Config, logger: Logger, state_path: PathBuf) -> Self {
        // config can switch file logging off, never back on for a capturing logger
        if !config.file_logging_enabled() {
            logger.set_file_logging_enabled(false);
        }
        Self {
            config,
            timetable: Timetable::default(),
            tasks: Vec::new(),
            contents: LessonContentMap::new(),
            logger,
            state_path,
        }
    }

    /// Loads the config, and the saved state when `state_path` exists.
    pub fn new_with_paths(config_path: &Path, state_path: PathBuf, logs_dir: &Path) -> Result<Self> {
        let config = Config::load_from(config_path)?;
        let logger = Logger::new();
        logger.set_log_dir(logs_dir);

        let mut ctx = Self::new(config, logger, state_path);
        if ctx.state_path.exists() {
            ctx.load()?;
        }
        Ok(ctx)
    }

    // ---- Timetable ----------------------------------------------------------

    pub fn replace_timetable(&mut self, timetable: Timetable) -> Result<()> {
        timetable.validate()?;
        self.logger.info(
            format!(
                "Timetable replaced: {} class(es), {} lesson(s), {} duty(ies)",
                timetable.classes.len(),
                timetable.lessons.len(),
                timetable.duties.len()
            ),
            LogTarget::FileOnly,
        );
        self.timetable = timetable;
        Ok(())
    }

    pub fn planner(&self) -> WeekPlanner<'_> {
        WeekPlanner::new(&self.timetable, &self.logger)
            .with_min_free_minutes(self.config.min_free_minutes())
            .with_overlap_policy(self.config.overlap_policy())
    }

    pub fn plan_day(&self, date: NaiveDate) -> DayPlan {
        self.planner().plan_day(date)
    }

    pub fn plan_week(&self, date: NaiveDate) -> WeekPlan {
        self.planner().plan_week(date)
    }

    // ---- Tasks --------------------------------------------------------------

    pub fn add_task(&mut self, text: impl Into<String>, priority: Priority) -> TaskId {
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task::new(id, text, priority, Utc::now());
        self.logger
            .info(format!("Task with id {} created", id), LogTarget::FileOnly);
        self.tasks.push(task);
        id
    }

    pub fn delete_task(&mut self, task_id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks = slots::delete_task(&self.tasks, task_id);
        let deleted = self.tasks.len() != before;
        if deleted {
            self.logger
                .info(format!("Task with id {} deleted", task_id), LogTarget::FileOnly);
        }
        deleted
    }

    pub fn set_task_completed(&mut self, task_id: TaskId, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn schedule_task(&mut self, task_id: TaskId, slot: &Slot) {
        self.tasks = slots::schedule_task(&self.tasks, task_id, slot);
        self.log_placement(&[task_id], slot);
    }

    pub fn schedule_tasks(&mut self, task_ids: &[TaskId], slot: &Slot) {
        self.tasks = slots::schedule_tasks(&self.tasks, task_ids, slot);
        self.log_placement(task_ids, slot);
    }

    pub fn unschedule_task(&mut self, task_id: TaskId) {
        self.tasks = slots::unschedule_task(&self.tasks, task_id);
        self.logger.info(
            format!("Task with id {} unscheduled", task_id),
            LogTarget::FileOnly,
        );
    }

    pub fn reorder_stack(&mut self, ordered_task_ids: &[TaskId]) {
        self.tasks = slots::reorder_stack(&self.tasks, ordered_task_ids);
        self.logger.info(
            format!("Stack reordered: {:?}", ordered_task_ids),
            LogTarget::FileOnly,
        );
    }

    pub fn tasks_in_slot(&self, slot: &Slot) -> Vec<&Task> {
        slots::tasks_in_slot(&self.tasks, slot)
    }

    /// To-do list: tasks without a slot, in the configured order.
    pub fn unscheduled_tasks(&self) -> Vec<&Task> {
        let cmp = make_task_order_comparator(self.config.task_list_order());
        let mut out: Vec<&Task> = self.tasks.iter().filter(|t| !t.is_scheduled()).collect();
        out.sort_by(|a, b| cmp.cmp(a, b));
        out
    }

    fn log_placement(&self, task_ids: &[TaskId], slot: &Slot) {
        let key = SlotKey::of(slot);
        for id in task_ids {
            match self.tasks.iter().find(|t| t.id == *id) {
                Some(task) => self.logger.info(
                    format!(
                        "Task with id {} scheduled in slot {} at stack position {}",
                        id,
                        key,
                        task.stack_order.unwrap_or_default()
                    ),
                    LogTarget::FileOnly,
                ),
                None => self.logger.warn(
                    format!("Task with id {} not found; nothing scheduled", id),
                    LogTarget::FileOnly,
                ),
            }
        }
    }

    // ---- Lesson content -----------------------------------------------------

    pub fn set_lesson_content(&mut self, class_id: &str, date: NaiveDate, content: LessonContent) {
        self.contents = self.contents.with_content(class_id, date, content);
    }

    pub fn has_lesson_content(&self, class_id: &str, date: NaiveDate) -> bool {
        self.contents.has_content(class_id, date)
    }

    // ---- Persistence --------------------------------------------------------

    pub fn save(&self) -> Result<PathBuf> {
        let path = save_state(&self.tasks, &self.contents, &self.state_path)?;
        self.logger.info(
            format!("State saved to {}", path.display()),
            LogTarget::FileOnly,
        );
        Ok(path)
    }

    pub fn load(&mut self) -> Result<()> {
        let saved = load_state(&self.state_path)?;
        self.tasks = saved.tasks;
        self.contents = saved.lesson_contents;
        self.logger.info(
            format!(
                "State loaded from {}: {} task(s), {} lesson note(s)",
                self.state_path.display(),
                self.tasks.len(),
                self.contents.len()
            ),
            LogTarget::FileOnly,
        );
        Ok(())
    }
}
