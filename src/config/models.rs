use crate::core::types::{Bool, OverlapPolicy, TaskListOrder};
use crate::errors::Error;
use crate::scheduler::free_periods::DEFAULT_MIN_FREE_MINUTES;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinFreeMinutesConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for MinFreeMinutesConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_MIN_FREE_MINUTES,
            description: "Shortest gap between lessons offered as a free period (minutes).".into(),
        }
    }
}

impl ConfigItem<u32> for MinFreeMinutesConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let minutes = new_value.trim().parse::<u32>().map_err(|_| {
            Error::Format(format!(
                "Invalid minute count: '{}'. Expected a positive whole number.",
                new_value.trim()
            ))
        })?;
        if minutes == 0 {
            return Err(Error::Format(
                "Minimum free period must be at least 1 minute.".into(),
            ));
        }
        self.value = minutes;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapPolicyConfigItem {
    pub value: OverlapPolicy,
    pub description: String,
}

impl Default for OverlapPolicyConfigItem {
    fn default() -> Self {
        Self {
            value: OverlapPolicy::default(),
            description: "How overlapping lessons are shown in the day view.".into(),
        }
    }
}

impl ConfigItem<OverlapPolicy> for OverlapPolicyConfigItem {
    fn get_value(&self) -> &OverlapPolicy {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = OverlapPolicy::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListOrderConfigItem {
    pub value: TaskListOrder,
    pub description: String,
}

impl Default for TaskListOrderConfigItem {
    fn default() -> Self {
        Self {
            value: TaskListOrder::default(),
            description: "Ordering of the unscheduled to-do list.".into(),
        }
    }
}

impl ConfigItem<TaskListOrder> for TaskListOrderConfigItem {
    fn get_value(&self) -> &TaskListOrder {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = TaskListOrder::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
