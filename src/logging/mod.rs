
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;

/// First line of every session file; later lines are `[timestamp] LEVEL message`.
const SESSION_HEADER: &str = "# classplan planner log";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad, so `{:<5}` lines up levels in the session file
        f.pad(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, line: &str);
}

struct StdoutSink;
impl LogSink for StdoutSink {
    fn log(&self, level: LogLevel, line: &str) {
        if level == LogLevel::Info {
            println!("{line}");
        }
    }
}

struct StderrSink;
impl LogSink for StderrSink {
    fn log(&self, level: LogLevel, line: &str) {
        if matches!(level, LogLevel::Warn | LogLevel::Error) {
            eprintln!("{level}: {line}");
        }
    }
}

/// Keeps `LEVEL message` lines in memory instead of printing them.
#[derive(Default)]
struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{level} {line}"));
        }
    }
}

/// One file per planner session, opened by the first file-targeted line.
struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    fn new(dir: impl AsRef<Path>) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(&dir)?;
        let now = Local::now();
        let path = dir
            .as_ref()
            .join(format!("planner-{}.log", now.format("%Y%m%d-%H%M%S")));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(
            file,
            "{SESSION_HEADER}, session started {}",
            now.format("%Y-%m-%d %H:%M:%S")
        )?;
        Ok((
            Self {
                file: Mutex::new(file),
            },
            path,
        ))
    }
}

impl LogSink for FileSink {
    fn log(&self, _level: LogLevel, line: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Where a line goes. Planner transitions and plan events are `FileOnly`, so
/// the console stays quiet unless the caller asks otherwise.
#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

/// Cheap to clone; clones share sinks and settings.
#[derive(Clone)]
pub struct Logger {
    console_sinks: Arc<Vec<Arc<dyn LogSink>>>,
    memory: Option<Arc<MemorySink>>,
    file_state: Arc<Mutex<FileState>>,
    file_enabled: Arc<AtomicBool>,
}

struct FileState {
    sink: Option<Arc<dyn LogSink>>,
    log_path: Option<PathBuf>,
    attempted: bool,
    log_dir: PathBuf,
}

impl Default for FileState {
    fn default() -> Self {
        Self {
            sink: None,
            log_path: None,
            attempted: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        let console_sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(StdoutSink), Arc::new(StderrSink)];
        Self::with_console(console_sinks, None)
    }

    /// Logger whose console output is captured in memory (see [`Logger::captured`]).
    /// File logging starts disabled.
    pub fn capturing() -> Self {
        let memory = Arc::new(MemorySink::default());
        let console_sinks: Vec<Arc<dyn LogSink>> = vec![memory.clone() as Arc<dyn LogSink>];
        let logger = Self::with_console(console_sinks, Some(memory));
        logger.set_file_logging_enabled(false);
        logger
    }

    fn with_console(console_sinks: Vec<Arc<dyn LogSink>>, memory: Option<Arc<MemorySink>>) -> Self {
        Self {
            console_sinks: Arc::new(console_sinks),
            memory,
            file_state: Arc::new(Mutex::new(FileState::default())),
            file_enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    fn ensure_file_sink(&self) -> Option<Arc<dyn LogSink>> {
        let mut state = self.file_state.lock().ok()?;
        if state.attempted {
            return state.sink.clone();
        }
        state.attempted = true;

        match FileSink::new(&state.log_dir) {
            Ok((sink, path)) => {
                let arc: Arc<dyn LogSink> = Arc::new(sink);
                state.log_path = Some(path);
                state.sink = Some(arc.clone());
                Some(arc)
            }
            Err(err) => {
                eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                None
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if matches!(target, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile) {
            for sink in self.console_sinks.iter() {
                sink.log(level, message);
            }
        } else if let Some(memory) = &self.memory {
            // file-only lines are still worth inspecting when capturing
            memory.log(level, message);
        }

        if matches!(target, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
            && self.file_enabled.load(Ordering::SeqCst)
        {
            if let Some(file_sink) = self.ensure_file_sink() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let file_line = format!("[{timestamp}] {:<5} {message}", level);
                file_sink.log(level, &file_line);
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    /// Lines recorded by a capturing logger, oldest first. Empty otherwise.
    pub fn captured(&self) -> Vec<String> {
        self.memory
            .as_ref()
            .and_then(|m| m.lines.lock().ok().map(|lines| lines.clone()))
            .unwrap_or_default()
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut state) = self.file_state.lock() {
            if state.sink.is_none() && !state.attempted {
                state.log_dir = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.file_state.lock().ok().map(|s| s.log_dir.clone())
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.file_state.lock().ok().and_then(|s| s.log_path.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.log_path();
        f.debug_struct("Logger")
            .field("log_path", &path)
            .field("capturing", &self.memory.is_some())
            .finish()
    }
}
