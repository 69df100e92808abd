//! Structured logging utilities.
//!
//! Provides context-aware logging with run_id and table name included
//! in every log message.

use std::fmt;

use uuid::Uuid;

/// Logging context for a simulation run.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub table: Option<String>,
}

impl LogContext {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            table: None,
        }
    }

    /// Create a context with a freshly generated run id.
    pub fn new_run() -> Self {
        Self::new(&format!("run-{}", &Uuid::new_v4().to_string()[..8]))
    }

    pub fn with_table(&self, table: &str) -> Self {
        Self {
            run_id: self.run_id.clone(),
            table: Some(table.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "[run={}] [table={}]", self.run_id, table),
            None => write!(f, "[run={}]", self.run_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!($(concat!(stringify!($key), "={:?} "), $value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!($(concat!(stringify!($key), "={:?} "), $value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!($(concat!(stringify!($key), "={:?} "), $value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!($(concat!(stringify!($key), "={:?} "), $value),*)
        );
    };
}
