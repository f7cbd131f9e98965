//! Progress log event types and line formatting. The actual append-only
//! file I/O lives in `aicof_infrastructure::progress`; this module owns
//! the pure text format so it can be tested without touching disk.

/// The kind of event recorded in one progress log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Started,
    Completed,
    Error,
    Learning,
    QualityCheck,
    Commit,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Started => "STARTED",
            EventKind::Completed => "COMPLETED",
            EventKind::Error => "ERROR",
            EventKind::Learning => "LEARNING",
            EventKind::QualityCheck => "QUALITY_CHECK",
            EventKind::Commit => "COMMIT",
        }
    }
}

/// One line to be appended to the progress log. `iteration` and `task`
/// tags are both optional and are simply omitted from the rendered line
/// when absent.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub kind: EventKind,
    pub iteration: Option<u64>,
    pub task_id: Option<String>,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        ProgressEvent {
            kind,
            iteration: None,
            task_id: None,
            message: message.into(),
        }
    }

    pub fn with_iteration(mut self, iteration: u64) -> Self {
        self.iteration = Some(iteration);
        self
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Renders the line in the fixed format:
    /// `[<rfc3339-utc>] [iteration:N] [task:ID] <TYPE>: <message>`,
    /// omitting absent optional tags. `timestamp` must already be an
    /// RFC3339 UTC string; this module does not read the clock.
    pub fn render(&self, timestamp: &str) -> String {
        let mut line = format!("[{timestamp}]");
        if let Some(iter) = self.iteration {
            line.push_str(&format!(" [iteration:{iter}]"));
        }
        if let Some(task_id) = &self.task_id {
            line.push_str(&format!(" [task:{task_id}]"));
        }
        line.push_str(&format!(" {}: {}", self.kind.as_str(), self.message));
        line
    }
}
