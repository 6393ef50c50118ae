use serde::Deserialize;

/// A single monitoring observation: the entity that was checked plus the
/// latest check result and its execution history.
///
/// Events arrive as JSON on the handler's stdin. Every field defaults so a
/// sparse document still deserializes; missing pieces are rejected by
/// [`crate::validate::validate_event`] with a precise reason instead of a
/// serde parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub entity: Option<Entity>,
    #[serde(default)]
    pub check: Option<Check>,
}

/// The monitored source (host, agent, proxy, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub name: String,
    /// Entity kind. Pipelines that emit the `entity_class` wire key are
    /// accepted as-is.
    #[serde(default, alias = "entity_class")]
    pub class: String,
}

/// The monitored condition and its latest result.
#[derive(Debug, Clone, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub name: String,
    /// 0 = OK/resolved, 1 = warning, 2 = critical, anything else = unknown.
    #[serde(default)]
    pub status: u32,
    /// Free-form command output; may carry trailing newlines.
    #[serde(default)]
    pub output: String,
    /// Epoch seconds of the last execution.
    #[serde(default)]
    pub executed: i64,
    /// Scheduling interval in seconds.
    #[serde(default)]
    pub interval: u32,
    /// Prior executions, unordered as received.
    #[serde(default)]
    pub history: Vec<CheckHistory>,
}

/// One prior execution of a check.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CheckHistory {
    #[serde(default)]
    pub status: u32,
    #[serde(default)]
    pub executed: i64,
}
