use crate::blueiris::BlueIris;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogSeverity {
    Info = 0,
    Warn = 1,
    Error = 2,
}

impl LogSeverity {
    pub fn from_level(level: i64) -> Option<Self> {
        LogSeverity::iter().find(|s| *s as i64 == level)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogEntry {
    #[serde(default)]
    pub level: i64,
    /// Unix seconds
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub obj: String,
    #[serde(default)]
    pub msg: String,
}

impl LogEntry {
    pub fn severity(&self) -> Option<LogSeverity> {
        LogSeverity::from_level(self.level)
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}

#[async_trait]
pub trait SystemLog: Send + Sync {
    /// Fetch the server's log
    async fn system_log(&self) -> Result<Vec<LogEntry>>;
}

#[async_trait]
impl SystemLog for BlueIris {
    async fn system_log(&self) -> Result<Vec<LogEntry>> {
        self.get_list("log", Value::Null).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_entry_severity() {
        let entry: LogEntry = serde_json::from_value(json!({
            "level": 1, "date": 1700000000, "obj": "FRONT", "msg": "Signal: restored"
        }))
        .unwrap();
        assert_eq!(entry.severity(), Some(LogSeverity::Warn));
        assert_eq!(entry.severity().unwrap().to_string(), "WARN");
        assert_eq!(entry.obj, "FRONT");
        assert!(entry.timestamp().is_some());
    }

    #[test]
    fn unknown_level_has_no_severity() {
        assert_eq!(LogSeverity::from_level(9), None);
    }
}
