use crate::blueiris::BlueIris;
use crate::constants::{SCHEDULE_HOLD_TOGGLE, UNDEFINED_PROFILE, UNDEFINED_PROFILE_INDEX};
use crate::error::{BlueIrisError, Result};
use crate::protocol::as_index;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Traffic-light indicator. Discriminants are the wire values, so the order
/// is red, green, yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Signal {
    Red = 0,
    Green = 1,
    Yellow = 2,
}

impl Signal {
    pub fn index(self) -> i64 {
        self as i64
    }

    pub fn from_index(index: i64) -> Option<Self> {
        Signal::iter().find(|s| s.index() == index)
    }

    pub fn parse(name: &str) -> Result<Self> {
        Signal::from_str(name.trim()).map_err(|_| {
            let known: Vec<String> = Signal::iter().map(|s| s.to_string()).collect();
            BlueIrisError::InvalidArgument(format!(
                "unknown signal '{}' (use one of {})",
                name,
                known.join(", ")
            ))
        })
    }
}

/// Reply of the `status` verb. Always fetched fresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot(Map<String, Value>);

impl StatusSnapshot {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Active profile index; `-1` when the field is absent.
    pub fn profile_index(&self) -> Result<i64> {
        let Some(value) = self.get("profile") else {
            return Ok(UNDEFINED_PROFILE_INDEX);
        };
        as_index(value).ok_or_else(|| {
            BlueIrisError::StaleData(format!("unreadable profile index {}", value))
        })
    }

    /// Resolves the active profile against the list known since login.
    pub fn profile_name(&self, profiles: &[String]) -> Result<String> {
        profile_name(profiles, self.profile_index()?)
    }

    pub fn signal(&self) -> Result<Signal> {
        signal_from_status(self)
    }

    pub fn signal_index(&self) -> Option<i64> {
        self.get("signal").and_then(as_index)
    }

    pub fn schedule(&self) -> Option<&str> {
        self.get("schedule").and_then(|s| s.as_str())
    }
}

pub(crate) fn profile_name(profiles: &[String], index: i64) -> Result<String> {
    if index == UNDEFINED_PROFILE_INDEX {
        return Ok(UNDEFINED_PROFILE.to_string());
    }
    usize::try_from(index)
        .ok()
        .and_then(|i| profiles.get(i))
        .cloned()
        .ok_or_else(|| {
            BlueIrisError::StaleData(format!(
                "profile index {} is outside the {} profiles known since login",
                index,
                profiles.len()
            ))
        })
}

pub(crate) fn profile_index(profiles: &[String], name: &str) -> Result<usize> {
    profiles.iter().position(|p| p == name).ok_or_else(|| {
        BlueIrisError::InvalidArgument(format!(
            "unknown profile '{}' (use one of {})",
            name,
            profiles.join(", ")
        ))
    })
}

pub(crate) fn signal_from_status(status: &StatusSnapshot) -> Result<Signal> {
    let index = status.signal_index().ok_or_else(|| {
        BlueIrisError::StaleData("status reply has no readable signal".to_string())
    })?;
    Signal::from_index(index)
        .ok_or_else(|| BlueIrisError::StaleData(format!("unknown signal index {}", index)))
}

#[async_trait]
pub trait Status: Send + Sync {
    /// Fetch the server status
    async fn status(&self) -> Result<StatusSnapshot>;

    /// Name of the active profile, or "Undefined"
    async fn active_profile(&self) -> Result<String>;

    /// Current signal colour
    async fn active_signal(&self) -> Result<Signal>;

    /// Name of the active schedule
    async fn active_schedule(&self) -> Result<String>;

    async fn set_signal(&mut self, name: &str) -> Result<()>;

    async fn set_schedule(&mut self, name: &str) -> Result<()>;

    async fn set_profile(&mut self, name: &str) -> Result<()>;

    /// Toggle the active schedule between run and hold
    async fn toggle_schedule_hold(&mut self) -> Result<()>;
}

#[async_trait]
impl Status for BlueIris {
    async fn status(&self) -> Result<StatusSnapshot> {
        match self.get_command("status", Value::Null).await? {
            Value::Object(fields) => Ok(StatusSnapshot::new(fields)),
            other => Err(BlueIrisError::Serialization(format!(
                "status data is not an object: {}",
                other
            ))),
        }
    }

    async fn active_profile(&self) -> Result<String> {
        let status = self.status().await?;
        status.profile_name(&self.server.profiles)
    }

    async fn active_signal(&self) -> Result<Signal> {
        self.status().await?.signal()
    }

    async fn active_schedule(&self) -> Result<String> {
        let status = self.status().await?;
        status
            .schedule()
            .map(|s| s.to_string())
            .ok_or_else(|| BlueIrisError::CommandFailure {
                verb: "status".to_string(),
                reason: "reply has no schedule".to_string(),
            })
    }

    async fn set_signal(&mut self, name: &str) -> Result<()> {
        let signal = Signal::parse(name)?;
        self.set_command("status", json!({ "signal": signal.index() })).await
    }

    async fn set_schedule(&mut self, name: &str) -> Result<()> {
        let schedules = &self.server.schedules;
        if !schedules.is_empty() && !schedules.iter().any(|s| s == name) {
            return Err(BlueIrisError::InvalidArgument(format!(
                "unknown schedule '{}' (use one of {})",
                name,
                schedules.join(", ")
            )));
        }
        self.set_command("status", json!({ "schedule": name })).await
    }

    async fn set_profile(&mut self, name: &str) -> Result<()> {
        let index = profile_index(&self.server.profiles, name)?;
        self.set_command("status", json!({ "profile": index })).await
    }

    async fn toggle_schedule_hold(&mut self) -> Result<()> {
        self.set_command("status", json!({ "schedule": SCHEDULE_HOLD_TOGGLE })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> Vec<String> {
        vec!["Away".into(), "Home".into(), "Night".into()]
    }

    fn snapshot(value: Value) -> StatusSnapshot {
        match value {
            Value::Object(fields) => StatusSnapshot::new(fields),
            _ => unreachable!(),
        }
    }

    #[test]
    fn signal_wire_order_is_red_green_yellow() {
        assert_eq!(Signal::from_index(0), Some(Signal::Red));
        assert_eq!(Signal::from_index(1), Some(Signal::Green));
        assert_eq!(Signal::from_index(2), Some(Signal::Yellow));
        assert_eq!(Signal::from_index(3), None);
        assert_eq!(Signal::from_index(-1), None);
    }

    #[test]
    fn signal_parse_is_case_insensitive() {
        assert_eq!(Signal::parse("Yellow").unwrap(), Signal::Yellow);
        assert_eq!(Signal::parse("GREEN").unwrap(), Signal::Green);
        assert_eq!(Signal::Red.to_string(), "red");
    }

    #[test]
    fn signal_parse_rejects_unknown_colour() {
        assert!(matches!(
            Signal::parse("blue"),
            Err(BlueIrisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn undefined_profile_skips_lookup() {
        assert_eq!(profile_name(&[], -1).unwrap(), "Undefined");
    }

    #[test]
    fn profile_name_resolves_index() {
        assert_eq!(profile_name(&profiles(), 2).unwrap(), "Night");
    }

    #[test]
    fn profile_index_outside_list_is_stale() {
        assert!(matches!(
            profile_name(&profiles(), 3),
            Err(BlueIrisError::StaleData(_))
        ));
        assert!(matches!(
            profile_name(&profiles(), -4),
            Err(BlueIrisError::StaleData(_))
        ));
    }

    #[test]
    fn profile_index_by_name() {
        assert_eq!(profile_index(&profiles(), "Home").unwrap(), 1);
        assert!(matches!(
            profile_index(&profiles(), "Office"),
            Err(BlueIrisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn snapshot_reads_string_and_numeric_fields() {
        let status = snapshot(json!({"profile": "2", "signal": 1, "schedule": "Default"}));
        assert_eq!(status.profile_index().unwrap(), 2);
        assert_eq!(status.signal_index(), Some(1));
        assert_eq!(status.schedule(), Some("Default"));
    }

    #[test]
    fn snapshot_missing_profile_reads_as_undefined() {
        let status = snapshot(json!({"signal": 0}));
        assert_eq!(status.profile_index().unwrap(), -1);
        assert_eq!(status.profile_name(&profiles()).unwrap(), "Undefined");
    }

    #[test]
    fn unreadable_profile_is_stale_not_undefined() {
        for profile in [json!("garbage"), Value::Null, json!(1.5)] {
            let status = snapshot(json!({ "profile": profile }));
            assert!(matches!(
                status.profile_index(),
                Err(BlueIrisError::StaleData(_))
            ));
            assert!(matches!(
                status.profile_name(&profiles()),
                Err(BlueIrisError::StaleData(_))
            ));
        }
    }

    #[test]
    fn snapshot_resolves_profile_and_signal() {
        let status = snapshot(json!({"profile": 1, "signal": 2, "schedule": "Home"}));
        assert_eq!(status.profile_name(&profiles()).unwrap(), "Home");
        assert_eq!(status.signal().unwrap(), Signal::Yellow);
    }

    #[test]
    fn signal_from_status_rejects_unknown_index() {
        let status = snapshot(json!({"signal": 7}));
        assert!(matches!(
            signal_from_status(&status),
            Err(BlueIrisError::StaleData(_))
        ));
        let status = snapshot(json!({}));
        assert!(matches!(
            signal_from_status(&status),
            Err(BlueIrisError::StaleData(_))
        ));
    }
}
