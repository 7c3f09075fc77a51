use crate::blueiris::BlueIris;
use crate::constants::ALL_CAMERAS;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// An alert or a clip. Both lists share this shape.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Clip {
    #[serde(default)]
    pub camera: String,
    #[serde(default)]
    pub path: String,
    /// Unix seconds
    #[serde(default)]
    pub date: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Clip {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Clip the alert belongs to, if the server sent one.
    pub fn clip(&self) -> Option<&str> {
        self.extra.get("clip").and_then(|c| c.as_str())
    }

    pub fn filesize(&self) -> Option<&str> {
        self.extra.get("filesize").and_then(|f| f.as_str())
    }
}

#[async_trait]
pub trait Clips: Send + Sync {
    /// List alerts for a camera, or for all cameras with `None`
    async fn alert_list(&self, camera: Option<&str>) -> Result<Vec<Clip>>;

    /// List clips for a camera, or for all cameras with `None`
    async fn clip_list(&self, camera: Option<&str>) -> Result<Vec<Clip>>;
}

#[async_trait]
impl Clips for BlueIris {
    async fn alert_list(&self, camera: Option<&str>) -> Result<Vec<Clip>> {
        let camera = camera.unwrap_or(ALL_CAMERAS);
        self.get_list("alertlist", json!({ "camera": camera })).await
    }

    async fn clip_list(&self, camera: Option<&str>) -> Result<Vec<Clip>> {
        let camera = camera.unwrap_or(ALL_CAMERAS);
        self.get_list("cliplist", json!({ "camera": camera })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_parses_alert_entry() {
        let clip: Clip = serde_json::from_value(json!({
            "camera": "FRONT",
            "path": "@1234567.bvr",
            "clip": "@1234000.bvr",
            "date": 1700000000,
            "filesize": "12.3 MB",
            "flags": 128
        }))
        .unwrap();

        assert_eq!(clip.camera, "FRONT");
        assert_eq!(clip.clip(), Some("@1234000.bvr"));
        assert_eq!(clip.filesize(), Some("12.3 MB"));
        assert_eq!(
            clip.timestamp().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn clip_tolerates_sparse_entries() {
        let clip: Clip = serde_json::from_value(json!({})).unwrap();
        assert_eq!(clip.date, 0);
        assert_eq!(clip.clip(), None);
    }
}
