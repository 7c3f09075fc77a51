use crate::blueiris::BlueIris;
use crate::constants::INDEX_CAMERA;
use crate::error::{BlueIrisError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// One entry of the `camlist` reply. Groups appear here too, including the
/// synthetic `Index` group holding every camera.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Camera {
    #[serde(rename = "optionValue")]
    pub code: String,
    #[serde(rename = "optionDisplay", default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Camera {
    pub fn is_index(&self) -> bool {
        self.code == INDEX_CAMERA
    }

    pub fn is_enabled(&self) -> bool {
        self.flag("isEnabled")
    }

    pub fn is_active(&self) -> bool {
        self.flag("active")
    }

    pub fn has_ptz(&self) -> bool {
        self.flag("ptz")
    }

    fn flag(&self, field: &str) -> bool {
        match self.extra.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        }
    }
}

/// Values of the `pause` field of `camconfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CamPause {
    #[strum(serialize = "indefinitely")]
    Indefinitely = -1,
    #[strum(serialize = "cancel")]
    Cancel = 0,
    #[strum(serialize = "30s")]
    Add30Sec = 1,
    #[strum(serialize = "1m")]
    Add1Min = 2,
    #[strum(serialize = "1h")]
    Add1Hour = 3,
}

impl CamPause {
    pub fn value(self) -> i64 {
        self as i64
    }
}

pub(crate) fn known_camera(cameras: &[Camera], code: &str) -> Result<()> {
    if cameras.iter().any(|c| c.code == code) {
        return Ok(());
    }
    let codes: Vec<&str> = cameras.iter().map(|c| c.code.as_str()).collect();
    Err(BlueIrisError::InvalidArgument(format!(
        "unknown camera '{}' (use one of {})",
        code,
        codes.join(", ")
    )))
}

impl BlueIris {
    pub(crate) fn require_admin(&self, action: &str) -> Result<()> {
        if self.server.admin {
            return Ok(());
        }
        Err(BlueIrisError::PermissionDenied(format!(
            "{} requires an admin login",
            action
        )))
    }

    /// Checks `code` against the camera list, fetching it once if needed.
    pub(crate) async fn ensure_camera(&mut self, code: &str) -> Result<()> {
        let cameras = match self.cameras.take() {
            Some(cameras) => cameras,
            None => self.get_list("camlist", Value::Null).await?,
        };
        let known = known_camera(&cameras, code);
        self.cameras = Some(cameras);
        known
    }
}

#[async_trait]
pub trait Cameras: Send + Sync {
    /// Fetch the camera list and refresh the cached copy
    async fn camera_list(&mut self, include_index: bool) -> Result<Vec<Camera>>;

    /// Camera list as cached, fetched on first use
    async fn cameras(&mut self) -> Result<Vec<Camera>>;

    /// Fire the motion trigger of a camera (admin only)
    async fn trigger_camera(&mut self, code: &str) -> Result<()>;

    /// Pause or resume a camera (admin only)
    async fn pause_camera(&mut self, code: &str, pause: CamPause) -> Result<()>;
}

#[async_trait]
impl Cameras for BlueIris {
    async fn camera_list(&mut self, include_index: bool) -> Result<Vec<Camera>> {
        let cameras: Vec<Camera> = self.get_list("camlist", Value::Null).await?;
        debug!(count = cameras.len(), "camera list refreshed");
        self.cameras = Some(cameras.clone());

        if include_index {
            return Ok(cameras);
        }
        Ok(cameras.into_iter().filter(|c| !c.is_index()).collect())
    }

    async fn cameras(&mut self) -> Result<Vec<Camera>> {
        if let Some(cameras) = &self.cameras {
            return Ok(cameras.clone());
        }
        self.camera_list(true).await
    }

    async fn trigger_camera(&mut self, code: &str) -> Result<()> {
        self.require_admin("trigger")?;
        self.ensure_camera(code).await?;
        self.set_command("trigger", json!({ "camera": code })).await
    }

    async fn pause_camera(&mut self, code: &str, pause: CamPause) -> Result<()> {
        self.require_admin("camconfig")?;
        self.ensure_camera(code).await?;
        self.set_command("camconfig", json!({ "camera": code, "pause": pause.value() }))
            .await
    }
}
