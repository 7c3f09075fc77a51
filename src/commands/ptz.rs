use crate::blueiris::BlueIris;
use crate::constants::PTZ_SHORTCUTS;
use crate::error::{BlueIrisError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// PTZ button codes as sent in the `button` field. `Center` is also
/// accepted as `HOME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PTZCommand {
    PanLeft = 0,
    PanRight = 1,
    TiltUp = 2,
    TiltDown = 3,
    #[strum(to_string = "CENTER", serialize = "HOME")]
    Center = 4,
    ZoomIn = 5,
    ZoomOut = 6,
    #[strum(to_string = "POWER_50")]
    Power50 = 8,
    #[strum(to_string = "POWER_60")]
    Power60 = 9,
    PowerOutdoor = 10,
    #[strum(to_string = "BRIGHTNESS_0")]
    Brightness0 = 11,
    #[strum(to_string = "BRIGHTNESS_1")]
    Brightness1 = 12,
    #[strum(to_string = "BRIGHTNESS_2")]
    Brightness2 = 13,
    #[strum(to_string = "BRIGHTNESS_3")]
    Brightness3 = 14,
    #[strum(to_string = "BRIGHTNESS_4")]
    Brightness4 = 15,
    #[strum(to_string = "BRIGHTNESS_5")]
    Brightness5 = 16,
    #[strum(to_string = "BRIGHTNESS_6")]
    Brightness6 = 17,
    #[strum(to_string = "BRIGHTNESS_7")]
    Brightness7 = 18,
    #[strum(to_string = "BRIGHTNESS_8")]
    Brightness8 = 19,
    #[strum(to_string = "BRIGHTNESS_9")]
    Brightness9 = 20,
    #[strum(to_string = "BRIGHTNESS_10")]
    Brightness10 = 21,
    #[strum(to_string = "BRIGHTNESS_11")]
    Brightness11 = 22,
    #[strum(to_string = "BRIGHTNESS_12")]
    Brightness12 = 23,
    #[strum(to_string = "BRIGHTNESS_13")]
    Brightness13 = 24,
    #[strum(to_string = "BRIGHTNESS_14")]
    Brightness14 = 25,
    #[strum(to_string = "BRIGHTNESS_15")]
    Brightness15 = 26,
    #[strum(to_string = "CONTRAST_0")]
    Contrast0 = 27,
    #[strum(to_string = "CONTRAST_1")]
    Contrast1 = 28,
    #[strum(to_string = "CONTRAST_2")]
    Contrast2 = 29,
    #[strum(to_string = "CONTRAST_3")]
    Contrast3 = 30,
    #[strum(to_string = "CONTRAST_4")]
    Contrast4 = 31,
    #[strum(to_string = "CONTRAST_5")]
    Contrast5 = 32,
    #[strum(to_string = "CONTRAST_6")]
    Contrast6 = 33,
    IrOn = 34,
    IrOff = 35,
    #[strum(to_string = "PRESET_1")]
    Preset1 = 101,
    #[strum(to_string = "PRESET_2")]
    Preset2 = 102,
    #[strum(to_string = "PRESET_3")]
    Preset3 = 103,
    #[strum(to_string = "PRESET_4")]
    Preset4 = 104,
    #[strum(to_string = "PRESET_5")]
    Preset5 = 105,
    #[strum(to_string = "PRESET_6")]
    Preset6 = 106,
    #[strum(to_string = "PRESET_7")]
    Preset7 = 107,
    #[strum(to_string = "PRESET_8")]
    Preset8 = 108,
    #[strum(to_string = "PRESET_9")]
    Preset9 = 109,
    #[strum(to_string = "PRESET_10")]
    Preset10 = 110,
    #[strum(to_string = "PRESET_11")]
    Preset11 = 111,
    #[strum(to_string = "PRESET_12")]
    Preset12 = 112,
    #[strum(to_string = "PRESET_13")]
    Preset13 = 113,
    #[strum(to_string = "PRESET_14")]
    Preset14 = 114,
    #[strum(to_string = "PRESET_15")]
    Preset15 = 115,
    #[strum(to_string = "PRESET_16")]
    Preset16 = 116,
    #[strum(to_string = "PRESET_17")]
    Preset17 = 117,
    #[strum(to_string = "PRESET_18")]
    Preset18 = 118,
    #[strum(to_string = "PRESET_19")]
    Preset19 = 119,
    #[strum(to_string = "PRESET_20")]
    Preset20 = 120,
}

impl PTZCommand {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        PTZCommand::iter().find(|c| c.code() == code)
    }

    /// Parses a command typed by a person: a shortcut such as `left`, a
    /// numeric button code, or a name such as `PRESET_3` / `zoom-in`.
    pub fn from_input(input: &str) -> Result<Self> {
        let input = input.trim();
        let lowered = input.to_lowercase();

        let parsed = if let Some(code) = PTZ_SHORTCUTS.get(lowered.as_str()) {
            PTZCommand::from_code(*code)
        } else if let Ok(code) = input.parse::<u16>() {
            PTZCommand::from_code(code)
        } else {
            PTZCommand::from_str(&input.replace('-', "_")).ok()
        };

        parsed.ok_or_else(|| {
            BlueIrisError::InvalidArgument(format!("unknown PTZ command '{}'", input))
        })
    }
}

#[async_trait]
pub trait PTZ: Send + Sync {
    /// Press a PTZ button on a camera
    async fn ptz(&mut self, camera: &str, command: PTZCommand) -> Result<()>;
}

#[async_trait]
impl PTZ for BlueIris {
    async fn ptz(&mut self, camera: &str, command: PTZCommand) -> Result<()> {
        self.ensure_camera(camera).await?;
        let data = json!({
            "camera": camera,
            "button": command.code(),
            "updown": 0,
        });
        self.set_command("ptz", data).await
    }
}
