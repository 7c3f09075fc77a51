use phf::phf_map;
use std::time::Duration;

pub const JSON_PATH: &str = "json";

pub const RESULT_SUCCESS: &str = "success";

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name reported by `active_profile` when the server says no profile is active.
pub const UNDEFINED_PROFILE: &str = "Undefined";
pub const UNDEFINED_PROFILE_INDEX: i64 = -1;

/// Schedule value that toggles the active schedule between run and hold.
pub const SCHEDULE_HOLD_TOGGLE: i64 = -1;

/// Code of the synthetic camera-list entry that groups every camera.
pub const INDEX_CAMERA: &str = "Index";
/// Camera argument used by list verbs to mean "all cameras".
pub const ALL_CAMERAS: &str = "index";

pub const UNKNOWN_STRING: &str = "noname";

/// Short aliases accepted wherever a PTZ command is typed by a person.
pub static PTZ_SHORTCUTS: phf::Map<&'static str, u16> = phf_map! {
    "left" => 0,
    "right" => 1,
    "up" => 2,
    "down" => 3,
    "home" => 4,
    "center" => 4,
    "in" => 5,
    "out" => 6,
    "zoom-in" => 5,
    "zoom-out" => 6,
    "ir-on" => 34,
    "ir-off" => 35,
};
