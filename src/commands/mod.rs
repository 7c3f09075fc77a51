mod authentication;
mod cameras;
mod clips;
mod ptz;
mod status;
mod system_log;

pub use authentication::{Authentication, ServerProfile};
pub use cameras::{CamPause, Camera, Cameras};
pub use clips::{Clip, Clips};
pub use ptz::{PTZ, PTZCommand};
pub use status::{Signal, Status, StatusSnapshot};
pub use system_log::{LogEntry, LogSeverity, SystemLog};
