use crate::blueiris::{BlueIris, Session, SessionState};
use crate::constants::UNKNOWN_STRING;
use crate::error::{BlueIrisError, Result};
use crate::protocol::{auth_response, is_success, pack_command, unpack_json};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// What the server told us about itself and this login.
///
/// Absent fields fall back to `"noname"` for strings, empty lists, and
/// `false` for capability flags.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerProfile {
    #[serde(rename = "system name", default = "unknown_string")]
    pub name: String,
    #[serde(default = "unknown_string")]
    pub version: String,
    /// Ordered; the wire refers to profiles by their index in this list.
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default)]
    pub schedules: Vec<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub ptz: bool,
    #[serde(default)]
    pub clips: bool,
}

fn unknown_string() -> String {
    UNKNOWN_STRING.to_string()
}

impl Default for ServerProfile {
    fn default() -> Self {
        Self {
            name: unknown_string(),
            version: unknown_string(),
            profiles: vec![],
            schedules: vec![],
            admin: false,
            ptz: false,
            clips: false,
        }
    }
}

#[async_trait]
pub trait Authentication: Send + Sync {
    /// Run the two-step login handshake
    async fn login(&mut self, username: &str, password: &str) -> Result<()>;

    /// End the session. Every later command fails until the next login.
    async fn logout(&mut self) -> Result<()>;

    /// Check if authenticated
    fn is_authenticated(&self) -> bool;

    /// Get the session token, if logged in
    fn session_token(&self) -> Option<&str>;
}

fn failure_reason(reply: &Value) -> String {
    reply
        .get("data")
        .and_then(|d| d.get("reason"))
        .or_else(|| reply.get("reason"))
        .and_then(|r| r.as_str())
        .map(|r| r.to_string())
        .unwrap_or_else(|| "credentials rejected".to_string())
}

#[async_trait]
impl Authentication for BlueIris {
    async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        // A failed attempt must not leave an earlier session usable
        self.state = SessionState::Unauthenticated;
        self.server = ServerProfile::default();
        self.username = None;
        self.cameras = None;

        let challenge = pack_command("login", None, None, Value::Null)?;
        let (status, text) = self.post_json(&challenge).await?;
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "login challenge rejected");
            return Err(BlueIrisError::Authentication(format!(
                "HTTP {} when requesting a session from {}",
                status,
                self.endpoint()?
            )));
        }

        let reply = unpack_json(&text)?;
        let token = reply
            .get("session")
            .and_then(|s| s.as_str())
            .ok_or_else(|| {
                BlueIrisError::Authentication("No session in login reply".to_string())
            })?
            .to_string();

        let digest = auth_response(username, &token, password);

        let answer = pack_command("login", Some(&token), Some(&digest), Value::Null)?;
        let (status, text) = self.post_json(&answer).await?;
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "login response rejected");
            return Err(BlueIrisError::Authentication(format!(
                "HTTP {} when answering the login challenge",
                status
            )));
        }

        let reply = unpack_json(&text)?;
        if !is_success(&reply) {
            let reason = failure_reason(&reply);
            warn!(user = username, %reason, "login failed");
            return Err(BlueIrisError::Authentication(reason));
        }

        let data = reply
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let server: ServerProfile = serde_json::from_value(data).map_err(|e| {
            BlueIrisError::Serialization(format!("Error parsing login data: {}", e))
        })?;

        info!(
            user = username,
            system = %server.name,
            admin = server.admin,
            "logged in"
        );

        self.server = server;
        self.username = Some(username.to_string());
        self.cameras = None;
        self.state = SessionState::Authenticated(Session { token, digest });
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        let result = self.set_command("logout", Value::Null).await;
        self.state = SessionState::LoggedOut;
        self.cameras = None;
        info!("logged out");
        result
    }

    fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    fn session_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated(session) => Some(&session.token),
            _ => None,
        }
    }
}
