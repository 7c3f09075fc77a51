use crate::Authentication;
use crate::commands::{Camera, ServerProfile};
use crate::constants::{DEFAULT_SCHEME, DEFAULT_TIMEOUT, JSON_PATH};
use crate::error::{BlueIrisError, Result};
use crate::protocol::{pack_command, unpack_json, unpack_reply};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub(crate) struct Session {
    pub(crate) token: String,
    pub(crate) digest: String,
}

pub(crate) enum SessionState {
    Unauthenticated,
    Authenticated(Session),
    LoggedOut,
}

pub struct BlueIris {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) timeout: Duration,
    pub(crate) http: reqwest::Client,

    pub(crate) username: Option<String>,
    pub(crate) state: SessionState,

    // Filled in by the second login step
    pub(crate) server: ServerProfile,

    // Camera list, fetched on first use for code validation
    pub(crate) cameras: Option<Vec<Camera>>,
}

impl BlueIris {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: host.into(),
            port: None,
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
            username: None,
            state: SessionState::Unauthenticated,
            server: ServerProfile::default(),
            cameras: None,
        }
    }

    /// Builds a client from a base URL such as `http://192.168.1.20:81`.
    pub fn from_url(base: &str) -> Result<Self> {
        let url = Url::parse(base)?;
        let host = url
            .host_str()
            .ok_or_else(|| BlueIrisError::InvalidArgument(format!("no host in '{}'", base)))?;

        let mut cam = Self::new(host).with_scheme(url.scheme());
        cam.port = url.port();
        Ok(cam)
    }

    /// Builds a client from `base` and runs the login handshake before returning.
    pub async fn connect(base: &str, username: &str, password: &str) -> Result<Self> {
        let mut cam = Self::from_url(base)?;
        cam.login(username, password).await?;
        Ok(cam)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured HTTP client, e.g. one that trusts a self-signed
    /// certificate.
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> Result<Url> {
        let authority = match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        };
        let base = Url::parse(&format!("{}://{}/", self.scheme, authority))?;
        Ok(base.join(JSON_PATH)?)
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn server(&self) -> &ServerProfile {
        &self.server
    }

    pub fn system_name(&self) -> &str {
        &self.server.name
    }

    pub fn version(&self) -> &str {
        &self.server.version
    }

    pub fn profiles(&self) -> &[String] {
        &self.server.profiles
    }

    pub fn schedules(&self) -> &[String] {
        &self.server.schedules
    }

    pub fn is_admin(&self) -> bool {
        self.server.admin
    }

    pub fn can_ptz(&self) -> bool {
        self.server.ptz
    }

    pub fn can_view_clips(&self) -> bool {
        self.server.clips
    }

    pub(crate) async fn post_json(&self, body: &Value) -> Result<(StatusCode, String)> {
        let response = self
            .http
            .post(self.endpoint()?)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }

    pub(crate) fn session(&self) -> Result<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Ok(session),
            SessionState::Unauthenticated => {
                Err(BlueIrisError::Authentication("Not logged in".to_string()))
            }
            SessionState::LoggedOut => {
                Err(BlueIrisError::Authentication("Session was logged out".to_string()))
            }
        }
    }

    /// Sends `verb` with `fields` merged into the request. Returns the reply's
    /// `data`, or `None` when the server answered a bare success.
    pub async fn send_command(&self, verb: &str, fields: Value) -> Result<Option<Value>> {
        let session = self.session()?;
        let body = pack_command(verb, Some(&session.token), Some(&session.digest), fields)?;

        debug!(verb, "sending command");
        let (status, text) = self.post_json(&body).await?;
        debug!(verb, status = status.as_u16(), "reply received");

        if status != StatusCode::OK {
            return Err(BlueIrisError::Transport(format!(
                "HTTP {} for '{}': {}",
                status, verb, text
            )));
        }

        let reply = unpack_json(&text)?;
        unpack_reply(verb, reply).inspect_err(|e| warn!(verb, error = %e, "command rejected"))
    }

    /// Like `send_command`, but the reply must carry `data`.
    pub(crate) async fn get_command(&self, verb: &str, fields: Value) -> Result<Value> {
        self.send_command(verb, fields)
            .await?
            .ok_or_else(|| BlueIrisError::CommandFailure {
                verb: verb.to_string(),
                reason: "reply carried no data".to_string(),
            })
    }

    pub(crate) async fn set_command(&self, verb: &str, fields: Value) -> Result<()> {
        self.send_command(verb, fields).await.map(|_| ())
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        verb: &str,
        fields: Value,
    ) -> Result<Vec<T>> {
        match self.send_command(verb, fields).await? {
            Some(data) => serde_json::from_value(data).map_err(|e| {
                BlueIrisError::Serialization(format!("Error parsing '{}' reply: {}", verb, e))
            }),
            None => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_port_when_set() {
        let cam = BlueIris::new("10.0.0.5").with_port(81);
        assert_eq!(cam.endpoint().unwrap().as_str(), "http://10.0.0.5:81/json");
    }

    #[test]
    fn endpoint_without_port() {
        let cam = BlueIris::new("bi.example.net").with_scheme("https");
        assert_eq!(cam.endpoint().unwrap().as_str(), "https://bi.example.net/json");
    }

    #[test]
    fn from_url_keeps_scheme_host_and_port() {
        let cam = BlueIris::from_url("https://cams.local:8443").unwrap();
        assert_eq!(cam.scheme, "https");
        assert_eq!(cam.host, "cams.local");
        assert_eq!(cam.port, Some(8443));
        assert_eq!(cam.endpoint().unwrap().as_str(), "https://cams.local:8443/json");
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(matches!(
            BlueIris::from_url("not a url"),
            Err(BlueIrisError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn send_before_login_is_an_authentication_error() {
        let cam = BlueIris::new("127.0.0.1").with_port(9);
        let err = cam.send_command("status", Value::Null).await.unwrap_err();
        assert!(matches!(err, BlueIrisError::Authentication(_)));
    }
}
