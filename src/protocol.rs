use crate::constants::RESULT_SUCCESS;
use crate::error::{BlueIrisError, Result};
use serde_json::{Map, Value, json};

/// Challenge response for the second login step: lowercase hex MD5 of
/// `user:session:password`.
pub fn auth_response(user: &str, session: &str, password: &str) -> String {
    let digest = md5::compute(format!("{}:{}:{}", user, session, password).as_bytes());
    format!("{:x}", digest)
}

/// Builds the request object for `verb`. Credentials are placed first and
/// the command fields are merged over them.
pub fn pack_command(
    verb: &str,
    session: Option<&str>,
    response: Option<&str>,
    fields: Value,
) -> Result<Value> {
    let mut body = Map::new();
    if let Some(session) = session {
        body.insert("session".to_string(), json!(session));
    }
    if let Some(response) = response {
        body.insert("response".to_string(), json!(response));
    }
    body.insert("cmd".to_string(), json!(verb));

    match fields {
        Value::Null => {}
        Value::Object(extra) => body.extend(extra),
        other => {
            return Err(BlueIrisError::Serialization(format!(
                "command fields must be an object, got {}",
                other
            )));
        }
    }

    Ok(Value::Object(body))
}

pub fn unpack_json(body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| BlueIrisError::Serialization(format!("Error parsing JSON: {}", e)))
}

pub fn is_success(reply: &Value) -> bool {
    reply.get("result").and_then(|r| r.as_str()) == Some(RESULT_SUCCESS)
}

/// Interprets a command reply: `data` wins when present, a bare success
/// yields `None`, anything else is a failure of `verb`.
pub fn unpack_reply(verb: &str, reply: Value) -> Result<Option<Value>> {
    let Value::Object(mut fields) = reply else {
        return Err(BlueIrisError::Serialization(format!(
            "reply to '{}' is not a JSON object",
            verb
        )));
    };

    if let Some(data) = fields.remove("data") {
        return Ok(Some(data));
    }

    if fields.get("result").and_then(|r| r.as_str()) == Some(RESULT_SUCCESS) {
        return Ok(None);
    }

    let reason = fields
        .get("reason")
        .and_then(|r| r.as_str())
        .map(|r| r.to_string())
        .or_else(|| {
            fields
                .get("result")
                .and_then(|r| r.as_str())
                .map(|r| format!("result={}", r))
        })
        .unwrap_or_else(|| "no result in reply".to_string());

    Err(BlueIrisError::CommandFailure {
        verb: verb.to_string(),
        reason,
    })
}

/// Reads an integer the server may send either as a number or as a
/// numeric string.
pub fn as_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
