//! Messages exchanged with the surrounding UI and host.
//!
//! Inbound messages are `{"type": "...", "payload": {...}}`. They decode to a
//! [`Command`], [`dispatch`] turns a command into a [`Response`], and the
//! response encodes back to the same tagged shape. Nothing here fails: bad
//! colors are normalized and every error becomes `Response::Error`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::color::{normalize, HexColor};
use crate::error::ProtocolError;
use crate::palette::{build_palette_from, Palette, PaletteOptions};
use crate::store::TokenStore;
use crate::swatch::{columns, Column};
use crate::sync::{synchronize, SyncConfig, SyncContext, SyncReport};

/// Base colors and neutral mode carried by every palette command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    pub c1: HexColor,
    pub c2: HexColor,
    pub c3: HexColor,
    /// Only a JSON `true` unlocks.
    #[serde(deserialize_with = "only_true")]
    pub neutral_unlocked: bool,
    #[serde(deserialize_with = "string_or_none")]
    pub neutral_manual: Option<String>,
}

fn only_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl Default for Request {
    fn default() -> Self {
        Self {
            c1: HexColor::BLACK,
            c2: HexColor::BLACK,
            c3: HexColor::BLACK,
            neutral_unlocked: false,
            neutral_manual: None,
        }
    }
}

impl Request {
    pub fn options(&self) -> PaletteOptions {
        let manual = self
            .neutral_manual
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(normalize);
        PaletteOptions {
            neutral_unlocked: self.neutral_unlocked && manual.is_some(),
            neutral_manual: manual,
            ..PaletteOptions::default()
        }
    }

    pub fn palette(&self) -> Palette {
        build_palette_from(self.c1, self.c2, self.c3, &self.options())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Build the palette and return its compact CSS block.
    Generate(Request),
    /// Build the palette and write it into the host's token collection.
    ReplaceVariables(Request),
    /// Build the palette and return the swatch table for the host to draw.
    GenerateFrames(Request),
    /// Any other message type.
    Unknown(String),
}

impl Command {
    /// Decode an inbound message. Unrecognized types become [`Command::Unknown`].
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self, ProtocolError> {
        let kind = match value.get("type") {
            None | Some(Value::Null) => return Err(ProtocolError::MissingType),
            Some(Value::String(kind)) => kind.clone(),
            // Present but not a string: reported back as an unknown message.
            Some(other) => return Ok(Command::Unknown(other.to_string())),
        };

        let mut request = || -> Result<Request, ProtocolError> {
            match value.get_mut("payload").map(Value::take) {
                Some(payload @ Value::Object(_)) => Ok(serde_json::from_value(payload)?),
                _ => Ok(Request::default()),
            }
        };

        Ok(match kind.as_str() {
            "GENERATE" => Command::Generate(request()?),
            "REPLACE_VARIABLES" => Command::ReplaceVariables(request()?),
            "GENERATE_FRAMES" => Command::GenerateFrames(request()?),
            _ => Command::Unknown(kind),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Generate(_) => "GENERATE",
            Command::ReplaceVariables(_) => "REPLACE_VARIABLES",
            Command::GenerateFrames(_) => "GENERATE_FRAMES",
            Command::Unknown(kind) => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    CssReady { css: String },
    Ok(SyncReport),
    /// None of the configured token collections exist.
    NoCollection,
    Frames { columns: Vec<Column> },
    Error { message: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"type":"ERROR","payload":{{"message":"{e}"}}}}"#))
    }
}

/// Handle a command that needs no host access.
///
/// Returns `None` for commands that must go through [`dispatch`].
pub fn generate(command: &Command) -> Option<Response> {
    match command {
        Command::Generate(req) => Some(Response::CssReady {
            css: req.palette().css(),
        }),
        Command::GenerateFrames(req) => Some(Response::Frames {
            columns: columns(&req.palette()),
        }),
        Command::Unknown(kind) => Some(Response::error(format!("Unknown message: {kind}"))),
        Command::ReplaceVariables(_) => None,
    }
}

pub async fn dispatch<S: TokenStore + ?Sized>(
    store: &S,
    config: &SyncConfig,
    command: Command,
) -> Response {
    debug!(command = command.name(), "dispatching");
    if let Command::Unknown(kind) = &command {
        warn!(%kind, "unknown message");
    }
    if let Some(response) = generate(&command) {
        return response;
    }
    let Command::ReplaceVariables(req) = command else {
        return Response::error("unhandled message");
    };

    let ctx = match SyncContext::load(store, config).await {
        Ok(Some(ctx)) => ctx,
        Ok(None) => return Response::NoCollection,
        Err(err) => {
            warn!(error = %err, "loading token collection failed");
            return Response::error(format!("Replace failed: {err}"));
        }
    };
    Response::Ok(synchronize(store, config, &ctx, &req.palette()).await)
}

/// Decode, dispatch and encode one raw message.
pub async fn handle_message<S: TokenStore + ?Sized>(
    store: &S,
    config: &SyncConfig,
    json: &str,
) -> Response {
    match Command::from_json(json) {
        Ok(command) => dispatch(store, config, command).await,
        Err(err) => Response::error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use futures::executor::block_on;

    #[test]
    fn decodes_generate_with_defaults() {
        let cmd = Command::from_json(r##"{"type":"GENERATE","payload":{"c1":"#639720"}}"##).unwrap();
        let Command::Generate(req) = cmd else {
            panic!("expected GENERATE");
        };
        assert_eq!(req.c1.to_hex(), "#639720");
        assert_eq!(req.c2, HexColor::BLACK);
        assert!(!req.neutral_unlocked);
    }

    #[test]
    fn missing_payload_is_default_request() {
        let cmd = Command::from_json(r#"{"type":"GENERATE_FRAMES"}"#).unwrap();
        assert_eq!(cmd, Command::GenerateFrames(Request::default()));
    }

    #[test]
    fn unknown_type_is_kept() {
        let cmd = Command::from_json(r#"{"type":"replace-variables"}"#).unwrap();
        assert_eq!(cmd, Command::Unknown("replace-variables".into()));
    }

    #[test]
    fn malformed_messages_are_errors() {
        assert!(matches!(
            Command::from_json("not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            Command::from_json(r#"{"payload":{}}"#),
            Err(ProtocolError::MissingType)
        ));
    }

    #[test]
    fn non_string_type_is_unknown() {
        assert_eq!(
            Command::from_json(r#"{"type":5}"#).unwrap(),
            Command::Unknown("5".into())
        );
        let resp = block_on(handle_message(
            &MemoryStore::new(),
            &SyncConfig::default(),
            r#"{"type":5}"#,
        ));
        assert_eq!(resp, Response::error("Unknown message: 5"));
    }

    #[test]
    fn ill_typed_payload_fields_are_defaulted() {
        let cmd = Command::from_json(
            r#"{"type":"GENERATE","payload":{"c1":123,"neutralUnlocked":"true","neutralManual":7}}"#,
        )
        .unwrap();
        assert_eq!(cmd, Command::Generate(Request::default()));

        let cmd = Command::from_json(r#"{"type":"GENERATE","payload":"oops"}"#).unwrap();
        assert_eq!(cmd, Command::Generate(Request::default()));
    }

    #[test]
    fn empty_manual_neutral_means_locked() {
        let req = Request {
            neutral_unlocked: true,
            neutral_manual: Some("  ".into()),
            ..Default::default()
        };
        assert!(!req.options().neutral_unlocked);
        let req = Request {
            neutral_unlocked: true,
            neutral_manual: Some("334455".into()),
            ..Default::default()
        };
        assert!(req.options().neutral_unlocked);
    }

    #[test]
    fn unknown_command_names_itself() {
        let store = MemoryStore::new();
        let resp = block_on(dispatch(
            &store,
            &SyncConfig::default(),
            Command::Unknown("PING".into()),
        ));
        assert_eq!(resp, Response::error("Unknown message: PING"));
        assert_eq!(
            resp.to_json(),
            r#"{"type":"ERROR","payload":{"message":"Unknown message: PING"}}"#
        );
    }

    #[test]
    fn no_collection_response() {
        let store = MemoryStore::new();
        let resp = block_on(handle_message(
            &store,
            &SyncConfig::default(),
            r#"{"type":"REPLACE_VARIABLES","payload":{}}"#,
        ));
        assert_eq!(resp, Response::NoCollection);
        assert_eq!(resp.to_json(), r#"{"type":"NO_COLLECTION"}"#);
    }
}
