//! IPC message protocol for Anamark
//!
//! Defines the messages exchanged between a UI and the labeling session,
//! plus the JSON script format (an array of [`UiToSession`] messages) used
//! to replay a recorded session.

pub mod commands;
pub mod error;
pub mod input;
pub mod messages;
pub mod types;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
pub use types::*;

/// Parse a script: a JSON array of [`UiToSession`] messages.
pub fn parse_script(source: &str) -> Result<Vec<UiToSession>, IpcError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    let serde_json::Value::Array(items) = value else {
        return Err(IpcError::InvalidFormat(
            "script must be a JSON array of messages".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| IpcError::InvalidMessage { index, source })
        })
        .collect()
}

/// Serialize a session message to one JSON line.
pub fn to_json_line(message: &SessionToUi) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let msg = UiToSession::SetTool {
            tool: ToolKind::Erase,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"SetTool","data":{"tool":"Erase"}}"#);

        let unit = serde_json::to_string(&UiToSession::Clear).unwrap();
        assert_eq!(unit, r#"{"type":"Clear"}"#);
    }

    #[test]
    fn test_parse_script() {
        let script = r##"[
            {"type": "LoadMesh", "data": {"path": "femur.stl"}},
            {"type": "Class", "data": {"Add": {"name": "Bone", "color": "#ffffff"}}},
            {"type": "SelectClass", "data": {"id": 1}},
            {"type": "Brush", "data": {"SetFalloff": {"falloff": "Smooth"}}},
            {"type": "Pointer", "data": {"Press": {"button": "Left"}}},
            {"type": "Pointer", "data": {"Tick": {"ray": {"origin": [0, 0, 5], "direction": [0, 0, -1]}}}},
            {"type": "Pointer", "data": {"Tick": {"ray": null}}},
            {"type": "Export", "data": {"format": "Csv", "path": "out.csv"}}
        ]"##;
        let messages = parse_script(script).unwrap();
        assert_eq!(messages.len(), 8);
        assert!(matches!(&messages[0], UiToSession::LoadMesh { path } if path == "femur.stl"));
        assert!(matches!(
            &messages[5],
            UiToSession::Pointer(PointerCommand::Tick { ray: Some(_) })
        ));
        assert!(matches!(
            &messages[7],
            UiToSession::Export {
                format: ExportFormat::Csv,
                mode: None,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(matches!(
            parse_script(r#"{"type": "Clear"}"#),
            Err(IpcError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_script(r#"[{"type": "Clear"}, {"type": "Explode"}]"#),
            Err(IpcError::InvalidMessage { index: 1, .. })
        ));
        assert!(matches!(parse_script("[1,"), Err(IpcError::Serialize(_))));
    }

    #[test]
    fn test_session_message_line() {
        let line = to_json_line(&SessionToUi::CountsChanged(CountsInfo {
            classes: 3,
            problem_areas: 1,
        }))
        .unwrap();
        assert_eq!(
            line,
            r#"{"type":"CountsChanged","data":{"classes":3,"problem_areas":1}}"#
        );
    }
}
