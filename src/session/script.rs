//! JSON-lines event scripts for headless replay.
//!
//! Each non-empty line is one event, e.g.
//! ```text
//! {"type": "width", "value": 10}
//! {"type": "pointer_down", "x": 10, "y": 10}
//! {"type": "pointer_move", "x": 40, "y": 25}
//! {"type": "pointer_up"}
//! {"type": "save"}
//! ```
//! Lines starting with `#` are comments.

use super::{Command, Event};
use crate::draw::Point;
use crate::input::PointerEvent;
use serde::Deserialize;
use thiserror::Error;

/// One scripted event.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    Color { value: String },
    Width { value: u32 },
    Text { value: String },
    Clear,
    Save,
    Recognize,
    Shutdown,
}

impl From<ScriptEvent> for Event {
    fn from(event: ScriptEvent) -> Self {
        match event {
            ScriptEvent::PointerDown { x, y } => PointerEvent::Down(Point::new(x, y)).into(),
            ScriptEvent::PointerMove { x, y } => PointerEvent::Move(Point::new(x, y)).into(),
            ScriptEvent::PointerUp => PointerEvent::Up.into(),
            ScriptEvent::PointerLeave => PointerEvent::Leave.into(),
            ScriptEvent::Color { value } => Event::SetColor(value),
            ScriptEvent::Width { value } => Event::SetWidth(value),
            ScriptEvent::Text { value } => Event::SetText(value),
            ScriptEvent::Clear => Command::Clear.into(),
            ScriptEvent::Save => Command::Save.into(),
            ScriptEvent::Recognize => Command::Recognize.into(),
            ScriptEvent::Shutdown => Event::Shutdown,
        }
    }
}

/// A script line that could not be parsed.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parses a whole script into events, in order.
pub fn parse_script(input: &str) -> Result<Vec<Event>, ScriptError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str::<ScriptEvent>(line)
                .map(Event::from)
                .map_err(|source| ScriptError {
                    line: idx + 1,
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_event_kind() {
        let script = r##"
            # a stroke
            {"type": "pointer_down", "x": 1, "y": 2}
            {"type": "pointer_move", "x": 3.5, "y": 4}
            {"type": "pointer_up"}
            {"type": "pointer_leave"}
            {"type": "color", "value": "#ff0000"}
            {"type": "width", "value": 10}
            {"type": "text", "value": "hello"}
            {"type": "clear"}
            {"type": "save"}
            {"type": "recognize"}
            {"type": "shutdown"}
        "##;

        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                Event::Pointer(PointerEvent::Down(Point::new(1.0, 2.0))),
                Event::Pointer(PointerEvent::Move(Point::new(3.5, 4.0))),
                Event::Pointer(PointerEvent::Up),
                Event::Pointer(PointerEvent::Leave),
                Event::SetColor("#ff0000".to_string()),
                Event::SetWidth(10),
                Event::SetText("hello".to_string()),
                Event::Command(Command::Clear),
                Event::Command(Command::Save),
                Event::Command(Command::Recognize),
                Event::Shutdown,
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_event() {
        let err = parse_script("{\"type\": \"clear\"}\n\n{\"type\": \"explode\"}\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn negative_width_is_rejected() {
        assert!(parse_script(r#"{"type": "width", "value": -3}"#).is_err());
    }
}
