//! JSON command protocol for driving the chart headlessly.
//!
//! Each command maps to one gesture or chart operation on a [`TestHarness`].

use serde::{Deserialize, Serialize};
use shared::{MissingFlag, PartKey, PartKind, ToothId};

use crate::harness::TestHarness;
use crate::interaction::{ChartMode, Modifiers};

/// A command executed against the chart
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ChartCommand {
    /// Flip select/manipulate
    ToggleMode,
    SetMode {
        mode: ChartMode,
    },
    /// Primary click, optionally with modifiers
    Click {
        tooth: ToothId,
        part: PartKind,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Press, move by (dx, dy), release
    Drag {
        tooth: ToothId,
        part: PartKind,
        dx: f64,
        dy: f64,
        #[serde(default = "default_steps")]
        steps: u32,
    },
    /// Wheel; positive = away
    Scroll {
        tooth: ToothId,
        part: PartKind,
        delta: f32,
    },
    RightClick {
        tooth: ToothId,
        part: PartKind,
    },
    Rotate {
        tooth: ToothId,
        part: PartKind,
        degrees: f64,
    },
    SetMissing {
        tooth: ToothId,
        flag: MissingFlag,
    },
    ClearSelections,
    ResetPositions,
    /// Promote current layout to default
    Promote,
    Save,
    /// Report state for one tooth, or a chart summary
    Inspect {
        #[serde(default)]
        tooth: Option<ToothId>,
    },
}

fn default_steps() -> u32 {
    1
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// A gesture the chart refused (wrong mode, unavailable or hidden part)
    fn ignored() -> Self {
        Self::ok_with_data(serde_json::json!({ "changed": false }))
    }

    fn changed(changed: bool) -> Self {
        if changed {
            Self::ok_with_data(serde_json::json!({ "changed": true }))
        } else {
            Self::ignored()
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: ChartCommand) -> CommandResponse {
    match cmd {
        ChartCommand::ToggleMode => {
            harness.toggle_mode();
            CommandResponse::ok_with_data(serde_json::json!({ "mode": harness.chart.mode() }))
        }

        ChartCommand::SetMode { mode } => {
            harness.set_mode(mode);
            CommandResponse::ok_with_data(serde_json::json!({ "mode": mode }))
        }

        ChartCommand::Click {
            tooth,
            part,
            modifiers,
        } => CommandResponse::changed(harness.click_with(PartKey::new(tooth, part), modifiers)),

        ChartCommand::Drag {
            tooth,
            part,
            dx,
            dy,
            steps,
        } => {
            let key = PartKey::new(tooth, part);
            let before = harness.offset(key);
            harness.drag(key, dx, dy, steps);
            let after = harness.offset(key);
            CommandResponse::changed(before != after)
        }

        ChartCommand::Scroll { tooth, part, delta } => {
            CommandResponse::changed(harness.scroll(PartKey::new(tooth, part), delta))
        }

        ChartCommand::RightClick { tooth, part } => {
            CommandResponse::changed(harness.right_click(PartKey::new(tooth, part)))
        }

        ChartCommand::Rotate {
            tooth,
            part,
            degrees,
        } => CommandResponse::changed(harness.rotate(PartKey::new(tooth, part), degrees)),

        ChartCommand::SetMissing { tooth, flag } => {
            harness.set_missing(tooth, flag);
            CommandResponse::ok()
        }

        ChartCommand::ClearSelections => {
            harness.chart.clear_selections();
            CommandResponse::ok()
        }

        ChartCommand::ResetPositions => {
            harness.reset_positions();
            CommandResponse::ok()
        }

        ChartCommand::Promote => {
            harness.promote();
            CommandResponse::ok_with_data(serde_json::json!({
                "pending": harness.chart.is_promoting(),
            }))
        }

        ChartCommand::Save => {
            harness.save();
            CommandResponse::ok_with_data(serde_json::json!({
                "pending": harness.chart.is_saving(),
            }))
        }

        ChartCommand::Inspect { tooth: Some(tooth) } => {
            let parts: serde_json::Map<String, serde_json::Value> = PartKind::ALL
                .into_iter()
                .map(|kind| {
                    let view = harness.view(PartKey::new(tooth, kind));
                    (
                        kind.as_str().to_string(),
                        serde_json::json!({
                            "status": format!("{:?}", view.status).to_lowercase(),
                            "selected": view.selected,
                            "offset": view.offset,
                            "transform": view.transform,
                        }),
                    )
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "tooth": tooth,
                "missing": harness.missing(tooth),
                "parts": parts,
            }))
        }

        ChartCommand::Inspect { tooth: None } => {
            let chart = &harness.chart;
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": chart.mode(),
                "loading": chart.is_loading(),
                "teeth": chart.catalog().len(),
                "selected": chart.selection().selected_count(),
                "modified_parts": chart.layout().modified_parts(),
                "drawn_parts": harness.drawn_parts(),
                "notices": chart.notices().len(),
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ChartCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ChartCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_toggle_mode() {
        let cmd: ChartCommand = serde_json::from_str(r#"{"command": "toggle_mode"}"#).unwrap();
        assert!(matches!(cmd, ChartCommand::ToggleMode));
    }

    #[test]
    fn test_command_serde_click_defaults_modifiers() {
        let json = r#"{"command": "click", "tooth": "11", "part": "crown"}"#;
        match serde_json::from_str::<ChartCommand>(json).unwrap() {
            ChartCommand::Click {
                tooth,
                part,
                modifiers,
            } => {
                assert_eq!(tooth.code(), 11);
                assert_eq!(part, PartKind::Crown);
                assert!(modifiers.is_empty());
            }
            other => panic!("Expected Click, got {other:?}"),
        }
    }

    #[test]
    fn test_command_serde_rejects_unknown_tooth() {
        let json = r#"{"command": "right_click", "tooth": "19", "part": "root"}"#;
        assert!(serde_json::from_str::<ChartCommand>(json).is_err());
    }

    #[test]
    fn test_execute_click_reports_change() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "click", "tooth": "11", "part": "crown"}"#)
            .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["changed"], true);
    }

    #[test]
    fn test_execute_inspect_tooth() {
        let mut h = TestHarness::new();
        execute_json(&mut h, r#"{"command": "set_missing", "tooth": "26", "flag": "crown"}"#)
            .unwrap();

        let resp = execute_json(&mut h, r#"{"command": "inspect", "tooth": "26"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["missing"], "crown");
        assert_eq!(data["parts"]["crown"]["status"], "hidden");
        assert_eq!(data["parts"]["root"]["status"], "ready");
    }

    #[test]
    fn test_execute_batch_scroll_scenario() {
        let mut h = TestHarness::new();
        let batch = r#"[
            {"command": "set_mode", "mode": "manipulate"},
            {"command": "scroll", "tooth": "21", "part": "root", "delta": 1},
            {"command": "scroll", "tooth": "21", "part": "root", "delta": 1},
            {"command": "scroll", "tooth": "21", "part": "root", "delta": 1},
            {"command": "scroll", "tooth": "21", "part": "root", "delta": -1},
            {"command": "inspect", "tooth": "21"}
        ]"#;
        let responses = execute_json_batch(&mut h, batch).unwrap();
        assert!(responses.iter().all(|r| r.success));
        let data = responses.last().unwrap().data.as_ref().unwrap();
        assert_eq!(data["parts"]["root"]["transform"]["scale"], 1.2);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
    }
}
