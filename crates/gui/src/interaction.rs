//! Per tooth-part gesture resolution.
//!
//! A [`PartInteraction`] turns raw pointer/keyboard events into [`PartEffect`]s. The chart mode is
//! passed into every call; the machine itself only remembers whether a drag is in progress and
//! whether the pointer is over the part.

use serde::{Deserialize, Serialize};
use shared::SCALE_STEP;

/// Global gesture mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Clicks toggle selection
    #[default]
    Select,
    /// Drag, wheel, modifier-click and right-click change layout
    Manipulate,
}

impl ChartMode {
    pub fn toggled(self) -> Self {
        match self {
            ChartMode::Select => ChartMode::Manipulate,
            ChartMode::Manipulate => ChartMode::Select,
        }
    }
}

/// Pointer position in chart space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Modifier keys held during a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Cmd on macOS
    pub command: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        command: false,
        alt: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.command || self.alt)
    }
}

/// Raw input delivered to one part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartEvent {
    PrimaryDown(Point),
    PrimaryMove(Point),
    PrimaryUp,
    PrimaryClick(Modifiers),
    /// Positive = away from the user
    Scroll(f32),
    SecondaryClick,
    /// Degrees, positive clockwise
    Rotate(f64),
    HoverEnter,
    HoverLeave,
}

impl PartEvent {
    /// Events that only wind down transient state
    pub fn is_release(&self) -> bool {
        matches!(self, PartEvent::PrimaryUp | PartEvent::HoverLeave)
    }
}

/// State change requested by a gesture, applied by the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartEffect {
    ToggleSelection,
    MoveBy { dx: f64, dy: f64 },
    ScaleBy(f64),
    RotateBy(f64),
    CycleShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PartInteraction {
    drag: DragState,
    hovered: bool,
}

impl PartInteraction {
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Drop any in-progress drag and hover
    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.hovered = false;
    }

    pub fn handle(&mut self, mode: ChartMode, event: PartEvent) -> Option<PartEffect> {
        match event {
            PartEvent::HoverEnter => {
                self.hovered = true;
                None
            }
            PartEvent::HoverLeave => {
                self.hovered = false;
                None
            }
            PartEvent::PrimaryDown(point) => {
                if mode == ChartMode::Manipulate {
                    self.drag = DragState::Dragging { last: point };
                }
                None
            }
            PartEvent::PrimaryMove(point) => match self.drag {
                DragState::Dragging { last } if mode == ChartMode::Manipulate => {
                    self.drag = DragState::Dragging { last: point };
                    let (dx, dy) = (point.x - last.x, point.y - last.y);
                    (dx != 0.0 || dy != 0.0).then_some(PartEffect::MoveBy { dx, dy })
                }
                _ => None,
            },
            PartEvent::PrimaryUp => {
                self.drag = DragState::Idle;
                None
            }
            PartEvent::PrimaryClick(modifiers) => match mode {
                ChartMode::Select => modifiers.is_empty().then_some(PartEffect::ToggleSelection),
                ChartMode::Manipulate => {
                    if modifiers.shift {
                        Some(PartEffect::ScaleBy(SCALE_STEP))
                    } else if modifiers.ctrl || modifiers.command {
                        Some(PartEffect::ScaleBy(-SCALE_STEP))
                    } else if modifiers.alt {
                        Some(PartEffect::CycleShape)
                    } else {
                        None
                    }
                }
            },
            PartEvent::Scroll(delta) => {
                if mode != ChartMode::Manipulate || delta == 0.0 {
                    return None;
                }
                let step = if delta > 0.0 { SCALE_STEP } else { -SCALE_STEP };
                Some(PartEffect::ScaleBy(step))
            }
            PartEvent::SecondaryClick => {
                (mode == ChartMode::Manipulate).then_some(PartEffect::CycleShape)
            }
            PartEvent::Rotate(degrees) => {
                (mode == ChartMode::Manipulate && degrees != 0.0)
                    .then_some(PartEffect::RotateBy(degrees))
            }
        }
    }
}
