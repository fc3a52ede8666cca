//! Interaction mode state: mode toggles, held buttons, and the
//! drag-to-launch state machine.
//!
//! ```text
//! IDLE ──left down (drag-launch on)──▶ DRAGGING   line.start = line.end = pointer
//! DRAGGING ──pointer move──▶ DRAGGING             line.end = pointer
//! DRAGGING ──left up──▶ IDLE                      launch if line.end != line.start
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::spawn::SpawnRequest;
use crate::input::queue::PointerButton;

/// Which pointer buttons are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl ButtonState {
    pub fn set(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Left => self.left = down,
            PointerButton::Right => self.right = down,
            PointerButton::Middle => self.middle = down,
        }
    }

    pub fn is_held(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Left => self.left,
            PointerButton::Right => self.right,
            PointerButton::Middle => self.middle,
        }
    }
}

/// The two independent toggles. Both start off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modes {
    /// Left drag-and-release launches a particle instead of click-spawning.
    pub drag_launch: bool,
    /// The renderer shows each particle's speed.
    pub show_velocity: bool,
}

/// Preview segment of a launch. Zeroed whenever nothing is being dragged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragLine {
    pub start: Vec2,
    pub end: Vec2,
}

impl DragLine {
    pub const ZERO: Self = Self {
        start: Vec2::ZERO,
        end: Vec2::ZERO,
    };

    pub fn begin(&mut self, at: Vec2) {
        self.start = at;
        self.end = at;
    }

    pub fn extend_to(&mut self, at: Vec2) {
        self.end = at;
    }

    pub fn has_extent(&self) -> bool {
        self.end != self.start
    }

    /// `start - end`: a launch flies away from the direction of the pull.
    pub fn launch_vector(&self) -> Vec2 {
        self.start - self.end
    }

    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    /// (x1, y1, x2, y2) for the renderer.
    pub fn to_array(&self) -> [f32; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Something a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDragLaunch,
    ToggleVelocityLabels,
    Exit,
}

/// Character codes bound to each key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_drag_launch: u32,
    pub toggle_velocity_labels: u32,
    pub exit: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_drag_launch: 's' as u32,
            toggle_velocity_labels: 'w' as u32,
            exit: 27,
        }
    }
}

impl KeyBindings {
    /// Resolve a key code. ASCII letters match regardless of case.
    pub fn action(&self, key_code: u32) -> Option<KeyAction> {
        let code = match char::from_u32(key_code) {
            Some(c) if c.is_ascii_uppercase() => c.to_ascii_lowercase() as u32,
            _ => key_code,
        };
        if code == self.toggle_drag_launch {
            Some(KeyAction::ToggleDragLaunch)
        } else if code == self.toggle_velocity_labels {
            Some(KeyAction::ToggleVelocityLabels)
        } else if code == self.exit {
            Some(KeyAction::Exit)
        } else {
            None
        }
    }
}

/// All pointer and keyboard state between ticks.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub modes: Modes,
    pub buttons: ButtonState,
    pub pointer: Vec2,
    pub drag: DragLine,
    pub phase: DragPhase,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button down. Returns the spawn it requests, if any.
    pub fn pointer_down(&mut self, button: PointerButton, at: Vec2) -> Option<SpawnRequest> {
        self.pointer = at;
        self.buttons.set(button, true);
        match button {
            PointerButton::Left if self.modes.drag_launch => {
                self.phase = DragPhase::Dragging;
                self.drag.begin(at);
                None
            }
            PointerButton::Left => Some(SpawnRequest::tiny(at)),
            PointerButton::Right => Some(SpawnRequest::huge(at)),
            PointerButton::Middle => None,
        }
    }

    /// Button up. Ending a drag with a non-degenerate line requests a launch.
    pub fn pointer_up(&mut self, button: PointerButton, at: Vec2) -> Option<SpawnRequest> {
        self.pointer = at;
        self.buttons.set(button, false);
        if button != PointerButton::Left || self.phase != DragPhase::Dragging {
            return None;
        }

        self.phase = DragPhase::Idle;
        if !self.modes.drag_launch {
            self.drag.clear();
            return None;
        }

        self.drag.extend_to(at);
        let request = if self.drag.has_extent() {
            Some(SpawnRequest::launched(at, self.drag.launch_vector()))
        } else {
            None
        };
        self.drag.clear();
        request
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer = at;
        if self.phase == DragPhase::Dragging {
            self.drag.extend_to(at);
        }
    }

    /// Apply a key press to the modes. Exit is returned for the caller.
    pub fn key_down(&mut self, bindings: &KeyBindings, key_code: u32) -> Option<KeyAction> {
        let action = bindings.action(key_code)?;
        match action {
            KeyAction::ToggleDragLaunch => {
                self.modes.drag_launch = !self.modes.drag_launch;
                log::info!("drag-launch mode {}", on_off(self.modes.drag_launch));
            }
            KeyAction::ToggleVelocityLabels => {
                self.modes.show_velocity = !self.modes.show_velocity;
                log::info!("velocity labels {}", on_off(self.modes.show_velocity));
            }
            KeyAction::Exit => {}
        }
        Some(action)
    }

    /// Drop any in-progress drag and button state.
    pub fn reset(&mut self) {
        self.buttons = ButtonState::default();
        self.phase = DragPhase::Idle;
        self.drag.clear();
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spawn::SpawnKind;

    fn dragging() -> Interaction {
        let mut it = Interaction::new();
        it.modes.drag_launch = true;
        it
    }

    #[test]
    fn left_click_requests_tiny_when_drag_off() {
        let mut it = Interaction::new();
        let req = it.pointer_down(PointerButton::Left, Vec2::new(50.0, 50.0)).unwrap();
        assert_eq!(req.kind, SpawnKind::Tiny);
        assert_eq!(req.pos, Vec2::new(50.0, 50.0));
        assert!(it.pointer_up(PointerButton::Left, Vec2::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn right_click_requests_huge_in_both_modes() {
        let mut it = Interaction::new();
        assert_eq!(it.pointer_down(PointerButton::Right, Vec2::ZERO).unwrap().kind, SpawnKind::Huge);
        let mut it = dragging();
        assert_eq!(it.pointer_down(PointerButton::Right, Vec2::ZERO).unwrap().kind, SpawnKind::Huge);
    }

    #[test]
    fn drag_and_release_launches_from_release_point() {
        let mut it = dragging();
        assert!(it.pointer_down(PointerButton::Left, Vec2::ZERO).is_none());
        assert_eq!(it.phase, DragPhase::Dragging);

        it.pointer_move(Vec2::new(30.0, 0.0));
        assert_eq!(it.drag.end, Vec2::new(30.0, 0.0));

        let req = it.pointer_up(PointerButton::Left, Vec2::new(30.0, 0.0)).unwrap();
        assert_eq!(req.kind, SpawnKind::Launched);
        assert_eq!(req.pos, Vec2::new(30.0, 0.0));
        assert_eq!(req.launch, Vec2::new(-30.0, 0.0));
        assert_eq!(it.phase, DragPhase::Idle);
        assert_eq!(it.drag, DragLine::ZERO);
    }

    #[test]
    fn zero_extent_release_spawns_nothing() {
        let mut it = dragging();
        it.pointer_down(PointerButton::Left, Vec2::new(10.0, 10.0));
        assert!(it.pointer_up(PointerButton::Left, Vec2::new(10.0, 10.0)).is_none());
        assert_eq!(it.phase, DragPhase::Idle);
    }

    #[test]
    fn moves_while_idle_leave_line_alone() {
        let mut it = dragging();
        it.pointer_move(Vec2::new(40.0, 40.0));
        assert_eq!(it.drag, DragLine::ZERO);
        assert_eq!(it.pointer, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn toggling_drag_off_mid_drag_cancels_launch() {
        let mut it = dragging();
        it.pointer_down(PointerButton::Left, Vec2::ZERO);
        it.pointer_move(Vec2::new(20.0, 5.0));
        it.key_down(&KeyBindings::default(), 's' as u32);
        assert!(it.pointer_up(PointerButton::Left, Vec2::new(20.0, 5.0)).is_none());
        assert_eq!(it.drag, DragLine::ZERO);
    }

    #[test]
    fn keys_toggle_modes() {
        let keys = KeyBindings::default();
        let mut it = Interaction::new();
        assert_eq!(it.key_down(&keys, 's' as u32), Some(KeyAction::ToggleDragLaunch));
        assert!(it.modes.drag_launch);
        assert_eq!(it.key_down(&keys, 'W' as u32), Some(KeyAction::ToggleVelocityLabels));
        assert!(it.modes.show_velocity);
        it.key_down(&keys, 's' as u32);
        assert!(!it.modes.drag_launch);
        assert_eq!(it.key_down(&keys, 27), Some(KeyAction::Exit));
        assert_eq!(it.key_down(&keys, 'x' as u32), None);
    }

    #[test]
    fn middle_press_is_held_until_release() {
        let mut it = Interaction::new();
        assert_eq!(it.pointer_down(PointerButton::Middle, Vec2::ZERO), None);
        assert!(it.buttons.is_held(PointerButton::Middle));
        assert!(!it.buttons.is_held(PointerButton::Left));
        it.pointer_up(PointerButton::Middle, Vec2::ZERO);
        assert!(!it.buttons.is_held(PointerButton::Middle));
    }

    #[test]
    fn reset_releases_held_buttons() {
        let mut it = Interaction::new();
        it.pointer_down(PointerButton::Middle, Vec2::ZERO);
        it.reset();
        assert!(!it.buttons.is_held(PointerButton::Middle));
    }
}
