use std::collections::HashSet;

use iced::keyboard::{Key, key};
use nalgebra::Vector2;

use crate::cube::Face;

/// Logical controls the application polls every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Control {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    Turn(Face),
    Prime,
    Scramble,
}

impl Control {
    /// Maps a keyboard key to the control it drives, if any.
    pub(crate) fn from_key(key: &Key) -> Option<Self> {
        match key.as_ref() {
            Key::Named(key::Named::ArrowLeft) => Some(Control::YawLeft),
            Key::Named(key::Named::ArrowRight) => Some(Control::YawRight),
            Key::Named(key::Named::ArrowUp) => Some(Control::PitchUp),
            Key::Named(key::Named::ArrowDown) => Some(Control::PitchDown),
            Key::Named(key::Named::Shift) => Some(Control::Prime),
            Key::Named(key::Named::Space) => Some(Control::Scramble),
            Key::Character(c) => match c.to_ascii_lowercase().as_str() {
                "f" => Some(Control::Turn(Face::Front)),
                "b" => Some(Control::Turn(Face::Back)),
                "u" => Some(Control::Turn(Face::Top)),
                "d" => Some(Control::Turn(Face::Bottom)),
                "l" => Some(Control::Turn(Face::Left)),
                "r" => Some(Control::Turn(Face::Right)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Tracks which controls are held and where the pointer is.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    held: HashSet<Control>,
    /// Whether the left mouse button is held inside the viewport
    pub(crate) is_left_mouse_pressed: bool,
    /// Last pointer offset from the viewport center, -1..1 per axis
    pub(crate) pointer: Option<Vector2<f32>>,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub(crate) fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub(crate) fn is_down(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub(crate) fn update_mouse_state(&mut self, pressed: bool) {
        self.is_left_mouse_pressed = pressed;
    }

    /// Pointer offset to steer the camera with, while the button is held.
    pub(crate) fn drag_offset(&self) -> Option<Vector2<f32>> {
        self.pointer.filter(|_| self.is_left_mouse_pressed)
    }
}
