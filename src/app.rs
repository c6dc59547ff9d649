//! Per-tick application logic.
//!
//! Couples the cube simulation with the camera and the held input state. Each
//! tick polls the input, possibly starts a turn or a scramble, and advances
//! the animation by exactly one frame.

use crate::camera::{CAMERA_STEP, Camera};
use crate::cube::Face;
use crate::input::{Control, InputState};
use crate::simulation::{CubeState, SimulationSettings};
use crate::turn::Turn;

/// Turn keys in the order they are checked; the first held one wins.
const TURN_ORDER: [Face; 6] = [
    Face::Front,
    Face::Back,
    Face::Top,
    Face::Bottom,
    Face::Left,
    Face::Right,
];

/// Main application state: the cube, the camera looking at it and the
/// controls currently held.
#[derive(Debug)]
pub(crate) struct App {
    pub(crate) cube: CubeState,
    pub(crate) camera: Camera,
    pub(crate) input: InputState,
}

impl App {
    pub(crate) fn new(settings: SimulationSettings) -> Self {
        Self {
            cube: CubeState::new(settings),
            camera: Camera::default(),
            input: InputState::new(),
        }
    }

    /// Runs one simulation step.
    pub(crate) fn tick(&mut self) {
        self.update_camera();

        if self.cube.is_idle() {
            if let Some(turn) = self.requested_turn() {
                self.cube.start_turn(turn);
            }
        }

        if self.input.is_down(Control::Scramble) {
            self.cube.start_scramble();
        }

        self.cube.tick();
    }

    fn update_camera(&mut self) {
        let input = &self.input;
        let mut pitch = 0.0;
        let mut yaw = 0.0;
        if input.is_down(Control::YawLeft) {
            yaw -= CAMERA_STEP;
        }
        if input.is_down(Control::YawRight) {
            yaw += CAMERA_STEP;
        }
        if input.is_down(Control::PitchUp) {
            pitch += CAMERA_STEP;
        }
        if input.is_down(Control::PitchDown) {
            pitch -= CAMERA_STEP;
        }
        self.camera.nudge(pitch, yaw);

        if let Some(offset) = input.drag_offset() {
            self.camera.look_from_pointer(offset);
        }
    }

    fn requested_turn(&self) -> Option<Turn> {
        let prime = self.input.is_down(Control::Prime);
        TURN_ORDER
            .into_iter()
            .find(|&face| self.input.is_down(Control::Turn(face)))
            .map(|face| Turn::new(face, prime))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};
    use std::f32::consts::PI;

    use super::*;
    use crate::simulation::Animation;

    fn app() -> App {
        App::new(SimulationSettings {
            seed: Some(11),
            ..SimulationSettings::default()
        })
    }

    #[test]
    fn held_turn_key_starts_turn_and_advances_one_frame() {
        let mut app = app();
        app.input.press(Control::Turn(Face::Left));
        app.tick();
        assert_eq!(
            app.cube.animation(),
            Animation::Turning {
                turn: Turn::new(Face::Left, false),
                frame: 1,
                frames: 30,
            }
        );
    }

    #[test]
    fn shift_selects_prime() {
        let mut app = app();
        app.input.press(Control::Prime);
        app.input.press(Control::Turn(Face::Right));
        app.tick();
        let Animation::Turning { turn, .. } = app.cube.animation() else {
            panic!("no turn started");
        };
        assert_eq!(turn, Turn::new(Face::Right, true));
    }

    #[test]
    fn turn_keys_ignored_while_animating() {
        let mut app = app();
        app.input.press(Control::Turn(Face::Front));
        app.tick();
        app.input.release(Control::Turn(Face::Front));
        app.input.press(Control::Turn(Face::Back));
        for _ in 0..28 {
            app.tick();
        }
        let Animation::Turning { turn, frame, .. } = app.cube.animation() else {
            panic!("front turn ended early");
        };
        assert_eq!(turn.face, Face::Front);
        assert_eq!(frame, 29);

        // The last front frame finishes the turn, the next tick picks up B.
        app.tick();
        assert!(app.cube.is_idle());
        app.tick();
        let Animation::Turning { turn, .. } = app.cube.animation() else {
            panic!("back turn not started");
        };
        assert_eq!(turn.face, Face::Back);
    }

    #[test]
    fn first_held_face_wins() {
        let mut app = app();
        app.input.press(Control::Turn(Face::Right));
        app.input.press(Control::Turn(Face::Top));
        app.tick();
        let Animation::Turning { turn, .. } = app.cube.animation() else {
            panic!("no turn started");
        };
        assert_eq!(turn.face, Face::Top);
    }

    #[test]
    fn scramble_key_starts_single_session() {
        let mut app = app();
        app.input.press(Control::Scramble);
        app.tick();
        assert!(app.cube.scramble().active);
        assert_eq!(app.cube.frames_per_turn(), 10);

        // Holding the key does not restart the session.
        for _ in 0..9 {
            app.tick();
        }
        assert_eq!(app.cube.scramble().completed, 1);
    }

    #[test]
    fn arrow_keys_nudge_camera() {
        let mut app = app();
        app.input.press(Control::YawRight);
        app.input.press(Control::PitchDown);
        app.tick();
        app.tick();
        assert_relative_eq!(app.camera.rotation, Vector3::new(-0.2, 0.2, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn drag_sets_absolute_camera_angles() {
        let mut app = app();
        app.input.press(Control::YawLeft);
        app.input.pointer = Some(Vector2::new(0.5, 0.25));
        app.input.update_mouse_state(true);
        app.tick();
        assert_relative_eq!(app.camera.rotation.y, -0.5 * PI);
        assert_relative_eq!(app.camera.rotation.x, 0.25 * PI);
    }
}
