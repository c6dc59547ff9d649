//! Cube state and the turn animation engine.
//!
//! A turn runs as a small state machine: it starts from idle, rotates the
//! cubies of its layer a little every tick, and once the layer has turned a
//! quarter the visual rotation is dropped and the sticker permutation is
//! applied instead. Scramble sessions chain random turns on top of that.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::cube::{CUBIE_COUNT, Cubie, Face, solved_cubies};
use crate::turn::{Turn, quarter_turn};

/// Tunable speeds and lengths of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SimulationSettings {
    /// Frames a normal turn animates over
    pub(crate) turn_frames: u32,
    /// Frames a scramble turn animates over
    pub(crate) scramble_frames: u32,
    /// Number of turns in a scramble session
    pub(crate) scramble_length: u32,
    /// Seed for scramble choices; random when `None`
    pub(crate) seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            turn_frames: 30,
            scramble_frames: 10,
            scramble_length: 30,
            seed: None,
        }
    }
}

/// What the engine is doing this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Animation {
    Idle,
    Turning {
        turn: Turn,
        /// Frames already applied
        frame: u32,
        /// Frames the whole turn takes
        frames: u32,
    },
}

/// Progress of an automatic scramble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrambleSession {
    pub(crate) active: bool,
    /// Turns finished so far in this session
    pub(crate) completed: u32,
    pub(crate) target: u32,
}

/// The 26 cubies plus everything needed to animate turns on them.
#[derive(Debug, Clone)]
pub(crate) struct CubeState {
    cubies: [Cubie; CUBIE_COUNT],
    animation: Animation,
    scramble: ScrambleSession,
    settings: SimulationSettings,
    rng: ChaCha12Rng,
}

impl CubeState {
    /// Creates a solved cube.
    pub(crate) fn new(settings: SimulationSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            cubies: solved_cubies(),
            animation: Animation::Idle,
            scramble: ScrambleSession {
                target: settings.scramble_length,
                ..ScrambleSession::default()
            },
            settings,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub(crate) fn cubies(&self) -> &[Cubie; CUBIE_COUNT] {
        &self.cubies
    }

    pub(crate) fn animation(&self) -> Animation {
        self.animation
    }

    pub(crate) fn scramble(&self) -> ScrambleSession {
        self.scramble
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.animation == Animation::Idle
    }

    /// Frames the next turn will animate over.
    pub(crate) fn frames_per_turn(&self) -> u32 {
        if self.scramble.active {
            self.settings.scramble_frames
        } else {
            self.settings.turn_frames
        }
    }

    pub(crate) fn turn_frames(&self) -> u32 {
        self.settings.turn_frames
    }

    /// Changes the speed of normal turns, starting with the next one.
    pub(crate) fn set_turn_frames(&mut self, frames: u32) {
        self.settings.turn_frames = frames.max(1);
    }

    /// Whether every outer face shows a single color.
    pub(crate) fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let mut colors = self
                .cubies
                .iter()
                .filter(|cubie| face.is_outer(&cubie.position))
                .map(|cubie| cubie.face(face));
            match colors.next() {
                Some(first) => colors.all(|color| color == first),
                None => true,
            }
        })
    }

    /// Starts animating `turn`.
    ///
    /// # Panics
    /// Panics if another turn is still animating; callers check
    /// [`Self::is_idle`] first.
    pub(crate) fn start_turn(&mut self, turn: Turn) {
        assert!(
            self.is_idle(),
            "turn {turn} started during {:?}",
            self.animation
        );
        let frames = self.frames_per_turn();
        debug!("Turn {turn} over {frames} frames");
        self.animation = Animation::Turning {
            turn,
            frame: 0,
            frames,
        };
    }

    /// Starts a scramble session if none is running and no turn is animating.
    /// Returns whether a session was started.
    pub(crate) fn start_scramble(&mut self) -> bool {
        if self.scramble.active || !self.is_idle() {
            return false;
        }
        info!("Scrambling with {} turns", self.scramble.target);
        self.scramble.active = true;
        self.scramble.completed = 0;
        self.start_random_turn();
        true
    }

    fn start_random_turn(&mut self) {
        let turn = Turn::ALL[self.rng.random_range(0..Turn::ALL.len())];
        self.start_turn(turn);
    }

    /// Applies the logical effect of `turn` immediately, without animating.
    pub(crate) fn apply_turn(&mut self, turn: Turn) {
        for _ in 0..turn.quarter_turns() {
            quarter_turn(&mut self.cubies, turn.layer());
        }
    }

    /// Advances the active animation by one frame.
    pub(crate) fn tick(&mut self) {
        let Animation::Turning {
            turn,
            frame,
            frames,
        } = self.animation
        else {
            return;
        };

        let layer = turn.layer();
        let delta = turn.frame_delta(frames);
        for &index in &layer.indices {
            self.cubies[index].rotation[layer.axis] += delta;
        }

        let frame = frame + 1;
        if frame < frames {
            self.animation = Animation::Turning {
                turn,
                frame,
                frames,
            };
            return;
        }

        self.finish_turn(turn);
        if self.scramble.active {
            self.continue_scramble();
        }
    }

    /// Snaps the cube back to a clean configuration once a turn's animation
    /// has completed.
    fn finish_turn(&mut self, turn: Turn) {
        for cubie in &mut self.cubies {
            cubie.rotation = nalgebra::Vector3::zeros();
        }
        self.apply_turn(turn);
        self.animation = Animation::Idle;
        debug!("Turn {turn} finished");
    }

    fn continue_scramble(&mut self) {
        self.scramble.completed += 1;
        if self.scramble.completed >= self.scramble.target {
            self.scramble.active = false;
            self.scramble.completed = 0;
            info!("Scramble finished");
        } else {
            self.start_random_turn();
        }
    }

    /// Returns to the solved cube, dropping any animation or scramble.
    pub(crate) fn reset(&mut self) {
        info!("Resetting cube");
        self.cubies = solved_cubies();
        self.animation = Animation::Idle;
        self.scramble.active = false;
        self.scramble.completed = 0;
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::cube::Color;

    fn seeded(seed: u64) -> CubeState {
        CubeState::new(SimulationSettings {
            seed: Some(seed),
            ..SimulationSettings::default()
        })
    }

    fn run_to_idle(state: &mut CubeState) -> u32 {
        let mut ticks = 0;
        while !state.is_idle() {
            state.tick();
            ticks += 1;
            assert!(ticks < 10_000, "animation never finished");
        }
        ticks
    }

    fn animate(state: &mut CubeState, turn: Turn) {
        state.start_turn(turn);
        run_to_idle(state);
    }

    fn assert_no_rotation(state: &CubeState) {
        for cubie in state.cubies() {
            assert_eq!(cubie.rotation, Vector3::zeros());
        }
    }

    #[test]
    fn starts_solved_and_idle() {
        let state = seeded(1);
        assert!(state.is_solved());
        assert!(state.is_idle());
        assert_eq!(state.frames_per_turn(), 30);
        assert!(!state.scramble().active);
    }

    #[test]
    fn turn_runs_for_configured_frames() {
        let mut state = seeded(1);
        state.start_turn(Turn::new(Face::Front, false));
        assert_eq!(run_to_idle(&mut state), 30);

        state.set_turn_frames(5);
        state.start_turn(Turn::new(Face::Back, true));
        assert_eq!(run_to_idle(&mut state), 5);

        state.set_turn_frames(0);
        assert_eq!(state.turn_frames(), 1);
    }

    #[test]
    fn rotation_only_accumulates_on_turning_layer() {
        let mut state = seeded(1);
        let turn = Turn::new(Face::Right, false);
        state.start_turn(turn);
        for _ in 0..29 {
            state.tick();
        }

        let layer = turn.layer();
        for (index, cubie) in state.cubies().iter().enumerate() {
            if layer.indices.contains(&index) {
                assert_relative_eq!(cubie.rotation.x, 29.0 * FRAC_PI_2 / 30.0, epsilon = 1e-4);
                assert_eq!(cubie.rotation.y, 0.0);
                assert_eq!(cubie.rotation.z, 0.0);
            } else {
                assert_eq!(cubie.rotation, Vector3::zeros());
            }
        }
        assert!(state.is_solved());

        state.tick();
        assert!(state.is_idle());
        assert_no_rotation(&state);
        assert!(!state.is_solved());
    }

    #[test]
    fn finished_front_turn_changes_only_its_layer() {
        let mut state = seeded(1);
        let before = *state.cubies();
        animate(&mut state, Turn::new(Face::Front, false));
        assert_no_rotation(&state);

        let layer = Face::Front.turn_layer();
        for index in 0..CUBIE_COUNT {
            let changed = state.cubies()[index] != before[index];
            let expected = layer.indices.contains(&index) && index != layer.indices[4];
            assert_eq!(changed, expected, "cubie {index}");
        }
    }

    #[test]
    fn front_turn_moves_corner_stickers() {
        let mut state = seeded(1);
        let top = state.cubies()[0].face(Face::Top);
        animate(&mut state, Turn::new(Face::Front, false));

        assert_eq!(state.cubies()[2].face(Face::Front), Color::WHITE);
        assert_eq!(state.cubies()[2].face(Face::Right), top);
        assert_eq!(state.cubies()[0].face(Face::Top), Color::BLUE);
        assert_eq!(state.cubies()[8].face(Face::Bottom), Color::GREEN);
    }

    #[test]
    fn prime_undoes_normal_turn() {
        for turn in Turn::ALL {
            let mut state = seeded(7);
            animate(&mut state, Turn::new(Face::Left, false));
            animate(&mut state, Turn::new(Face::Top, true));
            let before = *state.cubies();

            animate(&mut state, turn);
            assert_ne!(*state.cubies(), before, "{turn} had no effect");
            animate(&mut state, turn.inverse());
            assert_eq!(*state.cubies(), before, "{turn} then {} differs", turn.inverse());
        }
    }

    #[test]
    fn apply_turn_matches_animated_turn() {
        for turn in Turn::ALL {
            let mut animated = seeded(3);
            let mut instant = seeded(3);
            animate(&mut animated, turn);
            instant.apply_turn(turn);
            assert_eq!(animated.cubies(), instant.cubies(), "{turn}");
        }
    }

    #[test]
    #[should_panic(expected = "started during")]
    fn starting_a_turn_mid_animation_panics() {
        let mut state = seeded(1);
        state.start_turn(Turn::new(Face::Front, false));
        state.tick();
        state.start_turn(Turn::new(Face::Back, false));
    }

    #[test]
    fn scramble_session_runs_its_length_then_restores_speed() {
        let mut state = seeded(42);
        assert!(state.start_scramble());
        assert!(state.scramble().active);
        assert_eq!(state.frames_per_turn(), 10);
        assert!(!state.start_scramble());

        let mut ticks = 0;
        while state.scramble().active {
            assert_eq!(state.scramble().completed, ticks / 10);
            state.tick();
            ticks += 1;
            assert!(ticks <= 300);
        }

        assert_eq!(ticks, 300);
        assert!(state.is_idle());
        assert_no_rotation(&state);
        assert_eq!(state.scramble().completed, 0);
        assert_eq!(state.frames_per_turn(), 30);
        assert!(!state.is_solved());
    }

    #[test]
    fn scramble_waits_for_idle() {
        let mut state = seeded(1);
        state.start_turn(Turn::new(Face::Top, false));
        assert!(!state.start_scramble());
        run_to_idle(&mut state);
        assert!(state.start_scramble());
    }

    #[test]
    fn scrambles_are_reproducible_from_seed() {
        let scramble = |seed| {
            let mut state = seeded(seed);
            state.start_scramble();
            run_to_idle_scramble(&mut state);
            *state.cubies()
        };
        assert_eq!(scramble(9), scramble(9));
    }

    fn run_to_idle_scramble(state: &mut CubeState) {
        while state.scramble().active {
            state.tick();
        }
    }

    #[test]
    fn reset_restores_solved_cube() {
        let mut state = seeded(5);
        state.start_scramble();
        for _ in 0..55 {
            state.tick();
        }
        state.reset();
        assert!(state.is_solved());
        assert!(state.is_idle());
        assert!(!state.scramble().active);
        assert_no_rotation(&state);
        assert_eq!(state.frames_per_turn(), 30);
    }
}
