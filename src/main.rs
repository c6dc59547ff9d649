//! Interactive 3x3x3 Rubik's cube with iced UI.
//!
//! The cube is drawn with a painter's algorithm: cubies and their faces are
//! projected on the CPU, sorted back to front and handed to a wgpu pipeline
//! through iced's shader widget.

use std::time::Instant;

use iced::widget::{Button, Column, Shader, Slider, text};
use iced::{Element, Length, Settings, Size, Subscription, Task, keyboard, window};

mod app;
mod camera;
mod cube;
mod input;
mod math;
mod paint;
mod renderer;
mod shader_widget;
mod simulation;
mod turn;

use app::App;
use input::Control;
use shader_widget::CubeShaderProgram;
use simulation::{Animation, SimulationSettings};

/// Initial window size; the viewport is what remains right of the controls.
const WINDOW_SIZE: Size = Size::new(1120.0, 700.0);
const CONTROLS_WIDTH: f32 = 250.0;

const KEY_HELP: &str = "F B U D L R: turn a face\n\
                        Shift + key: counter-clockwise\n\
                        Space: scramble\n\
                        Arrows / left drag: look around";

/// UI wrapper around the per-tick application state
#[derive(Debug)]
pub(crate) struct CubeApp {
    app: App,
}

/// Messages that the application can receive
#[derive(Debug, Clone)]
pub(crate) enum Message {
    Tick(Instant),
    ControlPressed(Control),
    ControlReleased(Control),
    /// Pointer offset from the viewport center, -1..1 per axis
    PointerMoved(nalgebra::Vector2<f32>),
    PointerButton(bool),
    Scramble,
    Reset,
    TurnFrames(f32),
}

impl CubeApp {
    pub(crate) fn new(settings: SimulationSettings) -> Self {
        Self {
            app: App::new(settings),
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        "Rubik's Cube"
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(_) => self.app.tick(),
            Message::ControlPressed(control) => self.app.input.press(control),
            Message::ControlReleased(control) => self.app.input.release(control),
            Message::PointerMoved(offset) => self.app.input.pointer = Some(offset),
            Message::PointerButton(pressed) => self.app.input.update_mouse_state(pressed),
            Message::Scramble => {
                self.app.cube.start_scramble();
            }
            Message::Reset => self.app.cube.reset(),
            Message::TurnFrames(frames) => self.app.cube.set_turn_frames(frames.round() as u32),
        }

        Task::none()
    }

    fn status(&self) -> String {
        let cube = &self.app.cube;
        let scramble = cube.scramble();
        if scramble.active {
            format!("Scrambling: {}/{}", scramble.completed, scramble.target)
        } else if let Animation::Turning { turn, .. } = cube.animation() {
            format!("Turning {turn}")
        } else if cube.is_solved() {
            "Solved".to_owned()
        } else {
            "Idle".to_owned()
        }
    }

    pub(crate) fn view(&self) -> Element<'_, Message> {
        let controls = Column::new()
            .spacing(20)
            .width(CONTROLS_WIDTH)
            .push(text(self.status()).size(20))
            .push(
                Column::new()
                    .spacing(5)
                    .push(text("Turn Frames"))
                    .push(
                        Slider::new(
                            5.0..=60.0,
                            self.app.cube.turn_frames() as f32,
                            Message::TurnFrames,
                        )
                        .step(1.0)
                        .width(CONTROLS_WIDTH),
                    ),
            )
            .push(
                Button::new("Scramble")
                    .on_press_maybe(self.app.cube.is_idle().then_some(Message::Scramble)),
            )
            .push(Button::new("Reset").on_press(Message::Reset))
            .push(text(KEY_HELP));

        let viewport = Shader::new(CubeShaderProgram::new(
            *self.app.cube.cubies(),
            self.app.camera,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        iced::widget::row![
            iced::widget::container(controls).height(Length::Fill),
            viewport
        ]
        .spacing(10)
        .padding(10)
        .into()
    }

    pub(crate) fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::frames().map(Message::Tick),
            keyboard::on_key_press(|key, _modifiers| {
                Control::from_key(&key).map(Message::ControlPressed)
            }),
            keyboard::on_key_release(|key, _modifiers| {
                Control::from_key(&key).map(Message::ControlReleased)
            }),
        ])
    }
}

/// Entry point for the Rubik's cube application
fn main() -> iced::Result {
    env_logger::builder().format_timestamp(None).init();

    let app = CubeApp::new(SimulationSettings::default());
    iced::application(app.title(), CubeApp::update, CubeApp::view)
        .subscription(CubeApp::subscription)
        .window_size(WINDOW_SIZE)
        .settings(Settings {
            antialiasing: true,
            ..Settings::default()
        })
        .run_with(move || (app, Task::none()))
}
