//! Custom shader widget for Rubik's cube rendering.
//!
//! The widget is stateless apart from pointer tracking: it receives a copy of
//! the cubies and the camera each frame, paints them into a [`Mesh`] on the
//! CPU, and forwards pointer input to the application as messages.

use iced::widget::shader::{self, wgpu};
use iced::{Rectangle, event, mouse};

use crate::Message;
use crate::camera::{Camera, Viewport};
use crate::cube::{CUBIE_COUNT, Cubie};
use crate::paint::{Mesh, paint_scene};
use crate::renderer::Renderer;

/// Custom primitive carrying one painted frame of the cube
#[derive(Debug, Clone)]
pub(crate) struct CubePrimitive {
    pub(crate) mesh: Mesh,
    pub(crate) viewport: Viewport,
}

impl shader::Primitive for CubePrimitive {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        storage: &mut shader::Storage,
        bounds: &Rectangle,
        viewport: &shader::Viewport,
    ) {
        if !storage.has::<Renderer>() {
            let renderer = pollster::block_on(Renderer::new(device, format));
            storage.store(renderer);
        }
        let renderer = storage.get_mut::<Renderer>().unwrap();
        renderer.resize(*bounds, viewport.scale_factor() as f32);
        renderer.update_viewport(queue, &self.viewport);
        renderer.update_vertices(device, queue, self.mesh.vertices());
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        storage: &shader::Storage,
        target: &wgpu::TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        let renderer = storage.get::<Renderer>().unwrap();
        renderer.render(encoder, target, clip_bounds);
    }
}

/// Pointer tracking kept by the widget between events
#[derive(Debug, Default)]
pub(crate) struct CubeShaderState {
    mouse_pressed: bool,
}

/// The shader program that draws the cube
pub(crate) struct CubeShaderProgram {
    cubies: [Cubie; CUBIE_COUNT],
    camera: Camera,
}

impl CubeShaderProgram {
    pub(crate) fn new(cubies: [Cubie; CUBIE_COUNT], camera: Camera) -> Self {
        Self { cubies, camera }
    }
}

impl shader::Program<Message> for CubeShaderProgram {
    type State = CubeShaderState;
    type Primitive = CubePrimitive;

    fn update(
        &self,
        state: &mut Self::State,
        event: shader::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
        shell: &mut iced::advanced::Shell<'_, Message>,
    ) -> (event::Status, Option<Message>) {
        match event {
            shader::Event::Mouse(mouse_event) => {
                handle_mouse_event(state, mouse_event, bounds, cursor, shell)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        bounds: Rectangle,
    ) -> Self::Primitive {
        let viewport = Viewport::new(bounds.width, bounds.height);
        let mut mesh = Mesh::default();
        paint_scene(&self.cubies, &self.camera, &viewport, &mut mesh);
        CubePrimitive { mesh, viewport }
    }
}

/// Turns left-button drags inside the viewport into pointer messages.
fn handle_mouse_event(
    state: &mut CubeShaderState,
    mouse_event: mouse::Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
    shell: &mut iced::advanced::Shell<'_, Message>,
) -> (event::Status, Option<Message>) {
    let viewport = Viewport::new(bounds.width, bounds.height);
    match mouse_event {
        mouse::Event::CursorMoved { .. } => {
            if let Some(position) = cursor.position_in(bounds) {
                let offset = viewport.pointer_offset(position.x, position.y);
                return (event::Status::Captured, Some(Message::PointerMoved(offset)));
            }
        }
        mouse::Event::ButtonPressed(mouse::Button::Left) => {
            if let Some(position) = cursor.position_in(bounds) {
                state.mouse_pressed = true;
                // The press itself aims the camera, before any motion.
                let offset = viewport.pointer_offset(position.x, position.y);
                shell.publish(Message::PointerMoved(offset));
                return (event::Status::Captured, Some(Message::PointerButton(true)));
            }
        }
        mouse::Event::ButtonReleased(mouse::Button::Left) => {
            if state.mouse_pressed {
                state.mouse_pressed = false;
                return (event::Status::Captured, Some(Message::PointerButton(false)));
            }
        }
        mouse::Event::CursorLeft => {
            if state.mouse_pressed {
                state.mouse_pressed = false;
                return (event::Status::Captured, Some(Message::PointerButton(false)));
            }
        }
        _ => {}
    }

    (event::Status::Ignored, None)
}
