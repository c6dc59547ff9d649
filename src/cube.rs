//! Cubie data structures and geometry.
//!
//! This module defines the sticker colors, the six logical faces, and the
//! individual unit cubes ("cubies") that make up a 3x3x3 Rubik's cube, along
//! with the fixed corner, face and edge topology every cubie shares.

use nalgebra::{Point2, Vector3, Vector4};

use crate::camera::{Camera, Viewport};
use crate::math::rotate;
use crate::paint::DrawTarget;

/// Number of visible cubies. The center of the 3x3x3 grid is never drawn.
pub(crate) const CUBIE_COUNT: usize = 26;

/// Sticker color, packed as 32-bit ARGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Color(pub(crate) u32);

impl Color {
    pub(crate) const WHITE: Color = Color(0xff_ffffff);
    pub(crate) const YELLOW: Color = Color(0xff_ffff00);
    pub(crate) const RED: Color = Color(0xff_ff0000);
    pub(crate) const ORANGE: Color = Color(0xff_ff8800);
    pub(crate) const BLUE: Color = Color(0xff_0000ff);
    pub(crate) const GREEN: Color = Color(0xff_00ff00);
    /// Sentinel for stickers facing the inside of the cube.
    pub(crate) const HIDDEN: Color = Color(0xff_000000);
    /// Wireframe and background color.
    pub(crate) const BLACK: Color = Color(0xff_000000);

    pub(crate) fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub(crate) fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub(crate) fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub(crate) fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl From<Color> for Vector4<f32> {
    /// Converts a packed color to normalized RGBA for rendering.
    fn from(color: Color) -> Self {
        Vector4::new(
            color.red() as f32 / 255.0,
            color.green() as f32 / 255.0,
            color.blue() as f32 / 255.0,
            color.alpha() as f32 / 255.0,
        )
    }
}

/// One of the six logical faces of a cubie (and of the whole cube).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    pub(crate) const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Sticker color of this face on a solved cube.
    pub(crate) fn solved_color(self) -> Color {
        match self {
            Face::Front => Color::WHITE,
            Face::Back => Color::YELLOW,
            Face::Top => Color::RED,
            Face::Bottom => Color::ORANGE,
            Face::Left => Color::BLUE,
            Face::Right => Color::GREEN,
        }
    }

    /// Grid axis (0 = x, 1 = y, 2 = z) and coordinate of the outer layer this
    /// face belongs to. y grows downward and z grows away from the viewer.
    pub(crate) fn layer(self) -> (usize, f32) {
        match self {
            Face::Front => (2, -1.0),
            Face::Back => (2, 1.0),
            Face::Top => (1, -1.0),
            Face::Bottom => (1, 1.0),
            Face::Left => (0, -1.0),
            Face::Right => (0, 1.0),
        }
    }

    /// Whether a cubie at `position` shows this face on the outside.
    pub(crate) fn is_outer(self, position: &Vector3<f32>) -> bool {
        let (axis, coordinate) = self.layer();
        position[axis] == coordinate
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Front => write!(f, "Front"),
            Face::Back => write!(f, "Back"),
            Face::Top => write!(f, "Top"),
            Face::Bottom => write!(f, "Bottom"),
            Face::Left => write!(f, "Left"),
            Face::Right => write!(f, "Right"),
        }
    }
}

/// Corner offsets of a unit cube around its center.
#[rustfmt::skip]
pub(crate) const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5], // 0
    [ 0.5, -0.5, -0.5], // 1
    [ 0.5,  0.5, -0.5], // 2
    [-0.5,  0.5, -0.5], // 3
    [-0.5, -0.5,  0.5], // 4
    [ 0.5, -0.5,  0.5], // 5
    [ 0.5,  0.5,  0.5], // 6
    [-0.5,  0.5,  0.5], // 7
];

/// Corner indices of each face, in [`Face::ALL`] order. Each quad lists its
/// corners in winding order.
#[rustfmt::skip]
pub(crate) const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front
    [4, 5, 6, 7], // back
    [0, 1, 5, 4], // top
    [3, 2, 6, 7], // bottom
    [0, 3, 7, 4], // left
    [1, 2, 6, 5], // right
];

/// Wireframe edges as corner index pairs.
#[rustfmt::skip]
pub(crate) const EDGES: [[usize; 2]; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// A single unit cube of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cubie {
    /// Grid position, each component in {-1, 0, 1}
    pub(crate) position: Vector3<f32>,
    /// Animated rotation angles; zero unless this cubie's layer is turning
    pub(crate) rotation: Vector3<f32>,
    /// Sticker colors in [`Face::ALL`] order
    colors: [Color; 6],
}

impl Cubie {
    pub(crate) fn new(position: Vector3<f32>, colors: [Color; 6]) -> Self {
        Self {
            position,
            rotation: Vector3::zeros(),
            colors,
        }
    }

    /// Creates the cubie at `position` with solved colors: every face on the
    /// outside of the cube gets its color, the rest are hidden.
    pub(crate) fn solved(position: Vector3<f32>) -> Self {
        let colors = Face::ALL.map(|face| {
            if face.is_outer(&position) {
                face.solved_color()
            } else {
                Color::HIDDEN
            }
        });
        Self::new(position, colors)
    }

    pub(crate) fn face(&self, face: Face) -> Color {
        self.colors[face.index()]
    }

    pub(crate) fn set_face(&mut self, face: Face, color: Color) {
        self.colors[face.index()] = color;
    }

    #[cfg(test)]
    pub(crate) fn colors(&self) -> &[Color; 6] {
        &self.colors
    }

    /// Projects the eight corners to the screen.
    ///
    /// Each corner is offset by the grid position, turned by the cubie's own
    /// rotation, moved into camera space and perspective-divided. The `z` of
    /// every returned point is its camera-space depth.
    pub(crate) fn project(&self, camera: &Camera, viewport: &Viewport) -> [Vector3<f32>; 8] {
        CORNERS.map(|corner| {
            let world = rotate(&(Vector3::from(corner) + self.position), &self.rotation);
            viewport.project(&camera.to_camera_space(&world))
        })
    }

    /// Paint-order score of the whole cubie; higher is drawn first.
    pub(crate) fn total_score(&self, camera: &Camera, viewport: &Viewport) -> f32 {
        self.project(camera, viewport)
            .iter()
            .map(|point| viewport.depth_score(point))
            .sum()
    }

    /// Draws the wireframe, then the six faces from farthest to nearest.
    pub(crate) fn draw(&self, camera: &Camera, viewport: &Viewport, target: &mut impl DrawTarget) {
        let projected = self.project(camera, viewport);
        let screen = projected.map(|point| Point2::new(point.x, point.y));

        for [from, to] in EDGES {
            target.line(screen[from], screen[to], Color::BLACK);
        }

        let scores = FACE_CORNERS.map(|corners| {
            corners
                .iter()
                .map(|&index| viewport.depth_score(&projected[index]))
                .sum::<f32>()
        });
        let mut order: Vec<usize> = (0..FACE_CORNERS.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        for face in order {
            let corners = FACE_CORNERS[face].map(|index| screen[index]);
            target.quad(corners, [self.colors[face]; 4]);
        }
    }
}

/// Builds the 26 cubies of a solved cube, ordered by z, then y, then x.
///
/// Indices 0..9 are the front layer, 9..17 the middle slice without its
/// center and 17..26 the back layer.
pub(crate) fn solved_cubies() -> [Cubie; CUBIE_COUNT] {
    let mut positions = Vec::with_capacity(CUBIE_COUNT);
    for z in -1..=1 {
        for y in -1..=1 {
            for x in -1..=1 {
                if (x, y, z) != (0, 0, 0) {
                    positions.push(Vector3::new(x as f32, y as f32, z as f32));
                }
            }
        }
    }
    std::array::from_fn(|i| Cubie::solved(positions[i]))
}
