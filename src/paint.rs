//! Back-to-front scene painting.
//!
//! There is no depth buffer: cubies are sorted by their paint score and drawn
//! from farthest to nearest, and every cubie sorts its own faces the same way.
//! Drawing goes through [`DrawTarget`], which the GPU path implements with
//! [`Mesh`].

use nalgebra::{Point2, Vector2, Vector4};

use crate::camera::{Camera, Viewport};
use crate::cube::{Color, Cubie};

/// Width of wireframe lines in logical pixels.
const LINE_WIDTH: f32 = 1.0;

/// Screen-space drawing primitives, in logical pixels with the origin at the
/// top-left corner of the viewport.
pub(crate) trait DrawTarget {
    fn fill_rect(&mut self, origin: Point2<f32>, size: Vector2<f32>, color: Color);
    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color);
    /// Fills a quad whose corners are given in winding order, interpolating
    /// the per-corner colors.
    fn quad(&mut self, corners: [Point2<f32>; 4], colors: [Color; 4]);
}

/// Clears the viewport and draws every cubie back to front.
pub(crate) fn paint_scene(
    cubies: &[Cubie],
    camera: &Camera,
    viewport: &Viewport,
    target: &mut impl DrawTarget,
) {
    target.fill_rect(
        Point2::origin(),
        Vector2::new(viewport.width, viewport.height),
        Color::BLACK,
    );

    let mut scored: Vec<(f32, &Cubie)> = cubies
        .iter()
        .map(|cubie| (cubie.total_score(camera, viewport), cubie))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, cubie) in scored {
        cubie.draw(camera, viewport, target);
    }
}

/// Vertex of the painted triangle list, in logical pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 2],
    pub(crate) color: [f32; 4],
}

/// Triangle list built in paint order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub(crate) fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn push_triangle(&mut self, corners: [Point2<f32>; 3], colors: [Color; 3]) {
        for (corner, color) in corners.into_iter().zip(colors) {
            self.vertices.push(Vertex {
                position: [corner.x, corner.y],
                color: Vector4::from(color).into(),
            });
        }
    }
}

impl DrawTarget for Mesh {
    fn fill_rect(&mut self, origin: Point2<f32>, size: Vector2<f32>, color: Color) {
        let corners = [
            origin,
            origin + Vector2::new(size.x, 0.0),
            origin + size,
            origin + Vector2::new(0.0, size.y),
        ];
        self.quad(corners, [color; 4]);
    }

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) {
        let direction = to - from;
        let length = direction.norm();
        if length <= f32::EPSILON {
            return;
        }
        let normal = Vector2::new(-direction.y, direction.x) * (LINE_WIDTH / (2.0 * length));
        self.quad(
            [from + normal, to + normal, to - normal, from - normal],
            [color; 4],
        );
    }

    fn quad(&mut self, corners: [Point2<f32>; 4], colors: [Color; 4]) {
        let [a, b, c, d] = corners;
        let [ca, cb, cc, cd] = colors;
        self.push_triangle([a, b, c], [ca, cb, cc]);
        self.push_triangle([a, c, d], [ca, cc, cd]);
    }
}
