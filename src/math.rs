//! Rotation helpers for the cube's 3D points.
//!
//! Points are plain `nalgebra::Vector3<f32>` values, so addition, subtraction
//! and scaling come from nalgebra's operators. Rotations are given as a triple
//! of angles and are always applied about x, then y, then z.

use nalgebra::{Matrix3, Vector3};

#[rustfmt::skip]
pub(crate) fn rotation_x(angle: f32) -> Matrix3<f32> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cos, sin,
        0.0, -sin, cos,
    )
}

#[rustfmt::skip]
pub(crate) fn rotation_y(angle: f32) -> Matrix3<f32> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(
        cos, 0.0, -sin,
        0.0, 1.0, 0.0,
        sin, 0.0, cos,
    )
}

#[rustfmt::skip]
pub(crate) fn rotation_z(angle: f32) -> Matrix3<f32> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(
        cos, -sin, 0.0,
        sin, cos, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Rotates `point` by `angles.x` about the x axis, then by `angles.y` about the
/// y axis, then by `angles.z` about the z axis.
///
/// A positive angle about x turns +z toward +y, about y turns +x toward +z and
/// about z turns +x toward +y. The turn tables rely on these directions.
pub(crate) fn rotate(point: &Vector3<f32>, angles: &Vector3<f32>) -> Vector3<f32> {
    rotation_z(angles.z) * rotation_y(angles.y) * rotation_x(angles.x) * point
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quarter_turns_follow_axis_conventions() {
        let about_x = rotate(&Vector3::new(0.0, 0.0, 1.0), &Vector3::new(FRAC_PI_2, 0.0, 0.0));
        assert_relative_eq!(about_x, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        let about_y = rotate(&Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, FRAC_PI_2, 0.0));
        assert_relative_eq!(about_y, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let about_z = rotate(&Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, FRAC_PI_2));
        assert_relative_eq!(about_z, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn axes_are_applied_x_then_y_then_z() {
        let point = Vector3::new(0.3, -1.2, 2.5);
        let angles = Vector3::new(0.4, -1.1, 2.0);

        let stepwise = rotate(
            &rotate(&rotate(&point, &Vector3::new(angles.x, 0.0, 0.0)), &Vector3::new(0.0, angles.y, 0.0)),
            &Vector3::new(0.0, 0.0, angles.z),
        );
        assert_relative_eq!(rotate(&point, &angles), stepwise, epsilon = 1e-5);
    }

    #[test]
    fn inverse_angles_in_reverse_order_round_trip() {
        let points = [
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(-1.5, 0.25, 3.0),
            Vector3::new(0.0, -2.0, -0.75),
        ];
        let angle_sets = [
            Vector3::new(FRAC_PI_2, 0.0, 0.0),
            Vector3::new(0.3, 1.2, -0.7),
            Vector3::new(-2.5, 0.1, 3.1),
        ];

        for point in &points {
            for angles in &angle_sets {
                let rotated = rotate(point, angles);
                let back = rotate(
                    &rotate(
                        &rotate(&rotated, &Vector3::new(0.0, 0.0, -angles.z)),
                        &Vector3::new(0.0, -angles.y, 0.0),
                    ),
                    &Vector3::new(-angles.x, 0.0, 0.0),
                );
                assert_relative_eq!(back, *point, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn rotate_leaves_input_untouched_and_preserves_length() {
        let point = Vector3::new(1.0, 2.0, 3.0);
        let rotated = rotate(&point, &Vector3::new(0.7, 0.2, -0.4));
        assert_eq!(point, Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(rotated.norm(), point.norm(), epsilon = 1e-5);
    }
}
