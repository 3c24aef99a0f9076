/// 3D transformation matrix builders
use nalgebra::{Matrix4, Vector3};

/// Convert an angle given in a script (degrees) to radians
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Create a scale matrix
pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
}

/// Create a translation matrix
pub fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Rotation about the x axis (radians, right-handed)
pub fn rotation_x(theta: f64) -> Matrix4<f64> {
    Matrix4::from_axis_angle(&Vector3::x_axis(), theta)
}

/// Rotation about the y axis (radians, right-handed)
pub fn rotation_y(theta: f64) -> Matrix4<f64> {
    Matrix4::from_axis_angle(&Vector3::y_axis(), theta)
}

/// Rotation about the z axis (radians, right-handed)
pub fn rotation_z(theta: f64) -> Matrix4<f64> {
    Matrix4::from_axis_angle(&Vector3::z_axis(), theta)
}

/// Rotation axis named by the `xrotate`, `yrotate` and `zrotate` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn rotation(self, theta: f64) -> Matrix4<f64> {
        match self {
            Axis::X => rotation_x(theta),
            Axis::Y => rotation_y(theta),
            Axis::Z => rotation_z(theta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((degrees_to_radians(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_identity_scale() {
        let matrix = scale(1.0, 1.0, 1.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_x_half_turn() {
        let p = rotation_x(degrees_to_radians(180.0)) * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, -1.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let p = Axis::Z.rotation(degrees_to_radians(90.0)) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 1.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let p = Axis::Y.rotation(degrees_to_radians(90.0)) * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((p - Vector4::new(1.0, 0.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_translation_moves_points_only() {
        let matrix = translation(1.0, 2.0, 3.0);
        let p = matrix * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        let v = matrix * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(v, Vector4::new(1.0, 0.0, 0.0, 0.0));
    }
}
