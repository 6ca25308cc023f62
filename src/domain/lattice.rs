use std::f32::consts::PI;

use crate::math::Vec3;

pub const SHELL_SPACING: f32 = 100.0;
pub const OUTERMOST_SHELL: u32 = 4;
pub const CORE_RADIUS: f32 = 10.0;
pub const RING_THICKNESS: f32 = 2.0;

const NEUTRAL_COLOR: Vec3 = Vec3::splat(1.0);

/// The two shells whose radii bracket a radial distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellPair {
    pub inner: u32,
    pub outer: u32,
}

impl ShellPair {
    pub fn shells(self) -> [u32; 2] {
        [self.inner, self.outer]
    }
}

/// A latitude circle on one shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Vec3,
    pub axis: Vec3,
    pub radius: f32,
}

pub fn shell_radius(shell: u32) -> f32 {
    shell as f32 * SHELL_SPACING
}

pub fn shells_bracketing(distance: f32) -> ShellPair {
    let inner = ((distance.max(0.0) / SHELL_SPACING).floor() as u32).min(OUTERMOST_SHELL);
    ShellPair {
        inner,
        outer: inner + 1,
    }
}

/// Shell whose radius is nearest to `distance`.
pub fn nearest_shell(distance: f32) -> u32 {
    ((distance.max(0.0) + (SHELL_SPACING * 0.5)) / SHELL_SPACING).floor() as u32
}

/// Zero means the shell carries no rings (the core, or past the outermost shell).
pub fn ring_count(shell: u32) -> u32 {
    match shell {
        1 => 5,
        2 => 7,
        3 => 9,
        4 => 13,
        _ => 0,
    }
}

pub fn pole_axis(shell: u32) -> Vec3 {
    match shell {
        2 => Vec3::new(0.123, 0.0, 1.0).normalize(),
        3 => Vec3::new(0.0, 0.06, 1.0).normalize(),
        4 => Vec3::new(-0.1, -0.1, 1.0).normalize(),
        _ => Vec3::new(0.0, 0.0, 1.0),
    }
}

pub fn shell_color(shell: u32) -> Vec3 {
    match shell {
        0 => Vec3::new(0.32, 0.41, 0.21),
        1 => Vec3::new(0.76, 0.76, 0.77),
        2 => Vec3::new(0.75, 0.00, 0.00),
        3 => Vec3::new(0.50, 0.93, 0.50),
        4 => Vec3::new(0.99, 0.87, 0.14),
        _ => NEUTRAL_COLOR,
    }
}

/// Rings of `shell` around an instance centre, evenly spaced in polar angle.
pub fn rings(shell: u32, instance_center: Vec3) -> impl Iterator<Item = Ring> {
    let count = ring_count(shell);
    let axis = pole_axis(shell);
    let radius = shell_radius(shell);

    (0..count).map(move |j| {
        let theta = PI * ((j as f32 + 0.5) / count as f32);
        Ring {
            center: instance_center + (axis * (radius * theta.cos())),
            axis,
            radius: radius * theta.sin(),
        }
    })
}

/// Exact distance from `p` to a circle in 3D.
pub fn distance_to_ring(p: Vec3, ring_center: Vec3, axis: Vec3, ring_radius: f32) -> f32 {
    let delta = p - ring_center;
    let along = axis.dot(delta);
    let perpendicular = delta - (axis * along);
    let radial = perpendicular.length();

    if radial > 0.0 {
        let excess = radial - ring_radius;
        ((along * along) + (excess * excess)).sqrt()
    } else {
        ((along * along) + (ring_radius * ring_radius)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_tables_match_layout() {
        assert_eq!(shell_radius(2), 200.0);
        assert_eq!(ring_count(2), 7);
        assert_eq!(
            [1, 2, 3, 4].map(ring_count),
            [5, 7, 9, 13],
            "ring counts per shell"
        );
        assert_eq!(ring_count(0), 0);
        assert_eq!(ring_count(9), 0);
        assert_eq!(rings(3, Vec3::ZERO).count(), 9);
        assert_eq!(rings(0, Vec3::ZERO).count(), 0);
    }

    #[test]
    fn out_of_range_shells_fall_back_to_neutral_values() {
        assert_eq!(shell_color(5), NEUTRAL_COLOR);
        assert_eq!(pole_axis(17), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn brackets_radius_with_capped_inner_shell() {
        assert_eq!(shells_bracketing(0.0), ShellPair { inner: 0, outer: 1 });
        assert_eq!(shells_bracketing(250.0), ShellPair { inner: 2, outer: 3 });
        assert_eq!(shells_bracketing(449.0), ShellPair { inner: 4, outer: 5 });
        assert_eq!(shells_bracketing(5_000.0), ShellPair { inner: 4, outer: 5 });
    }

    #[test]
    fn nearest_shell_rounds_to_closest_radius() {
        assert_eq!(nearest_shell(40.0), 0);
        assert_eq!(nearest_shell(160.0), 2);
        assert_eq!(nearest_shell(449.0), 4);
    }

    #[test]
    fn point_on_circle_is_at_zero_distance() {
        let axis = Vec3::new(0.0, 0.0, 1.0);
        let center = Vec3::new(5.0, -3.0, 20.0);
        let p = center + Vec3::new(0.6, 0.8, 0.0) * 70.0;
        assert!(distance_to_ring(p, center, axis, 70.0).abs() < 1e-4);
    }

    #[test]
    fn off_plane_distance_is_exact() {
        let axis = Vec3::new(0.0, 1.0, 0.0);
        let p = Vec3::new(13.0, 4.0, 0.0);
        let distance = distance_to_ring(p, Vec3::ZERO, axis, 10.0);
        assert!((distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn point_on_axis_uses_closed_form_fallback() {
        let axis = Vec3::new(0.0, 0.0, 1.0);
        let distance = distance_to_ring(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, axis, 3.0);
        assert!((distance - 5.0).abs() < 1e-6);
        assert!(distance.is_finite());
    }

    #[test]
    fn rings_lie_on_their_shell() {
        let origin = Vec3::new(10_000.0, 0.0, 0.0);
        for ring in rings(4, origin) {
            let offset = ring.center - origin;
            let on_sphere = (offset.dot(offset) + (ring.radius * ring.radius)).sqrt();
            assert!((on_sphere - shell_radius(4)).abs() < 0.05);
            assert!(ring.radius > 0.0);
        }
    }
}
