use crate::config::{vec3_from, CameraConfig};
use crate::math::{Ray, Vec3};

use super::RenderSettings;

const NEAR_PLANE: f32 = 0.1;

/// Camera position and orientation; `forward`, `right` and `up` are orthonormal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub vertical_fov_deg: f32,
    pub aspect: f32,
}

impl CameraPose {
    pub fn look_at(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        vertical_fov_deg: f32,
        aspect: f32,
    ) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        Self {
            position,
            forward,
            right,
            up,
            vertical_fov_deg,
            aspect,
        }
    }

    pub fn from_config(camera: &CameraConfig, aspect: f32) -> Self {
        Self::look_at(
            vec3_from(camera.position),
            vec3_from(camera.target),
            vec3_from(camera.up),
            camera.fov_deg,
            aspect,
        )
    }

    /// Full width and height of the near plane.
    pub fn near_plane_extents(&self) -> (f32, f32) {
        let height = 2.0 * NEAR_PLANE * (self.vertical_fov_deg.to_radians() * 0.5).tan();
        (height * self.aspect, height)
    }

    /// Ray through `(u, v)` on the near plane, both in `0..=1` with `v` pointing up.
    pub fn ray_through(&self, u: f32, v: f32) -> Ray {
        let (width, height) = self.near_plane_extents();
        let on_plane = (self.forward * NEAR_PLANE)
            + (self.right * ((u - 0.5) * width))
            + (self.up * ((v - 0.5) * height));
        Ray {
            origin: self.position,
            direction: on_plane.normalize(),
        }
    }
}

/// Everything the per-pixel stage reads for one frame, captured by value.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub settings: RenderSettings,
    pub camera: CameraPose,
    /// Seconds since the flight started; not yet used to animate the field.
    pub time: f32,
}
