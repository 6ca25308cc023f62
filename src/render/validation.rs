use crate::config::ConfigError;

use super::{CameraPose, RenderSettings};

/// Start-up contract checks that need the assembled settings rather than raw config.
pub fn validate_render_setup(
    settings: &RenderSettings,
    camera: &CameraPose,
) -> Result<(), ConfigError> {
    let march = settings.march;
    if !march.epsilon.is_finite() || march.epsilon <= 0.0 {
        return Err(ConfigError::InvalidMarch(format!(
            "epsilon must be finite and > 0, got {}",
            march.epsilon
        )));
    }
    if !march.max_distance.is_finite() || march.max_distance <= march.epsilon {
        return Err(ConfigError::InvalidMarch(format!(
            "maxDistance must be finite and larger than epsilon, got {}",
            march.max_distance
        )));
    }

    let shading = settings.shading;
    shading.light.validate_physical().map_err(ConfigError::InvalidLight)?;
    for (name, value) in [
        ("diffuseIntensity", shading.rings.diffuse_intensity),
        ("specularIntensity", shading.rings.specular_intensity),
        ("shininess", shading.rings.shininess),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidShading(format!(
                "{name} must be finite and >= 0, got {value}"
            )));
        }
    }
    for (name, color) in [
        ("fogColor", shading.fog.color),
        ("crystalColor", shading.crystal_color),
    ] {
        if !color.is_finite() || color.x < 0.0 || color.y < 0.0 || color.z < 0.0 {
            return Err(ConfigError::InvalidShading(format!(
                "{name} components must be finite and >= 0"
            )));
        }
    }

    if !settings.topology.is_inside(camera.position) {
        let p = camera.position;
        return Err(ConfigError::CameraOutsideUniverse {
            position: [p.x, p.y, p.z],
            radius: settings.topology.radius(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn camera_at(position: Vec3) -> CameraPose {
        CameraPose::look_at(position, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 45.0, 1.0)
    }

    #[test]
    fn accepts_default_setup() {
        let settings = RenderSettings::default();
        let camera = camera_at(Vec3::new(175.0, 100.0, 400.0));
        assert!(validate_render_setup(&settings, &camera).is_ok());
    }

    #[test]
    fn rejects_camera_outside_both_instances() {
        let settings = RenderSettings::default();
        let error = validate_render_setup(&settings, &camera_at(Vec3::new(0.0, 0.0, 600.0)))
            .unwrap_err();
        assert!(matches!(error, ConfigError::CameraOutsideUniverse { .. }));
    }

    #[test]
    fn accepts_camera_inside_paired_instance() {
        let settings = RenderSettings::default();
        let camera = camera_at(Vec3::new(10_000.0, 0.0, 300.0));
        assert!(validate_render_setup(&settings, &camera).is_ok());
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let mut settings = RenderSettings::default();
        settings.march.epsilon = 0.0;
        let camera = camera_at(Vec3::new(0.0, 0.0, 100.0));
        assert!(matches!(
            validate_render_setup(&settings, &camera),
            Err(ConfigError::InvalidMarch(_))
        ));
    }

    #[test]
    fn rejects_negative_shininess() {
        let mut settings = RenderSettings::default();
        settings.shading.rings.shininess = -1.0;
        let camera = camera_at(Vec3::new(0.0, 0.0, 100.0));
        assert!(matches!(
            validate_render_setup(&settings, &camera),
            Err(ConfigError::InvalidShading(_))
        ));
    }
}
