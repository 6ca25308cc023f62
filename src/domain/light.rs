use crate::math::Vec3;

/// Directional light. `direction` points from the surface towards the light
/// and is used as given, so its length scales the diffuse term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub direction: Vec3,
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1.0, 1.0, 1.0),
            color: Vec3::splat(1.0),
        }
    }
}

impl Light {
    pub fn validate_physical(&self) -> Result<(), String> {
        validate_vec3_finite(self.direction, "direction")?;
        validate_vec3_finite(self.color, "color")?;
        validate_vec3_non_negative(self.color, "color")?;
        if self.direction.length() < 0.0001 {
            return Err("direction vector length must be > 0".into());
        }
        Ok(())
    }
}

fn validate_vec3_finite(value: Vec3, field: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!(
            "{field} components must be finite, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}

fn validate_vec3_non_negative(value: Vec3, field: &str) -> Result<(), String> {
    if value.x < 0.0 || value.y < 0.0 || value.z < 0.0 {
        return Err(format!(
            "{field} components must be >= 0, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}
