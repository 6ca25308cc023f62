use crate::math::Vec3;

/// Surface finish for one rendered layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
    pub shininess: f32,
}

impl Material {
    pub fn rings(diffuse_intensity: f32, specular_intensity: f32, shininess: f32) -> Self {
        Self {
            ambient: 0.4,
            diffuse_intensity,
            specular_intensity,
            shininess,
        }
    }

    pub fn crystal(diffuse_intensity: f32, specular_intensity: f32, shininess: f32) -> Self {
        Self {
            ambient: 0.25,
            ..Self::rings(diffuse_intensity, specular_intensity, shininess)
        }
    }

    /// Ambient plus diffuse plus a specular lobe raised from the diffuse term.
    pub fn intensity(&self, normal: Vec3, light_dir: Vec3) -> f32 {
        let diffuse = normal.dot(light_dir).max(0.0) * self.diffuse_intensity;
        let specular = diffuse.powf(self.shininess) * self.specular_intensity;
        specular + self.ambient + diffuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_facing_surface_gets_ambient_only() {
        let material = Material::rings(0.5, 3.0, 16.0);
        let intensity = material.intensity(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(intensity, 0.4);
    }

    #[test]
    fn facing_surface_adds_diffuse_and_specular() {
        let material = Material::crystal(0.5, 3.0, 2.0);
        let intensity = material.intensity(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        // 0.5^2 * 3 + 0.25 + 0.5
        assert!((intensity - 1.5).abs() < 1e-6);
    }
}
