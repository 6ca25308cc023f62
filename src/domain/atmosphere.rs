use crate::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub base: f32,
    pub scale: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Vec3::from_hex_rgb(0x101030),
            base: 0.6,
            scale: 200.0,
        }
    }
}

impl Fog {
    /// Share of the surface colour that survives `distance` of fog.
    pub fn factor(&self, distance: f32) -> f32 {
        self.base.powf(distance / self.scale).clamp(0.0, 1.0)
    }

    pub fn apply(&self, color: Vec3, distance: f32) -> Vec3 {
        self.color.mix(color, self.factor(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_thickens_with_distance() {
        let fog = Fog::default();
        assert_eq!(fog.factor(0.0), 1.0);
        assert!((fog.factor(200.0) - 0.6).abs() < 1e-6);
        assert!(fog.factor(900.0) < fog.factor(300.0));
    }

    #[test]
    fn far_surfaces_fade_into_fog_color() {
        let fog = Fog::default();
        let faded = fog.apply(Vec3::splat(1.0), 50_000.0);
        assert!(faded.distance(fog.color) < 1e-3);
    }
}
