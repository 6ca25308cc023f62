use crate::config::{vec3_from, ConfigError, DebugOptions, FlightConfig, UniverseConfig};
use crate::domain::{Fog, Light, Material, UniverseTopology};
use crate::march::MarchSettings;
use crate::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMapping {
    Clamp,
    Filmic,
}

impl ToneMapping {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(Self::Clamp),
            "filmic" => Some(Self::Filmic),
            _ => None,
        }
    }
}

/// Lighting inputs shared by both layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub light: Light,
    pub fog: Fog,
    pub rings: Material,
    pub crystal: Material,
    pub crystal_color: Vec3,
}

impl Shading {
    pub fn from_universe(universe: &UniverseConfig) -> Self {
        let (diffuse, specular, shininess) = (
            universe.diffuse_intensity,
            universe.specular_intensity,
            universe.shininess,
        );
        Self {
            light: Light {
                direction: vec3_from(universe.light_direction),
                color: vec3_from(universe.light_color),
            },
            fog: Fog {
                color: vec3_from(universe.fog_color),
                ..Fog::default()
            },
            rings: Material::rings(diffuse, specular, shininess),
            crystal: Material::crystal(diffuse, specular, shininess),
            crystal_color: vec3_from(universe.crystal_color),
        }
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self::from_universe(&UniverseConfig::default())
    }
}

/// Fixed for the whole run; read by every pixel worker.
#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub topology: UniverseTopology,
    pub march: MarchSettings,
    pub shading: Shading,
    pub tone_mapping: ToneMapping,
    pub show_crystal: bool,
}

impl RenderSettings {
    pub fn from_flight(flight: &FlightConfig, debug: DebugOptions) -> Result<Self, ConfigError> {
        let universe = &flight.universe;
        Ok(Self {
            width: flight.width,
            height: flight.height,
            topology: UniverseTopology::new(universe.radius)?,
            march: MarchSettings {
                epsilon: universe.epsilon,
                max_distance: universe.max_distance,
                max_steps: universe.max_steps.max(1),
            },
            shading: Shading::from_universe(universe),
            tone_mapping: ToneMapping::parse(&universe.tone_mapping).ok_or_else(|| {
                ConfigError::InvalidShading(format!(
                    "toneMapping must be 'clamp' or 'filmic', got '{}'",
                    universe.tone_mapping
                ))
            })?,
            show_crystal: !debug.hide_crystal,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            topology: UniverseTopology::default(),
            march: MarchSettings::default(),
            shading: Shading::default(),
            tone_mapping: ToneMapping::Clamp,
            show_crystal: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_mapping_parse_accepts_known_modes_only() {
        assert_eq!(ToneMapping::parse("FILMIC"), Some(ToneMapping::Filmic));
        assert_eq!(ToneMapping::parse(" clamp "), Some(ToneMapping::Clamp));
        assert_eq!(ToneMapping::parse("filmc"), None);
    }

    #[test]
    fn default_shading_uses_layer_ambients() {
        let shading = Shading::default();
        assert_eq!(shading.rings.ambient, 0.4);
        assert_eq!(shading.crystal.ambient, 0.25);
        assert_eq!(shading.rings.shininess, 16.0);
        assert_eq!(shading.crystal_color, Vec3::from_hex_rgb(0x87ceeb));
    }
}
