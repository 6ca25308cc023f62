use crate::domain::UniverseInstance;
use crate::math::{Ray, Vec3};
use crate::scene::DistanceField;

const TETRAHEDRON_SCALE: f32 = 0.5773;
const TETRAHEDRON: [Vec3; 4] = [
    Vec3::new(TETRAHEDRON_SCALE, -TETRAHEDRON_SCALE, -TETRAHEDRON_SCALE),
    Vec3::new(-TETRAHEDRON_SCALE, -TETRAHEDRON_SCALE, TETRAHEDRON_SCALE),
    Vec3::new(-TETRAHEDRON_SCALE, TETRAHEDRON_SCALE, -TETRAHEDRON_SCALE),
    Vec3::new(TETRAHEDRON_SCALE, TETRAHEDRON_SCALE, TETRAHEDRON_SCALE),
];
// Keeps tap offsets well above the f32 spacing of the sample coordinates.
const NORMAL_PRECISION_FACTOR: f32 = 128.0 * f32::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    /// Hit threshold. Near the paired centre (x = 10000) this is about one f32
    /// ulp, so more grazing rays there run out of steps than in the primary.
    pub epsilon: f32,
    pub max_distance: f32,
    pub max_steps: u32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            max_distance: 1_000.0,
            max_steps: 120,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MarchResult {
    pub point: Vec3,
    pub distance: f32,
    pub steps: u32,
    pub crossings: u32,
    pub converged: bool,
    pub instance: UniverseInstance,
}

impl MarchResult {
    /// A ray that neither converged nor stayed within range renders as background.
    pub fn is_hit(&self, settings: &MarchSettings) -> bool {
        self.converged && self.distance < settings.max_distance
    }
}

/// Sphere-traces `ray` through `field`, wrapping across the universe boundary
/// when the field carries a topology.
pub fn march(field: &impl DistanceField, ray: Ray, settings: &MarchSettings) -> MarchResult {
    let topology = field.wrap_topology();
    let mut travelled = 0.0;
    let mut point = ray.origin;
    let mut steps = 0;
    let mut crossings = 0;
    let mut converged = false;

    for _ in 0..settings.max_steps {
        let step = field.distance(point);
        if step < settings.epsilon {
            converged = true;
            break;
        }
        if travelled >= settings.max_distance {
            break;
        }

        travelled += step;
        let mut next = point + (ray.direction * step);
        if let Some(topology) = topology {
            let (resolved, count) = topology.resolve_step(point, next);
            next = resolved;
            crossings += count;
        }
        point = next;
        steps += 1;
    }

    MarchResult {
        point,
        distance: travelled,
        steps,
        crossings,
        converged,
        instance: UniverseInstance::containing(point),
    }
}

/// Four-tap gradient estimate on a regular tetrahedron of radius `epsilon`.
pub fn estimate_normal(field: &impl DistanceField, p: Vec3, epsilon: f32) -> Vec3 {
    let offset = epsilon.max(p.max_abs_component() * NORMAL_PRECISION_FACTOR);
    TETRAHEDRON
        .iter()
        .fold(Vec3::ZERO, |sum, &e| sum + (e * field.distance(p + (e * offset))))
        .normalize()
}
