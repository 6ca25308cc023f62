use crate::domain::lattice::{
    distance_to_ring, nearest_shell, rings, shell_color, shell_radius, shells_bracketing,
    CORE_RADIUS, RING_THICKNESS, SHELL_SPACING,
};
use crate::domain::{UniverseInstance, UniverseTopology};
use crate::math::Vec3;

const FAR_SENTINEL: f32 = 100.0;
// Caps the step size near the boundary so crossings are caught close to the surface.
const BOUNDARY_SENTINEL: f32 = 20.0;

/// Scalar field the marcher integrates against.
pub trait DistanceField: Sync {
    fn distance(&self, p: Vec3) -> f32;

    /// Topology that carries rays across the universe boundary, if this field wraps.
    fn wrap_topology(&self) -> Option<UniverseTopology> {
        None
    }
}

/// Rings on concentric shells, mirrored in both universe instances.
#[derive(Clone, Copy, Debug)]
pub struct SceneField {
    topology: UniverseTopology,
}

impl SceneField {
    pub fn new(topology: UniverseTopology) -> Self {
        Self { topology }
    }

    /// Lower bound on the distance to the nearest ring, sampling only the two
    /// shells that bracket the query radius.
    pub fn evaluate(&self, p: Vec3) -> f32 {
        let origin = UniverseInstance::containing(p).center();
        let d = p.distance(origin);
        let radius = self.topology.radius();

        let mut best = if d + SHELL_SPACING >= radius {
            BOUNDARY_SENTINEL
        } else {
            FAR_SENTINEL
        };

        for shell in shells_bracketing(d).shells() {
            if shell == 0 {
                best = best.min(d - CORE_RADIUS);
                continue;
            }
            if shell_radius(shell) > radius {
                continue;
            }
            for ring in rings(shell, origin) {
                let candidate =
                    distance_to_ring(p, ring.center, ring.axis, ring.radius) - RING_THICKNESS;
                best = best.min(candidate);
            }
        }

        best
    }

    pub fn color_at(&self, p: Vec3) -> Vec3 {
        let instance = UniverseInstance::containing(p);
        let d = p.distance(instance.center());
        match instance {
            UniverseInstance::Primary => shell_color(nearest_shell(d)),
            UniverseInstance::Paired => paired_brightness(d),
        }
    }
}

impl DistanceField for SceneField {
    fn distance(&self, p: Vec3) -> f32 {
        self.evaluate(p)
    }

    fn wrap_topology(&self) -> Option<UniverseTopology> {
        Some(self.topology)
    }
}

fn paired_brightness(d: f32) -> Vec3 {
    let level = if d < 50.0 {
        8.0
    } else if d < 150.0 {
        3.0
    } else if d < 250.0 {
        2.0
    } else {
        1.0
    };
    Vec3::splat(level)
}

/// Solid sphere filling each instance, positive inside.
#[derive(Clone, Copy, Debug)]
pub struct CrystalField {
    topology: UniverseTopology,
}

impl CrystalField {
    pub fn new(topology: UniverseTopology) -> Self {
        Self { topology }
    }

    pub fn evaluate(&self, p: Vec3) -> f32 {
        self.topology.radius() - p.distance(self.topology.instance_center_for(p))
    }
}

impl DistanceField for CrystalField {
    fn distance(&self, p: Vec3) -> f32 {
        self.evaluate(p)
    }
}
