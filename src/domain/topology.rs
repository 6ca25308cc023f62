use thiserror::Error;

use crate::math::Vec3;

/// Distance from the world origin beyond which a point is routed to the paired instance.
pub const ROUTING_CUTOFF: f32 = 1_000.0;
pub const PAIRED_CENTER: Vec3 = Vec3::new(10_000.0, 0.0, 0.0);

const CROSSING_TOLERANCE: f32 = 0.01;
const MAX_CROSSING_ITERATIONS: u32 = 64;
const MAX_CHAINED_CROSSINGS: u32 = 4;
// Keeps the glued entry point strictly inside after f32 rounding near the paired centre.
const EXIT_MARGIN: f32 = 0.005;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TopologyError {
    #[error("universe radius must be finite and > 0, got {0}")]
    InvalidRadius(f32),
    #[error("universe radius {radius} must stay below {limit} so the instances never overlap")]
    RadiusTooLarge { radius: f32, limit: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniverseInstance {
    Primary,
    Paired,
}

impl UniverseInstance {
    /// Locality heuristic: valid only while both radii stay far below the
    /// half-way distance between the two centres.
    pub fn containing(p: Vec3) -> Self {
        if p.length() < ROUTING_CUTOFF {
            Self::Primary
        } else {
            Self::Paired
        }
    }

    pub const fn center(self) -> Vec3 {
        match self {
            Self::Primary => Vec3::ZERO,
            Self::Paired => PAIRED_CENTER,
        }
    }

    pub const fn partner(self) -> Self {
        match self {
            Self::Primary => Self::Paired,
            Self::Paired => Self::Primary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Paired => "paired",
        }
    }
}

/// Result of carrying a step across the universe boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub exit: Vec3,
    pub entry: Vec3,
    pub position: Vec3,
    pub from: UniverseInstance,
    pub to: UniverseInstance,
}

/// Two equally sized spherical instances glued along their boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniverseTopology {
    radius: f32,
}

impl UniverseTopology {
    pub fn new(radius: f32) -> Result<Self, TopologyError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(TopologyError::InvalidRadius(radius));
        }
        if radius >= ROUTING_CUTOFF {
            return Err(TopologyError::RadiusTooLarge {
                radius,
                limit: ROUTING_CUTOFF,
            });
        }
        Ok(Self { radius })
    }

    pub fn radius(self) -> f32 {
        self.radius
    }

    pub fn instance_center_for(self, p: Vec3) -> Vec3 {
        UniverseInstance::containing(p).center()
    }

    pub fn is_inside(self, p: Vec3) -> bool {
        self.is_inside_instance(p, UniverseInstance::containing(p))
    }

    pub fn is_inside_instance(self, p: Vec3, instance: UniverseInstance) -> bool {
        p.distance(instance.center()) < self.radius
    }

    /// Corrects a step that leaves the instance `old` belongs to.
    ///
    /// The exit point at offset `v` from the departing centre is glued to the
    /// point at offset `-v` from the partner centre, where the travel direction
    /// points back inward. The position then advances by the distance the step
    /// had left beyond the exit. The direction of travel is never changed.
    pub fn teleport_across_boundary(self, old: Vec3, new: Vec3) -> Vec3 {
        self.cross(old, new).position
    }

    pub fn cross(self, old: Vec3, new: Vec3) -> Crossing {
        let from = UniverseInstance::containing(old);
        let to = from.partner();
        let exit = self.locate_exit(old, new, from);
        let incident = (new - old).normalize();
        let entry = to.center() - (exit - from.center());
        let position = entry + (incident * new.distance(exit));

        Crossing {
            exit,
            entry,
            position,
            from,
            to,
        }
    }

    /// Resolves a step from a point inside an instance to a point inside an
    /// instance, chaining crossings when a grazing re-entry leaves the partner
    /// again before the step is used up.
    pub fn resolve_step(self, old: Vec3, new: Vec3) -> (Vec3, u32) {
        if self.is_inside(new) {
            return (new, 0);
        }

        let mut start = old;
        let mut end = new;
        let mut crossings = 0;
        while crossings < MAX_CHAINED_CROSSINGS {
            let crossing = self.cross(start, end);
            crossings += 1;
            if self.is_inside_instance(crossing.position, crossing.to) {
                return (crossing.position, crossings);
            }
            start = crossing.entry;
            end = crossing.position;
        }

        (start, crossings)
    }

    /// Binary search for the last point of `old -> new` still inside `instance`.
    fn locate_exit(self, old: Vec3, new: Vec3, instance: UniverseInstance) -> Vec3 {
        let mut delta = new - old;
        let mut step_length = delta.length();
        let mut exit = old;
        let center = instance.center();

        for _ in 0..MAX_CROSSING_ITERATIONS {
            if step_length < CROSSING_TOLERANCE {
                break;
            }
            let probe = exit + delta;
            if probe.distance(center) < self.radius - EXIT_MARGIN {
                exit = probe;
            }
            delta = delta * 0.5;
            step_length *= 0.5;
        }

        exit
    }
}

impl Default for UniverseTopology {
    fn default() -> Self {
        Self { radius: 450.0 }
    }
}
