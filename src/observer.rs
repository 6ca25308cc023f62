use log::{debug, warn};

use crate::domain::{UniverseInstance, UniverseTopology};
use crate::math::Vec3;
use crate::render::CameraPose;

/// A camera move that wrapped through the universe boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Teleport {
    pub requested: Vec3,
    pub corrected: Vec3,
    pub crossings: u32,
    pub entered: UniverseInstance,
}

/// Free-flying viewpoint kept consistent with the universe topology.
///
/// Rays and the camera go through the same `resolve_step`, so the camera is
/// never carried anywhere the rendered geometry would not carry a ray.
#[derive(Clone, Copy, Debug)]
pub struct Observer {
    pose: CameraPose,
    topology: UniverseTopology,
}

impl Observer {
    pub fn new(pose: CameraPose, topology: UniverseTopology) -> Self {
        Self { pose, topology }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Moves the camera by `movement` and re-maps it into the paired instance
    /// when the move leaves the instance it started in. Orientation is kept.
    pub fn advance(&mut self, movement: Vec3) -> Option<Teleport> {
        let old = self.pose.position;
        let new = old + movement;

        if !self.topology.is_inside(old) {
            warn!(
                "camera at {old:?} was outside the universe before moving; leaving it uncorrected"
            );
            self.pose.position = new;
            return None;
        }
        if self.topology.is_inside(new) {
            self.pose.position = new;
            return None;
        }

        let (corrected, crossings) = self.topology.resolve_step(old, new);
        debug!("camera position was {old:?}, moving to {new:?}");
        debug!("camera position is now {corrected:?} after {crossings} crossing(s)");
        self.pose.position = corrected;

        Some(Teleport {
            requested: new,
            corrected,
            crossings,
            entered: UniverseInstance::containing(corrected),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topology::PAIRED_CENTER;
    use crate::math::assert_close;

    fn observer_at(position: Vec3) -> Observer {
        let pose = CameraPose::look_at(
            position,
            position + Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            45.0,
            1.5,
        );
        Observer::new(pose, UniverseTopology::default())
    }

    #[test]
    fn interior_moves_are_applied_verbatim() {
        let mut observer = observer_at(Vec3::new(0.0, 0.0, 100.0));
        assert!(observer.advance(Vec3::new(0.0, 0.0, -50.0)).is_none());
        assert_eq!(observer.pose().position, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn leaving_the_primary_instance_lands_in_the_paired_one() {
        let mut observer = observer_at(Vec3::new(0.0, 0.0, -440.0));
        let forward_before = observer.pose().forward;

        let teleport = observer.advance(Vec3::new(0.0, 0.0, -30.0)).unwrap();

        assert_eq!(teleport.entered, UniverseInstance::Paired);
        assert_eq!(teleport.crossings, 1);
        assert_close(
            observer.pose().position,
            PAIRED_CENTER + Vec3::new(0.0, 0.0, 430.0),
            0.05,
        );
        assert_eq!(observer.pose().forward, forward_before);
    }

    #[test]
    fn position_stays_inside_for_moves_up_to_a_diameter() {
        let topology = UniverseTopology::default();
        let directions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.3, 0.9, -0.3).normalize(),
            Vec3::new(-0.7, 0.1, 0.7).normalize(),
        ];
        for start in [Vec3::new(0.0, 0.0, 0.0), Vec3::new(200.0, -150.0, 300.0)] {
            for direction in directions {
                for length in [10.0, 240.0, 600.0, 899.0] {
                    let mut observer = observer_at(start);
                    observer.advance(direction * length);
                    let position = observer.pose().position;
                    assert!(
                        topology.is_inside(position),
                        "start {start:?} moved {length} along {direction:?} ended at {position:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn flight_keeps_the_invariant_every_frame() {
        let topology = UniverseTopology::default();
        let mut observer = observer_at(Vec3::new(175.0, 100.0, 400.0));
        let step = Vec3::new(0.0, 0.0, -60.0);
        let mut teleports = 0;
        for _ in 0..40 {
            if observer.advance(step).is_some() {
                teleports += 1;
            }
            assert!(topology.is_inside(observer.pose().position));
        }
        assert!(teleports >= 2);
    }
}
