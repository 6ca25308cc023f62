pub mod atmosphere;
pub mod lattice;
pub mod light;
pub mod material;
pub mod topology;

pub use atmosphere::Fog;
pub use light::Light;
pub use material::Material;
pub use topology::{Crossing, TopologyError, UniverseInstance, UniverseTopology};
