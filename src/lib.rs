//! Raymarched universe of ringed shells whose outer boundary is glued to a
//! paired copy of itself, plus the camera-side sync that keeps a free-flying
//! viewpoint on the same topology as the rays.

pub mod config;
pub mod cpu;
pub mod domain;
pub mod march;
pub mod math;
pub mod observer;
pub mod render;
pub mod scene;
