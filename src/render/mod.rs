pub mod settings;
pub mod validation;
pub mod view;

pub use settings::{RenderSettings, Shading, ToneMapping};
pub use view::{CameraPose, FrameUniforms};
