use anyhow::Context;
use log::info;
use std::io::{self, Read};
use std::time::Instant;

use hypersphere::config::{validate_config, vec3_from, DebugOptions, IncomingConfig};
use hypersphere::cpu::render_frame;
use hypersphere::observer::Observer;
use hypersphere::render::validation::validate_render_setup;
use hypersphere::render::{CameraPose, FrameUniforms, RenderSettings};

const DEFAULT_FRAME_RATE: f32 = 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read render config from stdin")?;

    let incoming: IncomingConfig =
        serde_json::from_str(&raw).context("render config is not valid JSON")?;
    let flight = incoming.into_flight();
    validate_config(&flight)?;

    let settings = RenderSettings::from_flight(&flight, DebugOptions::from_env())?;
    let start = CameraPose::from_config(&flight.camera, settings.aspect_ratio());
    validate_render_setup(&settings, &start)?;

    info!(
        "Rendering {} frame(s) at {}x{}, universe radius {}",
        flight.frames.len(),
        settings.width,
        settings.height,
        settings.topology.radius()
    );

    let mut observer = Observer::new(start, settings.topology);
    let total = flight.frames.len();
    for (index, frame) in flight.frames.iter().enumerate() {
        if let Some(teleport) = observer.advance(vec3_from(frame.movement)) {
            info!(
                "Camera wrapped into the {} instance at {:?} (requested {:?}, {} crossing(s))",
                teleport.entered.as_str(),
                teleport.corrected,
                teleport.requested,
                teleport.crossings
            );
        }

        let uniforms = FrameUniforms {
            settings,
            camera: observer.pose(),
            time: frame.time.unwrap_or(index as f32 / DEFAULT_FRAME_RATE),
        };

        let started = Instant::now();
        let image = render_frame(&uniforms);
        let elapsed_ms = started.elapsed().as_millis();
        image
            .save(&frame.output_path)
            .with_context(|| format!("failed to write frame to {}", frame.output_path))?;

        info!(
            "[{}/{}] Rendered frame t={:.3}s in {} ms: {}",
            index + 1,
            total,
            uniforms.time,
            elapsed_ms,
            frame.output_path
        );
    }

    Ok(())
}
