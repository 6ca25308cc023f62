use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::domain::UniverseInstance;
use crate::march::{estimate_normal, march};
use crate::math::{Ray, Vec3};
use crate::render::{FrameUniforms, ToneMapping};
use crate::scene::{CrystalField, SceneField};

/// Weight of the scene layer where the crystal sits in front of it.
const SCENE_OVER_CRYSTAL: f32 = 0.75;

/// Colour and travel distance of one ray-marched layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSample {
    pub color: Vec3,
    pub distance: f32,
}

pub fn render_frame(uniforms: &FrameUniforms) -> RgbImage {
    let settings = &uniforms.settings;
    let width = settings.width.max(1);
    let height = settings.height.max(1);
    let width_f = width as f32;
    let height_f = height as f32;
    let mut color_buffer = vec![Vec3::ZERO; width as usize * height as usize];

    color_buffer
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y_u32 = y as u32;
            for (x, color_slot) in row.iter_mut().enumerate() {
                let u = (x as f32 + 0.5) / width_f;
                let v = ((height - 1 - y_u32) as f32 + 0.5) / height_f;
                *color_slot = shade_pixel(uniforms, uniforms.camera.ray_through(u, v));
            }
        });

    let mut image = RgbImage::new(width, height);
    for (index, color) in color_buffer.iter().enumerate() {
        let x = index as u32 % width;
        let y = index as u32 / width;
        image.put_pixel(x, y, to_rgb(*color, settings.tone_mapping));
    }

    image
}

pub fn shade_pixel(uniforms: &FrameUniforms, ray: Ray) -> Vec3 {
    let topology = uniforms.settings.topology;
    let scene = shade_scene(uniforms, &SceneField::new(topology), ray);
    if !uniforms.settings.show_crystal {
        return scene.color;
    }
    let crystal = shade_crystal(uniforms, &CrystalField::new(topology), ray);
    composite(scene, crystal)
}

/// The crystal shows through where it lies in front of the scene; otherwise it
/// is fully occluded.
pub fn composite(scene: LayerSample, crystal: LayerSample) -> Vec3 {
    if scene.distance > crystal.distance {
        crystal.color.mix(scene.color, SCENE_OVER_CRYSTAL)
    } else {
        scene.color
    }
}

fn shade_scene(uniforms: &FrameUniforms, field: &SceneField, ray: Ray) -> LayerSample {
    let march_settings = &uniforms.settings.march;
    let shading = &uniforms.settings.shading;
    let hit = march(field, ray, march_settings);

    if !hit.is_hit(march_settings) {
        return LayerSample {
            color: shading.fog.color,
            distance: hit.distance.max(march_settings.max_distance),
        };
    }

    let normal = estimate_normal(field, hit.point, march_settings.epsilon);
    let light_dir = match hit.instance {
        // The paired instance is lit from the viewer so it reads without a sun.
        UniverseInstance::Paired => -ray.direction,
        UniverseInstance::Primary => shading.light.direction,
    };
    let intensity = shading.rings.intensity(normal, light_dir);
    let color = shading.light.color * (field.color_at(hit.point) * intensity);

    LayerSample {
        color: shading.fog.apply(color, hit.distance),
        distance: hit.distance,
    }
}

fn shade_crystal(uniforms: &FrameUniforms, field: &CrystalField, ray: Ray) -> LayerSample {
    let march_settings = &uniforms.settings.march;
    let shading = &uniforms.settings.shading;
    let hit = march(field, ray, march_settings);

    if !hit.is_hit(march_settings) {
        return LayerSample {
            color: shading.fog.color,
            distance: f32::INFINITY,
        };
    }

    let normal = estimate_normal(field, hit.point, march_settings.epsilon);
    let intensity = shading.crystal.intensity(normal, shading.light.direction);
    let color = shading.light.color * (shading.crystal_color * intensity);

    LayerSample {
        color: shading.fog.apply(color, hit.distance),
        distance: hit.distance,
    }
}

fn to_rgb(color: Vec3, tone_mapping: ToneMapping) -> Rgb<u8> {
    let mapped = match tone_mapping {
        ToneMapping::Clamp => color.clamp01(),
        ToneMapping::Filmic => {
            let curved = filmic_tone_map(color);
            Vec3::new(
                curved.x.powf(1.0 / 2.2),
                curved.y.powf(1.0 / 2.2),
                curved.z.powf(1.0 / 2.2),
            )
            .clamp01()
        }
    };
    let r = (mapped.x * 255.999) as u8;
    let g = (mapped.y * 255.999) as u8;
    let b = (mapped.z * 255.999) as u8;
    Rgb([r, g, b])
}

fn filmic_curve(x: f32) -> f32 {
    let clamped = x.max(0.0);
    let numerator = clamped * ((2.51 * clamped) + 0.03);
    let denominator = clamped * ((2.43 * clamped) + 0.59) + 0.14;
    (numerator / denominator).clamp(0.0, 1.0)
}

fn filmic_tone_map(color: Vec3) -> Vec3 {
    Vec3::new(
        filmic_curve(color.x),
        filmic_curve(color.y),
        filmic_curve(color.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;
    use crate::render::{CameraPose, RenderSettings};

    fn uniforms(width: u32, height: u32) -> FrameUniforms {
        let settings = RenderSettings {
            width,
            height,
            ..RenderSettings::default()
        };
        FrameUniforms {
            settings,
            camera: CameraPose::look_at(
                Vec3::new(175.0, 100.0, 400.0),
                Vec3::new(0.0, 150.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                45.0,
                settings.aspect_ratio(),
            ),
            time: 0.0,
        }
    }

    #[test]
    fn crystal_in_front_shows_through_at_a_quarter() {
        let scene = LayerSample {
            color: Vec3::new(1.0, 0.0, 0.0),
            distance: 300.0,
        };
        let crystal = LayerSample {
            color: Vec3::new(0.0, 0.0, 1.0),
            distance: 50.0,
        };
        assert_close(composite(scene, crystal), Vec3::new(0.75, 0.0, 0.25), 1e-6);
    }

    #[test]
    fn crystal_behind_the_scene_is_occluded() {
        let scene = LayerSample {
            color: Vec3::new(0.2, 0.4, 0.6),
            distance: 40.0,
        };
        let crystal = LayerSample {
            color: Vec3::splat(1.0),
            distance: 90.0,
        };
        assert_eq!(composite(scene, crystal), scene.color);
    }

    #[test]
    fn missed_scene_rays_render_fog() {
        let frame = uniforms(4, 4);
        // A single march step cannot converge, so the ray counts as a miss.
        let mut starved = frame;
        starved.settings.march.max_steps = 1;
        starved.settings.show_crystal = false;
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 300.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        assert_eq!(
            shade_pixel(&starved, ray),
            starved.settings.shading.fog.color
        );
    }

    #[test]
    fn paired_hits_are_lit_from_the_viewer() {
        let frame = uniforms(4, 4);
        let field = SceneField::new(frame.settings.topology);
        // Aims at the paired core from just outside it.
        let ray = Ray {
            origin: crate::domain::topology::PAIRED_CENTER + Vec3::new(0.0, 0.0, 60.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let sample = shade_scene(&frame, &field, ray);
        assert!((sample.distance - 50.0).abs() < 0.01);
        // Head-on viewer light saturates the bright core colour.
        assert!(sample.color.x > 1.0);
    }

    #[test]
    fn renders_frame_with_requested_size() {
        let image = render_frame(&uniforms(16, 9));
        assert_eq!(image.dimensions(), (16, 9));

        let first = *image.get_pixel(0, 0);
        assert!(image.pixels().any(|pixel| *pixel != first));
    }

    #[test]
    fn filmic_mapping_stays_in_range() {
        let bright = to_rgb(Vec3::splat(8.0), ToneMapping::Filmic);
        let dark = to_rgb(Vec3::ZERO, ToneMapping::Filmic);
        assert!(bright.0[0] > 240);
        assert_eq!(dark.0, [0, 0, 0]);
        assert_eq!(to_rgb(Vec3::splat(3.0), ToneMapping::Clamp).0, [255, 255, 255]);
    }
}
