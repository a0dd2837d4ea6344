//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it as a PNG.

use std::sync::Arc;

use rt_core::{Light, Material};
use rt_renderer::{
    render_parallel, AxisAlignedBox, Camera, Color, DVec3, Plane, RenderConfig, Scene, SceneNode,
    Sphere,
};
use rt_math::TransformParams;

fn main() {
    println!("RT Ray Tracer - Simple Example");
    println!("==============================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let mut camera = Camera::new()
        .with_resolution(640, 480)
        .with_position(
            DVec3::new(0.0, 4.0, 10.0), // look_from
            DVec3::new(0.0, 1.0, 0.0),  // look_at
            DVec3::Y,                   // vup
        )
        .with_lens(45.0, 1.0);
    if let Err(e) = camera.initialize() {
        eprintln!("Bad camera: {}", e);
        return;
    }

    let config = RenderConfig {
        background: Color::new(0.2, 0.2, 0.8),
        ..Default::default()
    };

    println!("Rendering {}x{}...", camera.image_width, camera.image_height);

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.png";
    match image.save_png(filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save image: {}", e),
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new(Color::splat(0.1));

    let red = Arc::new(Material::new(Color::new(0.9, 0.1, 0.1), Color::splat(0.6), 40.0));
    let gold = Arc::new(Material::new(Color::new(0.8, 0.6, 0.2), Color::splat(0.3), 10.0));
    let white = Arc::new(Material::new(Color::splat(0.9), Color::ZERO, 1.0));
    let black = Arc::new(Material::new(Color::splat(0.1), Color::ZERO, 1.0));

    // Checkered ground
    scene.add_surface(Box::new(Plane::new(DVec3::Y, white).with_checker(black)));

    scene.add_surface(Box::new(Sphere::new(DVec3::new(-1.5, 1.0, 0.0), 1.0, red)));

    // Rotated box standing on the ground
    let transform = TransformParams {
        translation: DVec3::new(1.5, 0.75, 0.0),
        rotation: DVec3::new(0.0, 30.0, 0.0),
        scale: DVec3::ONE,
    };
    let mut node = SceneNode::new(transform.matrix()).with_name("crate");
    node.add_child(Box::new(AxisAlignedBox::new(
        DVec3::splat(-0.75),
        DVec3::splat(0.75),
        gold,
    )));
    scene.add_surface(Box::new(node));

    scene.add_light(Light::point(DVec3::new(4.0, 8.0, 6.0), Color::ONE, 0.8));
    scene.add_light(Light::point(DVec3::new(-6.0, 4.0, 4.0), Color::new(0.4, 0.4, 0.6), 0.5));

    scene
}
