//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/boxes.xml

use std::env;

use rt_core::{load_scene, Surface};

fn print_surface(surface: &Surface, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    match surface {
        Surface::Sphere { center, radius, material } => println!(
            "{}sphere at ({:.2}, {:.2}, {:.2}) r={:.2} [{}]",
            indent,
            center.x,
            center.y,
            center.z,
            radius,
            material.name.as_deref().unwrap_or("unnamed")
        ),
        Surface::Plane { normal, material2, .. } => println!(
            "{}plane n=({:.2}, {:.2}, {:.2}){}",
            indent,
            normal.x,
            normal.y,
            normal.z,
            if material2.is_some() { " checkered" } else { "" }
        ),
        Surface::Box { min, max, .. } => println!(
            "{}box ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            indent, min.x, min.y, min.z, max.x, max.y, max.z
        ),
        Surface::Node(node) => {
            let t = node.transform.translation;
            println!(
                "{}node {} at ({:.2}, {:.2}, {:.2})",
                indent,
                node.name.as_deref().unwrap_or("<anonymous>"),
                t.x,
                t.y,
                t.z
            );
            for child in &node.children {
                print_surface(child, depth + 1);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-file>");
        println!("\nExample:");
        println!("  cargo run --example load_scene -- scenes/boxes.xml");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let camera = &scene.render.camera;
            println!("\n=== Scene ===");
            println!("Primitives: {}", scene.primitive_count());
            println!("Lights: {}", scene.light_count());
            println!(
                "Camera: {}x{} from ({:.2}, {:.2}, {:.2}), fov {:.1}",
                camera.width, camera.height, camera.from.x, camera.from.y, camera.from.z, camera.fov
            );
            println!("Output: {}", scene.render.output);

            println!("\n--- Surfaces ---");
            for surface in &scene.surfaces {
                print_surface(surface, 0);
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
