extern crate polyview;

use polyview::alg;
use polyview::config;
use polyview::mesh;
use polyview::render;

// Renders one revolution of the cube and saves each frame.
// Pass an ini path to override the default settings.
fn main() {
    let settings = match std::env::args().nth(1) {
        Some(path) => config::Settings::load(&path),
        None => config::Settings::default(),
    };

    let mut viewport = render::Viewport::with_settings(&settings);
    viewport.add_mesh("cube", mesh::Mesh::poly_cube());

    let frames = 24;

    for frame in 0..frames {
        let angle = frame as f32 * 2. * std::f32::consts::PI / frames as f32;

        {
            let cube = viewport.mesh_mut("cube").unwrap();
            cube.matrix = alg::Mat::rotation(0., angle, 0.);
        }

        viewport.draw();

        let path = format!("spin_{:02}.png", frame);

        if let Err(e) = viewport.capture(&path) {
            eprintln!("Could not save {}: {}", path, e);
            std::process::exit(1);
        }
    }

    println!("Wrote {} frames", frames);
}
