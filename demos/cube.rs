extern crate polyview;

use polyview::config;
use polyview::mesh;
use polyview::render;

fn main() {
    let settings = config::Settings::default();

    println!(
        "{} ({}x{})",
        settings.title,
        settings.width,
        settings.height,
    );

    let mut viewport = render::Viewport::with_settings(&settings);

    let mut cube = mesh::Mesh::poly_cube();
    cube.point_color = settings.point_color;
    cube.face_color = settings.face_color;

    viewport.add_mesh("cube", cube);
    viewport.draw();

    match viewport.capture("cube.png") {
        Ok(()) => println!("Saved cube.png"),
        Err(e) => eprintln!("Could not save capture: {}", e),
    }
}
