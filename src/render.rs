use std;
use std::fs::File;
use std::io;
use std::path::Path;

use fnv;
use png;
use png::HasParameters;

use alg;
use camera;
use config;
use graphics;
use mesh;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Encoding(png::EncodingError),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<png::EncodingError> for Error {
    fn from(error: png::EncodingError) -> Error {
        Error::Encoding(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, out: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Io(ref error) => write!(out, "io error: {}", error),
            Error::Encoding(ref error) => write!(out, "png error: {}", error),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum Primitive {
    Points,
    Triangles,
    Quads,
    Polygon,
}

/// Immediate-mode sink for colored primitive batches
pub trait Pipeline {
    fn begin(&mut self, mode: Primitive);
    fn color(&mut self, color: graphics::Color);
    fn vertex(&mut self, vertex: alg::Vec3);
    fn end(&mut self);
}

// Scoped batch submission; end() runs when the guard drops
pub struct Batch<'a, P: 'a + Pipeline> {
    pipeline: &'a mut P,
}

impl<'a, P: 'a + Pipeline> Batch<'a, P> {
    pub fn new(pipeline: &'a mut P, mode: Primitive) -> Batch<'a, P> {
        pipeline.begin(mode);
        Batch { pipeline }
    }

    pub fn color(&mut self, color: graphics::Color) {
        self.pipeline.color(color);
    }

    pub fn vertex(&mut self, vertex: alg::Vec3) {
        self.pipeline.vertex(vertex);
    }
}

impl<'a, P: 'a + Pipeline> Drop for Batch<'a, P> {
    fn drop(&mut self) {
        self.pipeline.end();
    }
}

pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<graphics::Color>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Framebuffer {
        Framebuffer {
            width,
            height,
            color: vec![graphics::Color::black(); width * height],
            depth: vec![std::f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, background: graphics::Color) {
        for pixel in &mut self.color {
            *pixel = background;
        }

        for depth in &mut self.depth {
            *depth = std::f32::INFINITY;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> graphics::Color {
        self.color[y * self.width + x]
    }

    // Depth-tested write; strictly nearer fragments win
    fn plot(&mut self, x: usize, y: usize, depth: f32, color: graphics::Color) {
        let index = y * self.width + x;

        if depth < self.depth[index] {
            self.depth[index] = depth;
            self.color[index] = color;
        }
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = io::BufWriter::new(file);

        let mut encoder = png::Encoder::new(
            writer,
            self.width as u32,
            self.height as u32,
        );

        encoder.set(png::ColorType::RGB).set(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let mut data = Vec::with_capacity(self.width * self.height * 3);

        for color in &self.color {
            let bytes = color.bytes();
            data.extend_from_slice(&bytes);
        }

        writer.write_image_data(&data)?;

        Ok(())
    }
}

fn edge(a: (f32, f32, f32), b: (f32, f32, f32), p: (f32, f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Software rasterizer targeting a framebuffer.
/// Vertices pass through one combined transform into clip space;
/// primitives touching w <= 0 are dropped rather than clipped.
pub struct Raster<'a> {
    framebuffer: &'a mut Framebuffer,
    transform: alg::Mat,
    color: graphics::Color,
    mode: Option<Primitive>,
    vertices: Vec<[f32; 4]>,
}

impl<'a> Raster<'a> {
    pub fn new(
        framebuffer: &'a mut Framebuffer,
        transform: alg::Mat,
    ) -> Raster<'a> {
        Raster {
            framebuffer,
            transform,
            color: graphics::Color::white(),
            mode: None,
            vertices: Vec::new(),
        }
    }

    // Homogeneous row-vector transform (w = 1)
    fn clip(&self, vertex: alg::Vec3) -> [f32; 4] {
        let m = self.transform;

        [
            m[0][0] * vertex.x + m[1][0] * vertex.y
                + m[2][0] * vertex.z + m[3][0],
            m[0][1] * vertex.x + m[1][1] * vertex.y
                + m[2][1] * vertex.z + m[3][1],
            m[0][2] * vertex.x + m[1][2] * vertex.y
                + m[2][2] * vertex.z + m[3][2],
            m[0][3] * vertex.x + m[1][3] * vertex.y
                + m[2][3] * vertex.z + m[3][3],
        ]
    }

    // Perspective divide, then viewport mapping (top-left origin)
    fn to_screen(&self, clip: [f32; 4]) -> (f32, f32, f32) {
        let w = clip[3];

        (
            (clip[0] / w * 0.5 + 0.5) * self.framebuffer.width as f32,
            (clip[1] / w * 0.5 + 0.5) * self.framebuffer.height as f32,
            clip[2] / w,
        )
    }

    fn plot_point(&mut self, clip: [f32; 4]) {
        if clip[3] <= 0. { return; }

        let (x, y, depth) = self.to_screen(clip);

        if depth < 0. || depth > 1. { return; }
        if x < 0. || y < 0. { return; }

        let (x, y) = (x as usize, y as usize);

        if x >= self.framebuffer.width { return; }
        if y >= self.framebuffer.height { return; }

        let color = self.color;
        self.framebuffer.plot(x, y, depth, color);
    }

    fn fill_triangle(&mut self, a: [f32; 4], b: [f32; 4], c: [f32; 4]) {
        if a[3] <= 0. || b[3] <= 0. || c[3] <= 0. { return; }

        let a = self.to_screen(a);
        let b = self.to_screen(b);
        let c = self.to_screen(c);

        let area = edge(a, b, c);
        if area == 0. { return; }

        let min_x = a.0.min(b.0).min(c.0).floor().max(0.) as usize;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.) as usize;

        let max_x = a.0.max(b.0).max(c.0).ceil()
            .min(self.framebuffer.width as f32) as usize;
        let max_y = a.1.max(b.1).max(c.1).ceil()
            .min(self.framebuffer.height as f32) as usize;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5, 0.);

                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);

                // Accept both windings (no face culling)
                let inside = (w0 >= 0. && w1 >= 0. && w2 >= 0.)
                    || (w0 <= 0. && w1 <= 0. && w2 <= 0.);

                if !inside { continue; }

                // Barycentric depth across the face
                let depth = (w0 * a.2 + w1 * b.2 + w2 * c.2) / area;

                if depth < 0. || depth > 1. { continue; }

                let color = self.color;
                self.framebuffer.plot(x, y, depth, color);
            }
        }
    }
}

impl<'a> Pipeline for Raster<'a> {
    fn begin(&mut self, mode: Primitive) {
        debug_assert!(self.mode.is_none(), "begin() inside an open batch");

        self.mode = Some(mode);
        self.vertices.clear();
    }

    fn color(&mut self, color: graphics::Color) {
        self.color = color;
    }

    fn vertex(&mut self, vertex: alg::Vec3) {
        let clip = self.clip(vertex);
        self.vertices.push(clip);
    }

    fn end(&mut self) {
        let vertices = std::mem::replace(&mut self.vertices, Vec::new());

        match self.mode.take() {
            Some(Primitive::Points) => {
                for vertex in &vertices {
                    self.plot_point(*vertex);
                }
            }

            Some(Primitive::Triangles) => {
                for triangle in vertices.chunks(3) {
                    if triangle.len() < 3 { continue; }
                    self.fill_triangle(triangle[0], triangle[1], triangle[2]);
                }
            }

            Some(Primitive::Quads) => {
                for quad in vertices.chunks(4) {
                    if quad.len() < 4 { continue; }
                    self.fill_triangle(quad[0], quad[1], quad[2]);
                    self.fill_triangle(quad[0], quad[2], quad[3]);
                }
            }

            Some(Primitive::Polygon) => {
                // Convex fan about the first vertex
                for i in 2..vertices.len() {
                    self.fill_triangle(
                        vertices[0],
                        vertices[i - 1],
                        vertices[i],
                    );
                }
            }

            None => (),
        }
    }
}

/// Owns the framebuffer, the camera rig, and the meshes in the scene
pub struct Viewport {
    framebuffer: Framebuffer,
    pub camera: camera::Camera,
    pub background: graphics::Color,
    meshes: fnv::FnvHashMap<String, mesh::Mesh>,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Viewport {
        Viewport {
            framebuffer: Framebuffer::new(width, height),
            camera: camera::Camera::default(),
            background: graphics::Color::white(),
            meshes: fnv::FnvHashMap::default(),
        }
    }

    pub fn with_settings(settings: &config::Settings) -> Viewport {
        let mut viewport = Viewport::new(settings.width, settings.height);

        viewport.camera.fov = settings.fov;
        viewport.camera.near = settings.near;
        viewport.camera.far = settings.far;
        viewport.background = settings.background;

        viewport
    }

    pub fn add_mesh(&mut self, name: &str, mesh: mesh::Mesh) {
        self.meshes.insert(name.to_owned(), mesh);
    }

    pub fn remove_mesh(&mut self, name: &str) -> Option<mesh::Mesh> {
        self.meshes.remove(name)
    }

    pub fn mesh(&self, name: &str) -> Option<&mesh::Mesh> {
        self.meshes.get(name)
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut mesh::Mesh> {
        self.meshes.get_mut(name)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    // Zero size requests are ignored
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 { return; }
        self.framebuffer = Framebuffer::new(width, height);
    }

    pub fn draw(&mut self) {
        self.framebuffer.clear(self.background);

        let aspect = self.framebuffer.width as f32
            / self.framebuffer.height as f32;

        let view_projection = self.camera.view()
            * self.camera.projection(aspect);

        for mesh in self.meshes.values() {
            let transform = mesh.matrix * view_projection;

            let mut raster = Raster::new(&mut self.framebuffer, transform);
            mesh.draw(&mut raster);
        }
    }

    pub fn capture<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.framebuffer.save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use std;
    use alg;
    use graphics;
    use mesh;
    use render::*;

    #[test]
    fn framebuffer_depth() {
        let mut framebuffer = Framebuffer::new(4, 4);
        framebuffer.clear(graphics::Color::black());

        framebuffer.plot(1, 2, 0.5, graphics::Color::red());
        assert!(framebuffer.pixel(1, 2) == graphics::Color::red());

        framebuffer.plot(1, 2, 0.75, graphics::Color::blue());
        assert!(framebuffer.pixel(1, 2) == graphics::Color::red());

        framebuffer.plot(1, 2, 0.25, graphics::Color::blue());
        assert!(framebuffer.pixel(1, 2) == graphics::Color::blue());

        // Ties keep the first write
        framebuffer.plot(1, 2, 0.25, graphics::Color::green());
        assert!(framebuffer.pixel(1, 2) == graphics::Color::blue());
    }

    #[test]
    fn plot_points() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            raster.begin(Primitive::Points);
            raster.vertex(alg::Vec3::zero());
            raster.end();
        }

        // Default color is white; the origin lands on the center
        assert!(framebuffer.pixel(32, 32) == graphics::Color::white());
        assert!(framebuffer.pixel(0, 0) == graphics::Color::black());
    }

    #[test]
    fn color_state_persists() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            raster.begin(Primitive::Points);
            raster.color(graphics::Color::red());
            raster.vertex(alg::Vec3::zero());
            raster.end();

            // Carries into the next batch
            raster.begin(Primitive::Points);
            raster.vertex(alg::Vec3::new(-0.5, 0., 0.));
            raster.end();
        }

        assert!(framebuffer.pixel(32, 32) == graphics::Color::red());
        assert!(framebuffer.pixel(16, 32) == graphics::Color::red());
    }

    #[test]
    fn fill_triangles() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            // One triangle covering the whole viewport
            raster.begin(Primitive::Triangles);
            raster.color(graphics::Color::red());
            raster.vertex(alg::Vec3::new(-1., -1., 0.5));
            raster.vertex(alg::Vec3::new(3., -1., 0.5));
            raster.vertex(alg::Vec3::new(-1., 3., 0.5));
            raster.end();
        }

        assert!(framebuffer.pixel(0, 0) == graphics::Color::red());
        assert!(framebuffer.pixel(32, 32) == graphics::Color::red());
        assert!(framebuffer.pixel(63, 63) == graphics::Color::red());
    }

    #[test]
    fn depth_rejects_farther() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            raster.begin(Primitive::Triangles);
            raster.color(graphics::Color::red());
            raster.vertex(alg::Vec3::new(-1., -1., 0.5));
            raster.vertex(alg::Vec3::new(3., -1., 0.5));
            raster.vertex(alg::Vec3::new(-1., 3., 0.5));
            raster.end();

            raster.begin(Primitive::Triangles);
            raster.color(graphics::Color::blue());
            raster.vertex(alg::Vec3::new(-1., -1., 0.8));
            raster.vertex(alg::Vec3::new(3., -1., 0.8));
            raster.vertex(alg::Vec3::new(-1., 3., 0.8));
            raster.end();

            raster.begin(Primitive::Triangles);
            raster.color(graphics::Color::green());
            raster.vertex(alg::Vec3::new(-1., -1., 0.2));
            raster.vertex(alg::Vec3::new(3., -1., 0.2));
            raster.vertex(alg::Vec3::new(-1., 3., 0.2));
            raster.end();
        }

        assert!(framebuffer.pixel(32, 32) == graphics::Color::green());
    }

    #[test]
    fn fill_quads() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            raster.begin(Primitive::Quads);
            raster.color(graphics::Color::red());
            raster.vertex(alg::Vec3::new(-1., -1., 0.5));
            raster.vertex(alg::Vec3::new(1., -1., 0.5));
            raster.vertex(alg::Vec3::new(1., 1., 0.5));
            raster.vertex(alg::Vec3::new(-1., 1., 0.5));
            raster.end();
        }

        assert!(framebuffer.pixel(0, 0) == graphics::Color::red());
        assert!(framebuffer.pixel(32, 32) == graphics::Color::red());
        assert!(framebuffer.pixel(63, 63) == graphics::Color::red());
    }

    #[test]
    fn fill_polygon_fan() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        {
            let mut raster = Raster::new(
                &mut framebuffer,
                alg::Mat::identity(),
            );

            // Convex pentagon around the center
            raster.begin(Primitive::Polygon);
            raster.color(graphics::Color::green());
            raster.vertex(alg::Vec3::new(-1., -1., 0.5));
            raster.vertex(alg::Vec3::new(1., -1., 0.5));
            raster.vertex(alg::Vec3::new(1., 0., 0.5));
            raster.vertex(alg::Vec3::new(0., 1., 0.5));
            raster.vertex(alg::Vec3::new(-1., 1., 0.5));
            raster.end();
        }

        assert!(framebuffer.pixel(32, 32) == graphics::Color::green());
        assert!(framebuffer.pixel(2, 32) == graphics::Color::green());
    }

    #[test]
    fn reject_behind_eye() {
        let mut framebuffer = Framebuffer::new(64, 64);
        framebuffer.clear(graphics::Color::black());

        // w carries view depth here; nonpositive w culls the primitive
        let transform = alg::Mat::new(
            1., 0., 0., 0.,
            0., 1., 0., 0.,
            0., 0., 1., 1.,
            0., 0., 0., 0.,
        );

        {
            let mut raster = Raster::new(&mut framebuffer, transform);

            raster.begin(Primitive::Points);
            raster.vertex(alg::Vec3::new(0., 0., -1.));
            raster.end();

            raster.begin(Primitive::Triangles);
            raster.vertex(alg::Vec3::new(-1., -1., 0.5));
            raster.vertex(alg::Vec3::new(3., -1., 0.5));
            raster.vertex(alg::Vec3::new(-1., 3., -1.));
            raster.end();
        }

        for y in 0..64 {
            for x in 0..64 {
                assert!(framebuffer.pixel(x, y) == graphics::Color::black());
            }
        }
    }

    #[test]
    fn viewport_registry() {
        let mut viewport = Viewport::new(8, 8);
        viewport.add_mesh("cube", mesh::Mesh::poly_cube());

        assert!(viewport.mesh("cube").is_some());
        assert!(viewport.mesh("missing").is_none());

        viewport.mesh_mut("cube").unwrap().matrix =
            alg::Mat::translation(1., 0., 0.);

        assert!(
            viewport.mesh("cube").unwrap().matrix
                == alg::Mat::translation(1., 0., 0.)
        );

        let removed = viewport.remove_mesh("cube");
        assert!(removed.is_some());
        assert!(viewport.mesh("cube").is_none());
    }

    #[test]
    fn resize_ignores_zero() {
        let mut viewport = Viewport::new(8, 8);

        viewport.resize(0, 16);
        assert!(viewport.framebuffer().width() == 8);

        viewport.resize(16, 12);
        assert!(viewport.framebuffer().width() == 16);
        assert!(viewport.framebuffer().height() == 12);
    }

    #[test]
    fn viewport_draws_cube() {
        let mut viewport = Viewport::new(64, 64);
        viewport.add_mesh("cube", mesh::Mesh::poly_cube());
        viewport.draw();

        // The default camera sees the cube corner-on at the view center;
        // the nearest corner point and its three faces land there
        let center = viewport.framebuffer().pixel(32, 32);
        assert!(center != graphics::Color::white());

        let mut filled = 0;

        for y in 0..64 {
            for x in 0..64 {
                let pixel = viewport.framebuffer().pixel(x, y);

                if pixel == graphics::Color::green() {
                    filled += 1;
                }
            }
        }

        // Filled faces cover a solid patch of the frame
        assert!(filled > 30);

        // The background survives the border
        assert!(viewport.framebuffer().pixel(0, 0) == graphics::Color::white());
    }

    #[test]
    fn capture_png() {
        let mut viewport = Viewport::new(16, 16);
        viewport.draw();

        let path = std::env::temp_dir().join("polyview_capture_test.png");
        viewport.capture(&path).unwrap();

        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);

        std::fs::remove_file(&path).unwrap();
    }
}
