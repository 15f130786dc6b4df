use alg;
use graphics;
use render;

/// Indexed polygonal geometry with a local transform.
/// Faces of any arity share one color; loose points get their own.
pub struct Mesh {
    pub points: Vec<alg::Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
    pub polygons: Vec<Vec<u32>>,
    pub point_color: graphics::Color,
    pub face_color: graphics::Color,
    pub matrix: alg::Mat,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh {
            points: Vec::new(),
            triangles: Vec::new(),
            quads: Vec::new(),
            polygons: Vec::new(),
            point_color: graphics::Color::blue(),
            face_color: graphics::Color::green(),
            matrix: alg::Mat::identity(),
        }
    }

    // Unit-radius cube with quad faces
    pub fn poly_cube() -> Mesh {
        let mut mesh = Mesh::new();

        mesh.points = vec![
            alg::Vec3::new( 1.,  1., -1.),
            alg::Vec3::new(-1.,  1., -1.),
            alg::Vec3::new(-1.,  1.,  1.),
            alg::Vec3::new( 1.,  1.,  1.),
            alg::Vec3::new( 1., -1., -1.),
            alg::Vec3::new(-1., -1., -1.),
            alg::Vec3::new(-1., -1.,  1.),
            alg::Vec3::new( 1., -1.,  1.),
        ];

        mesh.quads = vec![
            [0, 1, 2, 3],
            [7, 6, 5, 4],
            [3, 2, 6, 7],
            [4, 5, 1, 2],
            [2, 1, 5, 6],
            [0, 3, 7, 4],
        ];

        mesh
    }

    // Submission order is fixed: points, triangles, quads, then each
    // polygon in its own batch
    pub fn draw<P: render::Pipeline>(&self, pipeline: &mut P) {
        {
            let mut batch = render::Batch::new(
                pipeline,
                render::Primitive::Points,
            );

            batch.color(self.point_color);

            for point in &self.points {
                batch.vertex(*point);
            }
        }

        {
            let mut batch = render::Batch::new(
                pipeline,
                render::Primitive::Triangles,
            );

            batch.color(self.face_color);

            for triangle in &self.triangles {
                for &index in triangle.iter() {
                    batch.vertex(self.points[index as usize]);
                }
            }
        }

        {
            let mut batch = render::Batch::new(
                pipeline,
                render::Primitive::Quads,
            );

            batch.color(self.face_color);

            for quad in &self.quads {
                for &index in quad.iter() {
                    batch.vertex(self.points[index as usize]);
                }
            }
        }

        for polygon in &self.polygons {
            pipeline.color(self.face_color);

            let mut batch = render::Batch::new(
                pipeline,
                render::Primitive::Polygon,
            );

            for &index in polygon.iter() {
                batch.vertex(self.points[index as usize]);
            }
        }
    }
}
