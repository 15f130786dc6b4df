use alg;

pub const DEFAULT_FOV: f32 = 60.0;
pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 1000.0;

#[derive(Copy, Clone)]
pub struct Camera {
    pub eye: alg::Vec3,
    pub target: alg::Vec3,
    pub up: alg::Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Camera {
        Camera {
            eye: alg::Vec3::new(-10., 10., -10.),
            target: alg::Vec3::zero(),
            up: alg::Vec3::y_axis(),
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera {
    pub fn view(&self) -> alg::Mat {
        alg::Mat::look_at(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> alg::Mat {
        alg::Mat::perspective(self.fov, aspect, self.near, self.far)
    }
}
