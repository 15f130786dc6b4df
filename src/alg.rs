use std;

#[derive(Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    #[inline]
    pub fn x_axis() -> Vec3 {
        Vec3::new(1., 0., 0.)
    }

    #[inline]
    pub fn y_axis() -> Vec3 {
        Vec3::new(0., 1., 0.)
    }

    #[inline]
    pub fn z_axis() -> Vec3 {
        Vec3::new(0., 0., 1.)
    }

    #[inline]
    pub fn zero() -> Vec3 {
        Vec3::new(0., 0., 0.)
    }

    #[inline]
    pub fn one() -> Vec3 {
        Vec3::new(1., 1., 1.)
    }

    pub fn mag_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn mag(self) -> f32 {
        self.mag_squared().sqrt()
    }

    // Zero input divides by zero; the result propagates inf/NaN
    pub fn norm(self) -> Vec3 {
        let inverse_len = 1. / self.mag();

        Vec3::new(
            self.x * inverse_len,
            self.y * inverse_len,
            self.z * inverse_len,
        )
    }

    pub fn normalize(&mut self) {
        let inverse_len = 1. / self.mag();

        self.x *= inverse_len;
        self.y *= inverse_len;
        self.z *= inverse_len;
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    // Mirrors self about the axis (not across the plane it spans)
    pub fn reflect(self, axis: Vec3) -> Vec3 {
        axis * (2. * self.dot(axis)) - self
    }

    // Resolves the direction against a normalized copy of other,
    // then scales other itself by that length
    pub fn project(self, other: Vec3) -> Vec3 {
        other * self.dot(other.norm())
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
        )
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
        )
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Vec3) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, scalar: f32) -> Vec3 {
        Vec3::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
        )
    }
}

impl std::ops::Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, vec: Vec3) -> Vec3 {
        vec * self
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, scalar: f32) -> Vec3 {
        Vec3::new(
            self.x / scalar,
            self.y / scalar,
            self.z / scalar,
        )
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, out: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            out,
            "( {}, {}, {} )",
            self.x, self.y, self.z,
        )
    }
}

// Checkerboard signs for the cofactor expansion
const COFACTOR_SIGNS: [[f32; 4]; 4] = [
    [ 1., -1.,  1., -1.],
    [-1.,  1., -1.,  1.],
    [ 1., -1.,  1., -1.],
    [-1.,  1., -1.,  1.],
];

fn det3(m: [[f32; 3]; 3]) -> f32 {
    m[0][0] * m[1][1] * m[2][2]
        + m[0][1] * m[1][2] * m[2][0]
        + m[0][2] * m[1][0] * m[2][1]
        - m[0][2] * m[1][1] * m[2][0]
        - m[0][1] * m[1][0] * m[2][2]
        - m[0][0] * m[1][2] * m[2][1]
}

#[derive(Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat {

    /*
     * Matrices use the row-vector convention:
     * basis vectors sit in rows 0-2, translation in row 3
     * Mat * Vec3 treats the vector as a row on the left
     */

    pub rows: [[f32; 4]; 4],
}

impl Mat {
    pub fn new(
        x0: f32, x1: f32, x2: f32, x3: f32,
        y0: f32, y1: f32, y2: f32, y3: f32,
        z0: f32, z1: f32, z2: f32, z3: f32,
        w0: f32, w1: f32, w2: f32, w3: f32,
    ) -> Mat {
        Mat {
            rows: [
                [x0, x1, x2, x3],
                [y0, y1, y2, y3],
                [z0, z1, z2, z3],
                [w0, w1, w2, w3],
            ],
        }
    }

    #[inline]
    pub fn identity() -> Mat {
        Mat::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Mat {
        Mat::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
              x,   y,   z, 1.0,
        )
    }

    pub fn translation_vec(translation: Vec3) -> Mat {
        Mat::translation(translation.x, translation.y, translation.z)
    }

    pub fn rotation_x(rad: f32) -> Mat {
        Mat::new(
            1.0,        0.0,       0.0, 0.0,
            0.0,  rad.cos(), rad.sin(), 0.0,
            0.0, -rad.sin(), rad.cos(), 0.0,
            0.0,        0.0,       0.0, 1.0,
        )
    }

    pub fn rotation_y(rad: f32) -> Mat {
        Mat::new(
            rad.cos(), 0.0, -rad.sin(), 0.0,
                  0.0, 1.0,        0.0, 0.0,
            rad.sin(), 0.0,  rad.cos(), 0.0,
                  0.0, 0.0,        0.0, 1.0,
        )
    }

    pub fn rotation_z(rad: f32) -> Mat {
        Mat::new(
             rad.cos(), rad.sin(), 0.0, 0.0,
            -rad.sin(), rad.cos(), 0.0, 0.0,
                   0.0,       0.0, 1.0, 0.0,
                   0.0,       0.0, 0.0, 1.0,
        )
    }

    pub fn rotation(x: f32, y: f32, z: f32) -> Mat {
        Mat::rotation_x(x) * Mat::rotation_y(y) * Mat::rotation_z(z)
    }

    // Returns view matrix (inverted camera pose)
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat {
        let forward = (target - eye).norm();
        let right = up.cross(forward).norm();
        let up = forward.cross(right);

        let pose = Mat::new(
              right.x,   right.y,   right.z, 0.0,
                 up.x,      up.y,      up.z, 0.0,
            forward.x, forward.y, forward.z, 0.0,
                eye.x,     eye.y,     eye.z, 1.0,
        );

        pose.inverse()
    }

    // Input: vertical field of view, screen aspect ratio, near and far planes
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat {
        // Perspective scaling (rectilinear)
        let y_scale = 1. / (0.5 * fov).to_radians().tan();
        let x_scale = y_scale / aspect;

        // Fit depth into 0-1 clip space
        let z_scale = 1. / (far - near);
        let z_offset = -near / (far - near);

        Mat::new(
            x_scale,      0.0,      0.0, 0.0,
                0.0, -y_scale,      0.0, 0.0, // Flip for raster space
                0.0,      0.0,  z_scale, 1.0, // Left-handed (scaling factor)
                0.0,      0.0, z_offset, 0.0,
        )
    }

    pub fn x_vector(self) -> Vec3 {
        Vec3::new(self.rows[0][0], self.rows[0][1], self.rows[0][2])
    }

    pub fn y_vector(self) -> Vec3 {
        Vec3::new(self.rows[1][0], self.rows[1][1], self.rows[1][2])
    }

    pub fn z_vector(self) -> Vec3 {
        Vec3::new(self.rows[2][0], self.rows[2][1], self.rows[2][2])
    }

    pub fn transpose(self) -> Mat {
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = self.rows[c][r];
            }
        }

        Mat { rows }
    }

    // Signed determinant of the 3x3 left after deleting row and col
    pub fn minor(self, row: usize, col: usize) -> f32 {
        let mut sub = [[0.0; 3]; 3];
        let mut r = 0;

        for i in 0..4 {
            if i == row { continue; }
            let mut c = 0;

            for j in 0..4 {
                if j == col { continue; }
                sub[r][c] = self.rows[i][j];
                c += 1;
            }

            r += 1;
        }

        COFACTOR_SIGNS[row][col] * det3(sub)
    }

    pub fn cofactor(self) -> [[f32; 4]; 4] {
        let mut grid = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                grid[r][c] = self.minor(r, c);
            }
        }

        grid
    }

    // Transposed cofactor grid (the classical adjugate)
    pub fn adjoint(self) -> Mat {
        let grid = self.cofactor();
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = grid[c][r];
            }
        }

        Mat { rows }
    }

    // Laplace expansion along row 0
    pub fn determinant(self) -> f32 {
        self.rows[0][0] * self.minor(0, 0)
            + self.rows[0][1] * self.minor(0, 1)
            + self.rows[0][2] * self.minor(0, 2)
            + self.rows[0][3] * self.minor(0, 3)
    }

    // Closed-form inverse for rigid transforms:
    // transposed basis, translation dotted back through the rows
    // Requires an orthonormal basis (checked in debug builds only)
    pub fn inverse(self) -> Mat {
        debug_assert!(
            self.has_orthonormal_basis(),
            "inverse() input must be a rigid transform",
        );

        let m = &self.rows;

        Mat::new(
            m[0][0], m[1][0], m[2][0], 0.0,
            m[0][1], m[1][1], m[2][1], 0.0,
            m[0][2], m[1][2], m[2][2], 0.0,
            -(m[3][0] * m[0][0] + m[3][1] * m[0][1] + m[3][2] * m[0][2]),
            -(m[3][0] * m[1][0] + m[3][1] * m[1][1] + m[3][2] * m[1][2]),
            -(m[3][0] * m[2][0] + m[3][1] * m[2][1] + m[3][2] * m[2][2]),
            1.0,
        )
    }

    // Applies the basis block and the translation row (w = 1)
    pub fn transform_point(self, point: Vec3) -> Vec3 {
        self * point + Vec3::new(self.rows[3][0], self.rows[3][1], self.rows[3][2])
    }

    fn has_orthonormal_basis(self) -> bool {
        let x = self.x_vector();
        let y = self.y_vector();
        let z = self.z_vector();
        let tolerance = 1e-4;

        (x.mag_squared() - 1.).abs() < tolerance
            && (y.mag_squared() - 1.).abs() < tolerance
            && (z.mag_squared() - 1.).abs() < tolerance
            && x.dot(y).abs() < tolerance
            && y.dot(z).abs() < tolerance
            && z.dot(x).abs() < tolerance
    }
}

impl std::ops::Index<usize> for Mat {
    type Output = [f32; 4];

    fn index(&self, row: usize) -> &[f32; 4] {
        &self.rows[row]
    }
}

impl std::ops::Add for Mat {
    type Output = Mat;

    fn add(self, other: Mat) -> Mat {
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = self.rows[r][c] + other.rows[r][c];
            }
        }

        Mat { rows }
    }
}

impl std::ops::Sub for Mat {
    type Output = Mat;

    fn sub(self, other: Mat) -> Mat {
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = self.rows[r][c] - other.rows[r][c];
            }
        }

        Mat { rows }
    }
}

impl std::ops::Mul<f32> for Mat {
    type Output = Mat;

    fn mul(self, scalar: f32) -> Mat {
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = self.rows[r][c] * scalar;
            }
        }

        Mat { rows }
    }
}

impl std::ops::Mul for Mat {
    type Output = Mat;

    // Naive matrix multiply
    fn mul(self, other: Mat) -> Mat {
        let mut rows = [[0.0; 4]; 4];

        for r in 0..4 {
            for c in 0..4 {
                rows[r][c] = self.rows[r][0] * other.rows[0][c]
                    + self.rows[r][1] * other.rows[1][c]
                    + self.rows[r][2] * other.rows[2][c]
                    + self.rows[r][3] * other.rows[3][c];
            }
        }

        Mat { rows }
    }
}

impl std::ops::Mul<Vec3> for Mat {
    type Output = Vec3;

    // Row vector times basis block; the translation row is ignored
    // (directions, not points)
    fn mul(self, vec: Vec3) -> Vec3 {
        let m = &self.rows;

        Vec3::new(
            m[0][0] * vec.x + m[1][0] * vec.y + m[2][0] * vec.z,
            m[0][1] * vec.x + m[1][1] * vec.y + m[2][1] * vec.z,
            m[0][2] * vec.x + m[1][2] * vec.y + m[2][2] * vec.z,
        )
    }
}

impl std::fmt::Display for Mat {
    fn fmt(&self, out: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            out,
            "[ {}, {}, {}, {} ]\n[ {}, {}, {}, {} ]\n\
            [ {}, {}, {}, {} ]\n[ {}, {}, {}, {} ]",
            self.rows[0][0], self.rows[0][1], self.rows[0][2], self.rows[0][3],
            self.rows[1][0], self.rows[1][1], self.rows[1][2], self.rows[1][3],
            self.rows[2][0], self.rows[2][1], self.rows[2][2], self.rows[2][3],
            self.rows[3][0], self.rows[3][1], self.rows[3][2], self.rows[3][3],
        )
    }
}
