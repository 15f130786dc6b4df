#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Color {
        Color {
            r,
            g,
            b,
        }
    }

    #[inline]
    pub fn red() -> Color {
        Color {
            r: 1.,
            g: 0.,
            b: 0.,
        }
    }

    #[inline]
    pub fn green() -> Color {
        Color {
            r: 0.,
            g: 1.,
            b: 0.,
        }
    }

    #[inline]
    pub fn blue() -> Color {
        Color {
            r: 0.,
            g: 0.,
            b: 1.,
        }
    }

    #[inline]
    pub fn white() -> Color {
        Color {
            r: 1.,
            g: 1.,
            b: 1.,
        }
    }

    #[inline]
    pub fn black() -> Color {
        Color {
            r: 0.,
            g: 0.,
            b: 0.,
        }
    }

    /// Quantize to 8-bit channels, clamping out-of-range values
    pub fn bytes(self) -> [u8; 3] {
        [
            (self.r.max(0.).min(1.) * 255.) as u8,
            (self.g.max(0.).min(1.) * 255.) as u8,
            (self.b.max(0.).min(1.) * 255.) as u8,
        ]
    }
}
