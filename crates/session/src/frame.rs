use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// RGB raster produced by the core once per frame.
///
/// The core may overwrite it in place on the next step, so anything kept past
/// the current frame must be a clone.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub pixels: Box<[u8; Self::WIDTH * Self::HEIGHT * 3]>,
}

impl FrameBuffer {
    pub const WIDTH: usize = 256;
    pub const HEIGHT: usize = 240;

    pub fn new() -> Self {
        Self {
            pixels: Box::new([0x0; Self::WIDTH * Self::HEIGHT * 3]),
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        assert!(x < Self::WIDTH);
        assert!(y < Self::HEIGHT);
        let base = ((y * Self::WIDTH) + x) * 3;

        let r = self.pixels[base];
        let g = self.pixels[base + 1];
        let b = self.pixels[base + 2];
        (r, g, b)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: (u8, u8, u8)) {
        assert!(x < Self::WIDTH);
        assert!(y < Self::HEIGHT);
        let base = ((y * Self::WIDTH) + x) * 3;

        let (r, g, b) = rgb;
        self.pixels[base] = r;
        self.pixels[base + 1] = g;
        self.pixels[base + 2] = b;
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(Self::WIDTH as u32, Self::HEIGHT as u32, |x, y| {
            let (r, g, b) = self.get_pixel(x as usize, y as usize);
            Rgb([r, g, b])
        })
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(Self::WIDTH as u32, Self::HEIGHT as u32, |x, y| {
            let (r, g, b) = self.get_pixel(x as usize, y as usize);
            Rgba([r, g, b, 0xff])
        })
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &Self::WIDTH)
            .field("height", &Self::HEIGHT)
            .finish_non_exhaustive()
    }
}
