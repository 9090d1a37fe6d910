use crate::{
    frame::FrameBuffer,
    host::{Graphics, TextureId},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Normalized device coordinates, y up.
    pub pos: [f32; 2],
    /// Texture coordinates, v = 0 is raster row 0.
    pub uv: [f32; 2],
}

/// Textured quad in draw order: bottom left, bottom right, top right, top left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub vertices: [Vertex; 4],
}

impl Quad {
    /// Quad centered on the origin spanning `[-x, x] × [-y, y]`.
    pub fn centered(x: f32, y: f32) -> Self {
        let v = |pos: [f32; 2], uv: [f32; 2]| Vertex { pos, uv };
        Quad {
            vertices: [
                v([-x, -y], [0., 1.]),
                v([x, -y], [1., 1.]),
                v([x, y], [1., 0.]),
                v([-x, y], [0., 0.]),
            ],
        }
    }

    /// Half extents in NDC.
    pub fn extent(&self) -> (f32, f32) {
        let [x, y] = self.vertices[2].pos;
        (x, y)
    }

    pub fn is_empty(&self) -> bool {
        let (x, y) = self.extent();
        x <= 0. || y <= 0.
    }
}

/// Largest quad with the raster's aspect ratio that fits a `width × height`
/// window, shrunk by `padding` on each axis.
pub fn fit_quad(width: u32, height: u32, padding: f32) -> Quad {
    if width == 0 || height == 0 {
        return Quad::centered(0., 0.);
    }

    let s1 = width as f32 / FrameBuffer::WIDTH as f32;
    let s2 = height as f32 / FrameBuffer::HEIGHT as f32;
    let f = 1. - padding;
    let (x, y) = if s1 >= s2 {
        (f * s2 / s1, f)
    } else {
        (f, f * s1 / s2)
    };

    Quad::centered(x, y)
}

pub struct Presenter {
    texture: TextureId,
    padding: f32,
}

impl Presenter {
    pub fn new(gfx: &mut dyn Graphics, padding: f32) -> Self {
        gfx.clear([0., 0., 0., 1.]);
        Self {
            texture: gfx.create_texture(),
            padding,
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn present(&self, gfx: &mut dyn Graphics, frame: &FrameBuffer, window_size: (u32, u32)) {
        let (width, height) = window_size;
        let quad = fit_quad(width, height, self.padding);

        gfx.bind_texture(Some(self.texture));
        gfx.upload_pixels(frame);
        if !quad.is_empty() {
            gfx.draw_quad(&quad);
        }
        gfx.bind_texture(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{FakeGraphics, GfxCall};

    fn assert_close(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn exact_multiple_fills_window() {
        let quad = fit_quad(512, 480, 0.);
        assert_close(quad.extent(), (1., 1.));
        assert_eq!(quad.vertices[0].pos, [-1., -1.]);

        let center = quad
            .vertices
            .iter()
            .fold([0., 0.], |c, v| [c[0] + v.pos[0] / 4., c[1] + v.pos[1] / 4.]);
        assert_eq!(center, [0., 0.]);
    }

    #[test]
    fn wide_window_is_pillarboxed() {
        let (x, y) = fit_quad(1000, 480, 0.).extent();
        assert_eq!(y, 1.);
        assert!(x < 1.);
        // Picture keeps 256:240 in pixels
        let drawn_w = x * 1000.;
        let drawn_h = y * 480.;
        assert!((drawn_w / drawn_h - 256. / 240.).abs() < 1e-4);
    }

    #[test]
    fn tall_window_is_letterboxed() {
        let (x, y) = fit_quad(256, 1000, 0.).extent();
        assert_eq!(x, 1.);
        assert!(y < 1.);
        assert!((y * 1000. - 240.).abs() < 1e-3);
    }

    #[test]
    fn padding_shrinks_both_axes() {
        assert_close(fit_quad(512, 480, 0.25).extent(), (0.75, 0.75));
        assert_close(fit_quad(1000, 480, 0.5).extent(), (0.5 * 2. / 3.90625, 0.5));
    }

    #[test]
    fn texture_is_flipped_vertically() {
        let quad = fit_quad(512, 480, 0.);
        for v in quad.vertices {
            // Top edge samples row 0
            let expected_v = if v.pos[1] > 0. { 0. } else { 1. };
            assert_eq!(v.uv[1], expected_v);
            let expected_u = if v.pos[0] > 0. { 1. } else { 0. };
            assert_eq!(v.uv[0], expected_u);
        }
    }

    #[test]
    fn degenerate_window_draws_nothing() {
        assert!(fit_quad(0, 480, 0.).is_empty());
        assert!(fit_quad(640, 0, 0.).is_empty());

        let mut gfx = FakeGraphics::default();
        let presenter = Presenter::new(&mut gfx, 0.);
        presenter.present(&mut gfx, &FrameBuffer::new(), (0, 0));
        assert!(!gfx.calls.iter().any(|c| matches!(c, GfxCall::Draw(_))));
    }

    #[test]
    fn present_binds_uploads_draws_unbinds() {
        let mut gfx = FakeGraphics::default();
        let presenter = Presenter::new(&mut gfx, 0.);
        let tex = presenter.texture();
        gfx.calls.clear();

        presenter.present(&mut gfx, &FrameBuffer::new(), (512, 480));
        assert_eq!(
            gfx.calls,
            vec![
                GfxCall::Bind(Some(tex)),
                GfxCall::Upload,
                GfxCall::Draw(fit_quad(512, 480, 0.)),
                GfxCall::Bind(None),
            ]
        );
    }
}
