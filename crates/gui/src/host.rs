use eframe::egui::{
    self, epaint::Vertex, pos2, Color32, ColorImage, Context, LayerId, Mesh, Pos2, Shape,
    TextureHandle, TextureOptions, ViewportCommand,
};
use nemu_session::{
    frame::FrameBuffer,
    host::{Graphics, Host, JoystickPort, JoystickState, Key, TextureId, Window},
    present::Quad,
};

/// Window, input and drawing on top of an egui context.
///
/// egui has no gamepad support, so both joystick ports always read as empty.
/// It also has no key for the right shift key alone: [`Key::RightShift`]
/// reads the shift modifier, so either shift key presses it.
pub struct EguiHost {
    ctx: Context,
    textures: Vec<TextureHandle>,
    bound: Option<TextureId>,
    clear_color: [f32; 4],
}

const FRAME_SIZE: [usize; 2] = [FrameBuffer::WIDTH, FrameBuffer::HEIGHT];

impl EguiHost {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            textures: Vec::new(),
            bound: None,
            clear_color: [0., 0., 0., 1.],
        }
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureHandle> {
        self.textures.get(id.0)
    }

    /// NDC (y up, origin at the center) to egui points (y down).
    fn to_screen(&self, ndc: [f32; 2]) -> Pos2 {
        let rect = self.ctx.screen_rect();
        let center = rect.center();
        pos2(
            center.x + ndc[0] * rect.width() / 2.,
            center.y - ndc[1] * rect.height() / 2.,
        )
    }
}

fn egui_key(key: Key) -> Option<egui::Key> {
    Some(match key {
        Key::A => egui::Key::A,
        Key::S => egui::Key::S,
        Key::R => egui::Key::R,
        Key::X => egui::Key::X,
        Key::Z => egui::Key::Z,
        Key::Tab => egui::Key::Tab,
        Key::Space => egui::Key::Space,
        Key::Enter => egui::Key::Enter,
        Key::Escape => egui::Key::Escape,
        Key::ArrowUp => egui::Key::ArrowUp,
        Key::ArrowDown => egui::Key::ArrowDown,
        Key::ArrowLeft => egui::Key::ArrowLeft,
        Key::ArrowRight => egui::Key::ArrowRight,
        Key::Num1 => egui::Key::Num1,
        Key::Num2 => egui::Key::Num2,
        Key::Num3 => egui::Key::Num3,
        Key::Num4 => egui::Key::Num4,
        Key::Num5 => egui::Key::Num5,
        // Modifier, not a key in egui, so left shift counts too
        Key::RightShift => return None,
    })
}

/// Session key for an egui key press, if it is one the session knows.
pub fn session_key(key: egui::Key) -> Option<Key> {
    Some(match key {
        egui::Key::A => Key::A,
        egui::Key::S => Key::S,
        egui::Key::R => Key::R,
        egui::Key::X => Key::X,
        egui::Key::Z => Key::Z,
        egui::Key::Tab => Key::Tab,
        egui::Key::Space => Key::Space,
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::Num1 => Key::Num1,
        egui::Key::Num2 => Key::Num2,
        egui::Key::Num3 => Key::Num3,
        egui::Key::Num4 => Key::Num4,
        egui::Key::Num5 => Key::Num5,
        _ => return None,
    })
}

impl Window for EguiHost {
    fn framebuffer_size(&self) -> (u32, u32) {
        let rect = self.ctx.screen_rect();
        let ppp = self.ctx.pixels_per_point();
        (
            (rect.width() * ppp).round() as u32,
            (rect.height() * ppp).round() as u32,
        )
    }

    fn key_down(&self, key: Key) -> bool {
        match egui_key(key) {
            Some(key) => self.ctx.input(|i| i.key_down(key)),
            None => self.ctx.input(|i| i.modifiers.shift),
        }
    }

    fn joystick(&self, _port: JoystickPort) -> Option<JoystickState> {
        None
    }

    fn set_title(&mut self, title: &str) {
        self.ctx
            .send_viewport_cmd(ViewportCommand::Title(title.to_owned()));
    }
}

impl Graphics for EguiHost {
    fn create_texture(&mut self) -> TextureId {
        let id = TextureId(self.textures.len());
        let handle = self.ctx.load_texture(
            format!("frame{}", id.0),
            ColorImage::new(FRAME_SIZE, Color32::BLACK),
            TextureOptions::NEAREST,
        );
        self.textures.push(handle);
        id
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.bound = texture;
    }

    fn upload_pixels(&mut self, frame: &FrameBuffer) {
        let Some(handle) = self.bound.and_then(|id| self.textures.get_mut(id.0)) else {
            log::warn!("Pixel upload without a bound texture");
            return;
        };
        handle.set(
            ColorImage::from_rgb(FRAME_SIZE, &frame.pixels[..]),
            TextureOptions::NEAREST,
        );
    }

    fn draw_quad(&mut self, quad: &Quad) {
        let Some(handle) = self.bound.and_then(|id| self.textures.get(id.0)) else {
            return;
        };

        let mut mesh = Mesh::with_texture(handle.id());
        for v in quad.vertices {
            mesh.vertices.push(Vertex {
                pos: self.to_screen(v.pos),
                uv: pos2(v.uv[0], v.uv[1]),
                color: Color32::WHITE,
            });
        }
        mesh.indices.extend([0, 1, 2, 0, 2, 3]);

        self.ctx
            .layer_painter(LayerId::background())
            .add(Shape::mesh(mesh));
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        self.clear_color = rgba;
    }
}

impl Host for EguiHost {
    fn window(&mut self) -> Option<&mut dyn Window> {
        Some(self)
    }

    fn graphics(&mut self) -> Option<&mut dyn Graphics> {
        Some(self)
    }
}
