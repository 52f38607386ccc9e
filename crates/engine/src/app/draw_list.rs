pub type Rgba = [u8; 4];

const DEFAULT_CLEAR_COLOR: Rgba = [20, 22, 28, 255];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// World-space commands are shifted by the list's camera offset; screen-space ones are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSpace {
    World,
    Screen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub key: String,
    pub rect: Rect,
    pub space: DrawSpace,
    pub flip_x: bool,
    pub fallback: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite(SpriteDraw),
    FillRect {
        rect: Rect,
        space: DrawSpace,
        color: Rgba,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: Rgba,
        scale: u32,
    },
}

#[derive(Debug, Clone)]
pub struct DrawList {
    camera_offset_x: f32,
    clear_color: Rgba,
    commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            camera_offset_x: 0.0,
            clear_color: DEFAULT_CLEAR_COLOR,
            commands: Vec::new(),
        }
    }
}

impl DrawList {
    pub fn clear(&mut self) {
        self.camera_offset_x = 0.0;
        self.clear_color = DEFAULT_CLEAR_COLOR;
        self.commands.clear();
    }

    pub fn camera_offset_x(&self) -> f32 {
        self.camera_offset_x
    }

    pub fn set_camera_offset_x(&mut self, offset_x: f32) {
        self.camera_offset_x = offset_x;
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Rgba) {
        self.clear_color = color;
    }

    pub fn sprite(&mut self, sprite: SpriteDraw) {
        self.commands.push(DrawCommand::Sprite(sprite));
    }

    pub fn fill_rect(&mut self, rect: Rect, space: DrawSpace, color: Rgba) {
        self.commands
            .push(DrawCommand::FillRect { rect, space, color });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Rgba, scale: u32) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            color,
            scale: scale.max(1),
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
