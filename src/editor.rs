use brushy::color::Rgba;
use brushy::config::Settings;
use brushy::coords::{screen_to_canvas, CanvasRect, RenderContext, UniverseRect};
use brushy::raster::{draw_line, draw_polygon_outline};
use brushy::scene::{LineSegment, Scene};
use brushy::shapes::{Fence, House, Shape, Sun, Tree};
use brushy::PixelBuffer;
use sdl2::keyboard::Keycode;

use crate::display::{InputEvent, MouseButtonKind};

/// Paint colors cycled with C
const PALETTE: [&str; 9] = [
    "black", "red", "green", "blue", "yellow", "orange", "saddlebrown", "purple", "white",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pencil,
    Eraser,
    Bucket,
    Line,
    House,
    Tree,
    Fence,
    Sun,
}

impl Tool {
    fn from_key(key: Keycode) -> Option<Self> {
        match key {
            Keycode::Num1 => Some(Self::Pencil),
            Keycode::Num2 => Some(Self::Eraser),
            Keycode::Num3 => Some(Self::Bucket),
            Keycode::Num4 => Some(Self::Line),
            Keycode::Num5 => Some(Self::House),
            Keycode::Num6 => Some(Self::Tree),
            Keycode::Num7 => Some(Self::Fence),
            Keycode::Num8 => Some(Self::Sun),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
            Self::Bucket => "bucket",
            Self::Line => "line",
            Self::House => "house",
            Self::Tree => "tree",
            Self::Fence => "fence",
            Self::Sun => "sun",
        }
    }

    /// Tools that create something from a drag rectangle
    fn drags(self) -> bool {
        matches!(self, Self::Line | Self::House | Self::Tree | Self::Fence | Self::Sun)
    }
}

/// What the main loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Reload,
}

/// Mouse gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Stroking,
    Erasing,
    Dragging { start: (i32, i32), current: (i32, i32) },
}

/// Tool selection and gesture state machine on top of a [`Scene`]
pub struct Editor {
    state: State,
    scene: Scene,
    tool: Tool,
    palette_index: usize,
    anti_aliased: bool,
    rotation_step: f64,
    scale_step: f64,
    translation_step: f64,
}

impl Editor {
    pub fn new(scene: Scene, settings: &Settings) -> Self {
        Self {
            state: State::Idle,
            scene,
            tool: Tool::Pencil,
            palette_index: 0,
            anti_aliased: settings.anti_aliased,
            rotation_step: settings.rotation_step,
            scale_step: settings.scale_step.max(1.0 + f64::EPSILON),
            translation_step: settings.translation_step,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Rgba {
        Rgba::named(PALETTE[self.palette_index % PALETTE.len()])
    }

    /// `canvas` places the drawing area inside the window; `ctx` maps it
    /// to the universe
    pub fn handle_event(&mut self, event: &InputEvent, canvas: &CanvasRect, ctx: &RenderContext) -> Command {
        match event {
            InputEvent::Quit => return Command::Quit,
            InputEvent::KeyDown(key) => return self.on_key(*key),
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButtonKind::Left,
            } => {
                if canvas.contains(*x, *y) {
                    self.on_mouse_down(screen_to_canvas(*x, *y, canvas));
                }
            },
            InputEvent::MouseMove { x, y } => self.on_mouse_move(screen_to_canvas(*x, *y, canvas)),
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButtonKind::Left,
            } => self.on_mouse_up(screen_to_canvas(*x, *y, canvas), ctx),
            _ => {},
        }
        Command::None
    }

    fn on_mouse_down(&mut self, pos: (i32, i32)) {
        let color = self.color();
        self.state = match self.tool {
            Tool::Pencil => {
                self.scene.begin_stroke();
                self.scene.add_pencil_point(pos.0, pos.1, color);
                State::Stroking
            },
            Tool::Eraser => {
                self.scene.add_eraser_point(pos.0, pos.1);
                State::Erasing
            },
            Tool::Bucket => {
                self.scene.add_bucket(pos.0, pos.1, color);
                State::Idle
            },
            _ => State::Dragging {
                start: pos,
                current: pos,
            },
        };
    }

    fn on_mouse_move(&mut self, pos: (i32, i32)) {
        match self.state {
            State::Stroking => {
                let color = self.color();
                self.scene.add_pencil_point(pos.0, pos.1, color);
            },
            State::Erasing => self.scene.add_eraser_point(pos.0, pos.1),
            State::Dragging { start, .. } => {
                self.state = State::Dragging {
                    start,
                    current: pos,
                };
            },
            State::Idle => {},
        }
    }

    fn on_mouse_up(&mut self, pos: (i32, i32), ctx: &RenderContext) {
        if let State::Dragging { start, .. } = self.state {
            if self.tool == Tool::Line {
                self.scene.add_line(LineSegment {
                    start,
                    end: pos,
                    color: self.color(),
                    anti_aliased: self.anti_aliased,
                });
            } else if start != pos {
                let rect = ctx.drag_to_universe(start, pos);
                if let Some(shape) = self.create_shape(rect) {
                    self.scene.add_shape(shape);
                }
            }
        }
        self.state = State::Idle;
    }

    /// Shape for the current tool filling `rect`
    fn create_shape(&self, rect: UniverseRect) -> Option<Box<dyn Shape>> {
        let color = self.color();
        let UniverseRect { x, y, w, h } = rect;
        let shape: Box<dyn Shape> = match self.tool {
            Tool::House => Box::new(House::new(
                w,
                h,
                x,
                y,
                color,
                Rgba::named("saddlebrown"),
                Rgba::named("firebrick"),
            )),
            Tool::Tree => Box::new(Tree::new(
                w,
                h,
                x,
                y,
                Rgba::named("saddlebrown"),
                color,
                Rgba::RED,
            )),
            Tool::Fence => Box::new(Fence::new(w, h, x, y, color, color)),
            Tool::Sun => Box::new(Sun::new(w, h, x, y, color, Rgba::ORANGE)),
            _ => return None,
        };
        Some(shape)
    }

    fn on_key(&mut self, key: Keycode) -> Command {
        if let Some(tool) = Tool::from_key(key) {
            self.tool = tool;
            self.state = State::Idle;
            log::debug!("Tool: {}", tool.name());
            return Command::None;
        }

        let step = self.translation_step;
        let (rotate, scale) = (self.rotation_step, self.scale_step);
        match key {
            Keycode::Escape => return Command::Quit,
            Keycode::O => return Command::Reload,
            Keycode::C => self.palette_index = (self.palette_index + 1) % PALETTE.len(),
            Keycode::A => {
                self.anti_aliased = !self.anti_aliased;
                log::info!("Anti-aliasing {}", if self.anti_aliased { "on" } else { "off" });
            },
            Keycode::N => {
                self.scene.clear();
                log::info!("Scene cleared");
            },
            Keycode::Delete | Keycode::Backspace => {
                if let Some(shape) = self.scene.remove_last_shape() {
                    log::info!("Removed {}", shape.kind());
                }
            },
            Keycode::Left => self.with_last_shape(|s| s.translate(-step, 0.0)),
            Keycode::Right => self.with_last_shape(|s| s.translate(step, 0.0)),
            Keycode::Up => self.with_last_shape(|s| s.translate(0.0, step)),
            Keycode::Down => self.with_last_shape(|s| s.translate(0.0, -step)),
            Keycode::R => self.with_last_shape(|s| s.rotate_figure(rotate)),
            Keycode::E => self.with_last_shape(|s| s.rotate_figure(-rotate)),
            Keycode::Equals | Keycode::KpPlus => self.with_last_shape(|s| s.scale(scale, scale)),
            Keycode::Minus | Keycode::KpMinus => {
                self.with_last_shape(|s| s.scale(1.0 / scale, 1.0 / scale));
            },
            Keycode::X => self.with_last_shape(|s| s.scale(scale, 1.0)),
            Keycode::Y => self.with_last_shape(|s| s.scale(1.0, scale)),
            _ => {},
        }
        Command::None
    }

    fn with_last_shape(&mut self, f: impl FnOnce(&mut dyn Shape)) {
        if let Some(shape) = self.scene.last_shape_mut() {
            f(shape);
        }
    }

    /// Rubber-band preview of the drag in progress
    pub fn draw_preview(&self, surface: &mut PixelBuffer) {
        let State::Dragging { start, current } = self.state else {
            return;
        };
        let color = self.color();
        if self.tool == Tool::Line {
            draw_line(surface, start.0, start.1, current.0, current.1, color, self.anti_aliased);
        } else if self.tool.drags() {
            let corners = [start, (current.0, start.1), current, (start.0, current.1)];
            draw_polygon_outline(surface, &corners, color, false);
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} | {} | AA {} | SHAPES {}",
            self.tool.name(),
            PALETTE[self.palette_index % PALETTE.len()],
            if self.anti_aliased { "ON" } else { "OFF" },
            self.scene.shapes.len()
        )
    }
}
