mod display;
mod editor;

use brushy::config::{CliArgs, Settings};
use brushy::coords::CanvasRect;
use brushy::raster::{draw_text, BitmapFont};
use brushy::scene::load_scene;
use brushy::{PixelBuffer, RenderContext, Result, Rgba, Scene};

use display::{Display, InputEvent, RenderTarget};
use editor::{Command, Editor};

/// Height of the status strip above the canvas
const STATUS_HEIGHT: u32 = 16;
const STATUS_BACKGROUND: Rgba = Rgba::rgb(48, 48, 48);
const STATUS_TEXT: Rgba = Rgba::rgb(230, 230, 230);

/// Build a scene from the configured file, or an empty one. Sizes the file
/// asks for are written back into `settings`; once the window is open
/// (`startup == false`) the canvas size is left alone.
fn build_scene(settings: &mut Settings, startup: bool) -> Scene {
    let mut background = settings.background_color();
    let mut shapes = Vec::new();

    if let Some(path) = settings.scene.clone() {
        match load_scene(&path) {
            Ok(loaded) => {
                let named = if startup {
                    settings.apply_header(&loaded.header)
                } else {
                    settings.apply_universe(&loaded.header)
                };
                if let Some(color) = named {
                    background = color;
                }
                if loaded.skipped > 0 {
                    log::warn!("{}: skipped {} records", path.display(), loaded.skipped);
                }
                shapes = loaded.shapes;
            },
            Err(e) => log::error!("Failed to load {}: {}", path.display(), e),
        }
    }

    let mut scene = Scene::new(background);
    scene.eraser_radius = settings.eraser_radius;
    for shape in shapes {
        scene.add_shape(shape);
    }
    scene
}

/// Window area left for the canvas once the status strip is taken
fn canvas_rect(window_w: u32, window_h: u32) -> CanvasRect {
    CanvasRect {
        x: 0,
        y: STATUS_HEIGHT as i32,
        w: window_w.max(1),
        h: window_h.saturating_sub(STATUS_HEIGHT).max(1),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let cli = CliArgs::parse(&args);
    if cli.help {
        println!("{}", CliArgs::usage());
        return Ok(());
    }

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    let scene = build_scene(&mut settings, true);
    let mut editor = Editor::new(scene, &settings);

    let window_w = settings.canvas_width;
    let window_h = settings.canvas_height + STATUS_HEIGHT;
    let (mut display, texture_creator) = Display::with_options("Brushy", window_w, window_h, settings.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, window_w, window_h)?;
    let mut frame = PixelBuffer::try_new(window_w, window_h)?;

    let mut rect = canvas_rect(window_w, window_h);
    let mut canvas = PixelBuffer::try_new(rect.w, rect.h)?;
    let mut ctx = RenderContext::for_surface(&canvas, settings.universe_width, settings.universe_height)
        .with_curve(settings.curve);
    let font = BitmapFont::new(2);

    log::info!(
        "Canvas {}x{}, universe {}x{}",
        rect.w,
        rect.h,
        settings.universe_width,
        settings.universe_height
    );
    println!("=== brushy ===");
    println!("Controls:");
    println!("  1-8        - Pencil, eraser, bucket, line, house, tree, fence, sun");
    println!("  C          - Next color");
    println!("  A          - Toggle anti-aliasing");
    println!("  Arrows     - Move last shape");
    println!("  R / E      - Rotate last shape");
    println!("  + / -      - Scale last shape");
    println!("  X / Y      - Stretch last shape");
    println!("  Delete     - Remove last shape");
    println!("  N          - Clear");
    println!("  O          - Reload scene file");
    println!("  Escape     - Quit");

    'main: loop {
        for event in display.poll_events() {
            if let InputEvent::Resized { width, height } = event {
                rect = canvas_rect(width, height);
                target = RenderTarget::with_size(&texture_creator, width, height)?;
                frame = PixelBuffer::try_new(width, height)?;
                canvas = PixelBuffer::try_new(rect.w, rect.h)?;
                ctx = RenderContext::for_surface(&canvas, settings.universe_width, settings.universe_height)
                    .with_curve(settings.curve);
                log::info!("Canvas resized to {}x{}", rect.w, rect.h);
                continue;
            }

            match editor.handle_event(&event, &rect, &ctx) {
                Command::Quit => break 'main,
                Command::Reload => {
                    let scene = build_scene(&mut settings, false);
                    *editor.scene_mut() = scene;
                    ctx.universe_width = settings.universe_width;
                    ctx.universe_height = settings.universe_height;
                    log::info!("Reloaded scene ({} shapes)", editor.scene().shapes.len());
                },
                Command::None => {},
            }
        }

        editor.scene().render(&mut canvas, &ctx);
        editor.draw_preview(&mut canvas);

        frame.fill(STATUS_BACKGROUND);
        frame.blit(&canvas, rect.x, rect.y);
        let text_y = (STATUS_HEIGHT.saturating_sub(font.line_height()) / 2) as i32;
        draw_text(&mut frame, Some(&font), &editor.status_line(), 4, text_y, STATUS_TEXT);

        display.present(&mut target, &frame)?;
    }

    log::info!("Exiting");
    Ok(())
}
