//! End-to-end checks across the raster, coordinate and shape layers

use approx::assert_abs_diff_eq;
use brushy::raster::{draw_curve, draw_line, get_pixel};
use brushy::scene::parse_scene;
use brushy::shapes::{Fence, House, Shape};
use brushy::{PixelBuffer, RenderContext, Rgba, Scene};

fn blank(w: u32, h: u32) -> PixelBuffer {
    let mut surface = PixelBuffer::with_size(w, h);
    surface.fill(Rgba::WHITE);
    surface
}

#[test]
fn test_house_walls_color_inside_walls() {
    let ctx = RenderContext::new(800, 600, 100.0, 75.0);
    let house = House::new(30.0, 20.0, 50.0, 35.0, Rgba::RED, Rgba::BLUE, Rgba::GREEN);
    let mut surface = blank(800, 600);
    house.draw(&mut surface, &ctx);

    let (x, y) = ctx.to_canvas_xy(65.0, 45.0);
    assert_eq!((x, y), (520, 239));
    assert_eq!(get_pixel(&surface, x, y), Rgba::RED);

    // Strictly inside the walls, away from every outline: only the wall
    // flood fill paints it
    let (x, y) = ctx.to_canvas_xy(55.0, 42.0);
    assert_eq!((x, y), (440, 263));
    assert_eq!(get_pixel(&surface, x, y), Rgba::RED);
    // Door interior gets its own fill
    assert_eq!(get_pixel(&surface, 540, 285), Rgba::BLUE);
}

#[test]
fn test_collinear_curve_matches_line() {
    let mut curve = blank(64, 16);
    draw_curve(&mut curve, [(0, 0), (10, 0), (20, 0), (30, 0)], Rgba::BLACK, false);

    let mut line = blank(64, 16);
    draw_line(&mut line, 0, 0, 30, 0, Rgba::BLACK, false);

    assert_eq!(curve.as_bytes(), line.as_bytes());
}

#[test]
fn test_fence_full_turn_restores_anchors() {
    let mut fence = Fence::new(25.0, 12.0, 60.0, 2.0, Rgba::GREEN, Rgba::RED);
    let before = fence.anchors().to_vec();

    for _ in 0..8 {
        fence.rotate_figure(45.0);
    }

    for (a, b) in before.iter().zip(fence.anchors()) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
    }
}

#[test]
fn test_loaded_scene_renders() {
    let text = "\
Tela;400;300;100;75;azul
Casa
Localizacao;10;10
Altura;20
Largura;30
CorParede;amarelo
CorPorta;marrom
CorTelhado;vermelho
Sol
Localizacao;70;50
Altura;20
Largura;20
";
    let loaded = parse_scene(text);
    assert_eq!(loaded.shapes.len(), 2);
    assert_eq!(loaded.skipped, 0);

    let background = loaded.header.background.unwrap_or(Rgba::WHITE);
    let mut scene = Scene::new(background);
    for shape in loaded.shapes {
        scene.add_shape(shape);
    }

    let mut surface = PixelBuffer::with_size(400, 300);
    let ctx = RenderContext::for_surface(&surface, 100.0, 75.0);
    scene.render(&mut surface, &ctx);

    assert_eq!(get_pixel(&surface, 0, 0), Rgba::BLUE);
    // Wall interior, left of the door
    let (x, y) = ctx.to_canvas_xy(13.0, 15.0);
    assert_eq!(get_pixel(&surface, x, y), Rgba::YELLOW);
    // Sun disk centre
    let (x, y) = ctx.to_canvas_xy(80.0, 60.0);
    assert_eq!(get_pixel(&surface, x, y), Rgba::YELLOW);
}
