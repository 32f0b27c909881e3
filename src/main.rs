//! Interactive viewer: spins a mesh on a 160x120 palette surface.
//!
//! Usage: `polymesh-viewer [mesh.obj] [texture.png]`
//!
//! Without arguments a cube is shown with a checkerboard on its front face.
//! A texture given on the command line is applied to every quad.
//!
//! Controls: arrows rotate, W/S/A/D/Q/E move the camera, +/- zoom, Tab
//! cycles the sort method, I toggles inner culling, Space pauses the spin,
//! Delete removes the last face, R resets the view.

use std::sync::Arc;

use polymesh::prelude::*;
use polymesh::window::{FrameLimiter, Key, Window, WindowEvent};

const SCREEN_WIDTH: u32 = 160;
const SCREEN_HEIGHT: u32 = 120;
const WINDOW_SCALE: u32 = 5;
const BACKGROUND: Color = 12;

const ROTATE_STEP: f32 = 0.1;
const MOVE_STEP: f32 = 5.0;
const ZOOM_STEP: f32 = 0.1;
const SPIN_PER_MS: f32 = 0.0008;

fn checkerboard(size: u32, a: Color, b: Color) -> Image {
    let pixels = (0..size * size)
        .map(|i| if ((i / size) / 2 + (i % size) / 2) % 2 == 0 { a } else { b })
        .collect();
    // Dimensions always match the generated pixel count.
    Image::from_pixels(size, size, pixels).unwrap_or_else(|_| Image::new(size, size))
}

/// Replaces every quad's texture with `texture`.
fn apply_texture(mesh: &mut Mesh, texture: &Arc<Image>) {
    for index in 0..mesh.faces().len() {
        if let Some(Face::Quad {
            indices: [a, b, c, d],
            color,
            ..
        }) = mesh.face(index).cloned()
        {
            mesh.set_face(index, Face::textured_quad(a, b, c, d, color, Arc::clone(texture)));
        }
    }
}

fn load_scene(args: &[String], palette: &Palette) -> Result<Mesh, String> {
    let mut mesh = match args.first() {
        Some(path) => Mesh::from_obj(path, 7).map_err(|e| e.to_string())?,
        None => Mesh::cube(20.0, [2, 4, 5, 7, 8, 10]),
    };

    match args.get(1) {
        Some(path) => {
            let texture = Image::from_file(path, palette).map_err(|e| e.to_string())?;
            apply_texture(&mut mesh, &Arc::new(texture));
        }
        None if args.is_empty() => {
            if let Some(Face::Quad {
                indices: [a, b, c, d],
                color,
                ..
            }) = mesh.face(0).cloned()
            {
                let texture = Arc::new(checkerboard(8, 1, 15));
                mesh.set_face(0, Face::textured_quad(a, b, c, d, color, texture));
            }
        }
        None => {}
    }

    Ok(mesh)
}

fn default_context() -> RenderContext {
    let mut ctx = RenderContext::new();
    ctx.set_angle(Axis::X, 0.4);
    ctx
}

fn handle_key(key: Key, ctx: &mut RenderContext, mesh: &mut Mesh, spinning: &mut bool) {
    match key {
        Key::Left => {
            ctx.change_angle(Axis::Y, -ROTATE_STEP);
        }
        Key::Right => {
            ctx.change_angle(Axis::Y, ROTATE_STEP);
        }
        Key::Up => {
            ctx.change_angle(Axis::X, -ROTATE_STEP);
        }
        Key::Down => {
            ctx.change_angle(Axis::X, ROTATE_STEP);
        }
        Key::W => {
            ctx.change_camera_axis(Axis::Z, MOVE_STEP);
        }
        Key::S => {
            ctx.change_camera_axis(Axis::Z, -MOVE_STEP);
        }
        Key::A => {
            ctx.change_camera_axis(Axis::X, -MOVE_STEP);
        }
        Key::D => {
            ctx.change_camera_axis(Axis::X, MOVE_STEP);
        }
        Key::Q => {
            ctx.change_camera_axis(Axis::Y, -MOVE_STEP);
        }
        Key::E => {
            ctx.change_camera_axis(Axis::Y, MOVE_STEP);
        }
        Key::Plus => {
            let zoom = ctx.camera().zoom() + ZOOM_STEP;
            ctx.set_zoom(zoom);
        }
        Key::Minus => {
            let zoom = (ctx.camera().zoom() - ZOOM_STEP).max(ZOOM_STEP);
            ctx.set_zoom(zoom);
        }
        Key::Tab => {
            let method = ctx.sort_method().next();
            ctx.set_sort_method(method);
            log::info!("sort method: {}", method);
        }
        Key::I => {
            let inner = ctx.cull_mode() == CullMode::Outer;
            ctx.set_inner(inner);
            log::info!("cull mode: {:?}", ctx.cull_mode());
        }
        Key::Space => *spinning = !*spinning,
        Key::Delete => {
            if let Some(last) = mesh.faces().len().checked_sub(1) {
                mesh.remove_face(last);
                log::info!("removed face {}", last);
            }
        }
        Key::R => *ctx = default_context(),
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let palette = Palette::default();
    let mut mesh = load_scene(&args, &palette)?;

    let mut window = Window::new(
        "polymesh",
        SCREEN_WIDTH * WINDOW_SCALE,
        SCREEN_HEIGHT * WINDOW_SCALE,
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
    )?;
    let mut limiter = FrameLimiter::new(&window);
    let mut screen = Image::new(window.surface_width(), window.surface_height());
    let mut ctx = default_context();
    let mut spinning = true;

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => log::debug!("window resized to {}x{}", w, h),
                WindowEvent::KeyDown(key) => handle_key(key, &mut ctx, &mut mesh, &mut spinning),
            }
        }

        let delta = limiter.wait_and_get_delta(&window);
        if spinning {
            ctx.change_angle(Axis::Y, delta as f32 * SPIN_PER_MS);
        }

        screen.fill(BACKGROUND);
        if let Err(e) = polymesh::render(&mesh, &mut screen, &ctx) {
            log::warn!("frame skipped: {}", e);
        }

        window.present(&screen.to_argb_bytes(&palette))?;
    }

    Ok(())
}
