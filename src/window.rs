//! SDL2 window for previewing a rendered surface.
//!
//! The surface is uploaded as an ARGB8888 streaming texture and stretched to
//! fill the window, so a small palette surface shows up with chunky pixels.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

pub const FPS: u64 = 30;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Q,
    E,
    Plus,
    Minus,
    Tab,
    I,
    Space,
    Delete,
    R,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        let key = match keycode {
            Keycode::Left => Key::Left,
            Keycode::Right => Key::Right,
            Keycode::Up => Key::Up,
            Keycode::Down => Key::Down,
            Keycode::W => Key::W,
            Keycode::A => Key::A,
            Keycode::S => Key::S,
            Keycode::D => Key::D,
            Keycode::Q => Key::Q,
            Keycode::E => Key::E,
            Keycode::Plus | Keycode::Equals | Keycode::KpPlus => Key::Plus,
            Keycode::Minus | Keycode::KpMinus => Key::Minus,
            Keycode::Tab => Key::Tab,
            Keycode::I => Key::I,
            Keycode::Space => Key::Space,
            Keycode::Delete | Keycode::Backspace => Key::Delete,
            Keycode::R => Key::R,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    KeyDown(Key),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    surface_width: u32,
    surface_height: u32,
}

impl Window {
    /// Opens a `width` x `height` window showing a `surface_width` x
    /// `surface_height` surface.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, surface_width, surface_height)
            .map_err(|e| e.to_string())?;

        log::debug!(
            "opened {}x{} window for a {}x{} surface",
            width,
            height,
            surface_width,
            surface_height
        );

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            timer_subsystem,
            surface_width,
            surface_height,
        })
    }

    /// Drains pending SDL events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = Key::from_keycode(keycode) {
                        events.push(WindowEvent::KeyDown(key));
                    }
                }
                _ => {}
            }
        }
        events
    }

    /// Uploads ARGB8888 bytes for the whole surface and presents them
    /// stretched over the window.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.surface_width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn surface_width(&self) -> u32 {
        self.surface_width
    }

    pub fn surface_height(&self) -> u32 {
        self.surface_height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
