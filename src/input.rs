use glutin::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

use crate::camera::{
    Camera,
    Movement,
};
use crate::GraphicsContext;

/// Keys polled every frame for camera movement.
pub const MOVEMENT_KEYS : [VirtualKeyCode; 4] = [
    VirtualKeyCode::W,
    VirtualKeyCode::S,
    VirtualKeyCode::A,
    VirtualKeyCode::D,
];

pub fn movement_for_key(key : VirtualKeyCode) -> Option<Movement> {
    match key {
        VirtualKeyCode::W => Some(Movement::Forward),
        VirtualKeyCode::S => Some(Movement::Backward),
        VirtualKeyCode::A => Some(Movement::Left),
        VirtualKeyCode::D => Some(Movement::Right),
        _ => None,
    }
}

/// Keys every program shares: Escape quits, `1` switches to wireframe and
/// `2` back to filled polygons. Returns whether to quit.
pub fn handle_common_keys(
    input : &WinitInputHelper,
    ctx : &GraphicsContext,
) -> bool {
    if input.key_pressed(VirtualKeyCode::Key1) {
        ctx.set_wireframe(true);
    }

    if input.key_pressed(VirtualKeyCode::Key2) {
        ctx.set_wireframe(false);
    }

    input.key_pressed(VirtualKeyCode::Escape) || input.quit()
}

/// Moves the camera for every movement key held this frame.
pub fn apply_movement_keys(
    input : &WinitInputHelper,
    camera : &mut Camera,
    delta_seconds : f32,
) {
    for key in MOVEMENT_KEYS {
        if !input.key_held(key) {
            continue;
        }

        if let Some(dir) = movement_for_key(key) {
            if let Err(e) = camera.translate(dir, delta_seconds) {
                log::warn!("ignoring movement: {}", e);
            }
        }
    }
}

/// Turns absolute cursor positions into per-event offsets.
///
/// The first sample only records the position, otherwise the camera would
/// jump by the distance between the window origin and wherever the cursor
/// entered. The y offset is reversed since window coordinates grow
/// downwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last : Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&mut self, x : f64, y : f64) -> (f64, f64) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));

        (x - last_x, last_y - y)
    }

    /// Forget the last position, e.g. after the cursor was released.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_sample_is_ignored() {
        let mut t = CursorTracker::new();

        assert_eq!(t.offset(400.0, 300.0), (0.0, 0.0));
        assert_eq!(t.offset(410.0, 290.0), (10.0, 10.0));
        assert_eq!(t.offset(405.0, 295.5), (-5.0, -5.5));
    }

    #[test]
    fn reset_skips_next_jump() {
        let mut t = CursorTracker::new();

        t.offset(0.0, 0.0);
        t.reset();

        assert_eq!(t.offset(800.0, 600.0), (0.0, 0.0));
        assert_eq!(t.offset(801.0, 600.0), (1.0, 0.0));
    }

    #[test]
    fn wasd() {
        let dirs : Vec<_> = MOVEMENT_KEYS
            .iter()
            .filter_map(|k| movement_for_key(*k))
            .collect();

        assert_eq!(dirs, vec![
            Movement::Forward,
            Movement::Backward,
            Movement::Left,
            Movement::Right,
        ]);

        assert_eq!(movement_for_key(VirtualKeyCode::Escape), None);
    }
}
