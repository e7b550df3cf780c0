use glam::{
    Mat4,
    Vec3,
};

use crate::error::{
    Error,
    Result,
};

/// Pitch is clamped to this many degrees either side of the horizon.
pub const PITCH_LIMIT : f64 = 89.0;

pub const ZOOM_MIN : f32 = 1.0;
pub const ZOOM_MAX : f32 = 45.0;

const DEFAULT_YAW : f64 = -90.0;
const DEFAULT_PITCH : f64 = 0.0;

/// Directions the camera can be moved in. Kept apart from any windowing
/// system's key codes, see `input::movement_for_key` for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOptions {
    /// world units per second
    pub movement_speed : f32,
    /// scale applied to raw mouse deltas
    pub mouse_sensitivity : f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            movement_speed : 2.5,
            mouse_sensitivity : 0.1,
        }
    }
}

/// Free-fly camera driven by yaw/pitch Euler angles (in degrees).
///
/// The `front`, `right` and `up` vectors are never written directly, they
/// are recomputed from the absolute angles after every rotation so the basis
/// stays orthonormal no matter how far `yaw` drifts.
#[derive(Debug, Clone)]
pub struct Camera {
    position : Vec3,
    front : Vec3,
    right : Vec3,
    up : Vec3,
    world_up : Vec3,

    yaw : f64,
    pitch : f64,

    movement_speed : f32,
    mouse_sensitivity : f32,
    zoom : f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position : Vec3) -> Self {
        Self::with_options(position, CameraOptions::default())
    }

    pub fn with_options(position : Vec3, options : CameraOptions) -> Self {
        let mut camera = Self {
            position,
            front : -Vec3::Z,
            right : Vec3::X,
            up : Vec3::Y,
            world_up : Vec3::Y,
            yaw : DEFAULT_YAW,
            pitch : DEFAULT_PITCH,
            movement_speed : options.movement_speed,
            mouse_sensitivity : options.mouse_sensitivity,
            zoom : ZOOM_MAX,
        };

        camera.update_vectors();

        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Vertical field of view in degrees, for `Projection::matrix`.
    pub fn field_of_view(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position,
            self.position + self.front,
            self.up,
        )
    }

    /// Moves the camera along its current basis, scaled by the frame time.
    /// Only the position changes.
    pub fn translate(
        &mut self,
        direction : Movement,
        delta_seconds : f32,
    ) -> Result<()> {
        finite("delta_seconds", delta_seconds as f64)?;

        let velocity = self.movement_speed * delta_seconds;

        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }

        Ok(())
    }

    /// Applies a mouse movement. Yaw accumulates without wrapping; pitch is
    /// saturated at +/- `PITCH_LIMIT` when `constrain_pitch` is set.
    ///
    /// Without the constraint pitch may pass 90 degrees, after which the
    /// basis is still orthonormal but `right` points the other way and the
    /// view appears flipped.
    pub fn rotate(
        &mut self,
        xoffset : f64,
        yoffset : f64,
        constrain_pitch : bool,
    ) -> Result<()> {
        finite("xoffset", xoffset)?;
        finite("yoffset", yoffset)?;

        let sensitivity = self.mouse_sensitivity as f64;

        let yaw = finite("yaw", self.yaw + xoffset * sensitivity)?;
        let mut pitch = finite("pitch", self.pitch + yoffset * sensitivity)?;

        if constrain_pitch {
            pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.yaw = yaw;
        self.pitch = pitch;

        self.update_vectors();

        Ok(())
    }

    /// Applies a scroll-wheel delta, positive values narrow the view.
    pub fn zoom_by(&mut self, yoffset : f32) -> Result<()> {
        finite("zoom offset", yoffset as f64)?;

        self.zoom = (self.zoom - yoffset).clamp(ZOOM_MIN, ZOOM_MAX);

        Ok(())
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        let front = Vec3::new(
            (yaw.cos() * pitch.cos()) as f32,
            pitch.sin() as f32,
            (yaw.sin() * pitch.cos()) as f32,
        );

        // right must come from the new front, and up from the new right
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

fn finite(what : &'static str, value : f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidInput{ what, value })
    }
}

/// Perspective projection paired with `Camera::field_of_view`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect : f32,
    pub near : f32,
    pub far : f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect : 800.0 / 600.0,
            near : 0.1,
            far : 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, fov_degrees : f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS : f32 = 1e-5;

    fn assert_orthonormal(c : &Camera) {
        for v in [c.front(), c.right(), c.up()] {
            assert!(
                (v.length() - 1.0).abs() < EPS,
                "not unit length: {:?} at yaw {} pitch {}",
                v, c.yaw(), c.pitch(),
            );
        }

        assert!(c.front().dot(c.right()).abs() < EPS);
        assert!(c.front().dot(c.up()).abs() < EPS);
        assert!(c.right().dot(c.up()).abs() < EPS);
    }

    #[test]
    fn default_orientation() {
        let c = Camera::default();

        assert_eq!(c.position(), Vec3::ZERO);
        assert_eq!(c.yaw(), -90.0);
        assert_eq!(c.pitch(), 0.0);
        assert_eq!(c.zoom(), 45.0);
        assert_eq!(c.world_up(), Vec3::Y);
        assert!(c.front().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
        assert!(c.right().abs_diff_eq(Vec3::X, EPS));
        assert!(c.up().abs_diff_eq(Vec3::Y, EPS));
        assert_orthonormal(&c);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut c = Camera::new(Vec3::new(1.0, 2.0, 3.0));

        for i in 0..500 {
            let dx = 37.0 * ((i % 7) as f64 - 3.0);
            let dy = 11.0 * ((i % 5) as f64 - 1.5);
            c.rotate(dx, dy, true).unwrap();

            assert!(c.pitch() >= -PITCH_LIMIT && c.pitch() <= PITCH_LIMIT);
            assert_orthonormal(&c);
        }
    }

    #[test]
    fn pitch_saturates_at_limit() {
        let mut c = Camera::default();

        for _ in 0..10 {
            c.rotate(0.0, 1000.0, true).unwrap();
            assert_eq!(c.pitch(), 89.0);
        }

        // one step down only moves 100 degrees, well inside the limit
        c.rotate(0.0, -1000.0, true).unwrap();
        assert!((c.pitch() - -11.0).abs() < 1e-4);

        for _ in 0..10 {
            c.rotate(0.0, -1000.0, true).unwrap();
            assert_eq!(c.pitch(), -89.0);
        }

        assert_orthonormal(&c);
    }

    #[test]
    fn unconstrained_pitch_flips() {
        let mut c = Camera::default();

        c.rotate(0.0, 1000.0, false).unwrap();

        assert!(c.pitch() > 89.0);
        assert_orthonormal(&c);
        assert!(c.right().x < 0.0);
    }

    #[test]
    fn zoom_saturates() {
        let mut c = Camera::default();

        c.zoom_by(-100.0).unwrap();
        assert_eq!(c.zoom(), 45.0);
        c.zoom_by(-100.0).unwrap();
        assert_eq!(c.zoom(), 45.0);

        c.zoom_by(100.0).unwrap();
        assert_eq!(c.zoom(), 1.0);
        c.zoom_by(100.0).unwrap();
        assert_eq!(c.zoom(), 1.0);

        c.zoom_by(-4.5).unwrap();
        assert_eq!(c.field_of_view(), 5.5);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut c = Camera::default();
        c.rotate(13.0, 27.0, true).unwrap();
        let before = c.front();

        c.rotate(36000.0, 0.0, true).unwrap();
        assert!(c.yaw() > 3000.0);

        c.rotate(-36000.0, 0.0, true).unwrap();
        assert!(c.front().abs_diff_eq(before, EPS));
    }

    #[test]
    fn translate_along_front() {
        let mut c = Camera::new(Vec3::new(0.0, 0.0, 3.0));

        c.translate(Movement::Forward, 1.0).unwrap();
        assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPS));

        c.translate(Movement::Backward, 1.0).unwrap();
        assert!(c.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPS));
    }

    #[test]
    fn translate_along_right() {
        let mut c = Camera::default();

        c.translate(Movement::Right, 2.0).unwrap();
        assert!(c.position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPS));

        c.translate(Movement::Left, 4.0).unwrap();
        assert!(c.position().abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), EPS));

        // moving never touches the orientation
        assert!(c.front().abs_diff_eq(-Vec3::Z, EPS));
    }

    #[test]
    fn zero_time_is_noop() {
        let mut c = Camera::new(Vec3::new(0.25, -1.5, 3.0));
        c.rotate(123.0, -45.0, true).unwrap();
        let before = c.position();

        for dir in [
            Movement::Forward,
            Movement::Backward,
            Movement::Left,
            Movement::Right,
        ] {
            c.translate(dir, 0.0).unwrap();
            assert_eq!(c.position(), before);
        }
    }

    #[test]
    fn custom_options() {
        let mut c = Camera::with_options(
            Vec3::ZERO,
            CameraOptions {
                movement_speed : 10.0,
                mouse_sensitivity : 1.0,
            },
        );

        c.rotate(90.0, 0.0, true).unwrap();
        assert_eq!(c.yaw(), 0.0);
        assert!(c.front().abs_diff_eq(Vec3::X, EPS));

        c.translate(Movement::Forward, 0.5).unwrap();
        assert!(c.position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn view_matrix_looks_down_front() {
        let mut c = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        c.rotate(250.0, -120.0, true).unwrap();

        let view = c.view_matrix();

        assert!(view
            .transform_point3(c.position())
            .abs_diff_eq(Vec3::ZERO, EPS));
        assert!(view
            .transform_point3(c.position() + c.front())
            .abs_diff_eq(-Vec3::Z, EPS));
        assert!(view
            .transform_vector3(c.up())
            .abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn rejects_non_finite_input() {
        let mut c = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        c.rotate(10.0, 10.0, true).unwrap();
        let snapshot = c.clone();

        assert!(c.translate(Movement::Forward, f32::NAN).is_err());
        assert!(c.rotate(f64::INFINITY, 0.0, true).is_err());
        assert!(c.rotate(0.0, f64::NAN, false).is_err());
        assert!(c.zoom_by(f32::NEG_INFINITY).is_err());

        assert_eq!(c.position(), snapshot.position());
        assert_eq!(c.pitch(), snapshot.pitch());
        assert_eq!(c.zoom(), snapshot.zoom());
        assert_orthonormal(&c);
    }

    #[test]
    fn overflowing_angles_are_rejected() {
        let mut c = Camera::with_options(
            Vec3::ZERO,
            CameraOptions {
                movement_speed : 2.5,
                mouse_sensitivity : 1.0,
            },
        );

        c.rotate(f64::MAX, 0.0, true).unwrap();
        let yaw = c.yaw();
        let front = c.front();

        // finite offset, but the accumulated yaw would be infinite
        assert!(matches!(
            c.rotate(f64::MAX, 0.0, true),
            Err(Error::InvalidInput{ what : "yaw", .. }),
        ));
        assert_eq!(c.yaw(), yaw);
        assert_eq!(c.front(), front);
    }

    #[test]
    fn projection_uses_degrees() {
        let p = Projection::default();

        assert_eq!(
            p.matrix(45.0),
            Mat4::perspective_rh_gl(
                std::f32::consts::FRAC_PI_4,
                800.0 / 600.0,
                0.1,
                100.0,
            ),
        );
    }
}
