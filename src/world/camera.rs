use glam::{Vec2, vec2};

/// Player view-point in world space.
///
/// * Only **yaw** (heading) exists: no roll, no pitch.
/// * `plane` is perpendicular to `dir`; its length sets the field of view
///   (`fov = 2·atan(|plane| / |dir|)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,   // map units, one tile = 1.0
    pub dir: Vec2,   // unit forward vector
    pub plane: Vec2, // camera plane, right of `dir`
}

impl Camera {
    /// Pose from explicit vectors, as supplied by an external controller.
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Facing `yaw` radians (0 = +X, turning toward +Y) with horizontal `fov`.
    pub fn from_yaw(pos: Vec2, yaw: f32, fov: f32) -> Self {
        let (s, c) = yaw.sin_cos();
        let dir = vec2(c, s);
        // rows grow downward, so `perp` is the viewer's right
        let plane = dir.perp() * (fov * 0.5).tan();
        Self { pos, dir, plane }
    }

    /// Ray direction for a camera coordinate in `-1 ..= 1`.
    #[inline(always)]
    pub fn ray_dir(&self, camera_x: f32) -> Vec2 {
        self.dir + self.plane * camera_x
    }

    /// Transform a world point `p` into camera-local coords by inverting
    /// the `[plane, dir]` basis:
    ///  .x = lateral offset in plane units
    ///  .y = depth along the forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        let inv_det = 1.0 / (self.plane.x * self.dir.y - self.dir.x * self.plane.y);
        vec2(
            inv_det * (self.dir.y * d.x - self.dir.x * d.y),
            inv_det * (-self.plane.y * d.x + self.plane.x * d.y),
        )
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate `dir` and `plane` together (positive = toward +Y, a right turn).
    pub fn turn(&mut self, delta_yaw: f32) {
        let rot = Vec2::from_angle(delta_yaw);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    /// Horizontal field of view in radians.
    #[inline]
    pub fn fov(&self) -> f32 {
        2.0 * (self.plane.length() / self.dir.length()).atan()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
