#![warn(missing_docs)]
//! Free-flying camera: pointer-lock state machine, key-edge movement
//! flags, and per-frame velocity integration with damping.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Movement speed in units per second.
pub const FLY_SPEED: f32 = 10.0;
/// Radians of rotation per pixel of mouse movement.
pub const MOUSE_SENSITIVITY: f32 = 0.002;
/// Per-frame velocity decay factor, applied once per tick rather than
/// scaled by elapsed time.
pub const DAMPENING: f32 = 0.9;

/// Logical movement keys, decoupled from any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    /// Move toward -Z in camera space.
    Forward,
    /// Move toward +Z in camera space.
    Backward,
    /// Strafe toward -X in camera space.
    Left,
    /// Strafe toward +X in camera space.
    Right,
    /// Ascend toward +Y in camera space.
    Up,
    /// Descend toward -Y in camera space.
    Down,
}

/// Six independent movement flags mutated by key edge events and read
/// once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl MoveInput {
    /// Record a key edge.
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
            MoveKey::Up => self.up = pressed,
            MoveKey::Down => self.down = pressed,
        }
    }

    /// Additive direction vector in camera-local space. Components are
    /// not normalized here; the caller normalizes the rotated sum.
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y += 1.0;
        }
        if self.down {
            dir.y -= 1.0;
        }
        dir
    }
}

/// Pointer-lock acquisition state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerLock {
    /// Mouse deltas are ignored.
    #[default]
    Unlocked,
    /// Raw mouse deltas drive the camera orientation.
    Locked,
}

/// Camera pose and velocity, persisted across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around world Y), unclamped.
    pub yaw: f32,
    /// Vertical rotation in radians, clamped to [-PI/2, PI/2].
    pub pitch: f32,
    /// Velocity carried across frames and decayed by damping.
    pub velocity: Vec3,
}

impl CameraState {
    /// Create a resting state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
        }
    }

    /// Orientation quaternion: yaw about world up applied before pitch.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// View matrix for the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }
}

/// Free camera controller fed by input events and a per-frame tick.
///
/// Input callbacks and `tick` are expected to run on one thread, in
/// event-loop order; callers on multi-threaded runtimes must serialize
/// them externally.
#[derive(Debug, Clone)]
pub struct FreeCameraController {
    state: CameraState,
    input: MoveInput,
    lock: PointerLock,
    lock_pending: bool,
    enabled: bool,
    speed: f32,
    sensitivity: f32,
}

impl FreeCameraController {
    /// Create a disabled controller at the given position; call
    /// [`start`](Self::start) once input handlers are registered.
    pub fn new(position: Vec3) -> Self {
        Self {
            state: CameraState::new(position),
            input: MoveInput::default(),
            lock: PointerLock::Unlocked,
            lock_pending: false,
            enabled: false,
            speed: FLY_SPEED,
            sensitivity: MOUSE_SENSITIVITY,
        }
    }

    /// Override the movement speed (units per second).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Override the mouse sensitivity (radians per pixel).
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Enable movement and orientation updates.
    pub fn start(&mut self) {
        self.enabled = true;
    }

    /// Disable updates and drop any held movement keys, since release
    /// edges are lost while handlers are detached.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.input = MoveInput::default();
    }

    /// Current camera state.
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Mutable camera state, for spawn placement.
    pub fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    /// Whether pointer lock is currently held.
    pub fn is_locked(&self) -> bool {
        self.lock == PointerLock::Locked
    }

    /// Record a key edge event.
    pub fn on_key(&mut self, key: MoveKey, pressed: bool) {
        self.input.set(key, pressed);
    }

    /// Click on the render surface. Returns true when a pointer-lock
    /// request should be issued to the windowing system; the lock is
    /// held only once [`on_pointer_lock_change`](Self::on_pointer_lock_change)
    /// confirms it.
    pub fn on_click(&mut self) -> bool {
        if self.lock == PointerLock::Unlocked && !self.lock_pending {
            self.lock_pending = true;
            true
        } else {
            false
        }
    }

    /// Out-of-band lock notification. `false` forces `Unlocked` from
    /// any state (denied requests included, which is tolerated rather
    /// than fatal).
    pub fn on_pointer_lock_change(&mut self, locked: bool) {
        self.lock_pending = false;
        self.lock = if locked {
            PointerLock::Locked
        } else {
            PointerLock::Unlocked
        };
    }

    /// Raw mouse movement. Only applied while locked and enabled; the
    /// pitch is re-clamped after every update, the yaw never is.
    pub fn on_mouse_move(&mut self, dx: f32, dy: f32) {
        if self.lock != PointerLock::Locked || !self.enabled {
            return;
        }
        self.state.yaw -= dx * self.sensitivity;
        self.state.pitch = (self.state.pitch - dy * self.sensitivity).clamp(
            -std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
        );
    }

    /// Per-frame integration. Acceleration requires the controller to
    /// be enabled; damping and position integration always run.
    pub fn tick(&mut self, dt: f32) -> &CameraState {
        if self.enabled {
            let dir = self.input.direction();
            // A zero vector stays zero; normalizing it is undefined.
            if dir != Vec3::ZERO {
                let dir = (self.state.orientation() * dir).normalize();
                self.state.velocity += dir * self.speed * dt;
            }
        }
        self.state.velocity *= DAMPENING;
        self.state.position += self.state.velocity;
        &self.state
    }
}
