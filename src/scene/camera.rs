use glam::DVec3;
use std::f64::consts::PI;

/// Fraction of the remaining distance covered per frame while locked on.
pub const FOCUS_SMOOTHING: f64 = 0.05;
/// Fraction per frame used to drift the orbit target back to the origin.
pub const RECENTER_SMOOTHING: f64 = 0.1;
/// Camera distance from the globe centre while focused.
pub const FOCUS_DISTANCE: f64 = 4.0;

pub const MIN_DISTANCE: f64 = 2.5;
pub const MAX_DISTANCE: f64 = 12.0;
pub const DAMPING_FACTOR: f64 = 0.05;

const POLE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub up: DVec3,
    pub fov_y_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 6.0),
            up: DVec3::Y,
            fov_y_deg: 50.0,
        }
    }
}

/// Manual user input for the orbit controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    /// Radians around the up axis and towards the poles.
    Rotate { yaw: f64, pitch: f64 },
    /// Multiplies the camera distance; values below 1 move closer.
    Zoom(f64),
    Pan { dx: f64, dy: f64 },
}

/// Orbit-style controls: rotate and zoom around `target`, no panning.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: DVec3,
    enabled: bool,
    pending_yaw: f64,
    pending_pitch: f64,
    pending_scale: f64,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: DVec3::ZERO,
            enabled: true,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_scale = 1.0;
        }
        self.enabled = enabled;
    }

    /// Returns whether the input was accepted.
    pub fn handle_input(&mut self, input: OrbitInput) -> bool {
        if !self.enabled {
            return false;
        }
        match input {
            OrbitInput::Rotate { yaw, pitch } => {
                self.pending_yaw += yaw;
                self.pending_pitch += pitch;
                true
            }
            OrbitInput::Zoom(scale) if scale.is_finite() && scale > 0.0 => {
                self.pending_scale *= scale;
                true
            }
            OrbitInput::Zoom(_) | OrbitInput::Pan { .. } => false,
        }
    }

    /// Applies damped rotation and zoom, then clamps the camera distance.
    /// Does nothing while disabled so animated moves are left untouched.
    pub fn update(&mut self, camera: &mut Camera) {
        if !self.enabled {
            return;
        }

        let offset = camera.position - self.target;
        let radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        theta += self.pending_yaw * DAMPING_FACTOR;
        phi = (phi + self.pending_pitch * DAMPING_FACTOR).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = (radius * self.pending_scale).clamp(MIN_DISTANCE, MAX_DISTANCE);

        camera.position = self.target
            + DVec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        self.pending_yaw *= 1.0 - DAMPING_FACTOR;
        self.pending_pitch *= 1.0 - DAMPING_FACTOR;
        self.pending_scale = 1.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerMode {
    Free,
    Focused,
}

/// Drives the camera between free orbiting and an animated lock on the
/// user's location. Called once per frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    pub controls: OrbitControls,
    mode: ControllerMode,
    camera_goal: DVec3,
    target_goal: DVec3,
    last_focus: bool,
    last_point: Option<DVec3>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            controls: OrbitControls::default(),
            mode: ControllerMode::Free,
            camera_goal: Camera::default().position,
            target_goal: DVec3::ZERO,
            last_focus: false,
            last_point: None,
        }
    }
}

impl CameraController {
    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    pub fn camera_goal(&self) -> DVec3 {
        self.camera_goal
    }

    pub fn target_goal(&self) -> DVec3 {
        self.target_goal
    }

    pub fn frame(&mut self, camera: &mut Camera, focus: bool, focus_point: Option<DVec3>) {
        self.sync(focus, focus_point);

        match self.mode {
            ControllerMode::Focused => {
                self.controls.set_enabled(false);
                camera.position = camera.position.lerp(self.camera_goal, FOCUS_SMOOTHING);
                self.controls.target = self.controls.target.lerp(self.target_goal, FOCUS_SMOOTHING);
            }
            ControllerMode::Free => {
                self.controls.set_enabled(true);
                self.controls.target = self.controls.target.lerp(DVec3::ZERO, RECENTER_SMOOTHING);
            }
        }

        self.controls.update(camera);
    }

    fn sync(&mut self, focus: bool, focus_point: Option<DVec3>) {
        if focus == self.last_focus && focus_point == self.last_point {
            return;
        }

        if focus {
            if let Some(point) = focus_point {
                self.camera_goal = point.normalize_or_zero() * FOCUS_DISTANCE;
                self.target_goal = point;
            }
        } else if self.last_focus {
            self.target_goal = DVec3::ZERO;
        }

        if focus != self.last_focus {
            log::debug!("Camera controller {} -> {}", self.mode, mode_for(focus));
        }
        self.mode = mode_for(focus);
        self.last_focus = focus;
        self.last_point = focus_point;
    }
}

fn mode_for(focus: bool) -> ControllerMode {
    if focus {
        ControllerMode::Focused
    } else {
        ControllerMode::Free
    }
}
