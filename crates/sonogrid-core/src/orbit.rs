//! Orbit-style camera controls (rotate + dolly, no pan) with damping.
//!
//! Input handlers accumulate rotation/dolly requests; [`OrbitControls::update`]
//! applies them once per frame. With damping enabled the accumulated deltas
//! decay geometrically, so the camera keeps drifting for a few frames after
//! the pointer stops.

use crate::camera::Camera;
use crate::constants::*;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Spherical coordinates around the orbit target (y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    /// Azimuth around +Y, measured from +Z.
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    camera: Camera,
    delta_theta: f32,
    delta_phi: f32,
    pending_scale: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl OrbitControls {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pending_scale: 1.0,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Rotate from a pointer drag of `(dx, dy)` pixels on a viewport
    /// `viewport_height` pixels tall.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.rotate_left(TAU * dx / h * self.rotate_speed);
        self.rotate_up(TAU * dy / h * self.rotate_speed);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Wheel input: negative `delta_y` moves closer, positive moves away.
    pub fn dolly_by_wheel(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.pending_scale *= step;
        } else if delta_y > 0.0 {
            self.pending_scale /= step;
        }
    }

    /// Apply pending input to the camera. Returns true when the eye moved.
    pub fn update(&mut self) -> bool {
        let offset = self.camera.eye - self.camera.target;
        let mut s = Spherical::from_offset(offset);

        if self.enable_damping {
            s.theta += self.delta_theta * self.damping_factor;
            s.phi += self.delta_phi * self.damping_factor;
        } else {
            s.theta += self.delta_theta;
            s.phi += self.delta_phi;
        }
        s.phi = s.phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        s.radius = (s.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let new_eye = self.camera.target + s.to_offset();
        let moved = (new_eye - self.camera.eye).length_squared() > 1e-8;
        self.camera.eye = new_eye;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.pending_scale = 1.0;
        moved
    }

    pub fn distance(&self) -> f32 {
        (self.camera.eye - self.camera.target).length()
    }
}
