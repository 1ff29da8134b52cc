//! Keyframe animations for components
//!
//! Translation and scale interpolate linearly between keyframes, rotation
//! (XYZ Euler angles in degrees) through a quaternion slerp. Before the first
//! keyframe the animation is inactive; after the last it holds the last pose.

use bevy::math::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// A pose at an instant, in seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub instant: f64,
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

impl Keyframe {
    fn rotation_quat(&self) -> Quat {
        let [x, y, z] = self.rotation;
        Quat::from_euler(EulerRot::XYZ, x.to_radians(), y.to_radians(), z.to_radians())
    }

    fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            self.rotation_quat(),
            Vec3::from_array(self.translation),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeAnimation {
    keyframes: Vec<Keyframe>,
    current: Option<Mat4>,
}

impl KeyframeAnimation {
    /// Sort keyframes by instant, rejecting empty or ambiguous sequences
    pub fn new(mut keyframes: Vec<Keyframe>) -> Result<Self, String> {
        if keyframes.is_empty() {
            return Err("animation has no keyframes".to_string());
        }
        if let Some(bad) = keyframes.iter().find(|k| !k.instant.is_finite() || k.instant < 0.0) {
            return Err(format!("keyframe instant {} is not a valid time", bad.instant));
        }
        keyframes.sort_by(|a, b| a.instant.total_cmp(&b.instant));
        if let Some(pair) = keyframes.windows(2).find(|w| w[0].instant == w[1].instant) {
            return Err(format!("two keyframes at instant {}", pair[0].instant));
        }
        Ok(Self {
            keyframes,
            current: None,
        })
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Transformation at `t`, `None` while inactive
    pub fn matrix_at(&self, t: f64) -> Option<Mat4> {
        let first = self.keyframes.first()?;
        if t < first.instant {
            return None;
        }
        let next = self.keyframes.partition_point(|k| k.instant <= t);
        let Some(b) = self.keyframes.get(next) else {
            return self.keyframes.last().map(Keyframe::matrix);
        };
        let a = &self.keyframes[next - 1];
        let f = ((t - a.instant) / (b.instant - a.instant)) as f32;

        let translation = Vec3::from_array(a.translation).lerp(Vec3::from_array(b.translation), f);
        let scale = Vec3::from_array(a.scale).lerp(Vec3::from_array(b.scale), f);
        let rotation = a.rotation_quat().slerp(b.rotation_quat(), f);
        Some(Mat4::from_scale_rotation_translation(scale, rotation, translation))
    }

    pub fn update(&mut self, t: f64) {
        self.current = self.matrix_at(t);
    }

    /// Matrix sampled by the last [`Self::update`]
    pub fn current(&self) -> Option<Mat4> {
        self.current
    }
}
