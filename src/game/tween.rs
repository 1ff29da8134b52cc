//! Piece tweens
//!
//! A tween walks one piece between two world positions along an arc and
//! may flip it over (promotion shows the king side). Its progress comes
//! from an animation in the game's [`crate::animation::AnimationSet`]:
//! either a whole event animation or one link of a chain.

use bevy::math::Vec3;
use std::f32::consts::PI;

use crate::animation::AnimationId;
use crate::game::pieces::PieceId;

/// Arc height per unit of distance travelled
const HOP_PER_UNIT: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenDriver {
    Event(AnimationId),
    /// One link of a chain, by index
    Link(AnimationId, usize),
}

impl TweenDriver {
    pub fn animation(&self) -> AnimationId {
        match self {
            TweenDriver::Event(id) | TweenDriver::Link(id, _) => *id,
        }
    }
}

/// Rendered position and orientation of a piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiecePose {
    pub translation: Vec3,
    /// Rotation about the piece's X axis; `PI` shows the king side
    pub flip: f32,
}

impl PiecePose {
    pub fn at_rest(translation: Vec3, king: bool) -> Self {
        Self {
            translation,
            flip: if king { PI } else { 0.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceTween {
    pub piece: PieceId,
    pub from: Vec3,
    pub to: Vec3,
    pub hop: f32,
    pub flip_from: f32,
    pub flip_to: f32,
    pub driver: TweenDriver,
}

impl PieceTween {
    /// Tween along an arc proportional to the distance covered
    pub fn arc(piece: PieceId, from: Vec3, to: Vec3, driver: TweenDriver) -> Self {
        Self {
            piece,
            from,
            to,
            hop: HOP_PER_UNIT * from.distance(to),
            flip_from: 0.0,
            flip_to: 0.0,
            driver,
        }
    }

    /// Tween that stays on the table
    pub fn slide(piece: PieceId, from: Vec3, to: Vec3, driver: TweenDriver) -> Self {
        Self {
            hop: 0.0,
            ..Self::arc(piece, from, to, driver)
        }
    }

    pub fn with_flip(mut self, from: f32, to: f32) -> Self {
        self.flip_from = from;
        self.flip_to = to;
        self
    }

    pub fn pose(&self, progress: f32) -> PiecePose {
        let p = progress.clamp(0.0, 1.0);
        let lift = Vec3::Y * self.hop * 4.0 * p * (1.0 - p);
        PiecePose {
            translation: self.from.lerp(self.to, p) + lift,
            flip: self.flip_from + (self.flip_to - self.flip_from) * p,
        }
    }
}

/// Cross drawn over a tile that was clicked illegally
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectMarker {
    pub tile: (u8, u8),
    pub animation: AnimationId,
}
