//! Animation catalog for the shared sprite sheet.
//!
//! The sheet is a 9 x 10 grid of 16 px cells. Each animation is either a
//! single frame or a frame range played at a fixed rate.

use hashbrown::HashMap;

/// Sheet image, relative to the asset root.
pub const SHEET_PATH: &str = "kirby-like.png";
pub const SHEET_COLUMNS: u32 = 9;
pub const SHEET_ROWS: u32 = 10;
/// Side of one sheet cell, in pixels.
pub const CELL_SIZE: u32 = 16;

pub const KIRB_IDLE: &str = "kirbIdle";
pub const KIRB_INHALING: &str = "kirbInhaling";
pub const KIRB_FULL: &str = "kirbFull";
pub const KIRB_INHALE_EFFECT: &str = "kirbInhaleEffect";
pub const SHOOTING_STAR: &str = "shootingStar";
pub const FLAME: &str = "flame";
pub const GUY_IDLE: &str = "guyIdle";
pub const GUY_WALK: &str = "guyWalk";
pub const BIRD: &str = "bird";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    Frame(u32),
    Range {
        from: u32,
        to: u32,
        /// Frames per second.
        fps: f32,
        looping: bool,
    },
}

impl AnimationSpec {
    /// Sheet index shown `elapsed` seconds after the animation started.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Elapsed time is clamped non-negative and frame counts are tiny."
    )]
    pub fn frame_at(&self, elapsed: f64) -> u32 {
        match *self {
            Self::Frame(index) => index,
            Self::Range {
                from,
                to,
                fps,
                looping,
            } => {
                let len = to.saturating_sub(from) + 1;
                let step = (elapsed.max(0.0) * f64::from(fps)).floor() as u64;
                let offset = if looping {
                    step % u64::from(len)
                } else {
                    step.min(u64::from(len - 1))
                };
                from + offset as u32
            }
        }
    }
}

/// Animation names mapped to their specs.
#[derive(Debug, Clone, Default)]
pub struct AnimationCatalog {
    anims: HashMap<&'static str, AnimationSpec>,
}

impl AnimationCatalog {
    /// The catalog of the game's single sprite sheet.
    #[must_use]
    pub fn kirby_sheet() -> Self {
        let range = |from, to, fps| AnimationSpec::Range {
            from,
            to,
            fps,
            looping: true,
        };
        let anims = HashMap::from([
            (KIRB_IDLE, AnimationSpec::Frame(0)),
            (KIRB_INHALING, AnimationSpec::Frame(1)),
            (KIRB_FULL, AnimationSpec::Frame(2)),
            (KIRB_INHALE_EFFECT, range(3, 8, 15.0)),
            (SHOOTING_STAR, AnimationSpec::Frame(9)),
            (FLAME, range(36, 37, 4.0)),
            (GUY_IDLE, AnimationSpec::Frame(18)),
            (GUY_WALK, range(18, 19, 4.0)),
            (BIRD, range(27, 28, 4.0)),
        ]);
        Self { anims }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<AnimationSpec> {
        self.anims.get(name).copied()
    }

    /// Sheet index for `name` after `elapsed` seconds; `None` if unknown.
    #[must_use]
    pub fn frame_at(&self, name: &str, elapsed: f64) -> Option<u32> {
        self.get(name).map(|spec| spec.frame_at(elapsed))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anims.is_empty()
    }
}
