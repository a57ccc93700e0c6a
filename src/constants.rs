/// Gameplay tuning shared across systems.
///
/// World units are map pixels multiplied by [`MAP_SCALE`]; the y axis grows
/// downward, matching the authored map documents.
pub const MAP_SCALE: f32 = 4.0;
/// Downward acceleration applied to dynamic bodies, in units per second².
pub const GRAVITY: f32 = 2100.0;
/// Largest downward speed a dynamic body may reach.
pub const MAX_FALL_SPEED: f32 = 65_536.0;

pub const PLAYER_SPEED: f32 = 300.0;
pub const PLAYER_JUMP_FORCE: f32 = 640.0;
/// Jumps available between two ground contacts (ground jump plus one air jump).
pub const PLAYER_JUMP_COUNT: u32 = 2;
pub const PLAYER_MAX_HEALTH: u32 = 3;
/// Falling below this height restarts the first level.
pub const FALL_DEATH_Y: f32 = 2000.0;

pub const INHALE_PULL_SPEED: f32 = 800.0;
/// Inhale zone offset from the player's origin, in sprite pixels.
pub const INHALE_ZONE_OFFSET_X: f32 = 14.0;
pub const INHALE_ZONE_OFFSET_Y: f32 = 8.0;
pub const INHALE_ZONE_WIDTH: f32 = 20.0;
pub const INHALE_ZONE_HEIGHT: f32 = 4.0;
/// Horizontal distance between the player and the rendered inhale effect.
pub const INHALE_EFFECT_DISTANCE: f32 = 60.0;

pub const PROJECTILE_SPEED: f32 = 800.0;
pub const PROJECTILE_OFFSET_X: f32 = 80.0;
pub const PROJECTILE_OFFSET_Y: f32 = 5.0;

/// Seconds between shooting and the return to the idle animation.
pub const SHOOT_RECOVERY_SECONDS: f64 = 1.0;
/// Duration of each half (fade out, fade in) of the damage blink.
pub const BLINK_HALF_SECONDS: f64 = 0.5;

pub const FLAME_JUMP_FORCE: f32 = 1000.0;
pub const FLAME_IDLE_SECONDS: f64 = 1.0;

pub const GUY_DEFAULT_SPEED: f32 = 100.0;
pub const GUY_IDLE_SECONDS: f64 = 1.0;
pub const GUY_PATROL_SECONDS: f64 = 2.0;

pub const BIRD_DEFAULT_SPEED: f32 = 100.0;
/// Birds further than this outside the camera view are despawned.
pub const BIRD_OFFSCREEN_DISTANCE: f32 = 400.0;
/// Shooting stars further than this outside the camera view have expired.
pub const PROJECTILE_OFFSCREEN_DISTANCE: f32 = 400.0;

/// The camera follows the player only while it is left of this x position.
pub const CAMERA_FOLLOW_LIMIT_X: f32 = 432.0;
pub const CAMERA_LEAD_X: f32 = 500.0;
pub const CAMERA_FIXED_Y: f32 = 800.0;
pub const CAMERA_ZOOM: f32 = 0.7;
