// Animation module for catalog-cards
// Damped springs for gesture transitions, keyframe tracks for the pulse loop

pub mod keyframes;
pub mod spring;

pub use keyframes::{Ease, Keyframes};
pub use spring::{Spring, SpringParams};

// Gesture parameter sets. Stiffness/damping pairs are the tuning the hero
// and button transitions were designed around; each gesture keeps its own
// pair so the feel can be adjusted per control.

/// Hero entrance: vertical drop-in.
pub const ENTRANCE_OFFSET: SpringParams = SpringParams::new(170.0, 16.0);
/// Hero entrance: fade-in.
pub const ENTRANCE_FADE: SpringParams = SpringParams::new(120.0, 20.0);
/// Focused button grow.
pub const FOCUS_GROW: SpringParams = SpringParams::new(230.0, 15.0);
/// Focused button release.
pub const FOCUS_RELEASE: SpringParams = SpringParams::new(260.0, 20.0);
/// Hero bounce up on re-selection.
pub const BOUNCE_UP: SpringParams = SpringParams::new(250.0, 18.0);
/// Hero bounce back to rest.
pub const BOUNCE_BACK: SpringParams = SpringParams::new(260.0, 20.0);
