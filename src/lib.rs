/// Environment interface: transitions, spaces and episode reports
pub mod env;

/// Configuration errors
pub mod error;

/// Positions and axis-aligned rectangles
pub mod geom;

/// Deterministic, reseedable random sources
pub mod seeding;

/// Environment implementations
#[cfg(feature = "gym")]
pub mod gym;

/// Terminal visualizer
#[cfg(feature = "viz")]
pub mod viz;
