use std::time::Duration;

/// Sequencer, cursor and form tuning constants.
///
/// These constants express intended behavior (travel distances, spring
/// parameters, dismiss delays) and keep magic numbers out of the code.

// Section transitions
pub const SECTION_TRAVEL: f32 = 100.0; // px a card travels while fading in/out
pub const SECTION_REST_SCALE: f32 = 0.9; // scale of a card outside its hold window
pub const SECTION_SCALE_WINDOW: f32 = 0.25; // fraction of the hold window used to ease scale to 1

// Active-section hand-off margin (progress units, trimmed from both ends of a hold window)
pub const ACTIVE_HANDOFF_MARGIN: f32 = 0.01;

// Projects showcase breakpoints: (start, peak_start, peak_end, end)
pub const SHOWCASE_BREAKPOINTS: [[f32; 4]; 3] = [
    [0.00, 0.10, 0.30, 0.38],
    [0.30, 0.38, 0.62, 0.70],
    [0.62, 0.70, 0.90, 1.00],
];

// Backdrop parallax keyframes
pub const BACKDROP_OFFSET_STOPS: [f32; 2] = [0.0, 1.0];
pub const BACKDROP_OFFSET_VALUES: [f32; 2] = [100.0, -100.0];
pub const BACKDROP_OPACITY_STOPS: [f32; 4] = [0.0, 0.2, 0.8, 1.0];
pub const BACKDROP_OPACITY_VALUES: [f32; 4] = [0.0, 1.0, 1.0, 0.0];

// Cursor springs
pub const CURSOR_DOT_STIFFNESS: f32 = 800.0;
pub const CURSOR_DOT_DAMPING: f32 = 35.0;
pub const CURSOR_DOT_MASS: f32 = 0.2;
pub const CURSOR_DOT_OFFSET: f32 = 8.0; // half the dot size

pub const CURSOR_TRAIL_STIFFNESS: f32 = 200.0;
pub const CURSOR_TRAIL_DAMPING: f32 = 20.0;
pub const CURSOR_TRAIL_MASS: f32 = 0.3;
pub const CURSOR_TRAIL_OFFSET: f32 = 12.0; // half the trail ring size

// Cursor hover scales
pub const CURSOR_DOT_SCALE_INTERACTIVE: f32 = 1.8;
pub const CURSOR_DOT_SCALE_TEXT: f32 = 2.5;
pub const CURSOR_TRAIL_SCALE_INTERACTIVE: f32 = 1.5;
pub const CURSOR_TRAIL_SCALE_TEXT: f32 = 2.0;
pub const CURSOR_TRAIL_OPACITY_TEXT: f32 = 0.8;
pub const CURSOR_TRAIL_OPACITY_IDLE: f32 = 0.6;

// Clamp for frame gaps (tab switches, breakpoints) fed to the springs
pub const CURSOR_MAX_STEP_SEC: f32 = 1.0 / 30.0;

// Contact form
pub const STATUS_DISMISS_AFTER: Duration = Duration::from_secs(5);
pub const CONTACT_RECIPIENT: &str = "arsh199965@gmail.com";

// Particle fields
pub const PARTICLE_COUNT: usize = 15;
pub const SCATTER_DURATION_MIN_SEC: f32 = 3.0;
pub const SCATTER_DURATION_SPAN_SEC: f32 = 4.0;
pub const SCATTER_DELAY_MAX_SEC: f32 = 3.0;
pub const GOLDEN_ANGLE_DEG: f32 = 137.508;
pub const GOLDEN_RATIO: f32 = 1.618;
