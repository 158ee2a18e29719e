/// Field tuning constants.
///
/// These constants express intended behavior (depth interval, spring time
/// constants, falloff shapes) and keep magic numbers out of the frame path.

// Depth cycling interval along the viewing axis (world units, -Z into the
// screen). The axis is treated as a ring: values outside fold back in.
pub const DEPTH_NEAR: f32 = -1.1;
pub const DEPTH_FAR: f32 = -45.1;
pub const DEPTH_SPAN: f32 = DEPTH_NEAR - DEPTH_FAR;

// Depth offset derived from eased scroll progress
pub const DEPTH_OFFSET_LEAD: f32 = 0.04;
pub const DEPTH_OFFSET_MAX: f32 = 1.04;

// Scroll spring (first-order exponential approach, 1/s)
pub const SCROLL_SPRING_RATE: f32 = 7.0;
pub const SCROLL_SPRING_RATE_REDUCED: f32 = 2.8;
pub const SCROLL_VELOCITY_RATE: f32 = 4.5; // damping for the velocity estimate
pub const REDUCED_MOTION_DEPTH_FRACTION: f32 = 0.35;

// Staged progress remap: front-load early scroll, settle near the end
pub const STAGE_IN_END: f32 = 0.18; // raw window [0, 0.18]
pub const STAGE_IN_MAPPED: f32 = 0.32; // maps to staged [0, 0.32]
pub const STAGE_OUT_START: f32 = 0.84; // raw window [0.84, 1]
pub const STAGE_OUT_MAPPED: f32 = 0.72; // maps to staged [0.72, 1]
pub const STAGE_EASE_BLEND: f32 = 0.6; // quintic-eased weight vs raw staged

// Camera model used for pointer projection
pub const CAMERA_Z: f32 = 6.0;
pub const FIELD_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

// Field footprint (world units; X scales with viewport aspect)
pub const FIELD_HALF_HEIGHT: f32 = 6.0;
pub const FIELD_ASPECT_MIN: f32 = 0.5;
pub const FIELD_ASPECT_MAX: f32 = 2.5;
// Rest positions recycle at this multiple of the footprint
pub const NEIGHBOR_BOUND_SCALE: f32 = 1.35;
// Pointer plane offset from the field origin (local Z)
pub const POINTER_PLANE_LOCAL_Z: f32 = -12.0;

// Seeding (golden-angle sunflower packing)
pub const GOLDEN_ANGLE: f32 = 2.399_963; // ~137.5 degrees
pub const ANGLE_JITTER: f32 = 0.22; // radians
pub const RADIUS_JITTER: f32 = 0.07; // fraction of normalized radius
pub const DEPTH_BIAS_EXP: f32 = 0.72; // random^exp biases starts toward the back
pub const DEPTH_JITTER: f32 = 1.5; // world units

// Per-particle constant draw ranges
pub const OSC_AMP_MIN: f32 = 0.08;
pub const OSC_AMP_MAX: f32 = 0.40;
pub const OSC_SPEED_MIN: f32 = 0.25;
pub const OSC_SPEED_MAX: f32 = 0.95;
pub const DRIFT_AMP_MIN: f32 = 0.02;
pub const DRIFT_AMP_MAX: f32 = 0.14;
pub const DRIFT_SPEED: f32 = 0.13; // shared slow-drift rate
pub const ORBIT_RADIUS_MIN: f32 = 0.15;
pub const ORBIT_RADIUS_MAX: f32 = 0.70;
pub const ORBIT_SPEED_MIN: f32 = 0.05;
pub const ORBIT_SPEED_MAX: f32 = 0.35;
pub const ORBIT_TILT_MIN: f32 = 0.35;
pub const ORBIT_TILT_MAX: f32 = 1.0;
pub const ROTATION_RATE_MAX: f32 = 0.65; // radians/s, signed draw
pub const SIZE_JITTER: f32 = 0.15;

// Orbit shaping at frame time
pub const ORBIT_BACK_SHRINK: f32 = 0.6; // radius fraction as depth_factor -> 0
pub const ORBIT_NEAR_SHRINK: f32 = 0.5; // radius fraction for near-viewer starts
pub const SWIRL_DRIFT_RATE: f32 = 0.018; // radians per world unit of depth offset
pub const FIELD_TILT: f32 = 0.35; // depth-proportional vertical tilt

// Scale shaping. Farther particles render larger (reverse depth-of-field);
// near particles shrink as they pass the camera plane before wrapping back.
pub const BASE_SCALE_MIN: f32 = 0.55;
pub const BASE_SCALE_MAX: f32 = 1.25;
pub const PERSPECTIVE_FAR: f32 = 1.9;
pub const PERSPECTIVE_NEAR: f32 = 0.75;
pub const TWINKLE_SPEED: f32 = 1.7;
pub const TWINKLE_AMP: f32 = 0.12;
pub const VEL_BOOST_COEFF: f32 = 0.35; // per progress-unit/s of scroll velocity
pub const VEL_BOOST_MAX: f32 = 0.6;

// Opacity shaping
pub const OPACITY_FLOOR: f32 = 0.25;
pub const OPACITY_DEPTH_SPAN: f32 = 0.55;
pub const OPACITY_VEL_COEFF: f32 = 0.25;

// Pointer repulsion
pub const REPEL_RADIUS: f32 = 2.6; // world units on the field plane
pub const REPEL_STRENGTH: f32 = 0.85;
pub const MOTION_BOOST_POINTER: f32 = 0.12; // per ndc-unit/s of pointer speed
pub const MOTION_BOOST_SCROLL: f32 = 0.45; // per progress-unit/s of scroll velocity
pub const MOTION_BOOST_MAX: f32 = 1.1;
pub const POINTER_SPEED_MAX: f32 = 10.0; // ndc units per second
pub const POINTER_SPEED_SMOOTHING: f32 = 8.0; // 1/s
pub const REPEL_COOLDOWN_SEC: f32 = 0.12; // per-particle rest-shift gate
pub const REST_SHIFT_FACTOR: f32 = 0.55; // fraction of the impulse kept as rest shift
pub const REST_SHIFT_DURATION: f32 = 0.45;
pub const SCALE_PUNCH_AMOUNT: f32 = 0.35;
pub const SCALE_PUNCH_DURATION: f32 = 0.30;
pub const GLOW_FLASH_AMOUNT: f32 = 0.45;
pub const GLOW_FLASH_DURATION: f32 = 0.50;

// Overlap resolver
pub const COLLISION_FRAME_STEP: u64 = 3; // run every Nth frame
pub const GRID_CELL_SIZE: f32 = 1.0;
pub const COLLISION_RADIUS_FACTOR: f32 = 0.42; // visual radius = scale * factor
pub const COLLISION_RELAX: f32 = 0.6; // fraction of overlap removed per pass
pub const COLLISION_EPSILON: f32 = 1e-4; // below this, pairs are left alone
pub const RESOLVE_EASE_DURATION: f32 = 0.24;

// Population bounds
pub const MAX_PARTICLE_COUNT: usize = 600;
