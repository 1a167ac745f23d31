// Runtime parameters
pub const NUM_THREADS: usize = 4;
pub const CANVAS_WIDTH: usize = 2000;
pub const CANVAS_HEIGHT: usize = 1000;
pub const OUT_FILE: &'static str = "./output.png";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Channel ceiling for 8-bit colors
pub const CHANNEL_MAX: f64 = 255.0;
