#[macro_use]
extern crate log;

pub mod consts;
pub mod error;

pub mod vector;
pub mod ray;
pub mod color;

pub mod material;
pub mod light;
pub mod shape;
pub mod intersect;
pub mod scene;

pub mod camera;
pub mod canvas;
pub mod parallel;

pub mod description;
pub mod demo;

use crate::consts::FEQ_EPSILON;

/// Compares two floats with the crate-wide tolerance.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
