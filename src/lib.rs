//! Animated atom visualization
//!
//! A nucleus of alternating red and blue spheres, three electrons orbiting
//! it in the XY, XZ and YZ planes, and a smoke-test scene with a single
//! spinning cube. Both run on the same window, render and frame-loop
//! systems.

pub mod app;
pub mod config;
pub mod input;
pub mod scene;
pub mod systems;

pub use app::{run, App, Program};
