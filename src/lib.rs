pub mod app;
pub mod asset;
pub mod clock;
pub mod config;
pub mod controller;
pub mod controls;
pub mod errors;
pub mod frame_index;
pub mod handle;
pub mod prelude;
pub mod progress;
pub mod resource;
pub mod surface;
#[cfg(test)]
mod testing;
pub mod types;
