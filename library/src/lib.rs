#![forbid(unsafe_code)]

pub mod camera;
pub mod config;
pub mod error;
pub mod focus;
pub mod game;
pub mod instance;
pub mod overlay;
pub mod particles;
pub mod picking;
pub mod protocol;
pub mod starfield;
pub mod tween;

pub type Id = usize;

pub type Result<T> = std::result::Result<T, crate::error::Error>;
