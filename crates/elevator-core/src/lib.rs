pub mod config;
pub mod engine;
pub mod error;
pub mod sound;

pub use config::{AppConfig, ElevatorConfig, SoundSource};
pub use engine::{Elevator, FrameQueue};
pub use error::{Error, Result, SoundError};
