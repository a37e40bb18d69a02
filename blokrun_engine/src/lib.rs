#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const BLOKRUN_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod cancel;
pub mod data_paths;
pub mod engine;
pub mod frames;
pub mod interpreter;
pub mod loader;
pub mod runner;
pub mod world;

// Re-exports for convenience
pub use cancel::CancelToken;
pub use engine::Engine;
pub use frames::{Frame, FrameSink, NullFrames, TerminalFrames};
pub use interpreter::{Outcome, execute};
pub use loader::{load_map, resolve_map};
pub use runner::{CompileRunError, RunOutcome, compile_and_run};
pub use world::{Terminal, World, WorldSnapshot};
