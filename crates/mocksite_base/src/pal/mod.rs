//! Platform abstraction layer: trait-based access to the route document
//! store and the HTTP listener, with a real implementation (std::fs +
//! tiny_http) and an in-memory mock for tests.

mod file_path;
pub mod http;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
