pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, MocksiteError, MocksiteResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
