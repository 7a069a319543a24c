pub mod assemble;
pub mod engine;
pub mod report;
pub mod traits;

// Keep the public surface small and intentional.
pub use assemble::*;
pub use engine::*;
pub use report::*;
pub use traits::*;
