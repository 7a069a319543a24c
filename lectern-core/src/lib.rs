pub mod extract;
pub mod outline;
pub mod payload;
pub mod prompts;
pub mod types;

// Keep the public surface small and intentional.
pub use extract::*;
pub use outline::*;
pub use payload::*;
pub use prompts::*;
pub use types::*;
