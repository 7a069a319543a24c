pub mod constants;
pub mod deck;
pub mod package;
pub mod xml;

mod theme;

// Keep the public surface small and intentional.
pub use constants::*;
pub use deck::*;
pub use package::*;
pub use xml::*;
