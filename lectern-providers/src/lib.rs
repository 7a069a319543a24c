pub mod chat;
pub mod download;
pub mod images;
pub mod parse;
pub mod request;
pub mod runtime;

// Keep the public surface small and intentional.
pub use chat::*;
pub use download::*;
pub use images::*;
pub use parse::*;
pub use request::*;
pub use runtime::*;
