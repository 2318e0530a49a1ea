pub mod analysis;
pub mod config;
pub mod lang;
pub mod media;
pub mod preview;
pub mod timefmt;
pub mod transcript;

// Keep the public surface small and intentional.
pub use analysis::*;
pub use config::*;
pub use lang::*;
pub use media::*;
pub use preview::*;
pub use timefmt::*;
pub use transcript::*;
