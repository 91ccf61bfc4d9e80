//! Test data shared between the ttf crates.
//!
//! Rather than checking in binary fonts, every fixture is assembled in code
//! from the table builders in [`tables`], so each test can state exactly the
//! bytes it depends on.

pub mod bebuffer;
pub mod font_builder;
pub mod tables;
pub mod test_fonts;

pub use bebuffer::BeBuffer;
pub use font_builder::FontBuilder;
