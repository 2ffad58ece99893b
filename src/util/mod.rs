//! Utility functions for common operations.
//!
//! Text processing for terminal rendering: Unicode-aware width calculation,
//! truncation, and control-character sanitization for text arriving from
//! the generated page document.

mod text;

pub use text::{display_width, sanitize_text, truncate_to_width};

/// Maximum accepted length of a typed category in the tag prompt.
pub const MAX_TAG_INPUT_LENGTH: usize = 128;
