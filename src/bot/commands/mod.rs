//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Menu posting commands
pub mod menu;

// Export commands
pub use general::*;
pub use menu::*;
