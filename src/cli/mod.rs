//! CLI operation mode handlers.
//!
//! - [`serve`]: run the review endpoint
//! - [`review`]: submit a code buffer and print the display pane
//!
//! Output formatting utilities are in [`output`].

pub mod error;
pub mod output;
pub mod review;
pub mod serve;
