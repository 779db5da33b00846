//! Plans and renders the word-level transitions of a rotating sentence
//! display: tokenize the sentences, diff every pair, then pick a cycle with
//! few changes along the way.

pub mod alignment;
pub mod config;
pub mod error;
pub mod playback;
pub mod render;
pub mod tokenizer;
pub mod tour;
pub mod types;

pub use alignment::compute_edit_script;
pub use config::Settings;
pub use error::{Error, Result};
pub use playback::Playback;
pub use render::{render_sentence, render_transition};
pub use tokenizer::{tokenize, tokenize_all, Token, TokenKind, TokenParser};
pub use tour::{build_tour, CostMatrix, Leg, Tour, TourOptions};
pub use types::{EditAction, EditScript, Word};
