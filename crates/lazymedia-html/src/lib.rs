//! lazymedia HTML - markup ingestion
//!
//! Parses HTML5 into the lazymedia DOM.

mod parser;

pub use parser::HtmlParser;
