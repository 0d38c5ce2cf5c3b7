pub mod export;
pub mod generator;
pub mod suggest;

pub use generator::{generate_document, render_block};
pub use suggest::SuggestClient;
