pub mod client;
pub mod loader;
pub mod types;

pub use client::NewsClient;
pub use loader::load_news;
pub use types::Headline;
