pub mod client;
pub mod resolver;
pub mod types;

pub use client::WikiClient;
pub use resolver::{load_wiki, WikiResolver};
pub use types::{WikiCandidate, WikiMatch};
