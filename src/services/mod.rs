// Link Saver services
// Services are stateless helpers and external collaborators: hashing, tokens,
// time, ordering, page metadata, summaries and configuration.

pub mod clock;
pub mod crypto_service;
pub mod metadata_extractor;
pub mod reorder_merge;
pub mod settings_engine;
pub mod summary_fetcher;
pub mod token_service;
