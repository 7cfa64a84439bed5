//! Topic catalog: the content registry the engine is configured with.
//!
//! The engine ships no card data. Hosts register topics (a name plus its
//! member card names) into a `TopicCatalog` per difficulty tier at startup;
//! the rest of the engine only sees interned `CardId`/`TopicId` values.
//!
//! ## Key Types
//!
//! - `Topic`: A topic card plus its member cards
//! - `TopicCatalog`: Registration, name interning, tier sampling, and
//!   card-to-topic reverse lookup

pub mod registry;
pub mod topic;

pub use registry::TopicCatalog;
pub use topic::Topic;
