// Traits module
//
// Trait definitions shared across the crate. Sources implement
// `ReadingSource`; the stream driver and the `FeedSource` strategy consume it.

pub mod source;

pub use source::ReadingSource;
