//! Property-based tests for the path codec and the merged view

mod merge_properties;
mod path_codec;
