//! Merged directory view over a left root, a right root, and their diff

pub mod entry;
pub mod merge;
pub mod session;

pub use entry::{Collapsible, EntryAction, TreeEntry, TreeItem};
pub use merge::{list_children, MergeOptions};
pub use session::{ComparisonSession, DiffRoots, SubscriptionId};
