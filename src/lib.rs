pub mod filter;
pub mod hashmap;
pub mod map;
pub mod options;
pub mod sortedvec;
pub mod util;

pub use map::{ConcurrentMap, ConcurrentMapKind, MapKind, SequentialMap};
pub use options::Options;
