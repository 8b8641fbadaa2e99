//! Query/mutation cache with declarative, prefix-scoped invalidation.

mod key;
mod store;

pub use key::{QueryKey, QueryKeyError};
pub use store::{QueryCache, QuerySnapshot, QueryStatus};
