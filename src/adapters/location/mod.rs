//! Step Location Adapters.
//!
//! - `InMemoryStepLocation` - plain value holder with write history
//! - `QueryStringLocation` - `?step=N` inside a URL query string

mod in_memory;
mod query_string;

pub use in_memory::InMemoryStepLocation;
pub use query_string::QueryStringLocation;
