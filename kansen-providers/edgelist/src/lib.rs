//! Contact-graph provider for CSV edge lists with `id1`, `id2`, and
//! `duration` columns.

mod errors;
mod provider;
mod record;

pub use errors::EdgeListProviderError;
pub use provider::EdgeListProvider;
