mod analysis;
/// The flat-file record store.
pub mod store;

pub use analysis::{PASS_MARK, Stats};
pub use store::{Store, StoreError};
