mod airports;
mod error;
pub mod store;

pub use airports::{lookup_airport, Airport};
pub use error::{Error, SubscriptionError};
pub use store::{
    CollectionKind, MemoryStore, RawRecord, ScheduleStore, SnapshotUpdate, SubscriptionHandle,
};

pub type Result<T> = core::result::Result<T, Error>;
