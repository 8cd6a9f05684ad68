pub mod error;
pub mod file;
pub mod memory;
pub mod repository;
pub mod store;

pub use domain::{EnrollmentRecord, EnrollmentStatus, Reference};
pub use error::{RecordStoreError, Result};
pub use file::JsonFileRecordStore;
pub use memory::InMemoryRecordStore;
pub use repository::{RecordBatch, RecordRepository};
pub use store::RecordStore;
