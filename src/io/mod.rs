//! I/O module
//!
//! CSV input and output for the request layer.
//!
//! # Components
//!
//! - `csv_format` - Record conversion and balance output serialization
//! - `sync_reader` - Streaming synchronous reader with iterator interface
//! - `async_reader` - Batched asynchronous reader for concurrent dispatch

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord};
pub use sync_reader::SyncReader;
