//! Chat Transport Adapters shared by tests and local runs.
//!
//! - `RecordingTransport` - captures outbound operations in memory

mod recording_transport;

pub use recording_transport::{RecordingTransport, TransportOp};
