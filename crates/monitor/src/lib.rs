//! Library entrypoint so the watcher loop can be embedded in other binaries
//! or driven directly from integration tests. The binary in `main.rs` is the
//! normal way to run it.

pub mod esplora;
pub mod pipeline;
pub mod worker;

pub use esplora::{BlockSource, EsploraClient, Transaction, TxOut};
pub use worker::{run_monitor, MonitorError};
