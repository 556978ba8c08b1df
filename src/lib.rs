//! qcbench: ingestion and statistics pipeline for quantum-vs-classical
//! algorithm benchmark uploads.
//!
//! An uploaded JSON document is parsed and shape-checked (`ingest`), appended
//! to a session-lifetime [`history::HistoryStore`], projected into flat
//! per-family derived records (`project`), and summarized with descriptive
//! statistics (`stats`). Rendering is out of scope: every output here is a
//! plain data structure handed to an external renderer.

pub mod history;
pub mod ingest;
pub mod logging;
pub mod numeric;
pub mod project;
pub mod schema;
pub mod stats;
