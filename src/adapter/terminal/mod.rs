//! Terminal Adapter
//!
//! 標準入出力による対話

pub mod prompt;
