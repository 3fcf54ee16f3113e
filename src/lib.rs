//! Noteverse note graph library
//!
//! This library keeps a collection of short notes connected by directed links,
//! assigns each note a unique alias, and derives the graph and timeline views
//! of the collection.

mod alias;
mod cli;
mod config;
mod display;
mod errors;
mod graph;
mod helper;
mod links;
mod note;
mod repository;
mod service;
mod storage;
mod timeline;
mod types;

// Re-export key components
pub use alias::*;
pub use cli::*;
pub use config::*;
pub use display::*;
pub use errors::*;
pub use graph::*;
pub use helper::*;
pub use links::*;
pub use note::*;
pub use repository::*;
pub use service::*;
pub use storage::*;
pub use timeline::*;
pub use types::*;
