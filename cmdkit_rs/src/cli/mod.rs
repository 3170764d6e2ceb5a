//! Command dispatch for `<program> <command> [options] [args]` tools.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      argv (after program)                    │
//! └──────────────────────────────────────────────────────────────┘
//!                                │  args[0]
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CommandRegistry::lookup          UnknownCommand (+ "did you │
//! │                                   mean") if absent           │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │  args[1..]
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  parser::tokenize  ->  ResolvedBinding                       │
//! │  (long options, short clusters, values, positionals)         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  dispatch: coerce + bind through descriptors, collect        │
//! │  missing arguments, run Exec::exec                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - descriptors, `Exec`, help rendering
//! - [`parser`] - the tokenizer
//! - [`dispatch`] - binding and invocation
//! - [`registry`] - name -> command table, listings, suggestions
//! - [`entrypoint`] - `Program`, its builder and the exit-code contract

pub mod command;
pub mod dispatch;
pub mod entrypoint;
pub mod parser;
pub mod registry;

pub use command::{
    Arity, CommandDescriptor, CommandInfo, Dispatchable, Exec, OptionDescriptor, OptionInfo,
    PositionalDescriptor, PositionalInfo, ResolvedBinding,
};
pub use dispatch::{DispatchOutcome, dispatch_command};
pub use entrypoint::{Program, ProgramBuilder};
pub use parser::{tokenize, tokenize_with};
pub use registry::{CategoryListing, CommandListing, CommandRegistry, ListingEntry};
