//! # cmdkit
//!
//! **Sub-command dispatch** for tools invoked as `program <command> [options] [args]`.
//!
//! Each command is a plain struct with a `Default` impl and an [`Exec`]
//! entry point. Its options and positional arguments are declared as
//! descriptors whose binder closures write straight into the struct's fields;
//! no reflection, no derive macros.
//!
//! ## Features
//!
//! - **Tokenizer** - long options (`--count 5`, `--count=5`), clustered short
//!   flags (`-vh`), naked Boolean flags, positional mode after the first bare token
//! - **Typed binding** - string, integer, long, float, double and boolean values
//! - **Error batching** - every missing required argument reported at once
//! - **Help** - grouped command listing and per-command option tables
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdkit::{CommandDescriptor, CommandError, Exec, OptionDescriptor, PositionalDescriptor, Program};
//!
//! #[derive(Default)]
//! struct Run {
//!     count: i32,
//!     file: String,
//! }
//!
//! impl Exec for Run {
//!     fn exec(&mut self) -> Result<(), CommandError> {
//!         println!("{} x {}", self.file, self.count);
//!         Ok(())
//!     }
//! }
//!
//! let program = Program::builder()
//!     .prog_name("tool")
//!     .command(
//!         CommandDescriptor::<Run>::new("run")
//!             .description("Run a file")
//!             .option(
//!                 OptionDescriptor::new(|r: &mut Run, n: i32| r.count = n)
//!                     .long("count")
//!                     .required(),
//!             )
//!             .option(OptionDescriptor::help())
//!             .positional(
//!                 PositionalDescriptor::single("file", |r: &mut Run, f: String| r.file = f)
//!                     .required(),
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let args: Vec<String> = ["run", "--count", "5", "input.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert_eq!(program.dispatch(&args).unwrap(), cmdkit::DispatchOutcome::Completed);
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Tokenizer, dispatcher, registry, help rendering and the program entry point.
///
/// # Submodules
///
/// - [`cli::parser`] - token classification into a [`ResolvedBinding`]
/// - [`cli::dispatch`] - coercion, binding and invocation
/// - [`cli::registry`] - command table and listings
/// - [`cli::entrypoint`] - [`Program`] and the exit-code contract
pub mod cli;

/// Program configuration (builder values + optional TOML file).
pub mod config;

/// Error types.
pub mod error;

/// Value types and coercion.
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use cli::{
    Arity, CommandDescriptor, CommandInfo, CommandRegistry, DispatchOutcome, Dispatchable, Exec,
    OptionDescriptor, OptionInfo, PositionalDescriptor, PositionalInfo, Program, ProgramBuilder,
    ResolvedBinding,
};
pub use config::ProgramConfig;
pub use error::{CoercionError, CommandError, DispatchError, RegistrationError};
pub use types::{OptionValue, Value, ValueType};
