//! Command descriptors and help text.
//!
//! - `types`: [`CommandDescriptor`], the [`Exec`] entry point and the
//!   type-erased [`Dispatchable`] view stored by the registry
//! - `options`: option and positional descriptors
//! - `parsed`: [`ResolvedBinding`], the tokenizer's output
//! - `help`: listing and per-command help rendering

mod help;
pub mod options;
mod parsed;
mod types;

pub use help::{format_command_help, format_listing};
pub use options::{
    Arity, OptionDescriptor, OptionInfo, PositionalDescriptor, PositionalInfo,
};
pub(crate) use options::PositionalBinder;
pub use parsed::ResolvedBinding;
pub use types::{CommandDescriptor, CommandInfo, Dispatchable, Exec};
