//! Dispatcher: binds a [`ResolvedBinding`] into a fresh command instance and
//! invokes its entry point.
//!
//! Binding order is the declaration order of the descriptors. Missing
//! required values are collected and reported together; coercion failures
//! and naked non-Boolean options abort immediately.

use tracing::debug;

use super::command::{
    CommandDescriptor, Dispatchable, Exec, OptionDescriptor, OptionInfo, PositionalBinder,
    ResolvedBinding,
};
use super::parser::tokenize;
use super::registry::CommandRegistry;
use crate::error::{CommandError, DispatchError};
use crate::types::{Value, ValueType};

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The entry point ran and returned `Ok`
    Completed,
    /// A `show_help` option was given; nothing was bound or run
    HelpRequested,
}

/// Look up `args[0]`, tokenize the rest and dispatch.
pub fn dispatch_command(
    registry: &CommandRegistry,
    args: &[String],
) -> Result<DispatchOutcome, DispatchError> {
    let (name, rest) = args.split_first().ok_or(DispatchError::NoCommand)?;
    let command = registry.lookup(name)?;
    let binding = tokenize(rest, command);
    debug!(command = %name, ?binding, "tokenized");
    let outcome = command.dispatch(&binding);
    debug!(command = %name, ?outcome, "dispatched");
    outcome
}

/// Raw value for `info`: short name first, then long name, then fallback.
fn resolve<'a>(binding: &'a ResolvedBinding, info: &OptionInfo) -> Option<&'a str> {
    info.lookup_keys().iter().find_map(|key| binding.value(key))
}

pub(crate) fn bind_and_run<T: Exec + Default + 'static>(
    command: &CommandDescriptor<T>,
    binding: &ResolvedBinding,
) -> Result<DispatchOutcome, DispatchError> {
    let name = &command.info().name;

    if let Some(help) = command
        .options()
        .iter()
        .find(|opt| opt.info().show_help && resolve(binding, opt.info()).is_some())
    {
        debug!(command = %name, option = %help.info().display_name(), "help requested");
        return Ok(DispatchOutcome::HelpRequested);
    }

    let mut target = T::default();
    let mut missing: Vec<String> = Vec::new();

    for opt in command.options() {
        let info = opt.info();
        let values = if info.allow_multiple {
            binding.values_for(&info.lookup_keys())
        } else {
            resolve(binding, info).into_iter().collect()
        };

        if values.is_empty() {
            if info.required {
                missing.push(info.display_name());
            } else if let Some(default) = &info.default_value {
                bind_option(opt, &mut target, default)?;
            }
            continue;
        }

        for raw in values {
            bind_option(opt, &mut target, raw)?;
        }
    }

    let tokens = binding.positionals();
    let mut cursor = 0;
    for pos in command.positionals() {
        let info = pos.info();
        match pos.binder() {
            PositionalBinder::All(bind) => {
                if cursor < tokens.len() {
                    bind(&mut target, tokens[cursor..].to_vec());
                    cursor = tokens.len();
                } else if info.required {
                    missing.push(info.name.clone());
                } else if let Some(default) = &info.default_value {
                    bind(&mut target, vec![default.clone()]);
                }
            }
            PositionalBinder::Single(bind) => {
                let raw = match tokens.get(cursor) {
                    Some(token) => {
                        cursor += 1;
                        token.as_str()
                    }
                    None if info.required => {
                        missing.push(info.name.clone());
                        continue;
                    }
                    None => match &info.default_value {
                        Some(default) => default.as_str(),
                        None => continue,
                    },
                };
                let value = info.value_type.coerce(raw).map_err(|source| {
                    DispatchError::TypeCoercion {
                        name: info.name.clone(),
                        source,
                    }
                })?;
                bind(&mut target, value);
            }
        }
    }

    if cursor < tokens.len() {
        debug!(
            command = %name,
            ignored = ?&tokens[cursor..],
            "surplus positional arguments"
        );
    }

    if !missing.is_empty() {
        return Err(DispatchError::MissingArguments(missing));
    }

    match target.exec() {
        Ok(()) => Ok(DispatchOutcome::Completed),
        Err(CommandError::Argument(message)) => Err(DispatchError::CommandArgument(message)),
        Err(CommandError::Failed(source)) => Err(DispatchError::Execution {
            command: name.clone(),
            source,
        }),
    }
}

/// Coerce `raw` for `opt` and store it. An empty `raw` is a naked flag.
fn bind_option<T>(
    opt: &OptionDescriptor<T>,
    target: &mut T,
    raw: &str,
) -> Result<(), DispatchError> {
    let info = opt.info();
    if raw.is_empty() {
        if !info.value_type.is_boolean() {
            let article = if info.value_type == ValueType::Integer {
                "an"
            } else {
                "a"
            };
            return Err(DispatchError::CommandArgument(format!(
                "Option {} requires {} {} value",
                info.display_name(),
                article,
                info.value_type
            )));
        }
        opt.bind(target, Value::Boolean(true));
        return Ok(());
    }

    let value = info
        .value_type
        .coerce(raw)
        .map_err(|source| DispatchError::TypeCoercion {
            name: info.display_name(),
            source,
        })?;
    opt.bind(target, value);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
