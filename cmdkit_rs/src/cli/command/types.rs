//! Command descriptor and the object-safe view the registry stores.

use std::fmt;

use serde::Serialize;

use super::options::{Arity, OptionDescriptor, OptionInfo, PositionalDescriptor, PositionalInfo};
use super::parsed::ResolvedBinding;
use crate::cli::dispatch::{DispatchOutcome, bind_and_run};
use crate::error::{CommandError, DispatchError, RegistrationError};

/// Execution entry point of a command.
///
/// A fresh `Default` instance is created for every invocation, its fields are
/// populated through the descriptors' binders, then `exec` runs.
pub trait Exec {
    fn exec(&mut self) -> Result<(), CommandError>;
}

/// Command-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandInfo {
    pub name: String,
    /// `None` falls back to the program's default category
    pub category: Option<String>,
    pub description: String,
    pub long_doc: String,
    pub deprecated: bool,
    pub experimental: bool,
    pub hidden: bool,
}

/// Full description of a command whose state lives in `T`.
pub struct CommandDescriptor<T> {
    info: CommandInfo,
    options: Vec<OptionDescriptor<T>>,
    positionals: Vec<PositionalDescriptor<T>>,
}

impl<T> CommandDescriptor<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: CommandInfo {
                name: name.into(),
                ..Default::default()
            },
            options: Vec::new(),
            positionals: Vec::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.info.category = Some(category.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = text.into();
        self
    }

    pub fn long_doc(mut self, text: impl Into<String>) -> Self {
        self.info.long_doc = text.into();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.info.deprecated = true;
        self
    }

    pub fn experimental(mut self) -> Self {
        self.info.experimental = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.info.hidden = true;
        self
    }

    pub fn option(mut self, option: OptionDescriptor<T>) -> Self {
        self.options.push(option);
        self
    }

    pub fn positional(mut self, positional: PositionalDescriptor<T>) -> Self {
        self.positionals.push(positional);
        self
    }

    pub fn options(&self) -> &[OptionDescriptor<T>] {
        &self.options
    }

    pub fn positionals(&self) -> &[PositionalDescriptor<T>] {
        &self.positionals
    }
}

impl<T> fmt::Debug for CommandDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("info", &self.info)
            .field("options", &self.options)
            .field("positionals", &self.positionals)
            .finish()
    }
}

/// Type-erased command, as held by the registry.
pub trait Dispatchable {
    fn info(&self) -> &CommandInfo;

    fn option_infos(&self) -> Vec<&OptionInfo>;

    fn positional_infos(&self) -> Vec<&PositionalInfo>;

    /// Bind `binding` into a fresh command instance and run it.
    fn dispatch(&self, binding: &ResolvedBinding) -> Result<DispatchOutcome, DispatchError>;

    /// Whether `key` names a Boolean option (a naked flag never takes a value).
    fn is_boolean_option(&self, key: &str) -> bool {
        self.option_infos()
            .iter()
            .any(|opt| opt.value_type.is_boolean() && opt.matches(key))
    }

    /// Shape checks run once, at registration.
    fn validate(&self) -> Result<(), RegistrationError> {
        let info = self.info();
        if info.name.trim().is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        for (index, opt) in self.option_infos().into_iter().enumerate() {
            if !opt.has_identifier() {
                return Err(RegistrationError::UnnamedOption {
                    command: info.name.clone(),
                    index,
                });
            }
            if let Some(default) = &opt.default_value
                && opt.value_type.coerce(default).is_err()
            {
                return Err(RegistrationError::InvalidDefault {
                    command: info.name.clone(),
                    name: opt.display_name(),
                    value: default.clone(),
                    expected: opt.value_type,
                });
            }
        }

        let positionals = self.positional_infos();
        let last = positionals.len().saturating_sub(1);
        for (index, pos) in positionals.into_iter().enumerate() {
            if pos.arity == Arity::All && index != last {
                return Err(RegistrationError::GreedyPositionalNotLast {
                    command: info.name.clone(),
                    positional: pos.name.clone(),
                });
            }
            if let Some(default) = &pos.default_value
                && pos.value_type.coerce(default).is_err()
            {
                return Err(RegistrationError::InvalidDefault {
                    command: info.name.clone(),
                    name: pos.name.clone(),
                    value: default.clone(),
                    expected: pos.value_type,
                });
            }
        }

        Ok(())
    }
}

impl<T: Exec + Default + 'static> Dispatchable for CommandDescriptor<T> {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn option_infos(&self) -> Vec<&OptionInfo> {
        self.options.iter().map(OptionDescriptor::info).collect()
    }

    fn positional_infos(&self) -> Vec<&PositionalInfo> {
        self.positionals
            .iter()
            .map(PositionalDescriptor::info)
            .collect()
    }

    fn dispatch(&self, binding: &ResolvedBinding) -> Result<DispatchOutcome, DispatchError> {
        bind_and_run(self, binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Noop {
        verbose: bool,
        files: Vec<String>,
        name: String,
    }

    impl Exec for Noop {
        fn exec(&mut self) -> Result<(), CommandError> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_sets_metadata() {
        let cmd = CommandDescriptor::<Noop>::new("noop")
            .category("Debug")
            .description("Does nothing")
            .long_doc("Really nothing.")
            .experimental()
            .hidden();
        let info = Dispatchable::info(&cmd);
        assert_eq!(info.name, "noop");
        assert_eq!(info.category.as_deref(), Some("Debug"));
        assert!(info.experimental);
        assert!(info.hidden);
        assert!(!info.deprecated);
    }

    #[test]
    fn test_is_boolean_option_checks_every_spelling() {
        let cmd = CommandDescriptor::<Noop>::new("noop").option(
            OptionDescriptor::new(|c: &mut Noop, v: bool| c.verbose = v)
                .short('v')
                .binder_name("set_verbose"),
        );
        assert!(cmd.is_boolean_option("v"));
        assert!(cmd.is_boolean_option("verbose"));
        assert!(!cmd.is_boolean_option("name"));
    }

    #[test]
    fn test_validate_rejects_unnamed_option() {
        let cmd = CommandDescriptor::<Noop>::new("noop")
            .option(OptionDescriptor::new(|c: &mut Noop, v: bool| c.verbose = v));
        assert_eq!(
            cmd.validate(),
            Err(RegistrationError::UnnamedOption {
                command: "noop".into(),
                index: 0
            })
        );
    }

    #[test]
    fn test_validate_rejects_greedy_positional_before_single() {
        let cmd = CommandDescriptor::<Noop>::new("noop")
            .positional(PositionalDescriptor::all("FILES", |c: &mut Noop, v| {
                c.files = v
            }))
            .positional(PositionalDescriptor::single("NAME", |c: &mut Noop, v: String| {
                c.name = v
            }));
        assert!(matches!(
            cmd.validate(),
            Err(RegistrationError::GreedyPositionalNotLast { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_default() {
        let cmd = CommandDescriptor::<Noop>::new("noop").option(
            OptionDescriptor::new(|_: &mut Noop, _: i32| {})
                .long("count")
                .default_value("many"),
        );
        assert!(matches!(
            cmd.validate(),
            Err(RegistrationError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_well_formed_command() {
        let cmd = CommandDescriptor::<Noop>::new("noop")
            .option(OptionDescriptor::help())
            .positional(PositionalDescriptor::single("NAME", |c: &mut Noop, v: String| {
                c.name = v
            }))
            .positional(PositionalDescriptor::all("FILES", |c: &mut Noop, v| {
                c.files = v
            }));
        assert_eq!(cmd.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let cmd = CommandDescriptor::<Noop>::new("  ");
        assert_eq!(cmd.validate(), Err(RegistrationError::EmptyName));
    }
}
