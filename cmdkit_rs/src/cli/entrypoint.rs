//! Program entry point: builder, top-level flags and the exit-code contract.
//!
//! `Program::dispatch` is the structured core (tokens in, outcome or error
//! out). `Program::run_with_args` wraps it with the printing and exit codes a
//! binary needs:
//!
//! | situation                     | output                              | code |
//! |-------------------------------|-------------------------------------|------|
//! | no arguments                  | listing on stderr                   | 1    |
//! | `--help` / `-h`               | listing on stdout                   | 0    |
//! | `--help-all`                  | listing incl. hidden, on stdout     | 0    |
//! | `--version` / `-V`            | version on stdout                   | 0    |
//! | `--json`                      | listing as JSON on stdout           | 0    |
//! | `help <command>`              | command help on stdout              | 0    |
//! | unknown command               | message (+ suggestion) on stderr    | 1    |
//! | missing arguments             | each missing name, then help        | 1    |
//! | help option given             | command help on stderr              | 1    |
//! | bad value / argument error    | `ERROR: ...`, then help             | 1    |
//! | success                       | whatever the command prints         | 0    |
//!
//! Any other entry point failure is returned as `Err`.
//!
//! The `ERROR:` prefix is coloured through `colored`, whose default decision
//! looks at stdout. Binaries that print errors to a terminal stderr should
//! call `colored::control::set_override` for the stream they actually use.

use std::io::{self, Write};
use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;

use super::command::{Dispatchable, format_command_help, format_listing};
use super::dispatch::{DispatchOutcome, dispatch_command};
use super::registry::CommandRegistry;
use crate::config::ProgramConfig;
use crate::error::{DispatchError, RegistrationError};

/// A set of registered commands plus program-level configuration.
pub struct Program {
    config: ProgramConfig,
    registry: CommandRegistry,
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch `args` (`args[0]` is the command name) without printing.
    pub fn dispatch(&self, args: &[String]) -> Result<DispatchOutcome, DispatchError> {
        dispatch_command(&self.registry, args)
    }

    pub fn listing(&self, include_hidden: bool) -> String {
        let listing = self
            .registry
            .list_visible(include_hidden, self.config.default_category());
        format_listing(&listing, &self.config)
    }

    pub fn listing_json(&self) -> serde_json::Result<String> {
        let listing = self
            .registry
            .list_visible(false, self.config.default_category());
        serde_json::to_string_pretty(&listing)
    }

    pub fn command_help(&self, name: &str) -> Result<String, DispatchError> {
        let command = self.registry.lookup(name)?;
        Ok(format_command_help(command, &self.config))
    }

    /// Run with the process arguments and map the result to an exit code.
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        // args[0] is the executable path
        let args: Vec<String> = std::env::args().skip(1).collect();
        let code = self.run_with_args(&args, &mut io::stdout(), &mut io::stderr())?;
        Ok(ExitCode::from(code))
    }

    /// Handle top-level flags, dispatch, and print per the exit contract.
    pub fn run_with_args<O, E>(
        &self,
        args: &[String],
        out: &mut O,
        err: &mut E,
    ) -> anyhow::Result<u8>
    where
        O: Write,
        E: Write,
    {
        let Some(first) = args.first() else {
            write!(err, "{}", self.listing(false))?;
            return Ok(1);
        };

        match first.as_str() {
            "--help" | "-h" => {
                write!(out, "{}", self.listing(false))?;
                return Ok(0);
            }
            "--help-all" => {
                write!(out, "{}", self.listing(true))?;
                return Ok(0);
            }
            "--version" | "-V" => {
                let version = self.config.version.as_deref().unwrap_or("unknown version");
                writeln!(out, "{}", version)?;
                return Ok(0);
            }
            "--json" => {
                writeln!(out, "{}", self.listing_json()?)?;
                return Ok(0);
            }
            "help" if !self.registry.contains("help") => {
                return match args.get(1) {
                    None => {
                        write!(out, "{}", self.listing(false))?;
                        Ok(0)
                    }
                    Some(name) => match self.command_help(name) {
                        Ok(text) => {
                            write!(out, "{}", text)?;
                            Ok(0)
                        }
                        Err(e) => {
                            self.report(&e, name, err)?;
                            Ok(1)
                        }
                    },
                };
            }
            _ => {}
        }

        match self.dispatch(args) {
            Ok(DispatchOutcome::Completed) => Ok(0),
            Ok(DispatchOutcome::HelpRequested) => {
                write!(err, "{}", self.command_help(first)?)?;
                Ok(1)
            }
            Err(e @ DispatchError::Execution { .. }) => Err(e.into()),
            Err(e) => {
                debug!(command = %first, error = %e, "dispatch failed");
                self.report(&e, first, err)?;
                Ok(1)
            }
        }
    }

    fn report<E: Write>(
        &self,
        error: &DispatchError,
        command: &str,
        err: &mut E,
    ) -> io::Result<()> {
        match error {
            DispatchError::UnknownCommand { name, suggestion } => {
                writeln!(err, "Unknown command: {}", name)?;
                if let Some(suggestion) = suggestion {
                    writeln!(err, "Did you mean '{}'?", suggestion)?;
                }
                let prog = self.config.prog_name.as_deref().unwrap_or("program");
                writeln!(err, "Run '{} --help' for available commands.", prog)?;
            }
            DispatchError::MissingArguments(_) => {
                writeln!(err, "{}", error)?;
            }
            other => {
                writeln!(err, "{} {}", "ERROR:".red().bold(), other)?;
            }
        }

        if error.wants_command_help()
            && let Ok(command) = self.registry.lookup(command)
        {
            writeln!(err)?;
            write!(err, "{}", format_command_help(command, &self.config))?;
        }
        Ok(())
    }
}

/// Builder for [`Program`].
#[derive(Default)]
pub struct ProgramBuilder {
    config: ProgramConfig,
    registry: CommandRegistry,
    error: Option<RegistrationError>,
}

impl ProgramBuilder {
    pub fn prog_name(mut self, name: impl Into<String>) -> Self {
        self.config.prog_name = Some(name.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.config.usage = Some(usage.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = Some(version.into());
        self
    }

    pub fn default_category(mut self, category: impl Into<String>) -> Self {
        self.config.default_category = Some(category.into());
        self
    }

    /// Overlay values from a loaded config file onto the builder's.
    pub fn config(mut self, config: ProgramConfig) -> Self {
        self.config.overlay(config);
        self
    }

    /// Register a command. The first invalid descriptor fails [`Self::build`].
    pub fn command<C>(mut self, command: C) -> Self
    where
        C: Dispatchable + 'static,
    {
        if let Err(e) = self.registry.register(command)
            && self.error.is_none()
        {
            self.error = Some(e);
        }
        self
    }

    pub fn build(self) -> Result<Program, RegistrationError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        Ok(Program {
            config: self.config,
            registry: self.registry,
        })
    }
}
