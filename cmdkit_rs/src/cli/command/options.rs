//! Option and positional descriptors.
//!
//! A descriptor is a plain metadata record ([`OptionInfo`] / [`PositionalInfo`])
//! plus a binder closure that stores a coerced value into the command struct.

use std::fmt;

use heck::ToSnakeCase;
use serde::Serialize;

use crate::types::{OptionValue, Value, ValueType};

pub(crate) type ValueBinder<T> = Box<dyn Fn(&mut T, Value)>;
pub(crate) type ListBinder<T> = Box<dyn Fn(&mut T, Vec<String>)>;

/// Metadata for one named option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionInfo {
    /// `--long` spelling, without dashes
    pub long: Option<String>,
    /// `-c` spelling
    pub short: Option<char>,
    /// Setter-style name (`set_verbose`), used as a last-resort identifier
    pub binder_name: Option<String>,
    pub value_type: ValueType,
    pub description: String,
    /// Literal default, coerced when the option is absent
    pub default_value: Option<String>,
    /// Shown in help instead of `default_value`
    pub default_text: Option<String>,
    /// Placeholder for the value in the help table (`--count N`)
    pub help_value: Option<String>,
    pub required: bool,
    /// Bind every occurrence instead of the last one
    pub allow_multiple: bool,
    /// Resolving this option requests command help instead of execution
    pub show_help: bool,
    /// Omit from help output
    pub hidden: bool,
}

impl OptionInfo {
    fn new(value_type: ValueType) -> Self {
        Self {
            long: None,
            short: None,
            binder_name: None,
            value_type,
            description: String::new(),
            default_value: None,
            default_text: None,
            help_value: None,
            required: false,
            allow_multiple: false,
            show_help: false,
            hidden: false,
        }
    }

    /// Identifier derived from the binder name: `set_verbose` and `setVerbose`
    /// both become `verbose`.
    pub fn fallback_name(&self) -> Option<String> {
        let snake = self.binder_name.as_deref()?.to_snake_case();
        let name = snake.strip_prefix("set_").unwrap_or(&snake);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Resolved-binding keys in lookup order: short, long, fallback.
    pub fn lookup_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(3);
        if let Some(c) = self.short {
            keys.push(c.to_string());
        }
        if let Some(long) = &self.long {
            keys.push(long.clone());
        }
        if let Some(fallback) = self.fallback_name() {
            keys.push(fallback);
        }
        keys
    }

    /// Whether `key` (as produced by the tokenizer) refers to this option.
    pub fn matches(&self, key: &str) -> bool {
        self.lookup_keys().iter().any(|k| k == key)
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> String {
        self.long
            .clone()
            .or_else(|| self.short.map(|c| c.to_string()))
            .or_else(|| self.fallback_name())
            .unwrap_or_default()
    }

    pub fn has_identifier(&self) -> bool {
        !self.lookup_keys().is_empty()
    }
}

/// A named option bound into a command of type `T`.
pub struct OptionDescriptor<T> {
    info: OptionInfo,
    binder: ValueBinder<T>,
}

impl<T: 'static> OptionDescriptor<T> {
    /// Declare an option whose type follows the setter's parameter.
    ///
    /// ```
    /// use cmdkit::OptionDescriptor;
    ///
    /// #[derive(Default)]
    /// struct Run {
    ///     count: i32,
    /// }
    ///
    /// let opt = OptionDescriptor::new(|cmd: &mut Run, n: i32| cmd.count = n)
    ///     .long("count")
    ///     .short('c')
    ///     .required();
    /// assert!(opt.info().required);
    /// ```
    pub fn new<V, F>(setter: F) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut T, V) + 'static,
    {
        Self {
            info: OptionInfo::new(V::TYPE),
            binder: Box::new(move |target, value| {
                if let Some(v) = V::from_value(value) {
                    setter(target, v);
                }
            }),
        }
    }

    /// The conventional `-h` / `--help` option.
    pub fn help() -> Self {
        Self::new(|_: &mut T, _: bool| {})
            .long("help")
            .short('h')
            .description("Show help")
            .show_help()
    }
}

impl<T> OptionDescriptor<T> {
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.info.long = Some(name.into());
        self
    }

    pub fn short(mut self, c: char) -> Self {
        self.info.short = Some(c);
        self
    }

    pub fn binder_name(mut self, name: impl Into<String>) -> Self {
        self.info.binder_name = Some(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = text.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.info.default_value = Some(value.into());
        self
    }

    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.info.default_text = Some(text.into());
        self
    }

    pub fn help_value(mut self, placeholder: impl Into<String>) -> Self {
        self.info.help_value = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.info.required = true;
        self
    }

    pub fn allow_multiple(mut self) -> Self {
        self.info.allow_multiple = true;
        self
    }

    pub fn show_help(mut self) -> Self {
        self.info.show_help = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.info.hidden = true;
        self
    }

    pub fn info(&self) -> &OptionInfo {
        &self.info
    }

    pub(crate) fn bind(&self, target: &mut T, value: Value) {
        (self.binder)(target, value)
    }
}

impl<T> fmt::Debug for OptionDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// How many positional tokens a positional descriptor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// Exactly one token
    Single,
    /// Every remaining token
    All,
}

/// Metadata for one positional argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionalInfo {
    pub name: String,
    pub description: String,
    pub value_type: ValueType,
    pub arity: Arity,
    pub required: bool,
    pub default_value: Option<String>,
}

pub(crate) enum PositionalBinder<T> {
    Single(ValueBinder<T>),
    All(ListBinder<T>),
}

/// A positional argument bound into a command of type `T`.
pub struct PositionalDescriptor<T> {
    info: PositionalInfo,
    binder: PositionalBinder<T>,
}

impl<T: 'static> PositionalDescriptor<T> {
    /// Binds the next unconsumed positional token.
    pub fn single<V, F>(name: impl Into<String>, setter: F) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut T, V) + 'static,
    {
        Self {
            info: PositionalInfo {
                name: name.into(),
                description: String::new(),
                value_type: V::TYPE,
                arity: Arity::Single,
                required: false,
                default_value: None,
            },
            binder: PositionalBinder::Single(Box::new(move |target, value| {
                if let Some(v) = V::from_value(value) {
                    setter(target, v);
                }
            })),
        }
    }

    /// Binds every remaining positional token, verbatim.
    pub fn all<F>(name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut T, Vec<String>) + 'static,
    {
        Self {
            info: PositionalInfo {
                name: name.into(),
                description: String::new(),
                value_type: ValueType::String,
                arity: Arity::All,
                required: false,
                default_value: None,
            },
            binder: PositionalBinder::All(Box::new(setter)),
        }
    }
}

impl<T> PositionalDescriptor<T> {
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = text.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.info.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.info.default_value = Some(value.into());
        self
    }

    pub fn info(&self) -> &PositionalInfo {
        &self.info
    }

    pub(crate) fn binder(&self) -> &PositionalBinder<T> {
        &self.binder
    }
}

impl<T> fmt::Debug for PositionalDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalDescriptor")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
