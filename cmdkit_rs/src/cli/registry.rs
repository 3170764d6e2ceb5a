//! Command registry: name -> command descriptor.
//!
//! Populated once while the program is built, read-only afterwards.

use std::collections::HashMap;

use serde::Serialize;
use strsim::levenshtein;
use tracing::{debug, warn};

use super::command::Dispatchable;
use crate::error::{DispatchError, RegistrationError};

/// Minimum width of the name column in command listings.
const MIN_NAME_WIDTH: usize = 4;

/// Registry of commands, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Dispatchable>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A command with the same name is replaced.
    pub fn register<C>(&mut self, command: C) -> Result<(), RegistrationError>
    where
        C: Dispatchable + 'static,
    {
        command.validate()?;
        let name = command.info().name.clone();
        if self.commands.contains_key(&name) {
            warn!(command = %name, "replacing previously registered command");
        } else {
            debug!(command = %name, "registered command");
        }
        self.commands.insert(name, Box::new(command));
        Ok(())
    }

    /// Get a command by name.
    pub fn lookup(&self, name: &str) -> Result<&dyn Dispatchable, DispatchError> {
        self.commands
            .get(name)
            .map(|cmd| cmd.as_ref())
            .ok_or_else(|| DispatchError::UnknownCommand {
                name: name.to_string(),
                suggestion: self.suggest_similar(name).map(str::to_string),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sorted names of every registered command, hidden and deprecated included.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Suggest a similar visible command using Levenshtein distance.
    /// Returns Some(name) if a close match is found (distance <= 2).
    pub fn suggest_similar(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        let mut best_match: Option<(&str, usize)> = None;

        for name in self.names() {
            let info = self.commands[name].info();
            if info.hidden || info.deprecated {
                continue;
            }
            let distance = levenshtein(&input_lower, &name.to_lowercase());
            if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
                best_match = Some((name, distance));
            }
        }

        best_match.map(|(name, _)| name)
    }

    /// Commands grouped by category for the listing.
    ///
    /// Deprecated commands are always left out, hidden ones unless
    /// `include_hidden`. Categories and the commands inside them are sorted
    /// alphabetically.
    pub fn list_visible(&self, include_hidden: bool, default_category: &str) -> CommandListing {
        let mut groups: HashMap<&str, Vec<ListingEntry>> = HashMap::new();
        let mut width = MIN_NAME_WIDTH;
        let mut has_experimental = false;

        for command in self.commands.values() {
            let info = command.info();
            if info.deprecated || (info.hidden && !include_hidden) {
                continue;
            }
            width = width.max(info.name.len() + usize::from(info.experimental));
            has_experimental |= info.experimental;

            let category = info.category.as_deref().unwrap_or(default_category);
            groups.entry(category).or_default().push(ListingEntry {
                name: info.name.clone(),
                description: info.description.clone(),
                experimental: info.experimental,
            });
        }

        let mut categories: Vec<CategoryListing> = groups
            .into_iter()
            .map(|(name, mut commands)| {
                commands.sort_by(|a, b| a.name.cmp(&b.name));
                CategoryListing {
                    name: name.to_string(),
                    commands,
                }
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        CommandListing {
            width,
            has_experimental,
            categories,
        }
    }
}

/// Visible commands grouped by category, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandListing {
    /// Width of the name column, experimental marker included
    pub width: usize,
    pub has_experimental: bool,
    pub categories: Vec<CategoryListing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    pub name: String,
    pub commands: Vec<ListingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub description: String,
    pub experimental: bool,
}

// ============================================================================
// Tests
// ============================================================================
