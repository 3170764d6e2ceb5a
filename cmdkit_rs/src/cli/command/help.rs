//! Help text generation: the command listing and per-command help.

use super::options::OptionInfo;
use super::types::Dispatchable;
use crate::cli::registry::CommandListing;
use crate::config::ProgramConfig;

/// Minimum width of the option label column.
const MIN_LABEL_WIDTH: usize = 4;

/// Render the grouped command listing.
pub fn format_listing(listing: &CommandListing, config: &ProgramConfig) -> String {
    let mut help = String::new();
    if let Some(usage) = &config.usage {
        help.push_str(usage);
        help.push_str("\n\n");
    }
    help.push_str("Available commands:\n");

    for category in &listing.categories {
        help.push_str(&format!("\n[{}]\n", category.name));
        for entry in &category.commands {
            let marker = if entry.experimental { "*" } else { "" };
            let label = format!("{}{}", entry.name, marker);
            if entry.description.is_empty() {
                help.push_str(&format!("  {}\n", label));
            } else {
                help.push_str(&format!(
                    "  {:<width$} - {}\n",
                    label,
                    entry.description,
                    width = listing.width
                ));
            }
        }
    }

    if listing.has_experimental {
        help.push_str("\n* = experimental command\n");
    }
    if let Some(version) = &config.version {
        help.push_str(&format!("\n{}\n", version));
    }
    help.push('\n');
    help
}

/// `--long -c`, `-c` or `--fallback`, plus the value placeholder.
fn option_label(opt: &OptionInfo) -> String {
    let mut label = match (&opt.long, opt.short) {
        (Some(long), Some(short)) => format!("--{} -{}", long, short),
        (Some(long), None) => format!("--{}", long),
        (None, Some(short)) => format!("-{}", short),
        (None, None) => format!("--{}", opt.fallback_name().unwrap_or_default()),
    };
    if let Some(value) = &opt.help_value {
        label.push_str(&format!(" <{}>", value));
    }
    label
}

fn option_description(opt: &OptionInfo) -> String {
    let mut desc = opt.description.clone();
    if let Some(default) = opt.default_text.as_ref().or(opt.default_value.as_ref()) {
        desc.push_str(&format!(" (default: {})", default));
    }
    desc
}

/// Render help for a single command.
pub fn format_command_help(command: &dyn Dispatchable, config: &ProgramConfig) -> String {
    let info = command.info();
    let mut help = String::new();

    help.push_str(&info.name);
    if !info.description.is_empty() {
        help.push_str(&format!(" - {}", info.description));
    }
    if !info.long_doc.is_empty() {
        help.push('\n');
        help.push_str(&info.long_doc);
    }
    help.push('\n');

    help.push_str("Usage:");
    if let Some(prog) = &config.prog_name {
        help.push_str(&format!(" {}", prog));
    }
    help.push_str(&format!(" {} [options]", info.name));
    let positionals = command.positional_infos();
    for pos in &positionals {
        help.push_str(&format!(" {}", pos.name));
    }
    help.push_str("\n\n");

    if positionals.iter().any(|pos| !pos.description.is_empty()) {
        let width = positionals
            .iter()
            .map(|pos| pos.name.len())
            .max()
            .unwrap_or(0)
            .max(MIN_LABEL_WIDTH);
        help.push_str("Arguments:\n");
        for pos in &positionals {
            help.push_str(&format!(
                "  {:<width$} : {}\n",
                pos.name,
                pos.description,
                width = width
            ));
        }
        help.push('\n');
    }

    help.push_str("Options:\n");
    let mut rows: Vec<(String, String)> = command
        .option_infos()
        .into_iter()
        .filter(|opt| !opt.hidden)
        .map(|opt| (option_label(opt), option_description(opt)))
        .collect();
    rows.sort_by(|a, b| a.0.trim_start_matches('-').cmp(b.0.trim_start_matches('-')));
    let width = rows
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0)
        .max(MIN_LABEL_WIDTH);
    for (label, desc) in &rows {
        help.push_str(&format!("  {:<width$} : {}\n", label, desc, width = width));
    }

    if let Some(version) = &config.version {
        help.push_str(&format!("\n{}\n", version));
    }
    help.push('\n');
    help
}
