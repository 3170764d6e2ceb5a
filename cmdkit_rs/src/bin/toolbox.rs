use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use cmdkit::{
    CommandDescriptor, CommandError, Exec, OptionDescriptor, PositionalDescriptor, Program,
    ProgramConfig,
};
use tracing::{debug, info};

const USAGE: &str = "toolbox - small utilities behind one binary\n\n\
Usage: toolbox <command> [options] [args]\n\
       toolbox help <command>";

// ============================================================================
// Commands
// ============================================================================

#[derive(Default)]
struct Run {
    count: i32,
    verbose: bool,
    file: String,
}

impl Exec for Run {
    fn exec(&mut self) -> Result<(), CommandError> {
        if self.count < 1 {
            return Err(CommandError::argument("count must be at least 1"));
        }
        if self.verbose {
            println!("file: {}", self.file);
            println!("count: {}", self.count);
        }
        for i in 1..=self.count {
            println!("run {} of {}: {}", i, self.count, self.file);
        }
        Ok(())
    }
}

fn run_command() -> CommandDescriptor<Run> {
    CommandDescriptor::new("run")
        .description("Process a file a number of times")
        .long_doc("Prints one line per pass over FILE.")
        .option(
            OptionDescriptor::new(|r: &mut Run, n: i32| r.count = n)
                .long("count")
                .short('c')
                .help_value("N")
                .description("Number of passes")
                .required(),
        )
        .option(
            OptionDescriptor::new(|r: &mut Run, v: bool| r.verbose = v)
                .long("verbose")
                .short('v')
                .description("Print the bound arguments first"),
        )
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::single("FILE", |r: &mut Run, v: String| r.file = v)
                .description("File to process")
                .required(),
        )
}

#[derive(Default)]
struct Echo {
    no_newline: bool,
    upper: bool,
    separator: String,
    prefixes: Vec<String>,
    words: Vec<String>,
}

impl Exec for Echo {
    fn exec(&mut self) -> Result<(), CommandError> {
        let mut parts: Vec<String> = self.prefixes.clone();
        parts.extend(self.words.iter().cloned());
        let mut line = parts.join(&self.separator);
        if self.upper {
            line = line.to_uppercase();
        }
        if self.no_newline {
            print!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }
}

fn echo_command() -> CommandDescriptor<Echo> {
    CommandDescriptor::new("echo")
        .category("Text")
        .description("Print the arguments")
        .option(
            OptionDescriptor::new(|e: &mut Echo, v: bool| e.no_newline = v)
                .short('n')
                .description("Do not print the trailing newline"),
        )
        .option(
            OptionDescriptor::new(|e: &mut Echo, v: bool| e.upper = v)
                .binder_name("setUpper")
                .description("Upper-case the output"),
        )
        .option(
            OptionDescriptor::new(|e: &mut Echo, v: String| e.separator = v)
                .long("sep")
                .short('s')
                .description("Word separator")
                .default_value(" ")
                .default_text("a single space"),
        )
        .option(
            OptionDescriptor::new(|e: &mut Echo, v: String| e.prefixes.push(v))
                .long("prefix")
                .short('p')
                .help_value("WORD")
                .description("Word printed before the arguments, repeatable")
                .allow_multiple(),
        )
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::all("WORDS", |e: &mut Echo, v: Vec<String>| e.words = v)
                .description("Words to print"),
        )
}

#[derive(Default)]
struct Sum {
    precision: i32,
    numbers: Vec<String>,
}

impl Exec for Sum {
    fn exec(&mut self) -> Result<(), CommandError> {
        let mut total = 0.0_f64;
        for raw in &self.numbers {
            let n: f64 = raw
                .parse()
                .map_err(|_| CommandError::argument(format!("'{}' is not a number", raw)))?;
            total += n;
        }
        let precision = usize::try_from(self.precision)
            .map_err(|_| CommandError::argument("precision must not be negative"))?;
        println!("{:.*}", precision, total);
        Ok(())
    }
}

fn sum_command() -> CommandDescriptor<Sum> {
    CommandDescriptor::new("sum")
        .category("Math")
        .description("Add numbers together")
        .option(
            OptionDescriptor::new(|s: &mut Sum, v: i32| s.precision = v)
                .long("precision")
                .description("Digits after the decimal point")
                .default_value("2"),
        )
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::all("NUMBERS", |s: &mut Sum, v: Vec<String>| s.numbers = v)
                .required(),
        )
}

#[derive(Default)]
struct Scale {
    factor: f64,
    offset: i64,
    value: f64,
}

impl Exec for Scale {
    fn exec(&mut self) -> Result<(), CommandError> {
        println!("{}", self.value * self.factor + self.offset as f64);
        Ok(())
    }
}

fn scale_command() -> CommandDescriptor<Scale> {
    CommandDescriptor::new("scale")
        .category("Math")
        .description("Multiply a value and add an offset")
        .experimental()
        .option(
            OptionDescriptor::new(|s: &mut Scale, v: f64| s.factor = v)
                .long("factor")
                .short('f')
                .description("Multiplier")
                .default_value("1.0"),
        )
        .option(
            OptionDescriptor::new(|s: &mut Scale, v: i64| s.offset = v)
                .long("offset")
                .short('o')
                .description("Added after scaling"),
        )
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::single("VALUE", |s: &mut Scale, v: f64| s.value = v).required(),
        )
}

/// Old spelling of `run`, kept so existing scripts keep working.
#[derive(Default)]
struct LegacyRun {
    file: String,
}

impl Exec for LegacyRun {
    fn exec(&mut self) -> Result<(), CommandError> {
        eprintln!("'legacy-run' is deprecated, use 'run --count 1'");
        println!("run 1 of 1: {}", self.file);
        Ok(())
    }
}

fn legacy_run_command() -> CommandDescriptor<LegacyRun> {
    CommandDescriptor::new("legacy-run")
        .description("Process a file once")
        .deprecated()
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::single("FILE", |r: &mut LegacyRun, v: String| r.file = v)
                .required(),
        )
}

#[derive(Default)]
struct Fail {
    message: String,
}

impl Exec for Fail {
    fn exec(&mut self) -> Result<(), CommandError> {
        let error = anyhow::anyhow!("{}", self.message).context("fail command");
        Err(error.into())
    }
}

fn fail_command() -> CommandDescriptor<Fail> {
    CommandDescriptor::new("fail")
        .category("Debug")
        .description("Exit through the fatal error path")
        .hidden()
        .option(
            OptionDescriptor::new(|f: &mut Fail, v: String| f.message = v)
                .long("message")
                .short('m')
                .default_value("requested failure"),
        )
}

// ============================================================================
// Entry point
// ============================================================================

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// `ERROR:` is written to stderr, so colour follows stderr, not stdout.
fn init_color() {
    let enabled = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    colored::control::set_override(enabled);
}

fn build_program() -> anyhow::Result<Program> {
    let mut builder = Program::builder()
        .prog_name("toolbox")
        .usage(USAGE)
        .version(format!("toolbox {}", env!("CARGO_PKG_VERSION")));

    if let Some(path) = std::env::var_os("TOOLBOX_CONFIG").map(PathBuf::from) {
        debug!(path = %path.display(), "loading config");
        builder = builder.config(ProgramConfig::load_from_path(&path));
    }

    let program = builder
        .command(run_command())
        .command(echo_command())
        .command(sum_command())
        .command(scale_command())
        .command(legacy_run_command())
        .command(fail_command())
        .build()
        .context("invalid command table")?;

    info!(commands = program.registry().len(), "toolbox ready");
    Ok(program)
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    init_color();
    build_program()?.run()
}
