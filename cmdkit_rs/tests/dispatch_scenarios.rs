//! Library-level dispatch scenarios: tokens in, bound command or error out.

use std::cell::RefCell;

use cmdkit::{
    CommandDescriptor, CommandError, DispatchError, DispatchOutcome, Exec, OptionDescriptor,
    PositionalDescriptor, Program, RegistrationError,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Run {
    count: i32,
    verbose: bool,
    file: String,
}

thread_local! {
    static BOUND: RefCell<Option<Run>> = const { RefCell::new(None) };
}

impl Exec for Run {
    fn exec(&mut self) -> Result<(), CommandError> {
        BOUND.with(|bound| *bound.borrow_mut() = Some(self.clone()));
        Ok(())
    }
}

fn last_bound() -> Option<Run> {
    BOUND.with(|bound| bound.borrow_mut().take())
}

fn run_command() -> CommandDescriptor<Run> {
    CommandDescriptor::new("run")
        .description("Run a file")
        .option(
            OptionDescriptor::new(|r: &mut Run, n: i32| r.count = n)
                .long("count")
                .short('c')
                .required(),
        )
        .option(OptionDescriptor::new(|r: &mut Run, v: bool| r.verbose = v).short('v'))
        .option(OptionDescriptor::help())
        .positional(
            PositionalDescriptor::single("file", |r: &mut Run, v: String| r.file = v).required(),
        )
}

fn program() -> Program {
    Program::builder()
        .prog_name("tool")
        .command(run_command())
        .build()
        .expect("valid program")
}

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

// ============================================
// Scenarios
// ============================================

#[test]
fn scenario_a_long_option_and_positional() {
    let outcome = program()
        .dispatch(&args(&["run", "--count", "5", "input.txt"]))
        .expect("dispatch");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(
        last_bound(),
        Some(Run {
            count: 5,
            verbose: false,
            file: "input.txt".into(),
        })
    );
}

#[test]
fn scenario_b_missing_required_option() {
    let err = program()
        .dispatch(&args(&["run", "input.txt"]))
        .expect_err("missing count");
    match err {
        DispatchError::MissingArguments(names) => assert_eq!(names, vec!["count"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(last_bound(), None);
}

#[test]
fn scenario_c_help_short_circuits() {
    let outcome = program()
        .dispatch(&args(&["run", "-vh", "input.txt"]))
        .expect("dispatch");
    assert_eq!(outcome, DispatchOutcome::HelpRequested);
    assert_eq!(last_bound(), None);
}

#[test]
fn scenario_d_type_coercion() {
    let err = program()
        .dispatch(&args(&["run", "--count", "notanumber", "input.txt"]))
        .expect_err("bad count");
    match &err {
        DispatchError::TypeCoercion { name, source } => {
            assert_eq!(name, "count");
            assert_eq!(source.value, "notanumber");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.wants_command_help());
    assert_eq!(last_bound(), None);
}

// ============================================
// Binding rules
// ============================================

#[test]
fn every_missing_argument_is_reported() {
    let err = program().dispatch(&args(&["run"])).expect_err("missing");
    assert_eq!(
        err.to_string(),
        "Missing argument: count\nMissing argument: file"
    );
}

#[test]
fn clustered_flags_with_trailing_value() {
    program()
        .dispatch(&args(&["run", "-vc", "3", "a.txt"]))
        .expect("dispatch");
    let bound = last_bound().expect("ran");
    assert!(bound.verbose);
    assert_eq!(bound.count, 3);
    assert_eq!(bound.file, "a.txt");
}

#[test]
fn positional_mode_swallows_later_flags() {
    // "-v" after the first bare token is a surplus positional, not a flag
    program()
        .dispatch(&args(&["run", "-c", "1", "a.txt", "-v"]))
        .expect("dispatch");
    let bound = last_bound().expect("ran");
    assert!(!bound.verbose);
    assert_eq!(bound.file, "a.txt");
}

#[test]
fn unknown_command_carries_suggestion() {
    let err = program().dispatch(&args(&["rn"])).expect_err("unknown");
    match err {
        DispatchError::UnknownCommand { name, suggestion } => {
            assert_eq!(name, "rn");
            assert_eq!(suggestion.as_deref(), Some("run"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_arguments_is_no_command() {
    let err = program().dispatch(&[]).expect_err("no command");
    assert!(matches!(err, DispatchError::NoCommand));
}

// ============================================
// Help and listing
// ============================================

#[derive(Default)]
struct Scale {
    ratio: f32,
}

impl Exec for Scale {
    fn exec(&mut self) -> Result<(), CommandError> {
        if self.ratio <= 0.0 {
            return Err(CommandError::argument("ratio must be positive"));
        }
        Ok(())
    }
}

#[test]
fn default_value_is_displayed_literally() {
    let program = Program::builder()
        .command(
            CommandDescriptor::<Scale>::new("scale")
                .category("Math")
                .experimental()
                .option(
                    OptionDescriptor::new(|s: &mut Scale, v: f32| s.ratio = v)
                        .long("ratio")
                        .description("Scale factor")
                        .default_value("1.50"),
                ),
        )
        .build()
        .expect("valid program");

    let help = program.command_help("scale").expect("help");
    assert!(help.contains("--ratio : Scale factor (default: 1.50)"));

    let listing = program.listing(false);
    assert!(listing.contains("[Math]\n  scale*\n"));
    assert!(listing.contains("* = experimental command"));
}

#[test]
fn listing_hides_deprecated_and_hidden() {
    let program = Program::builder()
        .command(run_command())
        .command(
            CommandDescriptor::<Run>::new("old-run")
                .description("Old")
                .deprecated(),
        )
        .command(
            CommandDescriptor::<Run>::new("secret")
                .description("Secret")
                .hidden(),
        )
        .build()
        .expect("valid program");

    let listing = program.listing(false);
    assert!(listing.contains("run"));
    assert!(!listing.contains("old-run"));
    assert!(!listing.contains("secret"));

    let listing = program.listing(true);
    assert!(listing.contains("secret"));
    assert!(!listing.contains("old-run"));
}

#[test]
fn invalid_default_fails_registration() {
    let result = Program::builder()
        .command(
            CommandDescriptor::<Scale>::new("scale").option(
                OptionDescriptor::new(|s: &mut Scale, v: f32| s.ratio = v)
                    .long("ratio")
                    .default_value("wide"),
            ),
        )
        .build();
    assert!(matches!(
        result,
        Err(RegistrationError::InvalidDefault { .. })
    ));
}
