use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the CSV preprocessing workspace",
    long_about = "A unified CLI for running tests and CI checks across the\n\
                  preprocessing core and Lambda crates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tests of one crate or the whole workspace
    Test {
        /// Crate to test
        #[arg(value_enum, default_value_t = TestScope::All)]
        scope: TestScope,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TestScope {
    Core,
    Lambda,
    All,
}

impl TestScope {
    fn packages(self) -> &'static [&'static str] {
        match self {
            Self::Core => &["csv_preprocess_core"],
            Self::Lambda => &["csv_preprocess_lambda"],
            Self::All => &["csv_preprocess_core", "csv_preprocess_lambda"],
        }
    }
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy only
    Lint,
    /// Formatting, clippy, and tests
    Check,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_tests(scope: TestScope) {
    for package in scope.packages() {
        step(&format!("Test {package}"));
        run_cargo(&["test", "-p", package]);
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test { scope } => run_tests(scope),
        Commands::Ci { job } => match job {
            CiJob::Lint => ci_lint(),
            CiJob::Check => {
                ci_lint();
                run_tests(TestScope::All);
            }
        },
    }
}
