mod test_runner;

use std::io::Read;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use answer::template::{TemplateIssue, lint_option, lint_option_count, lint_template};
use answer::Mode;
use checker::CompiledAnswer;

#[derive(Parser)]
#[command(name = "anscheck", version, about = "Check query-language answers against a template")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check one submission against an answer template
    Check(CheckArgs),

    /// Print the pattern an answer template compiles to
    Pattern(PatternArgs),

    /// Report template constructs that compile into a wrong pattern
    Lint(AnswerArgs),

    /// Grade the sample submissions in .answer.toml files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct AnswerArgs {
    /// Answer template; `#` marks where the options go, in any order
    #[arg(short, long)]
    template: String,

    /// Order-independent fragment substituted for `#`. Repeatable.
    #[arg(short = 'o', long = "option")]
    options: Vec<String>,
}

#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    answer: AnswerArgs,

    /// Submitted code (read from stdin when omitted)
    submission: Option<String>,

    /// Also print the compiled pattern
    #[arg(long)]
    show_pattern: bool,
}

#[derive(clap::Args)]
struct PatternArgs {
    #[command(flatten)]
    answer: AnswerArgs,

    /// Compile as an unanchored fragment
    #[arg(long)]
    fragment: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to an .answer.toml file or directory containing them
    path: String,

    /// Run only answer files in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => do_check(args, cli.no_color),
        Command::Pattern(args) => do_pattern(args, cli.no_color),
        Command::Lint(args) => {
            let issues = emit_lint(&args, cli.no_color);
            if issues > 0 {
                process::exit(1);
            }
            eprintln!("ok: no issues found");
        }
        Command::Test(args) => {
            let path = Path::new(&args.path);
            if args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &args.category);
            process::exit(exit_code);
        }
    }
}

/// Log to stderr, filtered by `ANSCHECK_LOG` (e.g. `ANSCHECK_LOG=answer=trace`).
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_env("ANSCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn do_check(args: CheckArgs, no_color: bool) {
    let submission = match args.submission {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("error: cannot read submission from stdin: {}", e);
                process::exit(2);
            }
            buf
        }
    };

    tracing::debug!(
        options = args.answer.options.len(),
        submission_len = submission.len(),
        "checking submission"
    );
    emit_lint(&args.answer, no_color);

    let options = args.answer.options.as_slice();
    let compiled = match CompiledAnswer::new(&args.answer.template, options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    if args.show_pattern {
        println!("{}", compiled.pattern());
    }

    match compiled.matches(&submission) {
        Ok(true) => println!("match"),
        Ok(false) => {
            println!("no match");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

fn do_pattern(args: PatternArgs, no_color: bool) {
    let mode = if args.fragment {
        Mode::Fragment
    } else {
        Mode::TopLevel
    };
    tracing::debug!(?mode, options = args.answer.options.len(), "printing pattern");

    emit_lint(&args.answer, no_color);

    let options = args.answer.options.as_slice();
    match checker::compile_pattern(&args.answer.template, options, mode) {
        Ok(pattern) => println!("{}", pattern),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

/// Lint the template and every option, print the findings, and return how
/// many there were.
fn emit_lint(args: &AnswerArgs, no_color: bool) -> usize {
    let mut files = SimpleFiles::new();
    let mut issues: Vec<TemplateIssue> = Vec::new();

    let template_id = files.add("template".to_string(), args.template.clone());
    issues.extend(lint_template(&args.template, template_id));
    issues.extend(lint_option_count(
        &args.template,
        args.options.len(),
        template_id,
    ));

    for (i, option) in args.options.iter().enumerate() {
        let option_id = files.add(format!("option[{}]", i), option.clone());
        issues.extend(lint_option(option, option_id));
    }

    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for issue in &issues {
        let diagnostic = issue.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }

    tracing::debug!(issues = issues.len(), "linted answer");
    issues.len()
}
