use std::io::Read;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quarry::config::Config;
use quarry::service::{Request, Service};
use quarry::toolchain::analyzer::{self, Analysis};
use quarry::toolchain::diagnostics::diagnostic_emitter::console_diagnostic_consumer;
use quarry::toolchain::diagnostics::{DiagnosticCollector, DiagnosticConsumer};
use quarry::toolchain::lexer::rows::{self, Row};
use quarry::toolchain::lexer::{TokenizedBuffer, Vocabulary};
use quarry::toolchain::source::SourceBuffer;
use quarry::toolchain::validator;

const HELP: &str = "\
    quarry - lexical scanner and structural validator

    USAGE:
        quarry [--phase PHASE] [--strict] [--json] [--config FILE] [--quiet] FILENAME
        quarry --route ROUTE [--config FILE] [--quiet]

    OPTIONS:
        --phase PHASE       Which phase to take the input through. PHASE is one of 'lex',
                            'validate', or 'analyze'. Defaults to 'lex'.
        --strict            Stop lexing at the first lexical error. The validate phase always
                            lexes strictly.
        --json              Print tokens and results as JSON instead of text.
        --config FILE       Read the language vocabulary and service settings from a TOML
                            file.
        --quiet             If present, all non-error output is suppressed.
        --route ROUTE       Read a JSON request body from stdin, handle it as a request to
                            ROUTE ('/lex' or '/validate') and print the response body.

    ARGS:
        FILENAME            The path to the source file to process, or supply '-' to take
                            input from stdin.

    ENVIRONMENT:
        QUARRY_LOG          Log filter directives, for example 'debug' or 'quarry=trace'.
";

#[derive(Debug, Eq, PartialEq)]
enum Phase {
    Lex,
    Validate,
    Analyze,
}

#[derive(Debug, Eq, PartialEq)]
struct QuarryArgs {
    phase: Phase,
    strict: bool,
    json: bool,
    quiet: bool,
    config: Option<std::path::PathBuf>,
    route: Option<String>,
    source_file: Option<std::path::PathBuf>,
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => fail(e),
    };
    init_logging();
    debug!(?args, "starting");

    let config = match &args.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };

    if let Some(route) = &args.route {
        let ok = serve(route, &config, &args);
        std::process::exit(if ok { 0 } else { 1 });
    }

    let vocabulary = config.vocabulary().unwrap_or_else(|e| fail(e));
    let source_file = match &args.source_file {
        Some(path) => path,
        None => fail("missing FILENAME"),
    };

    let stdin_text: String;
    let source = if source_file.as_os_str() == "-" {
        stdin_text = read_stdin();
        SourceBuffer::new_from_string(&stdin_text, "<stdin>")
    } else {
        match SourceBuffer::new_from_file(source_file) {
            Ok(source) => source,
            Err(e) => fail(e),
        }
    };

    let ok = match args.phase {
        Phase::Lex => lex(&source, &vocabulary, &args),
        Phase::Validate => validate(&source, &vocabulary, &args),
        Phase::Analyze => analyze(&source, &vocabulary, &args),
    };
    info!(ok, "finished");
    if !ok {
        std::process::exit(1);
    }
}

fn lex(source: &SourceBuffer, vocabulary: &Vocabulary, args: &QuarryArgs) -> bool {
    let mut diags = console_diagnostic_consumer();
    let ok = if args.strict {
        match TokenizedBuffer::tokenize_strict(source, vocabulary) {
            Ok(buffer) => {
                print_rows(&buffer.rows(), args);
                true
            }
            Err(e) => {
                print_rows(&rows::to_rows(&e.partial), args);
                diags.handle_diagnostic(e.diagnostic);
                false
            }
        }
    } else {
        let mut collector = DiagnosticCollector::new();
        let buffer = TokenizedBuffer::tokenize(source, vocabulary, &mut collector);
        print_rows(&buffer.rows(), args);
        let errors = collector.into_diagnostics();
        let ok = errors.is_empty();
        for diag in errors {
            diags.handle_diagnostic(diag);
        }
        ok
    };
    diags.flush();
    ok
}

fn validate(source: &SourceBuffer, vocabulary: &Vocabulary, args: &QuarryArgs) -> bool {
    let mut diags = console_diagnostic_consumer();
    let buffer = match TokenizedBuffer::tokenize_strict(source, vocabulary) {
        Ok(buffer) => buffer,
        Err(e) => {
            diags.handle_diagnostic(e.diagnostic);
            diags.flush();
            return false;
        }
    };

    let result = validator::validate(buffer.tokens(), vocabulary);
    validator::report(&result, &buffer, &mut diags);
    diags.flush();
    if !args.quiet {
        if args.json {
            print_json(&result);
        } else if result.ok {
            println!("OK");
        }
    }
    result.ok
}

fn analyze(source: &SourceBuffer, vocabulary: &Vocabulary, args: &QuarryArgs) -> bool {
    match analyzer::analyze(source, vocabulary) {
        Analysis::Ok(rows) => {
            if !args.quiet {
                println!("OK");
                print_rows(&rows, args);
            }
            true
        }
        Analysis::Error(report) => {
            println!("ERROR");
            print_json(&report);
            false
        }
    }
}

// Handles stdin as the body of a request to `route`, returns true for a successful status.
fn serve(route: &str, config: &Config, args: &QuarryArgs) -> bool {
    let service = Service::from_config(config).unwrap_or_else(|e| fail(e));
    let request = Request::new(route, read_stdin());
    let response = service.handle(&request);
    if !args.quiet {
        eprintln!("status: {}", response.status);
        for (name, value) in &response.headers {
            eprintln!("{}: {}", name, value);
        }
    }
    print_json(&response.body);
    response.status < 400
}

fn print_rows(rows: &[Row], args: &QuarryArgs) {
    if args.quiet {
        return;
    }
    if args.json {
        print_json(&rows);
    } else {
        print!("{}", rows::format_rows(rows));
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }
}

fn read_stdin() -> String {
    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        fail(format!("unable to read stdin: {}", e));
    }
    text
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}.", message);
    std::process::exit(1);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("QUARRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn parse_args() -> Result<QuarryArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = QuarryArgs {
        phase: pargs.opt_value_from_fn("--phase", parse_phase)?.unwrap_or(Phase::Lex),
        strict: pargs.contains("--strict"),
        json: pargs.contains("--json"),
        quiet: pargs.contains("--quiet"),
        config: pargs.opt_value_from_str("--config")?,
        route: pargs.opt_value_from_str("--route")?,
        source_file: pargs.opt_free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}

fn parse_phase(s: &str) -> Result<Phase, &'static str> {
    match s {
        "lex" => Ok(Phase::Lex),
        "validate" => Ok(Phase::Validate),
        "analyze" => Ok(Phase::Analyze),
        _ => Err("unrecognized phase."),
    }
}
