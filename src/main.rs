use std::{
    fs::read_to_string,
    io::{self, Read},
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use lexviz::{
    analysis::{
        analyze, analyze_source, handle_request_json, AnalysisConfig, LexRequest, LexResponse,
        DEFAULT_MAX_SOURCE_LEN,
    },
    display_error,
    errors::errors::Error,
    init_tracing,
    lexer::{
        display::display_value_of,
        lexer::{LanguageProfile, Lexer, ScanMode},
    },
};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    C,
    Expression,
}

impl From<ProfileArg> for LanguageProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::C => LanguageProfile::C,
            ProfileArg::Expression => LanguageProfile::Expression,
        }
    }
}

/// Tokenize C-like source and print its token and symbol tables.
#[derive(Debug, Parser)]
#[command(name = "lexviz", version)]
struct Cli {
    /// Source file, or `-` for stdin
    #[arg(default_value = "-")]
    input: String,

    #[arg(long, value_enum, default_value_t = ProfileArg::C)]
    profile: ProfileArg,

    /// Emit directive and comment tokens instead of stripping them first
    #[arg(long)]
    direct: bool,

    /// Print the JSON response instead of tables
    #[arg(long)]
    json: bool,

    /// Read a `{"code": ...}` request body from stdin and answer it
    #[arg(long, conflicts_with = "json")]
    request: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_SOURCE_LEN)]
    max_bytes: usize,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mode = if cli.direct { ScanMode::Direct } else { ScanMode::Clean };
    let lexer = Lexer::builder().profile(cli.profile.into()).mode(mode).build()?;
    let config = AnalysisConfig {
        max_source_len: cli.max_bytes,
    };

    if cli.request {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        let response = handle_request_json(&lexer, &body, &config);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(response.is_success());
    }

    let (source, file_name) = read_input(&cli.input)?;

    if cli.json {
        let request = LexRequest { code: source };
        let response = analyze(&lexer, &request, &config);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(response.is_success());
    }

    let start = Instant::now();
    let analysis = match analyze_source(&lexer, &source, &config) {
        Ok(analysis) => analysis,
        Err(error) => {
            report(&lexer, &error, &source, &file_name);
            return Ok(false);
        }
    };
    info!(elapsed = ?start.elapsed(), tokens = analysis.tokens.len(), "tokenized");

    print_tables(&LexResponse::success(&analysis));
    Ok(true)
}

fn read_input(input: &str) -> io::Result<(String, String)> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok((source, String::from("<stdin>")));
    }

    Ok((read_to_string(input)?, input.to_string()))
}

// Positions refer to the prepared text, so the snippet is taken from it too.
fn report(lexer: &Lexer, error: &Error, source: &str, file_name: &str) {
    let prepared = lexer.prepare(source);
    display_error(error, &prepared.text, file_name);
}

fn print_tables(response: &LexResponse) {
    let LexResponse::Success(success) = response else {
        return;
    };

    println!("{:>4}  {:<20} {:<14} {}", "#", "Token", "Lexeme", "Category");
    for (index, token) in success.tokens.iter().enumerate() {
        println!(
            "{:>4}  {:<20} {:<14} {}",
            index + 1,
            token.kind.as_str(),
            display_value_of(&token.value, token.category),
            token.category
        );
    }

    println!();
    println!("{:>4}  {:<20} {:<12} {}", "ID", "Symbol", "Type", "Count");
    for entry in success.symbol_table.entries() {
        println!(
            "{:>4}  {:<20} {:<12} {}",
            entry.id,
            entry.name,
            entry.kind.as_str(),
            entry.occurrences
        );
    }

    let stats = &success.statistics;
    println!();
    println!(
        "{} tokens, {} identifiers, {} comments skipped, {} directives skipped",
        stats.total_tokens, stats.unique_identifiers, stats.skipped_comments, stats.skipped_directives
    );
}
