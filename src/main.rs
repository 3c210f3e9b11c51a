use clap::{Parser as ClapParser, Subcommand};
use lime_query::cli::{self, CliError, ReadOptions, TranslateOptions, TranslateResult};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "limeq")]
#[command(about = "limeq - Translate SQL into Lime Pro XML queries and read XML responses")]
#[command(version)]
struct Cli {
    /// Log pipeline diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a SQL query into a Lime XML query
    Translate {
        /// The SQL query to translate
        query: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the XML
        #[arg(long)]
        syntax_only: bool,
    },

    /// Parse an XML document and print it back
    Read {
        /// XML input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,

        /// Let text next to child elements overwrite them
        #[arg(long)]
        legacy_text: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'limeq docs' to list categories)
        category: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("LIMEQ_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Translate {
            query,
            pretty,
            syntax_only,
        } => run_translate(query, pretty, syntax_only),
        Commands::Read {
            input,
            pretty,
            json,
            legacy_text,
        } => run_read(input, pretty, json, legacy_text),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_translate(query: String, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = TranslateOptions {
        query,
        pretty,
        syntax_only,
    };

    match cli::execute_translate(&options)? {
        TranslateResult::SyntaxValid => println!("Syntax is valid"),
        TranslateResult::Success(xml) => println!("{}", xml),
    }
    Ok(())
}

fn run_read(
    input: Option<String>,
    pretty: bool,
    json: bool,
    legacy_text_overwrite: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = ReadOptions {
        input,
        pretty,
        json,
        legacy_text_overwrite,
    };

    println!("{}", cli::execute_read(&options)?);
    Ok(())
}
