//! laxml CLI
//!
//! Dumps what the lenient tokenizer makes of a document: raw chunks, tokens,
//! JSON, or the nested token tree.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use laxml_tokenizer::{MarkupScanner, Token, TokenKind, Tokenizer, TokenizerOptions};
use laxml_tree::{NodeId, TreeBuilder, outline};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// laxml: inspect how loose markup is chunked and tokenized
#[derive(Parser, Debug)]
#[command(name = "laxml")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Tokens of a file
    laxml page.html

    # Raw chunks of inline markup
    laxml --markup '<p class=x>hi</p>' --format chunks

    # Token tree from stdin
    cat feed.xml | laxml --format tree
"#)]
struct Cli {
    /// Markup file to read (stdin when neither FILE nor --markup is given)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Tokenize this string instead of a file
    #[arg(long, value_name = "TEXT", conflicts_with = "path")]
    markup: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Tokens)]
    format: Format,

    /// JSON file with tokenizer options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Print plain text without colors
    #[arg(long)]
    no_color: bool,

    /// Log recoveries and per-token decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One raw chunk per line
    Chunks,
    /// One token per line, tagged with its kind
    Tokens,
    /// Tokens as a JSON array
    Json,
    /// Indented token tree
    Tree,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = load_options(cli.options.as_ref())?;
    let input = open_input(&cli)?;
    debug!(format = ?cli.format, "tokenizing");

    match cli.format {
        Format::Chunks => {
            for (index, chunk) in MarkupScanner::new(input).enumerate() {
                let chunk = chunk.context("failed to read chunk")?;
                if cli.no_color {
                    println!("{index:>4} {chunk:?}");
                } else {
                    println!("{:>4} {}", index.dimmed(), format!("{chunk:?}").green());
                }
            }
        }
        Format::Tokens => {
            for token in Tokenizer::with_options(input, options) {
                let token = token.context("failed to read token")?;
                print_token(&token, cli.no_color);
            }
        }
        Format::Json => {
            let tokens = collect_tokens(input, options)?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Format::Tree => {
            let tree = TreeBuilder::build(collect_tokens(input, options)?);
            print!("{}", outline(&tree, NodeId::ROOT));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_options(path: Option<&PathBuf>) -> Result<TokenizerOptions> {
    let Some(path) = path else {
        return Ok(TokenizerOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid tokenizer options in {}", path.display()))
}

fn open_input(cli: &Cli) -> Result<Box<dyn Read>> {
    if let Some(markup) = &cli.markup {
        return Ok(Box::new(io::Cursor::new(markup.as_bytes().to_vec())));
    }
    match &cli.path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn collect_tokens(input: impl Read, options: TokenizerOptions) -> Result<Vec<Token>> {
    Tokenizer::with_options(input, options)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to tokenize input")
}

fn print_token(token: &Token, no_color: bool) {
    let kind = token.kind().to_string();
    let kind = format!("{kind:<22}");
    if no_color {
        println!("{kind} {token}");
        return;
    }
    match token.kind() {
        TokenKind::Tag => println!("{} {}", kind.cyan(), token.bold()),
        TokenKind::Comment => println!("{} {}", kind.dimmed(), token.dimmed()),
        TokenKind::Doctype | TokenKind::ProcessingInstruction => {
            println!("{} {}", kind.magenta(), token);
        }
        TokenKind::Text => println!("{} {:?}", kind.yellow(), token.to_string()),
    }
}
