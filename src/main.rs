//! crossprint - Typeset crossword puzzles

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::{debug, warn};

use crossprint::compile::{Compiler, XelatexCompiler};
use crossprint::dates::{DateRange, output_filename, parse_date};
use crossprint::source::{SourceRegistry, fetch_crossword, fetcher_for};
use crossprint::{Crossword, Error, LatexRenderer, RenderConfig, Result, ccxml, print};

/// Directory holding `crossword.cls`, used when `--tex-dir` is not given.
const BUNDLED_TEX_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tex");

#[derive(Parser)]
#[command(name = "crossprint")]
#[command(version, about = "Typeset crossword puzzles", long_about = None)]
#[command(after_help = "EXAMPLES:
    crossprint render puzzle.xml           Typeset puzzle.xml as puzzle.pdf
    crossprint render --tex puzzle.xml     Write LaTeX source only
    crossprint dump puzzle.xml             Show the parsed puzzle as JSON
    crossprint fetch -s es -f -6           Download the last week of puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress output messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Typeset CCXML files as PDF (or LaTeX) next to the input
    Render {
        /// Input CCXML files
        #[arg(value_name = "XML", required = true)]
        inputs: Vec<PathBuf>,

        /// Write output here instead of beside each input
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        typeset: TypesetArgs,
    },

    /// Print parsed CCXML files as JSON
    Dump {
        /// Input CCXML files
        #[arg(value_name = "XML", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Download, typeset and optionally print puzzles for a range of dates
    #[command(after_help = "DATE FORMATS:
    - ISO 8601 date: 2020-12-25
    - relative date: -2 (= 2 days ago)
    - yesterday (or y)
    - today (or t)")]
    Fetch {
        /// Puzzle source nickname
        #[arg(short, long, value_name = "NAME", default_value = "es")]
        source: String,

        /// Download start date
        #[arg(short, long, value_name = "DATE", default_value = "today", allow_negative_numbers = true)]
        from: String,

        /// Download end date
        #[arg(short, long, value_name = "DATE", default_value = "today", allow_negative_numbers = true)]
        to: String,

        /// Download one day only
        #[arg(short, long, value_name = "DATE", allow_negative_numbers = true, conflicts_with_all = ["from", "to"])]
        date: Option<String>,

        /// Send each PDF to the printer and delete it afterwards
        #[arg(short, long)]
        print: bool,

        /// Source registry
        #[arg(long, value_name = "FILE", env = "CROSSPRINT_SOURCES", default_value = "sources.toml")]
        sources: PathBuf,

        /// Directory for the generated PDFs
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        typeset: TypesetArgs,
    },

    /// List the sources in the registry
    Sources {
        /// Source registry
        #[arg(long, value_name = "FILE", env = "CROSSPRINT_SOURCES", default_value = "sources.toml")]
        sources: PathBuf,
    },
}

#[derive(Args)]
struct TypesetArgs {
    /// Write LaTeX source instead of compiling a PDF
    #[arg(long)]
    tex: bool,

    /// Leave the grid empty instead of filling in solutions
    #[arg(long)]
    blank: bool,

    /// Keep straight quotes as they are
    #[arg(long)]
    no_smart_quotes: bool,

    /// Directory containing crossword.cls
    #[arg(long, value_name = "DIR", env = "CROSSPRINT_TEX_DIR")]
    tex_dir: Option<PathBuf>,
}

impl TypesetArgs {
    fn renderer(&self) -> LatexRenderer {
        LatexRenderer::with_config(RenderConfig {
            smart_quotes: !self.no_smart_quotes,
            show_solution: !self.blank,
            ..RenderConfig::default()
        })
    }

    fn compiler(&self) -> XelatexCompiler {
        let dir = self
            .tex_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_TEX_DIR));
        XelatexCompiler::new().with_resource_dir(dir)
    }

    fn extension(&self) -> &'static str {
        if self.tex { "tex" } else { "pdf" }
    }

    /// Render and, unless `--tex` was given, compile.
    fn produce(&self, crossword: &Crossword) -> Result<Vec<u8>> {
        let tex = self.renderer().render(crossword)?;
        if self.tex {
            Ok(tex.into_bytes())
        } else {
            self.compiler().compile(&tex)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let result = match &cli.command {
        Command::Render {
            inputs,
            output_dir,
            typeset,
        } => render_files(inputs, output_dir.as_deref(), typeset, cli.quiet),
        Command::Dump { inputs } => dump_files(inputs),
        Command::Fetch {
            source,
            from,
            to,
            date,
            print,
            sources,
            output_dir,
            typeset,
        } => {
            let (from, to) = match date {
                Some(day) => (day.as_str(), day.as_str()),
                None => (from.as_str(), to.as_str()),
            };
            fetch_range(&FetchRequest {
                nick: source,
                from,
                to,
                print: *print,
                registry: sources,
                output_dir,
                typeset,
                quiet: cli.quiet,
            })
        }
        Command::Sources { sources } => list_sources(sources),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_crossword(path: &Path) -> Result<Crossword> {
    let bytes = fs::read(path).map_err(|e| Error::from(e).in_document(path.display().to_string()))?;
    ccxml::parse(&bytes).map_err(|e| e.in_document(path.display().to_string()))
}

fn render_files(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    typeset: &TypesetArgs,
    quiet: bool,
) -> Result<()> {
    for input in inputs {
        let crossword = read_crossword(input)?;
        let output = output_path(input, output_dir, typeset.extension());
        let bytes = typeset
            .produce(&crossword)
            .map_err(|e| e.in_document(input.display().to_string()))?;
        fs::write(&output, bytes)?;
        if !quiet {
            println!("Generated {}", output.display());
        }
    }
    Ok(())
}

/// `puzzle.xml` → `puzzle.pdf`, optionally moved into `output_dir`.
fn output_path(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let renamed = input.with_extension(extension);
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

fn dump_files(inputs: &[PathBuf]) -> Result<()> {
    for input in inputs {
        let crossword = read_crossword(input)?;
        let json = serde_json::to_string_pretty(&crossword)
            .map_err(|e| Error::Render(format!("cannot serialize puzzle: {e}")))?;
        println!("{json}");
    }
    Ok(())
}

struct FetchRequest<'a> {
    nick: &'a str,
    from: &'a str,
    to: &'a str,
    print: bool,
    registry: &'a Path,
    output_dir: &'a Path,
    typeset: &'a TypesetArgs,
    quiet: bool,
}

fn fetch_range(request: &FetchRequest<'_>) -> Result<()> {
    let registry = SourceRegistry::load(request.registry)?;
    let source = registry.require(request.nick)?;
    let fetcher = fetcher_for(source.provider)?;

    let today = Local::now().date_naive();
    let start = parse_date(request.from, today)?;
    let end = parse_date(request.to, today)?;
    if start > end {
        warn!("start date {start} is after end date {end}; nothing to do");
    }

    for date in DateRange::new(start, end) {
        let crossword = match fetch_crossword(fetcher.as_ref(), date, request.nick, source) {
            Ok(crossword) => crossword,
            Err(e) if e.is_source_unavailable() => {
                println!("No crossword available for {date}");
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut name = output_filename(request.nick, date);
        if request.typeset.tex {
            name = Path::new(&name).with_extension("tex").display().to_string();
        }
        let output = request.output_dir.join(name);
        let bytes = request
            .typeset
            .produce(&crossword)
            .map_err(|e| e.in_document(output.display().to_string()))?;
        fs::write(&output, bytes)?;

        if request.print && !request.typeset.tex {
            print::print_pdf(&output)?;
            fs::remove_file(&output)?;
            debug!("removed {}", output.display());
            if !request.quiet {
                println!("Printed {}", output.display());
            }
        } else if !request.quiet {
            println!("Generated {}", output.display());
        }
    }

    Ok(())
}

fn list_sources(path: &Path) -> Result<()> {
    let registry = SourceRegistry::load(path)?;
    if registry.is_empty() {
        println!("No sources defined in {}", path.display());
    }
    for (nick, source) in registry.iter() {
        println!("  - {nick}: {}", source.description);
    }
    Ok(())
}
