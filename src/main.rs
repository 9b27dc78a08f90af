use clap::{Parser, Subcommand};
use scripture_reader::config::{self, ReaderConfig};
use scripture_reader::reader::Reader;
use scripture_reader::source::DirSource;
use scripture_reader::{check, manifest, output, page};
use std::path::{Path, PathBuf};

/// Display overrides shared by `read` and `render`.
#[derive(clap::Args, Clone)]
struct DisplayArgs {
    /// Rendering of the divine name (any text)
    #[arg(long)]
    divine_name: Option<String>,
    /// Capitalize reverential pronouns
    #[arg(long, overrides_with = "no_pronouns")]
    pronouns: bool,
    /// Leave reverential pronouns as written
    #[arg(long, overrides_with = "pronouns")]
    no_pronouns: bool,
    /// Use the alternate illustrative image
    #[arg(long, overrides_with = "no_latina")]
    latina: bool,
    /// Use the default illustrative image
    #[arg(long, overrides_with = "latina")]
    no_latina: bool,
}

/// `Some` when one of a `--flag` / `--no-flag` pair was given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Book and chapter to open.
#[derive(clap::Args, Clone)]
struct Selection {
    /// Book name as listed in the manifest
    book: String,
    /// Chapter number (defaults to the first chapter)
    chapter: Option<String>,
}

#[derive(Parser)]
#[command(name = "scripture-reader")]
#[command(about = "Read scripture from a static JSON site")]
#[command(long_about = "\
Read scripture from a static JSON site

The site directory holds a manifest of books and chapter counts and one JSON
document per chapter:

  site/
  ├── config.toml              # Reader config (optional)
  └── data/
      ├── chapters.json        # {\"order\": [...], \"chapters\": {book: count}}
      └── Genesis/
          └── 1.json           # {\"verses\": [{book_name, chapter, verse, text}]}

Verse text may carry <span class=\"yhwh\"> divine-name tokens and
<span class=\"pro\"> pronoun tokens; --divine-name and --[no-]pronouns rewrite them.

Run 'scripture-reader gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory (contains data/)
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List books with their chapter counts
    Books,
    /// List the chapters of a book
    Chapters {
        book: String,
    },
    /// Print a chapter as text
    Read {
        #[command(flatten)]
        selection: Selection,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Write a chapter as a complete HTML page
    Render {
        #[command(flatten)]
        selection: Selection,
        #[command(flatten)]
        display: DisplayArgs,
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Validate the data directory against the manifest
    Check {
        /// Do not fail on chapter documents the manifest lists but the site lacks
        #[arg(long)]
        allow_missing: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Books => {
            let mut reader = open(&cli.site)?;
            reader.load_books();
            require_manifest(&reader)?;
            print_lines(output::format_books(&reader.books));
        }
        Command::Chapters { book } => {
            let mut reader = open(&cli.site)?;
            reader.load_books();
            require_manifest(&reader)?;
            if !reader.books.select(&book) {
                return Err(format!("Unknown book: {book}").into());
            }
            reader.populate_chapters();
            print_lines(output::format_chapters(&book, &reader.chapters));
        }
        Command::Read { selection, display } => {
            let reader = navigate(&cli.site, &selection, &display)?;
            print_lines(output::format_output(reader.output()));
        }
        Command::Render {
            selection,
            display,
            output,
        } => {
            let reader = navigate(&cli.site, &selection, &display)?;
            let html = page::render_page(&reader).into_string();
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Rendered {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Check { allow_missing } => {
            println!("==> Checking {}", cli.site.display());
            let report = check::check(&cli.site)?;
            print_lines(output::format_check_report(&report));
            if !report.is_ok(allow_missing) {
                return Err("Site check failed".into());
            }
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn open(site: &Path) -> Result<Reader<DirSource>, config::ConfigError> {
    let config = config::load_config(site)?;
    Ok(Reader::new(DirSource::new(site), &config))
}

/// Start a reader and walk it to the requested chapter, the way a user would
/// through the selectors and toggles.
fn navigate(
    site: &Path,
    selection: &Selection,
    display: &DisplayArgs,
) -> Result<Reader<DirSource>, Box<dyn std::error::Error>> {
    let config = apply_display_args(config::load_config(site)?, display);
    let mut reader = Reader::new(DirSource::new(site), &config);
    reader.load_books();
    require_manifest(&reader)?;

    if !reader.books.select(&selection.book) {
        return Err(format!("Unknown book: {}", selection.book).into());
    }
    reader.populate_chapters();
    if let Some(chapter) = &selection.chapter
        && !reader.chapters.select(chapter)
    {
        return Err(format!("{} has no chapter {chapter}", selection.book).into());
    }
    reader.load_chapter();
    Ok(reader)
}

fn require_manifest(reader: &Reader<DirSource>) -> Result<(), String> {
    match reader.manifest() {
        Some(_) => Ok(()),
        None => Err(format!("Could not load {}", manifest::MANIFEST_PATH)),
    }
}

fn apply_display_args(mut config: ReaderConfig, args: &DisplayArgs) -> ReaderConfig {
    if let Some(name) = &args.divine_name {
        config.display.divine_name = name.clone();
    }
    if let Some(on) = toggle(args.pronouns, args.no_pronouns) {
        config.display.pronoun_emphasis = on;
    }
    if let Some(on) = toggle(args.latina, args.no_latina) {
        config.display.alternate_image = on;
    }
    config
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
