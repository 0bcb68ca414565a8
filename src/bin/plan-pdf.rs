//! plan-pdf CLI - render plan Markdown to a PDF

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use plan_pdf::{
    pagesize, render_markdown_with_fonts, FontFamily, Geometry, Info, LayoutOptions, Mm, Palette,
};

#[derive(Parser)]
#[command(name = "plan-pdf")]
#[command(version)]
#[command(about = "Render the Markdown of a generated plan as a paginated PDF", long_about = None)]
struct Cli {
    /// Markdown input (stdin if not specified or `-`)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "plan.pdf")]
    output: PathBuf,

    /// Paper size
    #[arg(long, value_enum, default_value = "a4", env = "PLAN_PDF_PAGE_SIZE")]
    page_size: PaperSize,

    /// Margin on every side, in millimetres
    #[arg(long, default_value = "20", env = "PLAN_PDF_MARGIN")]
    margin: f32,

    /// TrueType/OpenType font for regular text (Helvetica if not specified)
    #[arg(long, value_name = "FILE", requires = "bold_font")]
    regular_font: Option<PathBuf>,

    /// TrueType/OpenType font for bold text
    #[arg(long, value_name = "FILE", requires = "regular_font")]
    bold_font: Option<PathBuf>,

    /// Document title metadata
    #[arg(long)]
    title: Option<String>,

    /// Document author metadata
    #[arg(long)]
    author: Option<String>,

    /// Don't write bookmarks for headings
    #[arg(long)]
    no_outline: bool,

    /// Print everything in black
    #[arg(long)]
    monochrome: bool,

    /// Write uncompressed content streams
    #[arg(long)]
    uncompressed: bool,

    /// More output; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::A5 => "a5",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = read_input(cli.input.as_deref())?;
    let options = options(cli)?;
    let fonts = fonts(cli)?;

    let document = render_markdown_with_fonts(&markdown, &options, fonts)?;
    fs::write(&cli.output, &document.bytes)?;

    log::info!(
        "wrote {} ({} pages, {} bytes)",
        cli.output.display(),
        document.page_count,
        document.bytes.len()
    );
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut markdown = String::new();
            std::io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

fn options(cli: &Cli) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
    let size = pagesize::by_name(cli.page_size.name())
        .ok_or_else(|| plan_pdf::PDFError::UnknownPageSize(cli.page_size.name().to_string()))?;
    let geometry = Geometry::new(size, Mm(cli.margin).into())?;

    let mut info = Info::new();
    if let Some(title) = &cli.title {
        info.title(title);
    }
    if let Some(author) = &cli.author {
        info.author(author);
    }

    let mut options = LayoutOptions::new();
    options
        .geometry(geometry)
        .info(info)
        .outline(!cli.no_outline)
        .compress(!cli.uncompressed);
    if cli.monochrome {
        options.palette(Palette::monochrome());
    }
    Ok(options)
}

fn fonts(cli: &Cli) -> Result<FontFamily, Box<dyn std::error::Error>> {
    match (&cli.regular_font, &cli.bold_font) {
        (Some(regular), Some(bold)) => {
            log::debug!("embedding {} and {}", regular.display(), bold.display());
            Ok(FontFamily::load(fs::read(regular)?, fs::read(bold)?)?)
        }
        _ => Ok(FontFamily::helvetica()),
    }
}
