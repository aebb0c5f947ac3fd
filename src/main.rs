use article_render::article::Article;
use article_render::{batch, config, html, output};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "article-render")]
#[command(about = "Render CMS article bodies with inline gallery images")]
#[command(long_about = "\
Render CMS article bodies with inline gallery images

An article input is a JSON file holding the body and its ordered gallery:

  {
    \"slug\": \"harbour-at-dawn\",
    \"title\": \"Harbour at dawn\",
    \"content\": \"The tide was low.\\n[[img:1]]\\n- nets\\n- gulls\",
    \"gallery\": [{ \"url\": \"https://cdn.example/1.jpg\", \"alt\": \"Nets\", \"caption\": \"Courtesy: Jane Doe\" }]
  }

Body micro-markup, one construct per line:
  ## Heading         heading
  - item / * item    bullet list (consecutive lines grouped)
  1. item            numbered list (consecutive lines grouped)
  [[img:N]]          gallery image N (1-based) as a figure
  **bold** *italic* ==highlight==

Gallery images never placed with [[img:N]] are listed under \"More photos\".

Run 'article-render gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one article input to stdout
    Render {
        /// Article input file (JSON)
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Show the document structure and image usage of one article
    Check {
        /// Article input file (JSON)
        file: PathBuf,
    },
    /// Render every article input in a directory to HTML fragments
    Build {
        /// Directory of article inputs
        #[arg(long, default_value = "articles")]
        source: PathBuf,
        /// Output directory for rendered fragments
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// HTML article fragment
    Html,
    /// The render result as JSON
    Json,
    /// Indexed document tree
    Tree,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render { file, format } => {
            let article = Article::load(&file)?;
            let result = article.render();
            match format {
                Format::Html => {
                    let config = config::load_config(&cli.config_dir)?;
                    println!("{}", html::render_article(&article, &result, &config).into_string());
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                Format::Tree => output::print_document(&result.document),
            }
        }
        Command::Check { file } => {
            println!("==> Checking {}", file.display());
            let article = Article::load(&file)?;
            let result = article.render();
            output::print_document(&result.document);
            output::print_image_report(&result, &article.gallery);
            if result.unresolved_images.is_empty() {
                println!("==> Article is valid");
            } else {
                println!("==> Some placeholders point outside the gallery");
            }
        }
        Command::Build { source, output: out_dir } => {
            let config = config::load_config(&cli.config_dir)?;
            println!("==> Building {} → {}", source.display(), out_dir.display());
            let summary = run_build(&source, &out_dir, &config)?;
            output::print_build_summary(&summary);
            println!("==> Build complete: {}", out_dir.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the batch build with a printer thread draining progress events.
fn run_build(
    source: &Path,
    output_dir: &Path,
    config: &config::RenderConfig,
) -> Result<batch::BuildSummary, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_build_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = batch::build(source, output_dir, config, Some(tx));
    if printer.join().is_err() {
        tracing::warn!("progress printer panicked");
    }
    Ok(result?)
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
