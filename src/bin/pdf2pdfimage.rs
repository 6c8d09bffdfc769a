//! CLI binary for pdf2pdfimage.
//!
//! Prints a banner, asks for the file to convert, and maps library events
//! and errors to status lines. Working directories live next to the
//! executable: `_temporario/` for scratch, `saida/resultado.pdf` for the
//! result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2pdfimage::pipeline::input;
use pdf2pdfimage::{
    convert, ConversionConfig, ConversionOutput, ConversionProgressCallback, ConversionStats,
    FailureKind, Pdf2PdfImageError, Stage,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: stage lines on stdout and a page counter
/// bar on stderr while pages are being rendered.
struct CliProgressCallback {
    /// Created once the page count is known.
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bar: Mutex::new(None),
        })
    }

    fn finish_bar(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage(&self, stage: Stage) {
        match stage {
            Stage::Idle => print_welcome_message(),
            Stage::Prompting => {
                println!("\n=> Insira o nome completo do arquivo a ser convertido:");
                io::stdout().flush().ok();
            }
            Stage::Converting => println!("\n=> Pré-processando arquivo"),
            Stage::Merging => {
                self.finish_bar();
                println!("\n=> Escrevendo arquivo final");
            }
            Stage::CleaningUp => self.finish_bar(),
            Stage::Done => {}
        }
    }

    fn on_conversion_start(&self, total_pages: usize) {
        let bar = ProgressBar::new(total_pages as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{bar:42.green/238}] {msg}  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message(format!("Convertendo página 0 de {total_pages}"));
        bar.enable_steady_tick(Duration::from_millis(80));
        *self.bar.lock().unwrap() = Some(bar);
    }

    fn on_page_rendered(&self, page_num: usize, total_pages: usize) {
        if let Some(ref bar) = *self.bar.lock().unwrap() {
            bar.set_position(page_num as u64);
            bar.set_message(format!("Convertendo página {page_num} de {total_pages}"));
        }
    }

    fn on_conversion_complete(&self, stats: &ConversionStats) {
        println!(
            "{} {} páginas convertidas em {:.1}s",
            green("✔"),
            bold(&stats.output_pages.to_string()),
            stats.total_duration_ms as f64 / 1000.0
        );
    }
}

/// Flatten a PDF into an image-only PDF.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2pdfimage",
    version,
    about = "Flatten a PDF into an image-only PDF",
    long_about = "Rasterises every page of a PDF at 110 DPI and reassembles the pages into \
saida/resultado.pdf next to the executable. The input path is asked for interactively.\n\n\
PDFium is looked up in PDFIUM_LIB_PATH, then in any pdfium* folder below the executable's \
directory, then system-wide.",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PDFIMAGE_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress = CliProgressCallback::new();
    progress.on_stage(Stage::Idle);

    let outcome = run(progress);
    report(outcome, &mut io::stdout().lock())
}

/// Print the outcome of a run followed by the closing line.
///
/// Recognized failures become a message and a clean exit; anything else is
/// returned after the closing line has been printed.
fn report(
    outcome: Result<ConversionOutput, Pdf2PdfImageError>,
    out: &mut impl Write,
) -> Result<()> {
    let result = match outcome {
        Ok(output) => {
            writeln!(out, "   {}", bold(&output.output_path.display().to_string()))?;
            Ok(())
        }
        Err(e) => match e.kind() {
            Some(FailureKind::InputNotFound) => {
                writeln!(out, "{}", red("O arquivo inserido não foi encontrado"))?;
                debug!("{e}");
                Ok(())
            }
            Some(FailureKind::RendererBackendMissing) => {
                writeln!(out, "\n{}", red("[ERRO] PDFium nao encontrado"))?;
                debug!("{e}");
                Ok(())
            }
            None => Err(e).context("Conversion failed"),
        },
    };

    writeln!(out, "\n=> Encerrando programa")?;
    result
}

/// Prompt for the input file and convert it.
fn run(progress: Arc<CliProgressCallback>) -> Result<ConversionOutput, Pdf2PdfImageError> {
    let input_path = input::prompt_for_input(&mut io::stdin().lock(), progress.as_ref())?;

    println!("\n=> Iniciando programa");
    let dir = program_dir();
    debug!("Program directory: {}", dir.display());

    let config = ConversionConfig::builder()
        .program_dir(&dir)
        .progress_callback(progress)
        .build()?;

    convert(&input_path, &config)
}

/// Directory of the running executable, falling back to the current one.
fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_welcome_message() {
    println!("=========================================================================");
    println!("===                            PDF2PDFIMAGE                           ===");
    println!("===                                                                   ===");
    println!("===   - Converte cada página do PDF em imagem e remonta o arquivo     ===");
    println!("===   - Créditos: Rust, PDFium, pdfium-render, ...                    ===");
    println!("=========================================================================");
}
