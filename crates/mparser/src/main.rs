use std::io::{self, IsTerminal as _, Write as _};
use std::process::ExitCode;

use anyhow::Context as _;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use mparser_errors::{Diagnostic, Renderer};
use mparser_inputs::{FileId, SourceFile};
use mparser_tokenizer::Tokenizer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Lossless parser for MATLAB source files")]
struct Options {
    #[command(subcommand)]
    command: Command,

    /// When to color rendered diagnostics.
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,

    /// Log filter, in `tracing-subscriber` env-filter syntax.
    #[arg(long, env = "MPARSER_LOG", default_value = "warn", global = true)]
    log: String,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream of a file with its trivia.
    Tokens { path: Utf8PathBuf },
    /// Print the syntax tree of a file.
    Tree { path: Utf8PathBuf },
    /// Report the diagnostics of one or more files.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn renderer(self) -> Renderer {
        let styled = match self {
            Self::Auto => io::stderr().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        };
        if styled { Renderer::styled() } else { Renderer::plain() }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let options = Options::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&options.log).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    let renderer = options.color.renderer();
    let clean = match options.command {
        Command::Tokens { path } => tokens(&load(FileId::new(1), path)?, &renderer)?,
        Command::Tree { path } => tree(&load(FileId::new(1), path)?, &renderer)?,
        Command::Check { paths } => {
            let mut clean = true;
            for (index, path) in (1..).zip(paths) {
                clean &= check(&load(FileId::new(index), path)?, &renderer);
            }
            clean
        }
    };

    Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn load(id: FileId, path: Utf8PathBuf) -> anyhow::Result<SourceFile> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    info!(%path, bytes = text.len(), "loaded source file");
    Ok(SourceFile::new(id, Some(path), text))
}

fn report(source: &SourceFile, diagnostics: &[Diagnostic], renderer: &Renderer) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.render(renderer, source.display_name(), source.text()));
    }
}

fn tokens(source: &SourceFile, renderer: &Renderer) -> anyhow::Result<bool> {
    let mut stdout = io::stdout().lock();
    for token in Tokenizer::with_file(source.text(), source.id()) {
        match token {
            Ok(token) => writeln!(stdout, "{token}")?,
            Err(error) => {
                report(source, &[error.to_diagnostic()], renderer);
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn tree(source: &SourceFile, renderer: &Renderer) -> anyhow::Result<bool> {
    match mparser_parse::parse(source) {
        Ok(tree) => {
            io::stdout().lock().write_all(tree.debug_dump().as_bytes())?;
            report(source, tree.diagnostics(), renderer);
            Ok(!tree.has_errors())
        }
        Err(error) => {
            report(source, &[error.to_diagnostic()], renderer);
            Ok(false)
        }
    }
}

fn check(source: &SourceFile, renderer: &Renderer) -> bool {
    match mparser_parse::parse(source) {
        Ok(tree) => {
            report(source, tree.diagnostics(), renderer);
            !tree.has_errors()
        }
        Err(error) => {
            report(source, &[error.to_diagnostic()], renderer);
            false
        }
    }
}
