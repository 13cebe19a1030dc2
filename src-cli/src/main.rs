//! tikzkit - inspect, export and create TikZ diagram documents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tikz_model::{Anchor, Document, LineWidth, MetaPos, PathKind, Pos};
use tikz_store::{AppSettings, DocumentIo, SettingsManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TikZ diagram documents from the command line
#[derive(Parser, Debug)]
#[command(name = "tikzkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file; defaults apply when omitted
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print or write the TikZ code of a saved document
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the code here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
    /// Show what a saved document contains
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Build a small two-node example document
    Demo {
        /// Save the document here instead of printing its JSON
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = load_settings(args.settings.as_deref())?;

    match args.command {
        Command::Export { file, output } => export(&settings, &file, output.as_deref()),
        Command::Info { file } => info(&settings, &file),
        Command::Demo { output } => demo(&settings, output.as_deref()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<AppSettings> {
    let Some(path) = path else {
        return Ok(AppSettings::default());
    };
    let mut manager = SettingsManager::with_path(path.to_path_buf());
    let settings = manager
        .load_sync()
        .with_context(|| format!("reading settings from {}", path.display()))?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings.clone())
}

fn open(settings: &AppSettings, file: &Path) -> Result<Document> {
    let mut document = settings.new_document();
    document
        .load(file)
        .with_context(|| format!("loading {}", file.display()))?;
    Ok(document)
}

fn export(settings: &AppSettings, file: &Path, output: Option<&Path>) -> Result<()> {
    let document = open(settings, file)?;
    let code = document.tikz_code(&settings.export);
    match output {
        Some(out) => {
            std::fs::write(out, code).with_context(|| format!("writing {}", out.display()))?;
            tracing::info!(path = %out.display(), "TikZ code written");
        }
        None => print!("{}", code),
    }
    Ok(())
}

fn info(settings: &AppSettings, file: &Path) -> Result<()> {
    let document = open(settings, file)?;
    println!("nodes: {}", document.node_count());
    println!("paths: {}", document.path_count());
    println!("styles: {}", document.style_count());
    println!("last id: {}", document.last_id());
    for path in document.paths() {
        println!("  path {} ({})", path.id(), path.kind());
    }
    Ok(())
}

/// Two nodes at (-3,3) and (3,3) joined by a semithick line
fn demo_document(settings: &AppSettings) -> Result<Document> {
    let mut document = settings.new_document();
    let edge = {
        let mut tx = document.transaction("Create Demo");
        let a = tx.create_node();
        tx.set_node_pos(a, Pos::cm(-3.0, 3.0))?;
        tx.set_node_text(a, "A")?;
        let b = tx.create_node();
        tx.set_node_pos(b, Pos::cm(3.0, 3.0))?;
        tx.set_node_text(b, "B")?;
        let edge = tx.create_edge(
            PathKind::Line,
            MetaPos::on_node(a, Anchor::NoAnchor),
            MetaPos::on_node(b, Anchor::NoAnchor),
        )?;
        edge
    };
    document
        .edit_style(edge)?
        .set_line_width_preset(LineWidth::SemiThick)?;
    Ok(document)
}

fn demo(settings: &AppSettings, output: Option<&Path>) -> Result<()> {
    let document = demo_document(settings)?;
    match output {
        Some(out) => {
            document
                .save(out)
                .with_context(|| format!("saving {}", out.display()))?;
            tracing::info!(path = %out.display(), "demo document saved");
        }
        None => println!("{}", tikz_store::serialize(&document)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_document_exports() {
        let settings = AppSettings::default();
        let document = demo_document(&settings).unwrap();
        let code = document.tikz_code(&settings.export);
        assert!(code.contains("\\node (1) at (-3.00cm,3.00cm) {A};"));
        assert!(code.contains("\\draw[semithick] (1) -- (2);"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["tikzkit", "export", "a.tikzkit", "-o", "a.tex"]).unwrap();
        match args.command {
            Command::Export { file, output } => {
                assert_eq!(file, PathBuf::from("a.tikzkit"));
                assert_eq!(output, Some(PathBuf::from("a.tex")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
