//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use deckgen_core::{scan_content, RuleTable};
use deckgen_pptx::{DeckGenerator, DeckTemplate};

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(author, version, about = "Assemble a slide deck from content folders and a template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a presentation from a content directory
    Generate {
        /// Directory holding one subfolder per content group
        content: PathBuf,

        /// Template PPTX/POTX file
        #[arg(short, long)]
        template: PathBuf,

        /// Layout rule override file (TOML)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output PPTX file
        #[arg(short, long, default_value = "presentation.pptx")]
        output: PathBuf,
    },

    /// List a template's layouts and placeholders
    Inspect {
        /// Template PPTX/POTX file
        template: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            content,
            template,
            rules,
            output,
        } => {
            generate_command(&content, &template, rules.as_deref(), &output)?;
        }
        Commands::Inspect { template } => {
            inspect_command(&template)?;
        }
    }

    Ok(())
}

/// Execute the generate command
pub fn generate_command(
    content: &Path,
    template: &Path,
    rules: Option<&Path>,
    output: &Path,
) -> Result<()> {
    println!("deckgen v{}", deckgen_core::VERSION);
    println!("Generating from: {}", content.display());

    let template_obj = DeckTemplate::from_file(template)
        .with_context(|| format!("Failed to load template: {}", template.display()))?;
    println!(
        "  Template: {} ({} layouts)",
        template.display(),
        template_obj.layout_count()
    );

    let rule_table = match rules {
        Some(path) => {
            println!("  Rules: {}", path.display());
            RuleTable::with_overrides_file(path)
                .with_context(|| format!("Failed to load rules: {}", path.display()))?
        }
        None => RuleTable::default(),
    };

    let groups = scan_content(content)
        .with_context(|| format!("Failed to scan content directory: {}", content.display()))?;
    println!("  Found {} content group(s)", groups.len());

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let generator = DeckGenerator::new(template_obj, rule_table);
    let report = generator
        .generate(&groups, output)
        .with_context(|| format!("Failed to generate presentation: {}", output.display()))?;

    println!();
    println!("Generation complete!");
    println!("  Output: {}", output.display());
    println!("  Slides: {}", report.slide_count());
    for group in &report.groups {
        println!(
            "  {} -> {} ({} bound, {} skipped)",
            group.group,
            group.resolved_layout,
            group.bound(),
            group.skipped()
        );
    }
    for name in &report.failed_groups {
        println!("  {} -> abandoned after error", name);
    }

    Ok(())
}

/// Execute the inspect command
pub fn inspect_command(template: &Path) -> Result<()> {
    let template_obj = DeckTemplate::from_file(template)
        .with_context(|| format!("Failed to load template: {}", template.display()))?;

    println!("Template: {}", template.display());
    let (width, height) = template_obj.slide_size;
    println!("Slide size: {} x {} EMU", width, height);
    println!();

    for layout in template_obj.layouts() {
        println!("{}. {}", layout.index, layout.name);
        if layout.placeholders.is_empty() {
            println!("   (no placeholders)");
            continue;
        }
        for placeholder in &layout.placeholders {
            println!(
                "   idx {:>2}  {:?}  at ({}, {})  size {} x {}",
                placeholder.index,
                placeholder.capability,
                placeholder.position.0,
                placeholder.position.1,
                placeholder.size.0,
                placeholder.size.1
            );
        }
    }

    Ok(())
}
