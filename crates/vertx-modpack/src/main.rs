//! vertx-modpack - Assembles Vert.x modules from build output

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use modpack_core::project::PROJECT_FILE_NAME;
use modpack_core::{
    AssemblyReport, Assembler, ModDescriptor, ModuleSettings, ProjectManifest, SettingsOverrides,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vertx-modpack")]
#[command(about = "Assembles a deployable Vert.x module from build output")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub module: ModuleArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the module folder (default)
    Assemble(ModuleArgs),
    /// Print the mod.json that would be written, without touching the file system
    Descriptor(ModuleArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ModuleArgs {
    /// Project description written by the build host
    #[arg(long, default_value = PROJECT_FILE_NAME)]
    pub project: PathBuf,

    /// Directory the module folder is created in (default: the build directory)
    #[arg(long = "output-directory")]
    pub output_directory: Option<PathBuf>,

    /// Module name (default: <group_id>.<artifact_id>-v<version>)
    #[arg(long = "module-name", env = "VERTICLE_NAME")]
    pub module_name: Option<String>,

    /// Main verticle, e.g. app.js or org.acme.MyApp
    #[arg(long, env = "VERTICLE_MAIN")]
    pub main: Option<String>,

    /// The main verticle is a worker verticle
    #[arg(long, env = "WORKER", num_args = 0..=1, default_missing_value = "true")]
    pub worker: Option<bool>,

    /// Keep the caller's working directory instead of the module directory
    #[arg(long = "preserve-cwd", env = "PRESERVE_CWD", num_args = 0..=1, default_missing_value = "true")]
    pub preserve_cwd: Option<bool>,

    /// Redeploy the module when files in its directory change
    #[arg(long = "auto-redeploy", env = "AUTO_REDEPLOY", num_args = 0..=1, default_missing_value = "true")]
    pub auto_redeploy: Option<bool>,

    /// Modules whose resources are put on this module's path
    #[arg(long, env = "INCLUDES")]
    pub includes: Option<String>,

    /// Also write <module-name>.zip next to the module folder
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub zip: Option<bool>,
}

impl From<&ModuleArgs> for SettingsOverrides {
    fn from(args: &ModuleArgs) -> Self {
        SettingsOverrides {
            output_directory: args.output_directory.clone(),
            module_name: args.module_name.clone(),
            main: args.main.clone(),
            worker: args.worker,
            preserve_cwd: args.preserve_cwd,
            auto_redeploy: args.auto_redeploy,
            includes: args.includes.clone(),
            zip: args.zip,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Assemble(module_args)) => assemble(&module_args).await,
        Some(Command::Descriptor(module_args)) => print_descriptor(&module_args),
        // No subcommand provided, default to assemble with the top-level flags
        None => assemble(&args.module).await,
    }
}

/// Load the project and layer file, environment and flag values over its defaults
fn load_settings(args: &ModuleArgs) -> Result<(ProjectManifest, ModuleSettings)> {
    let project = ProjectManifest::load(&args.project)
        .with_context(|| format!("Failed to load project {}", args.project.display()))?;

    let settings = ModuleSettings::from_host(&project)
        .apply(SettingsOverrides::from(&project.module))
        .apply(SettingsOverrides::from(args));

    Ok((project, settings))
}

async fn assemble(args: &ModuleArgs) -> Result<()> {
    let (project, settings) = load_settings(args)?;

    println!(
        "{}",
        format!("Assembling module {}...", settings.module_name)
            .cyan()
            .bold()
    );

    let report = Assembler::new(&project, settings)
        .assemble()
        .await
        .context("Module assembly failed")?;

    print_summary(&report);
    Ok(())
}

fn print_descriptor(args: &ModuleArgs) -> Result<()> {
    let (_, settings) = load_settings(args)?;
    settings.validate()?;
    let json = ModDescriptor::from_settings(&settings).to_json()?;
    println!("{}", json);
    Ok(())
}

fn print_summary(report: &AssemblyReport) {
    println!();
    println!(
        "  {} {} file(s) from classes and scripts",
        "->".blue(),
        report.copied_files.len()
    );
    if !report.resources.is_empty() {
        println!("  {} {} resource(s)", "->".blue(), report.resources.len());
    }
    println!(
        "  {} {} dependenc{} in lib/",
        "->".blue(),
        report.dependencies.len(),
        if report.dependencies.len() == 1 { "y" } else { "ies" }
    );
    if !report.skipped_dependencies.is_empty() {
        println!(
            "  {} {} dependenc{} skipped (not compile/runtime)",
            "->".yellow(),
            report.skipped_dependencies.len(),
            if report.skipped_dependencies.len() == 1 { "y" } else { "ies" }
        );
    }
    println!();
    println!(
        "{} module in {}",
        "Assembled".green().bold(),
        report.module_dir.display()
    );
    if let Some(archive) = &report.archive {
        println!("{} {}", "Archived".green().bold(), archive.display());
    }
}
