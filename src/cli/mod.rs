//! CLI subcommands — new, pack.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::core::params::{sanitize_app_name, Backend, BootstrapParams};
use crate::core::pipeline;
use crate::report::ConsoleReporter;
use crate::template;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new application from a packaged template
    New {
        /// Application name; sanitized into a package identifier
        name: String,

        /// Directory to create the application under (default: current)
        #[arg(short, long)]
        target_dir: Option<PathBuf>,

        /// Backend hostname; scheme optional, defaults to https
        #[arg(long)]
        hostname: Option<String>,

        /// Backend variant the application talks to
        #[arg(long, value_enum, default_value_t = Backend::Classic)]
        backend: Backend,

        /// Template archive (default: template.tgz next to the executable)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Skip dependency installation
        #[arg(long)]
        no_install: bool,

        /// Show diagnostic detail
        #[arg(short, long)]
        verbose: bool,
    },

    /// Pack a template source directory into a shippable archive
    Pack {
        /// Template source directory
        source: PathBuf,

        /// Output archive path
        #[arg(short, long, default_value = "template.tgz")]
        output: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::New {
            name,
            target_dir,
            hostname,
            backend,
            template,
            no_install,
            verbose,
        } => cmd_new(
            &name, target_dir, hostname, backend, template, no_install, verbose,
        ),
        Commands::Pack { source, output } => cmd_pack(&source, &output),
    }
}

fn cmd_new(
    name: &str,
    target_dir: Option<PathBuf>,
    hostname: Option<String>,
    backend: Backend,
    template: Option<PathBuf>,
    no_install: bool,
    verbose: bool,
) -> Result<(), String> {
    let app_name = sanitize_app_name(name);
    let parent = match target_dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| format!("cannot resolve working directory: {}", e))?,
    };
    let params = BootstrapParams {
        target_dir: parent.join(&app_name),
        app_name,
        hostname,
        backend,
        verbose,
        install: !no_install,
    };

    let package = match template {
        Some(path) => path,
        None => bundled_template()?,
    };

    let reporter = ConsoleReporter::new(verbose);
    pipeline::run(&params, &package, &reporter)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Template archive shipped next to the installed executable.
fn bundled_template() -> Result<PathBuf, String> {
    let exe =
        std::env::current_exe().map_err(|e| format!("cannot locate executable: {}", e))?;
    let dir = exe
        .parent()
        .ok_or_else(|| "executable has no parent directory".to_string())?;
    Ok(dir.join("template.tgz"))
}

fn cmd_pack(source: &Path, output: &Path) -> Result<(), String> {
    if !source.is_dir() {
        return Err(format!("{} is not a directory", source.display()));
    }
    template::pack(source, output).map_err(|e| e.to_string())?;
    println!("Packed {} into {}", source.display(), output.display());
    Ok(())
}
