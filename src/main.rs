use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use typesplit::{
    existing_outputs, load_declarations, process_types, Declaration, MatchMode, SplitConfig,
    SplitError, SplitObserver, SplitOptions, TracingObserver,
};

#[derive(Parser, Debug)]
#[command(
    name = "typesplit",
    version,
    about = "Split TypeScript types, enums and interfaces into one file each"
)]
struct Cli {
    /// Enable verbose debug logging (or set TYPESPLIT_LOG=debug)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split the declarations of a file into a directory
    Create {
        /// TypeScript file to split
        filename: PathBuf,
        /// Migrate types to the specified directory
        #[arg(long, value_name = "DIR")]
        migrate: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        overwrite: bool,
        /// How declaration names are matched when inferring imports
        #[arg(long = "match", value_enum)]
        match_mode: Option<MatchArg>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the declarations a file would be split into, without writing anything
    List {
        /// TypeScript file to inspect
        filename: PathBuf,
        /// Print the declarations as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum MatchArg {
    Substring,
    Word,
}

impl From<MatchArg> for MatchMode {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Substring => MatchMode::Substring,
            MatchArg::Word => MatchMode::Word,
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TYPESPLIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let console = Console::new();
    let outcome = SplitConfig::load_or_default()
        .with_context(|| format!("failed to load {}", SplitConfig::FILE_NAME))
        .and_then(|config| match cli.command {
            Command::Create {
                filename,
                migrate,
                overwrite,
                match_mode,
                json,
            } => {
                let options = SplitOptions {
                    overwrite: overwrite || config.split.overwrite.unwrap_or(false),
                    match_mode: match_mode
                        .map(MatchMode::from)
                        .or(config.split.match_mode)
                        .unwrap_or_default(),
                    extension: config.split.extension.clone(),
                };
                let migrate = migrate.or_else(|| config.split.output.as_ref().map(PathBuf::from));
                run_create(&console, &filename, migrate.as_deref(), &options, json)
            }
            Command::List { filename, json } => run_list(&console, &filename, json),
        });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            console.error(&format!("Error: {err:#}"));
            if err
                .downcast_ref::<SplitError>()
                .is_some_and(SplitError::is_output_error)
            {
                console.error("Files written before the failure were left in place.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_create(
    console: &Console,
    filename: &Path,
    migrate: Option<&Path>,
    options: &SplitOptions,
    json: bool,
) -> anyhow::Result<()> {
    let Some(dir) = migrate else {
        console.error("Error: Please specify the output directory with --migrate");
        return Ok(());
    };

    let extension = options.extension_for(filename);
    let conflicts = existing_outputs(dir, &extension)
        .with_context(|| format!("failed to list {}", dir.display()))?;

    if !conflicts.is_empty() {
        if !options.overwrite {
            console.line(
                Color::Red,
                "The following files already exist and will not be overwritten:",
            );
            for file in &conflicts {
                console.line(Color::Red, &format!("- {file}"));
            }
            return Ok(());
        }
        console.line(Color::Green, "Overwriting the following files:");
        for file in &conflicts {
            console.line(Color::Green, &format!("- {file}"));
        }
    }

    let observer = CliObserver {
        console,
        announce: !json,
    };
    let result = process_types(filename, Some(dir), options, &observer)?;

    if json {
        console.plain(&serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    console.line(
        Color::Green,
        &format!(
            "Processed {} items (types, enums, interfaces).",
            result.count
        ),
    );
    for (name, file) in &result.types {
        console.line(Color::Blue, &format!("- {name}: {}", file.display()));
    }
    Ok(())
}

fn run_list(console: &Console, filename: &Path, json: bool) -> anyhow::Result<()> {
    let decls = load_declarations(filename, &TracingObserver)?;
    let decls: Vec<&Declaration> = decls.iter().collect();
    if json {
        console.plain(&serde_json::to_string_pretty(&decls)?);
        return Ok(());
    }

    console.line(
        Color::Green,
        &format!("Found {} items (types, enums, interfaces).", decls.len()),
    );
    for decl in decls {
        let exported = if decl.is_exported { " (exported)" } else { "" };
        console.line(
            Color::Blue,
            &format!(
                "- {} {}{exported} [{}..{}]",
                decl.kind, decl.name, decl.span.start, decl.span.end
            ),
        );
    }
    Ok(())
}

/// Reports progress on the console in addition to the tracing log.
struct CliObserver<'a> {
    console: &'a Console,
    /// False when stdout is reserved for machine-readable output.
    announce: bool,
}

impl SplitObserver for CliObserver<'_> {
    fn parse_diagnostic(&self, path: &Path, message: &str) {
        TracingObserver.parse_diagnostic(path, message);
    }

    fn declarations_found(&self, count: usize) {
        TracingObserver.declarations_found(count);
    }

    fn directory_ready(&self, dir: &Path, created: bool) {
        if created && self.announce {
            let shown = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
            self.console
                .line(Color::Green, &format!("Creating directory: {}", shown.display()));
        }
        TracingObserver.directory_ready(dir, created);
    }

    fn file_written(&self, decl: &Declaration, path: &Path, imports: usize) {
        TracingObserver.file_written(decl, path, imports);
    }
}

/// Coloured stdout/stderr writer.
struct Console {
    out: StandardStream,
    err: StandardStream,
}

impl Console {
    fn new() -> Self {
        Self {
            out: StandardStream::stdout(color_choice(atty::Stream::Stdout)),
            err: StandardStream::stderr(color_choice(atty::Stream::Stderr)),
        }
    }

    fn line(&self, color: Color, msg: &str) {
        let _ = write_colored(&mut self.out.lock(), color, msg);
    }

    fn error(&self, msg: &str) {
        let _ = write_colored(&mut self.err.lock(), Color::Red, msg);
    }

    fn plain(&self, msg: &str) {
        let _ = writeln!(self.out.lock(), "{msg}");
    }
}

fn color_choice(stream: atty::Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn write_colored(w: &mut impl WriteColor, color: Color, msg: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)))?;
    writeln!(w, "{msg}")?;
    w.reset()
}
