//! Packy CLI entrypoint.
//!
//! Validates a resource pack folder and zips it, printing the saved path or
//! the error text exactly as the library reports it.

use camino::Utf8Path;
use clap::Parser;
use packy::cli::{Cli, Command, ValidateArgs, ZipArgs};
use packy::config::Config;
use packy::error::{Result, ShellError};
use packy::shell::{validate_folder, zip_pack};
use std::io::Write;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = Config::load(cli.config.as_deref().map(Utf8Path::as_std_path))?;
    let message = match &cli.command {
        Command::Zip(args) => run_zip(cli, &config, args, stderr)?,
        Command::Validate(args) => run_validate(cli, args, stderr)?,
    };
    writeln!(stdout, "{message}").map_err(|source| ShellError::WriteFailed { source })
}

/// Validates then archives, returning the status line.
fn run_zip(
    cli: &Cli,
    config: &Config,
    args: &ZipArgs,
    stderr: &mut dyn Write,
) -> Result<String> {
    let archiver = config.archiver(args.packs_dir.as_deref().map(Utf8Path::as_std_path))?;
    if !cli.quiet {
        write_stderr_line(stderr, format!("Zipping {}...", args.folder.trim()));
    }
    Ok(zip_pack(&args.folder, args.output.as_deref(), &archiver)?)
}

fn run_validate(cli: &Cli, args: &ValidateArgs, stderr: &mut dyn Write) -> Result<String> {
    let folder = args.folder.trim();
    if !cli.quiet {
        write_stderr_line(stderr, format!("Validating {folder}..."));
    }
    validate_folder(Path::new(folder))?;
    Ok("manifest.json is valid".to_owned())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
