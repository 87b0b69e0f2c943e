// Jackal: Jack syntax analyzer with XML parse-tree output

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use jackal::error::AnalyzerError;

#[derive(Parser)]
#[command(name = "jackal")]
#[command(about = "Jack syntax analyzer producing XML parse trees", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile each Jack file to its XML parse tree (Foo.jack -> Foo.xml)
    Analyze {
        /// A .jack file or a directory containing .jack files
        path: PathBuf,
    },

    /// Emit the flat token listing for each Jack file (Foo.jack -> FooT.xml)
    Tokens {
        /// A .jack file or a directory containing .jack files
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (path, tokens_only) = match &cli.command {
        Commands::Analyze { path } => (path, false),
        Commands::Tokens { path } => (path, true),
    };

    let jack_files = match discover_jack_files(path) {
        Ok(files) => files,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if jack_files.is_empty() {
        eprintln!("Error: no .jack files found in '{}'", path.display());
        return ExitCode::FAILURE;
    }

    let mut failed = 0;
    for jack_file in &jack_files {
        if let Err(e) = process_file(jack_file, tokens_only) {
            eprintln!("Error processing '{}': {}", jack_file.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{} of {} files failed", failed, jack_files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Collect the files to process: the path itself if it is a .jack file,
/// or every .jack file directly inside it if it is a directory.
fn discover_jack_files(path: &Path) -> Result<Vec<PathBuf>, String> {
    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == "jack") {
            return Ok(vec![path.to_path_buf()]);
        }
        return Err(format!("'{}' is not a .jack file", path.display()));
    }

    if path.is_dir() {
        let entries = fs::read_dir(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file() && p.extension().is_some_and(|ext| ext == "jack")
            })
            .collect();
        files.sort();
        return Ok(files);
    }

    Err(format!("invalid input path: '{}'", path.display()))
}

/// Translate one unit and write its output artifact next to the input.
///
/// Nothing is written when translation fails: a partial tree is diagnostic
/// only, never a conformant artifact.
fn process_file(jack_file: &Path, tokens_only: bool) -> Result<(), AnalyzerError> {
    let source = fs::read_to_string(jack_file)?;

    let (output, out_file) = if tokens_only {
        (jackal_output(&source, true)?, output_path(jack_file, "T.xml"))
    } else {
        (jackal_output(&source, false)?, output_path(jack_file, ".xml"))
    };

    fs::write(&out_file, output)?;
    eprintln!(
        "Compiled '{}' to '{}'",
        jack_file.display(),
        out_file.display()
    );
    Ok(())
}

fn jackal_output(source: &str, tokens_only: bool) -> Result<String, AnalyzerError> {
    if tokens_only {
        jackal::tokenize_unit(source)
    } else {
        jackal::compile_unit(source)
    }
}

/// `Foo.jack` -> `Foo.xml` or `FooT.xml`, alongside the input.
fn output_path(jack_file: &Path, suffix: &str) -> PathBuf {
    let stem = jack_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    jack_file.with_file_name(format!("{}{}", stem, suffix))
}
