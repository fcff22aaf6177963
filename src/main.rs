// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Preflight checks (usage, destination) before any network activity
// 3. Run the pipeline: resolve revision -> list tree -> filter -> download
// 4. Exit with proper code (0 = success, 1 = any fatal error)
//
// Rust concepts used:
// - async/await: Because we download many files concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Closures: The progress callback that drives the terminal bar
// =============================================================================

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use repo_grab::cli::Cli;
use repo_grab::download;
use repo_grab::error::{ErrorKind, GrabError};
use repo_grab::github;
use repo_grab::preflight;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(()) = destination populated successfully
//   Err    = any fatal error (rendered by report_error, exit code 1)
async fn run() -> Result<(), GrabError> {
    // Parse command-line arguments into our Cli struct
    // None means clap already answered --help or --version; that's success
    let Some(cli) = Cli::parse_or_usage()? else {
        return Ok(());
    };

    // Preflight checks, all before a single network request is made:
    // blank arguments, source parsing, and the fresh-destination rule
    let repo = preflight::preflight(&cli.source, &cli.destination)?;
    let dest = Path::new(&cli.destination);

    println!("🔍 Scaffolding from github.com/{}", repo.repo_slug());

    let gh = github::GitHub::new()?;

    // Explicit ref -> latest release -> default branch
    let revision = github::resolve_revision(&gh, &repo).await?;
    println!("📌 Revision: {}", revision);

    let files = github::list_files(&gh, &repo, &revision).await?;
    println!("📄 Tree has {} file(s)", files.len());

    let files = github::filter_sub_path(files, &repo.sub_path)?;
    if !repo.sub_path.is_empty() {
        println!("   {} file(s) under '{}'", files.len(), repo.sub_path);
    }

    // Create the destination root; workers create subdirectories on demand
    tokio::fs::create_dir_all(dest).await.map_err(|e| {
        GrabError::new(ErrorKind::Filesystem)
            .with_detail(format!("could not create {}", dest.display()))
            .with_detail(e.to_string())
    })?;

    let total = files.len();

    // The bar lives here in the presentation layer; the engine only calls
    // the callback with (completed, total) after each finished file
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40}] {pos}/{len} files")
            .expect("valid progress template")
            .progress_chars("=> "),
    );
    let bar_handle = bar.clone(); // ProgressBar clones share the same bar

    download::download_all(&gh, files, dest, cli.workers, move |completed, _total| {
        bar_handle.set_position(completed as u64);
    })
    .await?;

    bar.finish_and_clear();
    println!("✅ Done! {} file(s) written to {}", total, dest.display());

    Ok(())
}

// Renders a fatal error: the kind's message, each detail line, and (for
// argument errors) a usage hint
fn report_error(error: &GrabError) {
    eprintln!("❌ Error: {}", error);
    for detail in &error.details {
        eprintln!("   {}", detail);
    }

    if error.show_usage() {
        eprintln!();
        eprintln!("Usage: repo-grab <source> <destination>");
        eprintln!("   source:      owner/name[/sub/path...][#revision]");
        eprintln!("   destination: a directory that does not exist yet");
        eprintln!();
        eprintln!("Example: repo-grab rust-lang/mdBook/guide#v0.4.40 ./my-book");
    }
}
