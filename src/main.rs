use clap::{CommandFactory, Parser};
use colored::*;
use env_logger::{Builder, Env, Target};
use fscout::cli::Cli;
use fscout::config::Config;
use fscout::error::{FscoutError, Result};
use fscout::output::{self, OutputFormat};
use fscout::walker::{self, CancelToken, SearchRequest};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "fscout", &mut std::io::stdout());
        return Ok(());
    }

    setup_logging(&cli)?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e}");
        Config::default()
    });

    let start_time = Instant::now();

    let parallel = cli.parallel || config.traversal.parallel;
    let request = SearchRequest {
        root: cli.path.clone(),
        pattern: cli.pattern.clone(),
        include_dir_matches: cli.include_dirs,
        recurse: cli.recursive || parallel,
        parallel,
        suppress_errors: cli.suppress_errors || config.traversal.suppress_errors,
        large_fetch: cli.large_fetch || config.traversal.large_fetch,
    };

    if let Some(threads) = cli.threads.or(config.traversal.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build_global()
            .map_err(|e| FscoutError::Other(e.to_string()))?;
    }
    if request.parallel {
        info!(
            "Parallel fan-out across {} worker threads",
            cli.threads
                .or(config.traversal.threads)
                .unwrap_or_else(num_cpus::get)
        );
    }

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .map_err(|e| FscoutError::Other(e.to_string()))?;
    }

    info!(
        "Searching {} for '{}'",
        request.root.display(),
        request.pattern
    );

    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Searching {}...", request.root.display()));

    let outcome = walker::search_with_cancel(&request, &cancel)?;
    pb.finish_and_clear();

    if cancel.is_cancelled() {
        warn!("Search cancelled; results are partial");
    }

    match cli.output.unwrap_or(config.output.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                output::render_json(&request.root, &request.pattern, &outcome)
            );
        }
        OutputFormat::Text => {
            if outcome.matches.is_empty() {
                println!("{}", "No matches found".yellow());
            } else if cli.long || config.output.long {
                output::print_long_format(&outcome.matches);
            } else {
                output::print_simple_list(&outcome.matches);
            }
            if config.output.show_summary {
                output::print_summary(&outcome, start_time.elapsed());
            }
            output::print_failures(&outcome);
        }
    }

    if cli.copy && !outcome.matches.is_empty() {
        let paths: Vec<String> = outcome
            .matches
            .iter()
            .map(|m| m.path.display().to_string())
            .collect();
        let mut clipboard = arboard::Clipboard::new().map_err(FscoutError::Clipboard)?;
        clipboard
            .set_text(paths.join("\n"))
            .map_err(FscoutError::Clipboard)?;
        println!("\n{}", "Results copied to clipboard!".green());
    }

    info!(
        "Search finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(FscoutError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(FscoutError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| FscoutError::Other(e.to_string()))?;
    Ok(())
}
