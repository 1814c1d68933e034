/*!
 * Command-line interface for dropcat
 */

use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use log::{debug, LevelFilter};

use dropcat::clipboard::copy_to_clipboard;
use dropcat::config::{Args, Command, Config, HostOptions, IgnoredAction};
use dropcat::engine::Aggregator;
use dropcat::error::{DropcatError, Result};
use dropcat::output::{append_to, compose, read_existing, write_atomic};
use dropcat::prefs::Preferences;
use dropcat::report::{ReportFormat, Reporter, RunReport};

fn main() -> io::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let prefs_path = match &args.prefs {
        Some(path) => path.clone(),
        None => Preferences::default_path()?,
    };
    let mut prefs = Preferences::load(&prefs_path)?;

    if let Some(Command::Ignored { action }) = &args.command {
        return edit_ignored(action, &mut prefs, &prefs_path);
    }

    let config = Config::resolve(&args, &prefs);
    config.validate()?;
    let host = HostOptions::resolve(&args, &prefs);

    if args.paths.is_empty() {
        if args.save_prefs {
            return save_prefs(&mut prefs, &config, &host, &prefs_path);
        }
        return Err(DropcatError::InvalidArgument(
            "no paths given; pass files or directories to aggregate".to_string(),
        ));
    }

    let start_time = Instant::now();
    let batch = Aggregator::new(config.clone()).process_batch(&args.paths);

    for (path, reason) in batch.skipped() {
        debug!("{}: {}", path.display(), reason);
        eprintln!(
            "warning: '{}' is binary or could not be processed",
            path.display()
        );
    }
    for diagnostic in batch.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }

    let text = compose(host.prompt.as_deref(), &batch.text);
    let duration = start_time.elapsed();

    // A failed sink does not stop the others; the first failure is returned
    let mut sink_error = None;

    if let Some(output_file) = &host.output_file {
        if let Err(e) = save_output(output_file, &text, host.append) {
            sink_error.get_or_insert(e);
        }
    }

    if host.clip {
        match copy_to_clipboard(&text) {
            Ok(()) => eprintln!("Copied output to clipboard"),
            Err(e) => {
                sink_error.get_or_insert(e.into());
            }
        }
    }

    if !host.quiet {
        println!("{}", text);
    }

    if host.report {
        let report = RunReport::from_batch(&batch, &text, duration);
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    }

    if args.save_prefs {
        save_prefs(&mut prefs, &config, &host, &prefs_path)?;
    }

    match sink_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn save_output(path: &Path, text: &str, append: bool) -> Result<()> {
    let content = if append {
        append_to(&read_existing(path)?, text)
    } else {
        text.to_string()
    };
    write_atomic(path, &content)?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

fn save_prefs(
    prefs: &mut Preferences,
    config: &Config,
    host: &HostOptions,
    path: &Path,
) -> Result<()> {
    prefs.capture(config, host);
    prefs.save(path)?;
    eprintln!("Saved preferences to {}", path.display());
    Ok(())
}

fn edit_ignored(action: &IgnoredAction, prefs: &mut Preferences, path: &Path) -> Result<()> {
    match action {
        IgnoredAction::List => {
            for name in &prefs.ignored_folders {
                println!("{}", name);
            }
            return Ok(());
        }
        IgnoredAction::Add { names } => {
            let added = prefs.add_ignored(names);
            eprintln!("Added {} name(s)", added.len());
        }
        IgnoredAction::Remove { names } => {
            let removed = prefs.remove_ignored(names);
            eprintln!("Removed {} name(s)", removed.len());
        }
        IgnoredAction::Reset => {
            prefs.reset_ignored();
            eprintln!("Restored the default ignore list");
        }
    }

    prefs.save(path)
}
