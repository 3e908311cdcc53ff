use anyhow::Result;
use colored::Colorize;

use binfetch::metadata::{self, InfoLookup};
use binfetch::{Config, RunMode, cache, install, run, update, util};

use crate::cli::{BinfetchCommand, CLI};

/// Dispatches one parsed invocation. The returned code becomes the process
/// exit code; multi-target batches exit 0 even with partial per-item
/// failures, while a lone failed target or an interrupted batch exits
/// non-zero.
pub fn execute(cli: CLI) -> Result<i32> {
    let config = Config::from_env()?;
    match cli.command {
        BinfetchCommand::Install { silent, names } => {
            let summary = install::install_batch(&config, &names, silent, true);
            Ok(summary.exit_code(names.len()))
        }
        BinfetchCommand::Remove { names } => {
            install::remove(&config, &names);
            Ok(0)
        }
        BinfetchCommand::Update { names } => {
            update::update(&config, &names)?;
            Ok(0)
        }
        BinfetchCommand::Run {
            verbose,
            silent,
            transparent,
            name,
            args,
        } => {
            let mode = if transparent {
                RunMode::Transparent
            } else if silent {
                RunMode::Silent
            } else if verbose {
                RunMode::Verbose
            } else {
                RunMode::Normal
            };
            Ok(run::run(&config, &name, &args, mode)?)
        }
        BinfetchCommand::Info { name } => {
            execute_info(&config, name.as_deref())?;
            Ok(0)
        }
        BinfetchCommand::Search { limit, term } => {
            execute_search(&config, &term, limit)?;
            Ok(0)
        }
        BinfetchCommand::List { described } => {
            execute_list(&config, described)?;
            Ok(0)
        }
    }
}

fn execute_info(config: &Config, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for binary in install::installed_binaries(config)? {
            println!("{binary}");
        }
        return Ok(());
    };

    match metadata::find_record(config, name)? {
        InfoLookup::Found(record) => {
            println!("Name: {}", record.name);
            if !record.description.is_empty() {
                println!("Description: {}", record.description);
            }
            if !record.version.is_empty() {
                println!("Version: {}", record.version);
            }
            if !record.updated.is_empty() {
                println!("Updated: {}", record.updated);
            }
            if !record.size.is_empty() {
                println!("Size: {}", record.size);
            }
            if !record.sha256.is_empty() {
                println!("SHA256: {}", record.sha256);
            }
            if !record.source.is_empty() {
                println!("Source: {}", record.source);
            }
        }
        InfoLookup::WrongArch => {
            println!("'{name}' exists, but not for this architecture ({})", config.arch);
        }
        InfoLookup::Missing => {
            println!("no metadata found for '{name}'");
        }
    }
    Ok(())
}

fn execute_search(config: &Config, term: &str, limit: usize) -> Result<()> {
    let records = metadata::for_arch(metadata::fetch_records(config)?, &config.arch);
    let hits = metadata::search(&records, term);
    if hits.is_empty() {
        println!("no matching binaries found for '{term}'");
        return Ok(());
    }
    if hits.len() > limit {
        println!("too many matches for '{term}' ({} > {limit}); refine the search", hits.len());
        return Ok(());
    }
    for record in hits {
        let state = install_state(config, &record.name);
        let line = format!("{state} {} - {}", record.name, record.description);
        println!("{}", shape(config, &line));
    }
    Ok(())
}

/// `[i]` installed, `[c]` cached and runnable, `[-]` neither.
fn install_state(config: &Config, name: &str) -> &'static str {
    if util::install_path(&config.install_dir, name).exists() {
        "[i]"
    } else if cache::lookup(config, name).is_some() {
        "[c]"
    } else {
        "[-]"
    }
}

fn execute_list(config: &Config, described: bool) -> Result<()> {
    if !described {
        for name in metadata::known_names(config)? {
            println!("{name}");
        }
        return Ok(());
    }
    for record in metadata::known_records(config)? {
        let line = format!("{} - {}", record.name.bold(), record.description);
        println!("{}", shape(config, &line));
    }
    Ok(())
}

fn shape(config: &Config, line: &str) -> String {
    if config.truncate_output {
        util::truncate_line(line, util::terminal_width())
    } else {
        line.to_string()
    }
}
