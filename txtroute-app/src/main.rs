use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use txtroute_common::TxtRouteError;
use txtroute_common::observability::{LogConfig, LogFormat, init_logging};
use txtroute_config::TxtRouteConfigLoader;
use txtroute_core::{Group, Recognizer};

use cli::{Cli, Command};
mod cli;

/// Exit status for a `parse` line that names no group.
const EXIT_NO_MATCH: u8 = 1;
/// Exit status when the catalog, logging or I/O fails.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Held until `run` returns so buffered events are flushed on every exit path.
    let _logging = init_logging(LogConfig {
        emit_stderr: cli.verbose,
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        default_filter: if cli.verbose { "debug" } else { "info" },
        ..LogConfig::default()
    })?;

    let config_path = cli.config_path();
    let groups = load_catalog(&config_path).context("failed to load group catalog")?;
    let recognizer = Recognizer::new(&groups);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Command::Parse { text } => {
            let matched = parse(&recognizer, &text.join(" "), &mut out)
                .context("failed to write parse result")?;
            if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_NO_MATCH)
            }
        }
        Command::Listen => {
            let stdin = io::stdin();
            let lines = listen(&recognizer, stdin.lock(), &mut out)
                .context("failed while listening on stdin")?;
            info!(lines, "stdin closed");
            ExitCode::SUCCESS
        }
        Command::Groups => {
            list_groups(&recognizer, &mut out).context("failed to list groups")?;
            ExitCode::SUCCESS
        }
    };

    Ok(result)
}

fn load_catalog(path: &Path) -> txtroute_common::Result<Vec<Group>> {
    let config = TxtRouteConfigLoader::new()
        .with_file(path)
        .load()
        .map_err(|e| TxtRouteError::Config(format!("{}: {e}", path.display())))?;

    let groups = config
        .catalog()
        .map_err(|e| TxtRouteError::InvalidCatalog(format!("{}: {e}", path.display())))?;

    info!(groups = groups.len(), path = %path.display(), "group catalog loaded");
    Ok(groups)
}

/// Print the result for one line as JSON (`null` when unmatched).
fn parse<W: Write>(
    recognizer: &Recognizer<'_, String>,
    line: &str,
    out: &mut W,
) -> txtroute_common::Result<bool> {
    let result = recognizer.recognize(line);
    serde_json::to_writer(&mut *out, &result).map_err(anyhow::Error::from)?;
    writeln!(out)?;
    out.flush()?;
    Ok(result.is_some())
}

/// Answer every input line until EOF; returns how many lines were read.
fn listen<R: BufRead, W: Write>(
    recognizer: &Recognizer<'_, String>,
    input: R,
    out: &mut W,
) -> txtroute_common::Result<usize> {
    if recognizer.is_empty() {
        warn!("group catalog is empty; every line will be unmatched");
    }
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        parse(recognizer, &line, out)?;
        count += 1;
    }
    Ok(count)
}

fn list_groups<W: Write>(
    recognizer: &Recognizer<'_, String>,
    out: &mut W,
) -> txtroute_common::Result<()> {
    for group in recognizer.priority_order() {
        writeln!(out, "{}\t{}", group.id, group.name)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Group> {
        vec![
            Group::new("hotline".to_string(), "Hotline"),
            Group::new("hotlines".to_string(), "Hotlines"),
            Group::new("fire-team".to_string(), "Fire Team"),
        ]
    }

    #[test]
    fn listen_writes_one_json_line_per_input_line() {
        let groups = catalog();
        let recognizer = Recognizer::new(&groups);
        let input = "txt hotlines please help\nhello there\nTXT fire team   go now  \n";
        let mut out = Vec::new();

        let count = listen(&recognizer, input.as_bytes(), &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "{\"groupId\":\"hotlines\",\"messageToSend\":\"please help\"}\n",
                "null\n",
                "{\"groupId\":\"fire-team\",\"messageToSend\":\"go now\"}\n",
            )
        );
    }

    #[test]
    fn parse_reports_whether_a_group_matched() {
        let groups = catalog();
        let recognizer = Recognizer::new(&groups);
        let mut out = Vec::new();

        assert!(!parse(&recognizer, "txt", &mut out).unwrap());
        assert_eq!(out, b"null\n");
    }

    #[test]
    fn listen_with_empty_catalog_answers_null() {
        let groups: Vec<Group> = Vec::new();
        let recognizer = Recognizer::new(&groups);
        let mut out = Vec::new();

        let count = listen(&recognizer, "txt ops hi\n".as_bytes(), &mut out).unwrap();

        assert_eq!(count, 1);
        assert_eq!(out, b"null\n");
    }

    #[test]
    fn missing_catalog_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_catalog(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, TxtRouteError::Config(_)));
    }

    #[test]
    fn groups_are_listed_in_priority_order() {
        let groups = catalog();
        let recognizer = Recognizer::new(&groups);
        let mut out = Vec::new();

        list_groups(&recognizer, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "hotlines\tHotlines\nfire-team\tFire Team\nhotline\tHotline\n"
        );
    }
}
