//! Purpose: Hold top-level CLI command dispatch for `envjson`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Stdout carries only command payloads; diagnostics go to stderr.
//! Invariants: Exit codes are produced via `to_exit_code`, never ad hoc.

use std::fs;
use std::io::Read;

use super::*;
use envjson::api::{DecodeOptions, Gap, Namespace, decode_with_report, encode, render_script};
use envjson::json::parse as json_parse;

pub(super) fn dispatch_command(
    command: Command,
    global_prefix: String,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "envjson", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Encode { json, file } => run_encode(json, file),
        Command::Decode {
            root,
            output,
            check,
        } => run_decode(root, output, check, global_prefix, color_mode),
    }
}

fn run_encode(json: Option<String>, file: Option<PathBuf>) -> Result<RunOutcome, Error> {
    let (text, context) = read_document(json, file)?;
    let tree: Value = json_parse::from_str(&text).map_err(|err| {
        let hint = json_parse::hint_for_error(&err, &context);
        Error::new(ErrorKind::Parse)
            .with_message("failed to parse message data")
            .with_hint(hint)
            .with_source(err)
    })?;
    let commands = encode(&tree)?;
    print!("{}", render_script(&commands));
    Ok(RunOutcome::ok())
}

fn read_document(json: Option<String>, file: Option<PathBuf>) -> Result<(String, String), Error> {
    if let Some(text) = json {
        return Ok((text, "argument".to_string()));
    }
    if let Some(path) = file {
        let text = fs::read_to_string(&path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("cannot read input file")
                .with_path(&path)
                .with_source(err)
                .with_hint("Check that the file exists and is readable.")
        })?;
        return Ok((text, path.display().to_string()));
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("cannot read stdin")
            .with_source(err)
    })?;
    Ok((text, "stdin".to_string()))
}

fn run_decode(
    root: String,
    output: Option<PathBuf>,
    check: bool,
    global_prefix: String,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    let namespace = Namespace::from_env();
    let options = DecodeOptions {
        root_prefix: root,
        global_prefix,
    };
    let report = decode_with_report(&namespace, &options);

    match output {
        Some(path) => {
            let mut text =
                serde_json::to_string(&report.value).unwrap_or_else(|_| "{}".to_string());
            text.push('\n');
            fs::write(&path, text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("cannot write output file")
                    .with_path(&path)
                    .with_source(err)
            })?;
        }
        None => emit_json(report.value, color_mode),
    }

    if check && !report.gaps.is_empty() {
        emit_notice(&gap_notice(&report.gaps), color_mode);
        return Ok(RunOutcome::with_code(to_exit_code(ErrorKind::Incomplete)));
    }
    Ok(RunOutcome::ok())
}

fn gap_notice(gaps: &[Gap]) -> Notice {
    let mut details = Map::new();
    details.insert("gap_count".to_string(), json!(gaps.len()));
    details.insert(
        "gaps".to_string(),
        serde_json::to_value(gaps).unwrap_or_else(|_| json!([])),
    );
    let noun = if gaps.len() == 1 { "child" } else { "children" };
    Notice {
        kind: "decode_gap".to_string(),
        cmd: "decode".to_string(),
        message: format!("{} declared {noun} could not be decoded", gaps.len()),
        details,
    }
}
