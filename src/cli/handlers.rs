//! Subcommand implementations
//!
//! Each handler returns a process exit code: 0 on success (including runs
//! that produced per-class diagnostics), 1 on a fatal extraction failure,
//! 2 on a configuration error.

use crate::cli::commands::{ExtractArgs, OutputFormatArg, TagsArgs};
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::ExtractConfig;
use crate::extractor::Extractor;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Human => OutputFormat::Human,
        }
    }
}

pub fn handle_extract(args: &ExtractArgs, quiet: bool) -> i32 {
    let roots = if args.source_roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.source_roots.clone()
    };

    let mut config = ExtractConfig::with_roots(roots);
    if let Some(encoding) = &args.encoding {
        config = config.with_encoding(encoding.clone());
    }
    if let Some(prefix) = &args.goal_prefix {
        config = config.with_goal_prefix(prefix.clone());
    }
    if let Some(artifact_id) = &args.artifact_id {
        config = config.with_artifact_id(artifact_id.clone());
    }

    if let Err(err) = config.validate() {
        error!("Invalid configuration: {}", err);
        eprintln!("Error: {}", err);
        return 2;
    }

    let outcome = match Extractor::new(config).run() {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Extraction failed: {}", err);
            eprintln!("Error: {}", err);
            return 1;
        }
    };

    if !quiet {
        info!(
            descriptors = outcome.descriptors.len(),
            diagnostics = outcome.diagnostics.len(),
            "Extraction finished"
        );
        for diagnostic in &outcome.diagnostics {
            warn!("{}", diagnostic);
        }
    }

    let formatter = OutputFormatter::new(args.format.into());
    match formatter
        .format_outcome(&outcome)
        .and_then(|text| write_output(args.output.as_deref(), &text))
    {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

pub fn handle_tags(args: &TagsArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_tags() {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn write_output(path: Option<&std::path::Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extract_args(roots: Vec<PathBuf>) -> ExtractArgs {
        ExtractArgs {
            source_roots: roots,
            format: OutputFormatArg::Json,
            encoding: None,
            goal_prefix: None,
            artifact_id: None,
            output: None,
        }
    }

    #[test]
    fn test_extract_over_empty_dir_succeeds() {
        let dir = TempDir::new().unwrap();
        let code = handle_extract(&extract_args(vec![dir.path().to_path_buf()]), true);
        assert_eq!(code, 0);
    }

    #[test]
    fn test_extract_missing_root_fails() {
        let code = handle_extract(
            &extract_args(vec![PathBuf::from("/nonexistent/source/root")]),
            true,
        );
        assert_eq!(code, 1);
    }

    #[test]
    fn test_extract_bad_encoding_is_config_error() {
        let dir = TempDir::new().unwrap();
        let mut args = extract_args(vec![dir.path().to_path_buf()]);
        args.encoding = Some("KLINGON-8".to_string());
        assert_eq!(handle_extract(&args, true), 2);
    }

    #[test]
    fn test_extract_writes_output_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("A.java"),
            "/** @goal a */\npublic class A {}\n",
        )
        .unwrap();
        let out_file = dir.path().join("out.json");

        let mut args = extract_args(vec![dir.path().to_path_buf()]);
        args.output = Some(out_file.clone());
        assert_eq!(handle_extract(&args, true), 0);

        let written = fs::read_to_string(out_file).unwrap();
        assert!(written.contains("\"goal\": \"a\""));
    }

    #[test]
    fn test_tags_handler_succeeds() {
        let args = TagsArgs {
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_tags(&args), 0);
    }
}
