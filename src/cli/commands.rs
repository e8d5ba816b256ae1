use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Doc-comment driven goal-descriptor extractor
#[derive(Parser, Debug)]
#[command(
    name = "mojoscan",
    about = "Extracts plugin goal descriptors from doc-comment tags in Java sources",
    version,
    author,
    long_about = "mojoscan walks source roots, reads the structured doc-comment tags attached \
                  to classes and fields, resolves declared field types, and emits one goal \
                  descriptor per eligible class. Annotation-based metadata conventions are \
                  deliberately ignored."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Extract goal descriptors from source roots",
        long_about = "Scans the given source-root directories, parses every Java file, and \
                      prints the extracted goal descriptors plus any per-class diagnostics.\n\n\
                      Examples:\n  \
                      mojoscan extract\n  \
                      mojoscan extract src/main/java --format json\n  \
                      mojoscan extract src/main/java --encoding ISO-8859-1 --goal-prefix test"
    )]
    Extract(ExtractArgs),

    #[command(about = "List the recognized doc-comment tag vocabulary and defaults")]
    Tags(TagsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(
        value_name = "ROOT",
        help = "Source-root directories (defaults to the current directory)"
    )]
    pub source_roots: Vec<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'e',
        long,
        value_name = "LABEL",
        help = "Character encoding of the source files (default UTF-8)"
    )]
    pub encoding: Option<String>,

    #[arg(long, value_name = "PREFIX", help = "Goal prefix stamped onto descriptors")]
    pub goal_prefix: Option<String>,

    #[arg(long, value_name = "ID", help = "Owning plugin artifact id stamped onto descriptors")]
    pub artifact_id: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TagsArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_extract_args_parse() {
        let args = CliArgs::parse_from([
            "mojoscan",
            "extract",
            "src/main/java",
            "--format",
            "json",
            "--goal-prefix",
            "test",
        ]);
        match args.command {
            Commands::Extract(extract) => {
                assert_eq!(extract.source_roots.len(), 1);
                assert_eq!(extract.format, OutputFormatArg::Json);
                assert_eq!(extract.goal_prefix.as_deref(), Some("test"));
            }
            _ => panic!("expected extract subcommand"),
        }
    }
}
