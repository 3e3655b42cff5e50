use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Detect which framework built an Android application package
#[derive(Parser, Debug)]
#[command(
    name = "apklens",
    about = "Detect which framework built an Android application package",
    version,
    author,
    long_about = "apklens inspects the entries of Android application packages (APK) and \
                  classifies each one as Flutter, React Native, React Native with Expo or \
                  native, and lists its native libraries, technology tags and signature \
                  block digests."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
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
        about = "Classify one or more packages",
        long_about = "Prints one classification per package.\n\n\
                      Examples:\n  \
                      apklens classify app.apk\n  \
                      apklens classify a.apk b.apk --format json"
    )]
    Classify(ClassifyArgs),

    #[command(
        about = "Show full details for a single package",
        long_about = "Shows classification, framework scores, native libraries, technology \
                      tags and signature block digests for one package.\n\n\
                      Examples:\n  \
                      apklens inspect app.apk\n  \
                      apklens inspect app.apk --format yaml"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Classify every package under a directory",
        long_about = "Discovers *.apk files under a directory and analyzes them \
                      concurrently.\n\n\
                      Examples:\n  \
                      apklens scan ./apks\n  \
                      apklens scan ./apks --no-recursive --concurrency 4"
    )]
    Scan(ScanArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(value_name = "APK", required = true, help = "Package files to classify")]
    pub packages: Vec<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(
        short = 't',
        long,
        value_name = "SCORE",
        help = "Minimum score for a framework to be selected"
    )]
    pub threshold: Option<u32>,

    #[arg(long, help = "Do not read AndroidManifest.xml")]
    pub no_manifest: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "APK", help = "Package file to inspect")]
    pub package: PathBuf,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(
        short = 't',
        long,
        value_name = "SCORE",
        help = "Minimum score for a framework to be selected"
    )]
    pub threshold: Option<u32>,

    #[arg(long, help = "Do not read AndroidManifest.xml")]
    pub no_manifest: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(value_name = "DIR", help = "Directory to scan (defaults to current directory)")]
    pub root: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(long, help = "Only scan the top level of the directory")]
    pub no_recursive: bool,

    #[arg(
        short = 'j',
        long,
        value_name = "N",
        help = "Maximum number of packages analyzed at once"
    )]
    pub concurrency: Option<usize>,

    #[arg(
        short = 't',
        long,
        value_name = "SCORE",
        help = "Minimum score for a framework to be selected"
    )]
    pub threshold: Option<u32>,

    #[arg(long, help = "Do not read AndroidManifest.xml")]
    pub no_manifest: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_classify_defaults() {
        let args = CliArgs::parse_from(["apklens", "classify", "app.apk"]);
        match args.command {
            Commands::Classify(classify_args) => {
                assert_eq!(classify_args.packages, vec![PathBuf::from("app.apk")]);
                assert_eq!(classify_args.format, OutputFormatArg::Human);
                assert!(classify_args.threshold.is_none());
                assert!(!classify_args.no_manifest);
                assert!(classify_args.output.is_none());
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_classify_requires_package() {
        assert!(CliArgs::try_parse_from(["apklens", "classify"]).is_err());
    }

    #[test]
    fn test_classify_with_options() {
        let args = CliArgs::parse_from([
            "apklens",
            "classify",
            "a.apk",
            "b.apk",
            "--format",
            "json",
            "--threshold",
            "3",
            "--no-manifest",
        ]);
        match args.command {
            Commands::Classify(classify_args) => {
                assert_eq!(classify_args.packages.len(), 2);
                assert_eq!(classify_args.format, OutputFormatArg::Json);
                assert_eq!(classify_args.threshold, Some(3));
                assert!(classify_args.no_manifest);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_scan_options() {
        let args = CliArgs::parse_from([
            "apklens",
            "scan",
            "/tmp/apks",
            "--no-recursive",
            "-j",
            "4",
            "-f",
            "yaml",
        ]);
        match args.command {
            Commands::Scan(scan_args) => {
                assert_eq!(scan_args.root, Some(PathBuf::from("/tmp/apks")));
                assert!(scan_args.no_recursive);
                assert_eq!(scan_args.concurrency, Some(4));
                assert_eq!(scan_args.format, OutputFormatArg::Yaml);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_root_is_optional() {
        let args = CliArgs::parse_from(["apklens", "scan"]);
        match args.command {
            Commands::Scan(scan_args) => {
                assert_eq!(scan_args.root, None);
                assert!(!scan_args.no_recursive);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_inspect_command() {
        let args = CliArgs::parse_from(["apklens", "inspect", "base.apk", "-o", "out.json"]);
        match args.command {
            Commands::Inspect(inspect_args) => {
                assert_eq!(inspect_args.package, PathBuf::from("base.apk"));
                assert_eq!(inspect_args.output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["apklens", "config", "--verbose"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let result = CliArgs::try_parse_from(["apklens", "config", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_conversion() {
        use super::super::output::OutputFormat;
        assert_eq!(OutputFormat::from(OutputFormatArg::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(OutputFormatArg::Human), OutputFormat::Human);
    }
}
