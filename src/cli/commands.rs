use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AI-assisted Gradle build health diagnosis and version migration analysis
#[derive(Parser, Debug)]
#[command(
    name = "gradle-advisor",
    about = "AI-assisted Gradle build health diagnosis and version migration analysis",
    version,
    author,
    long_about = "gradle-advisor inspects a Gradle project. `diagnose` asks a hosted model to \
                  review performance, caching, dependencies and structure; `migrate` plans an \
                  upgrade to a newer Gradle release and can apply safe automatic fixes."
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
        visible_alias = "doctor",
        about = "Diagnose build health",
        long_about = "Collects project metadata and cache validation output, analyzes \
                      performance, caching, dependencies and structure, and synthesizes \
                      prioritized recommendations. Requires ANTHROPIC_API_KEY.\n\n\
                      Exits with 1 when the overall verdict is critical.\n\n\
                      Examples:\n  \
                      gradle-advisor diagnose\n  \
                      gradle-advisor doctor /path/to/project --format json"
    )]
    Diagnose(DiagnoseArgs),

    #[command(
        visible_alias = "analyze",
        about = "Plan a Gradle version upgrade",
        long_about = "Detects the current Gradle version, scans build scripts for deprecated \
                      and removed APIs, and builds a phased migration plan. Without a target \
                      the latest known release is used.\n\n\
                      Examples:\n  \
                      gradle-advisor migrate\n  \
                      gradle-advisor migrate 8.10 --dry-run\n  \
                      gradle-advisor analyze --target 9.1.0 --auto"
    )]
    Migrate(MigrateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DiagnoseArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the Gradle project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[arg(
        value_name = "TARGET",
        help = "Target Gradle version (defaults to the latest known release)"
    )]
    pub target_version: Option<String>,

    #[arg(
        short = 't',
        long = "target",
        value_name = "VERSION",
        conflicts_with = "target_version",
        help = "Target Gradle version"
    )]
    pub target: Option<String>,

    #[arg(
        short = 'p',
        long = "project",
        value_name = "PATH",
        help = "Path to the Gradle project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(long, help = "Print the fixes that would be applied without touching any file")]
    pub dry_run: bool,

    #[arg(long, help = "Apply safe automatic fixes")]
    pub auto: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

impl MigrateArgs {
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().or(self.target_version.as_deref())
    }

    /// Whether fixes are applied or listed at all
    pub fn wants_fixes(&self) -> bool {
        self.auto || self.dry_run
    }
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
