use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "lssctl",
    about = "Target scheduling for landscaper deployments",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule every deployment of a cluster snapshot onto a service target config.
    ///
    /// Deployments that already have a target keep it. Decisions are applied
    /// in snapshot order, so later deployments see the usage of earlier ones.
    Schedule {
        /// Path to the cluster snapshot (JSON).
        #[arg(short, long)]
        snapshot: String,
        /// Path to lss.toml. Without it, no scheduling resource is used.
        #[arg(short, long)]
        config: Option<String>,
        /// Output format: text or json (the updated snapshot).
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Validate every resource of a cluster snapshot.
    Validate {
        /// Path to the cluster snapshot (JSON).
        #[arg(short, long)]
        snapshot: String,
    },
    /// Controller configuration helpers.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a scaffold lss.toml
    Init {
        /// Name of the TargetScheduling resource to use.
        #[arg(long, requires = "scheduling_namespace")]
        scheduling_name: Option<String>,
        /// Namespace of the TargetScheduling resource to use.
        #[arg(long, requires = "scheduling_name")]
        scheduling_namespace: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    match cli.command {
        Commands::Schedule {
            snapshot,
            config,
            format,
        } => commands::schedule::schedule(&snapshot, config.as_deref(), &format),
        Commands::Validate { snapshot } => commands::validate::validate(&snapshot),
        Commands::Config { action } => match action {
            ConfigAction::Init {
                scheduling_name,
                scheduling_namespace,
            } => commands::config::init(
                scheduling_name.as_deref(),
                scheduling_namespace.as_deref(),
            ),
        },
    }
}
