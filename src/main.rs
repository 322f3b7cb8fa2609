use clap::{Parser, Subcommand};
use manuscript::{AppError, InitOptions};

#[derive(Parser)]
#[command(name = "manuscript")]
#[command(version)]
#[command(
    about = "Create and operate manuscript ETL jobs on a containerized runtime",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a manuscript: job definition, compose file, registry entry
    #[clap(visible_alias = "i")]
    Init {
        /// Manuscript name (DNS-safe label)
        #[arg(long)]
        name: Option<String>,
        /// Dataset the job reads from (e.g. zkevm.blocks)
        #[arg(long)]
        dataset: Option<String>,
        /// Sink kind: console or postgres
        #[arg(long)]
        sink: Option<String>,
        /// Exposed job manager port (default: first free port from 8081)
        #[arg(long)]
        port: Option<u16>,
        /// Host port for the Postgres sidecar
        #[arg(long)]
        db_port: Option<u16>,
        /// Host port for the GraphQL sidecar
        #[arg(long)]
        graphql_port: Option<u16>,
        /// Database name for the Postgres sink
        #[arg(long)]
        database: Option<String>,
        /// Overwrite the artifacts of an existing manuscript
        #[arg(long)]
        force: bool,
    },
    /// Launch a manuscript's services
    Deploy { name: String },
    /// Stop a manuscript's services
    Stop { name: String },
    /// List registered manuscripts
    #[clap(visible_alias = "list")]
    Ls,
    /// Stream service logs
    Logs {
        name: String,
        /// Limit output to one service (jobmanager, taskmanager, ...)
        #[arg(long)]
        service: Option<String>,
        #[arg(short, long)]
        follow: bool,
    },
    /// Show jobs running on the manuscript's job manager
    Jobs { name: String },
    /// Deregister a manuscript
    Rm {
        name: String,
        /// Also delete the manuscript directory
        #[arg(long)]
        purge: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Init {
            name,
            dataset,
            sink,
            port,
            db_port,
            graphql_port,
            database,
            force,
        } => manuscript::init(InitOptions {
            name,
            dataset,
            sink,
            port,
            db_port,
            graphql_port,
            database,
            force,
        })
        .map(|_| ()),
        Commands::Deploy { name } => manuscript::deploy(&name),
        Commands::Stop { name } => manuscript::stop(&name),
        Commands::Ls => manuscript::list().map(|_| ()),
        Commands::Logs { name, service, follow } => {
            manuscript::logs(&name, service.as_deref(), follow)
        }
        Commands::Jobs { name } => manuscript::jobs(&name).map(|_| ()),
        Commands::Rm { name, purge } => manuscript::remove(&name, purge).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
