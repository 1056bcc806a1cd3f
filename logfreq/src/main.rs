use clap::{Parser, Subcommand};
use logfreq_core::cli;
use logfreq_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "logfreq",
    version,
    about = "logfreq: most frequent log message per hour"
)]
struct Cli {
    /// Log format for diagnostics on stderr (pretty on a terminal, JSON otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the most frequent source/message pair of every hour
    Analyze(cli::analyze::AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    match cli.command {
        Command::Analyze(args) => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build Tokio runtime");

            if let Err(e) = rt.block_on(cli::analyze::run(args)) {
                eprintln!("analyze error: {e:#}");
                std::process::exit(1);
            }
        }

        Command::Config { cmd } => {
            if let Err(e) = cli::config::run(cmd) {
                eprintln!("config error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
