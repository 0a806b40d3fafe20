use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser};
use ncsync::{config::PatternList, Config};
use ncsynctl::{storage::neocities::Neocities, Synchronizer};

#[derive(Parser)]
#[command(name = "ncsync")]
#[command(author, version, about, long_about=None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Neocities user name
    #[arg(long, env = "NEOCITIES_USER", global = true)]
    user: Option<String>,

    /// Neocities password
    #[arg(long, env = "NEOCITIES_PASS", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Base URL of the Neocities API
    #[arg(long, env = "NEOCITIES_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print this help
    Help,
    /// Information about your website
    Status,
    /// List all remote files
    List,
    /// Synchronize your website with the given folder
    Push(PushArgs),
    #[command(external_subcommand)]
    Unrecognized(Vec<String>),
}

#[derive(clap::Args)]
struct PushArgs {
    /// The local folder to mirror
    directory: Option<Utf8PathBuf>,

    /// Leave out local paths matching this glob pattern
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let res = match runtime {
        Ok(runtime) => runtime.block_on(run(cli)),
        Err(err) => Err(err.into()),
    };
    exit_program(res)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        user,
        password,
        api_url,
        command,
    } = cli;

    match command {
        None => {
            println!("You must pass a command.\n");
            print_help()?;
        }
        Some(Commands::Help) => print_help()?,
        Some(Commands::Unrecognized(args)) => {
            let cmd = args.first().map(String::as_str).unwrap_or_default();
            eprintln!("Unrecognized \"{cmd}\" command.");
            print_help()?;
        }
        Some(Commands::Status) => {
            let config = config(user, password, api_url)?;
            let info = synchronizer(&config)?.status().await?;
            for (key, value) in info.iter() {
                match value {
                    serde_json::Value::String(s) => println!("{key}: {s}"),
                    value => println!("{key}: {value}"),
                }
            }
        }
        Some(Commands::List) => {
            let config = config(user, password, api_url)?;
            let files = synchronizer(&config)?.list().await?;
            for file in files.iter() {
                println!("{file}");
            }
        }
        Some(Commands::Push(args)) => {
            let config = config(user, password, api_url)?;
            let ignore = PatternList::new(&args.ignore)?;
            let sync = synchronizer(&config)?.with_ignore(ignore);
            let report = sync.push(args.directory.as_deref()).await?;
            log::info!(
                "{} files uploaded, {} remote entries deleted",
                report.uploaded.len(),
                report.deleted.len()
            );
        }
    }
    Ok(())
}

fn config(
    user: Option<String>,
    password: Option<String>,
    api_url: Option<String>,
) -> ncsync::Result<Config> {
    let config = Config::new(user, password)?;
    match api_url {
        Some(api_url) => config.with_api_url(&api_url),
        None => Ok(config),
    }
}

fn synchronizer(config: &Config) -> anyhow::Result<Synchronizer<Neocities>> {
    let client = reqwest::Client::builder().build()?;
    Ok(Synchronizer::new(Neocities::new(client, config)))
}

fn print_help() -> anyhow::Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

fn exit_program(res: anyhow::Result<()>) -> ExitCode {
    match res {
        Ok(..) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
