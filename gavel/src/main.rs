//! Gavel CLI: drive load-test scenarios against a judge API deployment.
//!
//! # Usage
//!
//! ```bash
//! # Generate fixtures first
//! gavel generate users --count 100
//! gavel generate questions --count 50
//!
//! # Run a scenario
//! gavel login --threads 50 --requests 10
//! gavel questions
//! gavel submissions --base-url http://localhost:8000
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gavel::{
    aggregate,
    client::{ApiClient, DEFAULT_BASE_URL},
    executor::LoadExecutor,
    fixture, generate,
    report::{ConsoleReporter, JsonFileReporter, Reporter},
    scenario::{LoginScenario, QuestionScenario, Scenario, SubmissionScenario},
};

/// Load-testing harness for the judge platform API
#[derive(Parser, Debug)]
#[command(name = "gavel")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the target service
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hammer the login endpoint
    Login(RunArgs),

    /// Authenticate and submit generated questions
    Questions(RunArgs),

    /// Authenticate, submit answers, and read them back
    Submissions(RunArgs),

    /// Generate the fixture files the load tests consume
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of concurrent workers
    #[arg(long, default_value_t = 50)]
    threads: usize,

    /// Number of requests per worker
    #[arg(long, default_value_t = 10)]
    requests: usize,

    /// Path to the user fixture file
    #[arg(long, default_value = fixture::USERS_FILE)]
    users: PathBuf,

    /// Path to the question fixture file (submissions scenario only)
    #[arg(long, default_value = fixture::QUESTIONS_FILE)]
    questions: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(subcommand)]
    target: GenerateTarget,
}

#[derive(Subcommand, Debug)]
enum GenerateTarget {
    /// Write random test users
    Users {
        /// How many users to generate
        #[arg(long, default_value_t = 100)]
        count: usize,

        /// Output file
        #[arg(long, default_value = fixture::USERS_FILE)]
        out: PathBuf,
    },

    /// Write random test questions with sample answers
    Questions {
        /// How many questions to generate
        #[arg(long, default_value_t = 50)]
        count: usize,

        /// Output file
        #[arg(long, default_value = fixture::QUESTIONS_FILE)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Login(args) => {
            let users = fixture::load_users(&args.users)?;
            print_run_header(&args, users.len(), None);
            let scenario = Arc::new(LoginScenario::new(users));
            run_scenario(scenario, &cli.base_url, &args).await
        }
        Command::Questions(args) => {
            let users = fixture::load_users(&args.users)?;
            print_run_header(&args, users.len(), None);
            let scenario = Arc::new(QuestionScenario::new(users));
            run_scenario(scenario, &cli.base_url, &args).await
        }
        Command::Submissions(args) => {
            let users = fixture::load_users(&args.users)?;
            let questions = fixture::load_questions(&args.questions)?;
            print_run_header(&args, users.len(), Some(questions.len()));
            let scenario = Arc::new(SubmissionScenario::new(users, questions));
            run_scenario(scenario, &cli.base_url, &args).await
        }
        Command::Generate(args) => generate_fixtures(args),
    }
}

async fn run_scenario<S: Scenario>(scenario: Arc<S>, base_url: &str, args: &RunArgs) -> Result<()> {
    let client = ApiClient::new(base_url).context("failed to build HTTP client")?;
    let executor = LoadExecutor::builder()
        .workers(args.threads)
        .requests_per_worker(args.requests)
        .build();

    let run = executor.execute(Arc::clone(&scenario), client).await;
    let report = aggregate::summarize(scenario.name(), &run);

    ConsoleReporter.report(&report).await?;
    // A lost report file never invalidates the summary already printed.
    if let Err(err) = JsonFileReporter::default().report(&report).await {
        tracing::warn!(%err, "failed to persist report");
        eprintln!("Warning: {err}");
    }
    Ok(())
}

fn print_run_header(args: &RunArgs, users: usize, questions: Option<usize>) {
    println!(
        "\nStarting load test with {} threads, {} requests per thread",
        args.threads, args.requests
    );
    println!("Total requests: {}", args.threads * args.requests);
    println!("Test users available: {users}");
    if let Some(questions) = questions {
        println!("Test questions available: {questions}");
    }
}

fn generate_fixtures(args: GenerateArgs) -> Result<()> {
    let mut rng = rand::rng();
    match args.target {
        GenerateTarget::Users { count, out } => {
            println!("Generating {count} test users...");
            let users: Vec<_> = (0..count).map(|_| generate::random_user(&mut rng)).collect();
            write_pretty(&out, &users)?;
            println!("Test users saved to {}", out.display());
        }
        GenerateTarget::Questions { count, out } => {
            println!("Generating {count} test questions...");
            let questions: Vec<_> = (0..count)
                .map(|_| generate::random_question(&mut rng))
                .collect();
            write_pretty(&out, &questions)?;
            println!("Test questions saved to {}", out.display());
        }
    }
    Ok(())
}

fn write_pretty<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    Ok(())
}
