#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use classkit_core::admin::{BulkCloner, CloneOptions, RepoDeleter};
use classkit_core::config::FileConfig;
use classkit_core::git::CloneAuth;
use classkit_core::output::{render_histogram, GradeReportWriter};
use classkit_core::{
    load_roster, ClassroomApiClient, Diagnostic, DiagnosticSeverity, GradeHarvester,
    HarvestOptions, RepoFilter,
};

#[derive(Parser)]
#[command(name = "classkit", version, about = "GitHub Classroom administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Download all grades for an assignment into a CSV report
    Grades(GradesArgs),
    /// Clone every roster student's assignment repository
    Clone(CloneArgs),
    /// Delete repositories whose names end with a roster student's id
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
struct GradesArgs {
    /// GitHub organization name, e.g. tulane-cmps2200
    #[arg(short, long, env = "CLASSKIT_ORG")]
    organization: Option<String>,

    /// Assignment name prefix, e.g. assignment-01
    #[arg(short, long, env = "CLASSKIT_ASSIGNMENT_PREFIX")]
    assignment_prefix: Option<String>,

    /// Text file with one student GitHub id per line
    #[arg(short, long)]
    student_file: PathBuf,

    /// Output CSV file
    #[arg(short, long)]
    grade_file: PathBuf,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delay between students in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,
}

#[derive(clap::Args)]
struct CloneArgs {
    /// GitHub organization name
    #[arg(short, long, env = "CLASSKIT_ORG")]
    organization: Option<String>,

    /// Assignment name prefix
    #[arg(short, long, env = "CLASSKIT_ASSIGNMENT_PREFIX")]
    assignment_prefix: Option<String>,

    /// Text file with one student GitHub id per line
    #[arg(short, long)]
    student_file: PathBuf,

    /// Directory to clone repositories under
    #[arg(short, long, default_value = "repos")]
    dest: PathBuf,

    /// GitHub username for authenticated clones
    #[arg(short, long, env = "CLASSKIT_USERNAME")]
    username: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delay between students in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,
}

#[derive(clap::Args)]
struct DeleteArgs {
    /// GitHub organization name
    #[arg(short, long, env = "CLASSKIT_ORG")]
    organization: Option<String>,

    /// Text file with one student GitHub id per line
    #[arg(short, long)]
    student_file: PathBuf,

    /// Glob narrowing the repository names considered, e.g. assignment-01-*
    #[arg(short = 'm', long = "match")]
    name_match: Option<String>,

    /// Actually delete; without this the run is a dry run
    #[arg(long)]
    yes: bool,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delay between deletions in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = FileConfig::discover().context("failed to load classkit.yml")?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    match cli.command {
        Commands::Grades(args) => rt.block_on(run_grades(args, &file_config)),
        Commands::Clone(args) => rt.block_on(run_clone(args, &file_config)),
        Commands::Delete(args) => rt.block_on(run_delete(args, &file_config)),
    }
}

/// Flag value, then config file value, then a named error
fn require(
    flag: Option<String>,
    file_value: Option<&String>,
    what: &str,
) -> anyhow::Result<String> {
    flag.or_else(|| file_value.cloned())
        .with_context(|| format!("{} required (flag or classkit.yml)", what))
}

fn api_client(file_config: &FileConfig, token: Option<String>) -> ClassroomApiClient {
    let base_url = file_config
        .api_url
        .clone()
        .or_else(|| std::env::var("GITHUB_API_URL").ok())
        .unwrap_or_else(|| "https://api.github.com".to_string());
    ClassroomApiClient::new(base_url, token)
}

fn pacing(flag: Option<u64>, file_config: &FileConfig) -> u64 {
    flag.or(file_config.pacing_ms).unwrap_or(50)
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("[{:?}] {}", d.severity, d.message);
    }
}

async fn run_grades(args: GradesArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let organization = require(args.organization, file_config.organization.as_ref(), "organization")?;
    let assignment_prefix = require(
        args.assignment_prefix,
        file_config.assignment_prefix.as_ref(),
        "assignment prefix",
    )?;

    let client = api_client(file_config, args.token);
    let students = load_roster(&args.student_file)?;
    println!("getting grades for {} students", students.len());

    let mut writer = GradeReportWriter::create(&args.grade_file)
        .with_context(|| format!("cannot create '{}'", args.grade_file.display()))?;

    let options = HarvestOptions {
        organization,
        assignment_prefix,
        pacing_ms: pacing(args.pacing_ms, file_config),
    };

    let harvester = GradeHarvester::new(&client, &options);
    let outcome = harvester
        .harvest_with(&students, |row| {
            writer.write_row(row)?;
            println!("{}", row.tab_line());
            Ok(())
        })
        .await;

    report_diagnostics(&outcome.diagnostics);
    print!("{}", render_histogram(&outcome.histogram));
    println!(
        "wrote {} rows to {}",
        outcome.rows.len(),
        args.grade_file.display()
    );
    Ok(())
}

async fn run_clone(args: CloneArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let organization = require(args.organization, file_config.organization.as_ref(), "organization")?;
    let assignment_prefix = require(
        args.assignment_prefix,
        file_config.assignment_prefix.as_ref(),
        "assignment prefix",
    )?;
    let username = args
        .username
        .or_else(|| file_config.username.clone());

    // Clone auth needs both halves; otherwise clone anonymously
    let auth = match (username, args.token.clone()) {
        (Some(username), Some(token)) => Some(CloneAuth { username, token }),
        _ => None,
    };

    let client = api_client(file_config, args.token);
    let students = load_roster(&args.student_file)?;
    println!(
        "cloning {} repositories into {}",
        students.len(),
        args.dest.display()
    );

    let options = CloneOptions {
        organization,
        assignment_prefix,
        dest_dir: args.dest,
        pacing_ms: pacing(args.pacing_ms, file_config),
    };

    let cloner = BulkCloner::new(&client, &options, auth);
    let outcome = cloner.clone_all(&students).await;

    report_diagnostics(&outcome.diagnostics);
    let failed = outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::SoftError)
        .count();
    println!(
        "cloned {}, skipped {}, failed {}",
        outcome.succeeded.len(),
        outcome.skipped.len(),
        failed
    );
    Ok(())
}

async fn run_delete(args: DeleteArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let organization = require(args.organization, file_config.organization.as_ref(), "organization")?;

    let client = api_client(file_config, args.token);
    let students = load_roster(&args.student_file)?;
    let filter = RepoFilter::new(args.name_match.as_deref())?;

    let deleter = RepoDeleter::new(&client, &organization, pacing(args.pacing_ms, file_config));
    let outcome = deleter.delete_matching(&students, &filter, args.yes).await?;

    report_diagnostics(&outcome.diagnostics);
    if args.yes {
        for name in &outcome.succeeded {
            println!("deleted {}/{}", organization, name);
        }
        println!("deleted {} repositories", outcome.succeeded.len());
    } else {
        for name in &outcome.skipped {
            println!("would delete {}/{}", organization, name);
        }
        println!(
            "dry run: {} repositories match; pass --yes to delete",
            outcome.skipped.len()
        );
    }
    Ok(())
}
