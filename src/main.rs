use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use pipeline_tracker::config::Config;
use pipeline_tracker::model::{ApplicantDraft, JobDraft, Stage};
use pipeline_tracker::repo::{ApplicantRepository, JobQuery, JobRepository, StatusFilter};
use pipeline_tracker::store::FileStore;

#[derive(Parser)]
#[command(name = "pipeline-tracker", about = "Recruitment pipeline tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Manage applicants
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
}

#[derive(Subcommand)]
enum JobsCommand {
    /// List jobs, optionally filtered
    List {
        /// Case-insensitive substring match on the title
        #[arg(long, default_value = "")]
        search: String,
        /// all, active or closed
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Create a job posting
    Create(CreateJobArgs),
    /// Overwrite the stored jobs with the seed dataset
    Reset,
}

#[derive(Args)]
struct CreateJobArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    hiring_manager: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    description: String,
    /// One requirement per line
    #[arg(long, default_value = "")]
    requirements: String,
    /// YYYY-MM-DD; defaults to today
    #[arg(long)]
    posted_date: Option<NaiveDate>,
    /// Create the job as Closed instead of Active
    #[arg(long)]
    closed: bool,
}

#[derive(Subcommand)]
enum ApplicantsCommand {
    /// List applicants, optionally for a single job slug
    List {
        #[arg(long)]
        job: Option<String>,
    },
    /// Record an applicant for the job with the given slug
    Add(AddApplicantArgs),
    /// Move an applicant to a different stage
    SetStage {
        id: i64,
        stage: Stage,
    },
}

#[derive(Args)]
struct AddApplicantArgs {
    job_slug: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// YYYY-MM-DD; defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    resume_url: String,
    #[arg(long, default_value = "Applied")]
    stage: Stage,
    #[arg(long, default_value = "")]
    notes: String,
}

fn init_tracing(log_dir: &str) {
    std::fs::create_dir_all(log_dir).expect("Failed to create logs directory");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(log_dir, "tracker.log");
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env().expect("Failed to load configuration");
    init_tracing(&config.log_dir);

    let store = FileStore::new(&config.data_dir);
    let jobs = JobRepository::new(store.clone());
    let applicants = ApplicantRepository::new(store);

    let result = match cli.command {
        Command::Jobs { command } => run_jobs(command, &jobs),
        Command::Applicants { command } => run_applicants(command, &applicants, &jobs),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_jobs(
    command: JobsCommand,
    jobs: &JobRepository<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        JobsCommand::List { search, status } => {
            let status = match status.to_lowercase().as_str() {
                "all" => StatusFilter::All,
                "active" => StatusFilter::Active,
                "closed" => StatusFilter::Closed,
                other => return Err(format!("unknown status filter: {}", other).into()),
            };
            let all = jobs.load_all()?;
            let query = JobQuery {
                search_term: search,
                status,
            };
            let hits = JobRepository::<FileStore>::filter(&all, &query);
            for job in &hits {
                println!(
                    "{:>15}  {:<28} {:<10} {:<20} {}",
                    job.id, job.title, job.status, job.recruiter, job.date
                );
            }
            println!("{} of {} jobs", hits.len(), all.len());
            Ok(())
        }
        JobsCommand::Create(args) => {
            let draft = JobDraft {
                title: args.title,
                department: args.department,
                hiring_manager: args.hiring_manager,
                location: args.location,
                description: args.description,
                requirements: args.requirements,
                posted_date: args.posted_date.unwrap_or_else(|| Local::now().date_naive()),
                is_active: !args.closed,
            };
            let job = jobs.create(&draft)?;
            info!("Created job {} ({})", job.id, job.title);
            println!("created job {} ({})", job.id, job.title);
            Ok(())
        }
        JobsCommand::Reset => {
            let seeded = jobs.reset_to_defaults()?;
            println!("reset to {} seed jobs", seeded.len());
            Ok(())
        }
    }
}

fn run_applicants(
    command: ApplicantsCommand,
    applicants: &ApplicantRepository<FileStore>,
    jobs: &JobRepository<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ApplicantsCommand::List { job } => {
            let records = match &job {
                Some(slug) => applicants.load_for_job(slug)?,
                None => applicants.load_all()?,
            };
            for a in &records {
                println!(
                    "{:>15}  {:<24} {:<28} {:<14} {:<12} {}",
                    a.id, a.name, a.email, a.stage, a.applied_date, a.job
                );
            }
            println!("{} applicants", records.len());
            Ok(())
        }
        ApplicantsCommand::Add(args) => {
            let draft = ApplicantDraft {
                full_name: args.name,
                email: args.email,
                phone: args.phone,
                application_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                resume_url: args.resume_url,
                current_stage: args.stage,
                notes: args.notes,
            };
            let applicant = applicants.create(&draft, &args.job_slug, jobs)?;
            info!("Created applicant {} for {}", applicant.id, applicant.job);
            println!("added applicant {} ({})", applicant.id, applicant.name);
            Ok(())
        }
        ApplicantsCommand::SetStage { id, stage } => {
            let applicant = applicants.update_stage(id, stage)?;
            println!("applicant {} is now in stage {}", applicant.id, applicant.stage);
            Ok(())
        }
    }
}
