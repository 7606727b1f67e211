use crate::config::database_url;
use crate::loaders::Loader;
use crate::model::{RoomType, StudentId};
use crate::store::{AllocationStore, FormStore};
use clap::{ArgAction, Parser, Subcommand};
use eyre::{Error, ensure};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::Level;

mod algos;
mod checks;
mod config;
mod display;
mod loaders;
mod model;
mod stats;
mod store;

#[derive(Parser)]
#[command(version, author, about)]
struct Args {
    /// Use FILE instead of hostel-alloc.toml
    #[arg(short, long, value_name = "FILE", default_value = "hostel-alloc.toml")]
    config: PathBuf,
    /// Database URL, overriding the configuration file
    #[arg(long, env = "HOSTEL_ALLOC_DATABASE_URL")]
    database_url: Option<String>,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allocate rooms to every student who submitted a form
    Run {
        /// Do not write back results to database
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Show the allocation of a student, or every allocation
    Show { student: Option<String> },
    /// Show allocation statistics
    Stats,
    /// Delete every allocation
    Reset,
    /// Submit a room preference form for a student
    Submit {
        student: String,
        /// Room types, most wanted first
        #[arg(required = true)]
        preferences: Vec<String>,
    },
    /// List submitted forms in submission order
    Forms,
    /// Delete every submitted form
    ResetForms,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    let url = database_url(args.database_url, &args.config)?;
    let mut loader = Loader::new(&url).await?;
    match args.command {
        Command::Run { dry_run } => {
            let plan = if dry_run {
                algos::plan(&mut loader).await?
            } else {
                algos::run_allocation(&mut loader).await?
            };
            checks::ensure_within_capacity(&plan)?;
            display::display_details(&plan);
            display::display_stats(&plan);
            display::display_unallocated(&plan);
            checks::check_unallocated(&plan);
        }
        Command::Show { student } => {
            let allocations = loader.allocations().await?;
            match student {
                Some(student) => {
                    let student = StudentId(student);
                    let allocation = allocations.iter().find(|a| a.student_id == student);
                    println!("{}", display::describe_allocation(&student, allocation));
                }
                None => display::display_allocations(&allocations),
            }
        }
        Command::Stats => {
            let forms = loader.forms().await?.len();
            let allocations = loader.allocations().await?;
            display::display_summary(forms, &allocations);
        }
        Command::Reset => {
            let removed = loader.delete_allocations().await?;
            println!("Deleted {removed} allocations");
        }
        Command::Submit {
            student,
            preferences,
        } => {
            let preferences = preferences
                .iter()
                .map(|p| RoomType::from(p.as_str()))
                .collect::<Vec<_>>();
            ensure!(
                preferences.iter().collect::<HashSet<_>>().len() == preferences.len(),
                "room preferences must be distinct"
            );
            let form = loader
                .submit_form(&StudentId(student), &preferences)
                .await?;
            println!("Form submitted at {}", form.submitted_at);
        }
        Command::Forms => {
            display::display_forms(&loader.forms().await?);
        }
        Command::ResetForms => {
            let removed = loader.delete_forms().await?;
            println!("Deleted {removed} forms");
        }
    }
    Ok(())
}
