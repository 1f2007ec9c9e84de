use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use tracing::debug;

mod catalog;
mod logging;
mod models;
mod report;
mod store;
mod upcoming;

use catalog::Catalog;

#[derive(Parser)]
#[command(name = "module-planner")]
#[command(about = "Module reports for S/U eligibility, bidding and assessment deadlines", long_about = None)]
struct Cli {
    /// JSON file holding the module records
    #[arg(long, global = true, default_value = "modules_data.json")]
    data: PathBuf,
    /// Enable debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every module in full
    List,
    /// List modules that can be taken S/U
    Su,
    /// List modules that cannot be taken S/U
    NonSu,
    /// Tabulate bidding points per module
    Bidding,
    /// List assessments across all modules by date
    #[command(group(
        ArgGroup::new("reference")
            .args(["from_today", "as_of"])
            .multiple(false)
    ))]
    Upcoming {
        #[arg(long, default_value_t = 30)]
        days: i64,
        /// Only include assessments within the window starting today
        #[arg(long)]
        from_today: bool,
        /// Only include assessments within the window starting on this date
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Show a single module by code
    Show { code: String },
    /// Write the loaded modules back out
    Save {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let catalog = Catalog::load(&cli.data);
    debug!(modules = catalog.modules().len(), "catalog ready");
    let modules = catalog.modules();

    match cli.command {
        None => {
            print!("{}", report::all_modules(modules));
            print!("{}", report::su_eligible_modules(modules));
            print!("{}", report::non_su_eligible_modules(modules));
            print!("{}", report::bidding_summary(modules));
            print!("{}", report::upcoming_assessments(modules, 30, None));
        }
        Some(Commands::List) => print!("{}", report::all_modules(modules)),
        Some(Commands::Su) => print!("{}", report::su_eligible_modules(modules)),
        Some(Commands::NonSu) => print!("{}", report::non_su_eligible_modules(modules)),
        Some(Commands::Bidding) => print!("{}", report::bidding_summary(modules)),
        Some(Commands::Upcoming {
            days,
            from_today,
            as_of,
        }) => {
            let reference = if from_today {
                Some(upcoming::today())
            } else {
                as_of
            };
            print!("{}", report::upcoming_assessments(modules, days, reference));
        }
        Some(Commands::Show { code }) => match catalog.find_by_code(&code) {
            Some(module) => print!("{}", report::module_detail(module)),
            None => println!("No module found with code {code}."),
        },
        Some(Commands::Save { out }) => {
            // An empty catalog means the source was missing or unreadable.
            match out {
                Some(path) => {
                    catalog.save_to(&path)?;
                    println!("Saved {} modules to {}.", modules.len(), path.display());
                }
                None if catalog.is_empty() => println!("Nothing to save."),
                None => {
                    catalog.save()?;
                    println!(
                        "Saved {} modules to {}.",
                        modules.len(),
                        catalog.source().display()
                    );
                }
            }
        }
    }

    Ok(())
}
