use api_shared::tier_message;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use symptom_core::{
    config::database_url_from_env_value, CatalogSource, Condition, ConditionRepository,
    CoreConfig, MatchReport, MatchTier, SymptomCheckerService,
};

#[derive(Parser)]
#[command(name = "symptom-checker")]
#[command(about = "Rank likely conditions for a set of symptoms")]
struct Cli {
    /// Condition store URL, overriding SYMPTOM_DB_URL (empty disables the store)
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symptom checklist
    Symptoms,
    /// List the loaded conditions and where they came from
    Conditions,
    /// Check symptoms against the catalog
    Check {
        /// Selected symptoms, exactly as listed by `symptoms` (quote multi-word names)
        symptoms: Vec<String>,
    },
    /// Create the condition store schema
    InitDb,
    /// Write the built-in conditions into an empty condition store
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = CoreConfig::from_env_values(
        cli.database_url
            .or_else(|| std::env::var("SYMPTOM_DB_URL").ok()),
        std::env::var("SYMPTOM_DB_TIMEOUT_SECS").ok(),
        std::env::var("SYMPTOM_DB_MIGRATE").ok(),
    )?;

    match cli.command {
        Some(Commands::Symptoms) => {
            let service = SymptomCheckerService::bootstrap(&cfg).await;
            print!("{}", render_checklist(service.all_symptoms()));
        }
        Some(Commands::Conditions) => {
            let service = SymptomCheckerService::bootstrap(&cfg).await;
            print!("{}", render_conditions(service.conditions(), service.source()));
        }
        Some(Commands::Check { symptoms }) => {
            let service = SymptomCheckerService::bootstrap(&cfg).await;
            let report = service.check(&symptoms);
            if report.tier == MatchTier::EmptySelection {
                eprintln!("{}", tier_message(report.tier).unwrap_or_default());
            } else {
                print!("{}", render_report(&report));
            }
        }
        Some(Commands::InitDb) => {
            let repo = open_store(&cfg).await?;
            repo.migrate().await?;
            println!("Condition store schema is up to date.");
        }
        Some(Commands::Seed) => {
            let repo = open_store(&cfg).await?;
            repo.migrate().await?;
            match repo.seed_defaults().await? {
                0 => println!("Condition store already has conditions; nothing seeded."),
                n => println!("Seeded {} built-in conditions.", n),
            }
        }
        None => {
            println!("Use 'symptom-checker --help' for commands");
        }
    }

    Ok(())
}

async fn open_store(cfg: &CoreConfig) -> anyhow::Result<ConditionRepository> {
    let Some(url) = cfg.database_url() else {
        anyhow::bail!(
            "no condition store configured (default would be {})",
            database_url_from_env_value(None).unwrap_or_default()
        );
    };
    Ok(ConditionRepository::connect(url, cfg.acquire_timeout()).await?)
}

fn render_checklist(symptoms: &[String]) -> String {
    let mut out = format!("Choose Symptoms ({})\n", symptoms.len());
    for symptom in symptoms {
        let _ = writeln!(out, "  [ ] {symptom}");
    }
    out
}

fn render_conditions(conditions: &[Condition], source: &CatalogSource) -> String {
    let mut out = format!("{} conditions from {}\n", conditions.len(), source);
    for condition in conditions {
        let _ = writeln!(out, "\n{}", condition.name());
        if condition.symptoms().is_empty() {
            let _ = writeln!(out, "  Symptoms: (none)");
        } else {
            let _ = writeln!(out, "  Symptoms: {}", condition.symptoms().join(", "));
        }
        if !condition.advice().is_empty() {
            let _ = writeln!(out, "  Advice: {}", condition.advice());
        }
    }
    out
}

fn render_report(report: &MatchReport) -> String {
    let mut out = String::new();

    if let Some(message) = tier_message(report.tier) {
        let _ = writeln!(out, "{message}");
        return out;
    }

    if report.tier == MatchTier::Fallback {
        let _ = writeln!(
            out,
            "No condition matched 3 or more symptoms. Closest matches:"
        );
    }

    for (i, result) in report.results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} ({}% match)",
            result.condition_name, result.percent_match
        );
        let _ = writeln!(
            out,
            "  Matched {} of {} symptoms.",
            result.matched_count, result.total_symptoms
        );
        if !result.advice.is_empty() {
            let _ = writeln!(out, "  Advice: {}", result.advice);
        }
    }

    out
}
