// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use rights_workbench::utils::logging::{format_info, format_success, format_warning};
use rights_workbench::{
    analyze, ComparisonRequest, Config, CsvExporter, EvaluationStore, JsonFileStore, RubricScore,
    Validator, VerificationStatus, Workbench,
};
use rights_workbench::models::rubric::{category_ids, is_known_category, Severity};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "rights_workbench")]
#[command(version = "0.1.0")]
#[command(about = "Compare LLM responses to human-rights prompts and score harm", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities from a text or file
    Analyze {
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Send a prompt pair to several models and store the evaluation
    Compare {
        prompt: String,

        #[arg(long)]
        native: Option<String>,

        #[arg(long, default_value = "fa")]
        language: String,

        #[arg(short = 'm', long = "model", required = true)]
        models: Vec<String>,

        #[arg(long)]
        system: Option<String>,
    },

    /// Attach a rubric score to one model response
    Score {
        id: String,
        model: String,
        category: String,
        severity: u8,

        #[arg(long, default_value = "en")]
        language: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Set the verification status of a checklist value
    Verify {
        id: String,
        value: String,
        status: String,
    },

    List,

    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,
    },

    Import {
        input: PathBuf,
    },

    Reset {
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    rights_workbench::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Analyze { text, file, json } => {
            cmd_analyze(text, file, json)?;
        }
        Commands::Compare {
            prompt,
            native,
            language,
            models,
            system,
        } => {
            cmd_compare(&config, prompt, native, language, models, system).await?;
        }
        Commands::Score {
            id,
            model,
            category,
            severity,
            language,
            note,
        } => {
            cmd_score(&config, &id, &model, &language, &category, severity, note)?;
        }
        Commands::Verify { id, value, status } => {
            cmd_verify(&config, &id, &value, &status)?;
        }
        Commands::List => {
            cmd_list(&config)?;
        }
        Commands::Show { id, json } => {
            cmd_show(&config, &id, json)?;
        }
        Commands::Export { output } => {
            cmd_export(&config, output)?;
        }
        Commands::Import { input } => {
            cmd_import(&config, &input)?;
        }
        Commands::Reset { confirm } => {
            cmd_reset(&config, confirm)?;
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<EvaluationStore<JsonFileStore>> {
    let backend = JsonFileStore::open(config.storage.path.clone(), config.storage.pretty)
        .context("Failed to open evaluation store")?;
    Ok(EvaluationStore::new(backend))
}

fn cmd_analyze(text: Option<String>, file: Option<PathBuf>, json: bool) -> Result<()> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            Validator::validate_file_path(&path)?;
            std::fs::read_to_string(&path).context("Failed to read file")?
        }
        (None, None) => {
            anyhow::bail!("Provide --text or --file");
        }
    };

    let entities = analyze(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }

    println!("{}", "Extracted entities".bold());
    print_category("Links", &entities.links);
    print_category("Emails", &entities.emails);
    print_category("Phones", &entities.phones);
    print_category("Addresses", &entities.addresses);
    println!("{}", format_info(&format!("Total: {}", entities.total())));

    Ok(())
}

fn print_category(label: &str, values: &[String]) {
    println!("  {} ({})", label.cyan(), values.len());
    for value in values {
        println!("    - {}", value);
    }
}

async fn cmd_compare(
    config: &Config,
    prompt: String,
    native: Option<String>,
    language: String,
    models: Vec<String>,
    system: Option<String>,
) -> Result<()> {
    for model in &models {
        Validator::validate_model_id(model)?;
    }

    let workbench = Workbench::new(config.clone());
    let request = ComparisonRequest {
        prompt_en: prompt,
        prompt_native: native,
        language,
        models,
        system_instruction: system,
    };

    let (record, stats) = workbench
        .compare(request)
        .await
        .context("Comparison failed")?;

    let mut store = open_store(config)?;
    store.save(&record).context("Failed to save evaluation")?;

    println!("{}", format_success(&format!("Saved evaluation {}", record.id)));
    for response in &record.responses {
        match &response.error {
            None => {
                println!(
                    "  {} [{}] {} entities ({} ms)",
                    response.model.cyan(),
                    response.language,
                    response.entities.total(),
                    response.latency_ms
                );
            }
            Some(error) => {
                println!(
                    "  {} [{}] {}",
                    response.model.cyan(),
                    response.language,
                    format_warning(error)
                );
            }
        }
    }
    info!(
        "Queries: {} ok, {} failed ({:.0}% success)",
        stats.queries_completed,
        stats.queries_failed,
        stats.success_rate()
    );

    Ok(())
}

fn cmd_score(
    config: &Config,
    id: &str,
    model: &str,
    language: &str,
    category: &str,
    severity: u8,
    note: Option<String>,
) -> Result<()> {
    Validator::validate_severity(severity)?;
    let severity = Severity::from_u8(severity)
        .ok_or_else(|| anyhow::anyhow!("Severity must be 0-3"))?;

    if !is_known_category(&config.rubric, category) {
        anyhow::bail!(
            "Unknown rubric category '{}'. Known: {}",
            category,
            category_ids(&config.rubric).join(", ")
        );
    }

    let mut store = open_store(config)?;
    let mut record = store.load(id).context("Failed to load evaluation")?;

    let response = record
        .find_response_mut(model, language)
        .ok_or_else(|| anyhow::anyhow!("No response for model '{}' [{}]", model, language))?;
    response.apply_score(RubricScore::new(category.to_string(), severity, note));

    store.save(&record).context("Failed to save evaluation")?;
    println!(
        "{}",
        format_success(&format!(
            "Scored {} [{}] {}={}",
            model,
            language,
            category,
            severity.as_str()
        ))
    );

    Ok(())
}

fn cmd_verify(config: &Config, id: &str, value: &str, status: &str) -> Result<()> {
    let status = VerificationStatus::parse(status).ok_or_else(|| {
        anyhow::anyhow!("Invalid status '{}': use unchecked, working or not-working", status)
    })?;

    let mut store = open_store(config)?;
    let mut record = store.load(id).context("Failed to load evaluation")?;

    let updated = record.set_verification(value, status);
    if updated == 0 {
        anyhow::bail!("No checklist entry matches '{}'", value);
    }

    store.save(&record).context("Failed to save evaluation")?;
    println!(
        "{}",
        format_success(&format!(
            "Marked {} entry(ies) as {}",
            updated,
            status.as_str()
        ))
    );

    Ok(())
}

fn cmd_list(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let records = store.list().context("Failed to list evaluations")?;

    if records.is_empty() {
        println!("{}", format_info("No evaluations stored"));
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {}  [{}]  {} response(s)  {}",
            record.id.cyan(),
            record.created_at_rfc3339(),
            record.language,
            record.responses.len(),
            Validator::truncate_text(&record.prompt_en, 60)
        );
    }

    Ok(())
}

fn cmd_show(config: &Config, id: &str, json: bool) -> Result<()> {
    let store = open_store(config)?;
    let record = store.load(id).context("Failed to load evaluation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{} {}", "Evaluation".bold(), record.id);
    println!("  Created: {}", record.created_at_rfc3339());
    println!("  Prompt (en): {}", record.prompt_en);
    if let Some(native) = &record.prompt_native {
        println!("  Prompt ({}): {}", record.language, native);
    }

    for response in &record.responses {
        println!();
        println!(
            "  {} [{}] via {}",
            response.model.cyan().bold(),
            response.language,
            response.provider
        );
        if let Some(error) = &response.error {
            println!("    {}", format_warning(error));
            continue;
        }
        println!(
            "    {}",
            Validator::truncate_text(&response.text, 300)
        );
        println!(
            "    Entities: {} links, {} emails, {} phones, {} addresses",
            response.entities.links_count,
            response.entities.emails_count,
            response.entities.phones_count,
            response.entities.addresses_count
        );
        for item in &response.checklist {
            println!(
                "    [{}] {} ({})",
                item.status.as_str(),
                item.value,
                item.category.as_str()
            );
        }
        for score in &response.scores {
            println!("    Score: {} = {}", score.category, score.severity);
        }
    }

    Ok(())
}

fn cmd_export(config: &Config, output: PathBuf) -> Result<()> {
    let store = open_store(config)?;
    let records = store.list().context("Failed to list evaluations")?;

    let exporter = CsvExporter::new(output)?;
    let manifest = exporter.export(&records).context("Export failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Exported {} record(s) as {} row(s) to {}",
            manifest.total_records,
            manifest.total_rows,
            manifest.files.join(", ")
        ))
    );

    Ok(())
}

fn cmd_import(config: &Config, input: &PathBuf) -> Result<()> {
    Validator::validate_file_path(input)?;

    let records = CsvExporter::import(input).context("Import failed")?;
    let mut store = open_store(config)?;

    for record in &records {
        store.save(record).context("Failed to save imported record")?;
    }

    println!(
        "{}",
        format_success(&format!("Imported {} record(s)", records.len()))
    );

    Ok(())
}

fn cmd_reset(config: &Config, confirm: bool) -> Result<()> {
    if !confirm {
        println!(
            "{}",
            format_warning("This will delete all stored evaluations. Use --confirm to proceed")
        );
        return Ok(());
    }

    let mut store = open_store(config)?;
    let removed = store.clear().context("Failed to clear store")?;

    println!(
        "{}",
        format_success(&format!("Removed {} evaluation(s)", removed))
    );

    Ok(())
}
