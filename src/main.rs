use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use telar::lesson::{
    compose_lesson, ComposeConfig, Lesson, LessonError, LessonValidator, RawItem, SequenceSpec,
};
use telar::TelarConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "telar", version, about = "Deterministic micro-lesson assembly")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a lesson from raw generator output
    Assemble {
        /// Raw items file (JSON array of candidate items)
        #[arg(long)]
        input: PathBuf,

        /// Lesson title
        #[arg(long)]
        title: String,

        /// Category tag (defaults from config)
        #[arg(long)]
        category: Option<String>,

        /// Estimated duration in minutes (defaults from config)
        #[arg(long)]
        duration: Option<u32>,

        /// Reward units (defaults from config)
        #[arg(long)]
        xp: Option<u32>,

        /// Sequence grammar, e.g. "content → quiz → quote"
        #[arg(long)]
        sequence: Option<String>,

        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the lesson JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the assembly report
        #[arg(long)]
        report: bool,
    },

    /// Parse and describe a sequence grammar string
    Sequence {
        /// Grammar string; omit to show the default sequence
        grammar: Option<String>,
    },

    /// Validate a stored lesson file against the schema
    Validate {
        /// Lesson file (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Telar v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Assemble {
            input,
            title,
            category,
            duration,
            xp,
            sequence,
            config,
            output,
            report,
        } => {
            info!("Assembling lesson from {:?}", input);
            cmd_assemble(
                input, title, category, duration, xp, sequence, config, output, report,
            )?;
        }
        Commands::Sequence { grammar } => {
            cmd_sequence(grammar.as_deref())?;
        }
        Commands::Validate { input, config } => {
            info!("Validating lesson at {:?}", input);
            cmd_validate(input, config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<TelarConfig> {
    match path {
        Some(path) => TelarConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(TelarConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_assemble(
    input: PathBuf,
    title: String,
    category: Option<String>,
    duration: Option<u32>,
    xp: Option<u32>,
    sequence: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    report: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;

    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read raw items from {}", input.display()))?;
    let raw_items: Vec<RawItem> =
        serde_json::from_str(&contents).context("raw items file is not a JSON array of items")?;

    let policy = config.author_policy();
    let compose = ComposeConfig::new(title)
        .with_category(category.unwrap_or(config.lesson.category))
        .with_duration(duration.unwrap_or(config.lesson.duration_minutes))
        .with_xp(xp.unwrap_or(config.lesson.xp))
        .with_policy(policy);
    let compose = match sequence.or(config.sequence) {
        Some(s) => compose.with_sequence(s),
        None => compose,
    };

    let composed = match compose_lesson(&compose, raw_items) {
        Ok(composed) => composed,
        Err(LessonError::SchemaRejected(result)) => {
            eprintln!("{}", "Lesson rejected by schema validator".bright_red().bold());
            eprint!("{}", result.format_display());
            bail!("schema validation failed");
        }
        Err(err) => return Err(err.into()),
    };

    let json = serde_json::to_string_pretty(&composed.lesson)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write lesson to {}", path.display()))?;
            println!(
                "{} {} ({} items)",
                "Lesson written to".bright_green(),
                path.display(),
                composed.lesson.items.len()
            );
        }
        None => println!("{json}"),
    }

    if report {
        println!();
        print!("{}", composed.report.format_display());
    }

    Ok(())
}

fn cmd_sequence(grammar: Option<&str>) -> anyhow::Result<()> {
    let spec = match SequenceSpec::parse(grammar.unwrap_or("")) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("{} {}", "Invalid sequence:".bright_red().bold(), err);
            bail!("sequence parse failed");
        }
    };

    println!("{}", "Sequence".bright_cyan().bold());
    for (i, kind) in spec.tokens().iter().enumerate() {
        println!("  {}. {}", i + 1, kind.name());
    }
    println!("{}", format!("({} slots)", spec.tokens().len()).dimmed());
    Ok(())
}

fn cmd_validate(input: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config)?;

    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read lesson from {}", input.display()))?;
    let lesson: Lesson =
        serde_json::from_str(&contents).context("lesson file is not a valid lesson document")?;

    let result = LessonValidator::new(config.author_policy()).validate(&lesson);
    print!("{}", result.format_display());

    if !result.passed {
        bail!("schema validation failed");
    }
    println!("{}", "Lesson accepted.".bright_green().bold());
    Ok(())
}
