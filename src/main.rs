use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rule_engine_rs::engine::{OperatorRegistry, RuleEngine};
use rule_engine_rs::loader::DocumentLoader;
use rule_engine_rs::EngineOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stop evaluating a group once its outcome is known
    #[arg(long, global = true)]
    short_circuit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a rule against a context document
    Trigger {
        /// Path to the rule (JSON or YAML)
        #[arg(short, long)]
        rule: PathBuf,

        /// Path to the context map
        #[arg(short, long)]
        context: PathBuf,
    },
    /// Print the items that satisfy a rule
    Filter {
        /// Path to the rule (JSON or YAML)
        #[arg(short, long)]
        rule: PathBuf,

        /// Path to the sequence of items
        #[arg(short, long)]
        items: PathBuf,

        /// Optional context map for variables
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
    /// List the available operators
    Operators,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut options = EngineOptions::from_env()?;
    if args.short_circuit {
        options = options.with_short_circuit(true);
    }
    let engine = RuleEngine::global().with_options(options);
    let loader = DocumentLoader::new();

    match args.command {
        Commands::Trigger { rule, context } => {
            let rule = loader.load_rule(&rule)?;
            let context = loader.load_context(&context)?;
            println!("{}", engine.trigger(&rule, &context));
        }
        Commands::Filter {
            rule,
            items,
            context,
        } => {
            let rule = loader.load_rule(&rule)?;
            let items = loader.load_items(&items)?;
            let context = context.map(|path| loader.load_context(path)).transpose()?;

            let matched = engine.filter(&rule, &items, context.as_ref());
            log::info!("{} of {} items matched", matched.len(), items.len());
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }
        Commands::Operators => {
            for op in OperatorRegistry::global().operators() {
                println!("{:<26} {}", op.name(), op.description());
                println!("{:<26} {}", "", op.slugs().join(", "));
            }
        }
    }

    Ok(())
}
