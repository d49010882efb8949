use clap::{Parser, Subcommand};

use lexent_core::config::Config;
use lexent_core::{EntityParser, Kind, Strategy};

#[derive(Parser)]
#[command(name = "lexent")]
#[command(about = "Multi-lingual natural-language entity extraction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities from a query
    Parse {
        /// Text to parse
        #[arg(required = true)]
        query: Vec<String>,

        /// Language code for the parser (configured default when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Restrict matches to a kind (repeatable); all kinds when omitted
        #[arg(short, long = "kind", value_name = "KIND")]
        kinds: Vec<String>,
    },
    /// List the recognizable entity kinds
    Kinds,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Parse {
            query,
            language,
            kinds,
        } => {
            let config = Config::load()?;
            let language = language.unwrap_or(config.parser.default_language);

            let binding = Strategy::from_config(&config.engine).build()?;
            let parser = EntityParser::with_binding(binding, &language)?;

            let query = query.join(" ");
            let kinds: Vec<&str> = kinds.iter().map(String::as_str).collect();
            let matches = parser.parse(&query, &kinds)?;

            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        Commands::Kinds => {
            for kind in Kind::ALL {
                println!("{kind}");
            }
        }
    }

    Ok(())
}
