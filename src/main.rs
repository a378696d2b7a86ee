use clap::{Parser, Subcommand};
use spatial::cli_commands;

#[derive(Parser)]
#[command(name = "spatial", about = "Inspect and convert WKT geometries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a WKT geometry and print its details
    Describe { wkt: String },
    /// Convert a WKT geometry to its JSON representation
    Json {
        wkt: String,
        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Describe { wkt } => cli_commands::parse_show_detail(&wkt),
        Command::Json { wkt, output } => cli_commands::convert_to_json(&wkt, output),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
