use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use routine_builder::config::Config;
use routine_builder::domains::form::RoutineForm;
use routine_builder::error::{Result, RoutineError};
use routine_builder::markdown;
use routine_builder::providers::sqlite::SqliteKeyValueStore;
use routine_builder::server::{self, AppState};
use routine_builder::services::controller::ResultView;
use routine_builder::services::preference_store::PreferenceStore;
use routine_builder::services::prompt::build_prompt;
use routine_builder::RoutineBuilder;

#[derive(Parser, Debug)]
#[command(name = "routine-builder")]
#[command(about = "Generate a personalised daily routine from saved preferences")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    db: Option<String>,

    #[arg(long, global = true, env = "MISTRAL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Save the form values, ask the model for a routine and print it as HTML.
    Generate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Print the prompt the current form values would produce.
    Prompt {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Print the saved preference record.
    Show,
    /// Render Markdown from a file (or stdin) to HTML.
    Render {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Serve the routine API on a local port.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8787)]
        port: u16,

        #[arg(long, env = "ROUTINE_BUILDER_TOKEN", default_value = "")]
        token: String,
    },
}

#[derive(clap::Args, Debug, Default)]
struct FormArgs {
    #[arg(long)]
    time_of_day: Option<String>,

    #[arg(long)]
    focus_area: Option<String>,

    #[arg(long)]
    time_available: Option<String>,

    #[arg(long)]
    energy_level: Option<String>,

    /// Repeat to check several activities. Replaces the saved selection.
    #[arg(long = "activity")]
    activities: Vec<String>,
}

impl FormArgs {
    fn apply(self, form: &mut RoutineForm) {
        if let Some(value) = self.time_of_day {
            form.time_of_day = value;
        }
        if let Some(value) = self.focus_area {
            form.focus_area = value;
        }
        if let Some(value) = self.time_available {
            form.time_available = value;
        }
        if let Some(value) = self.energy_level {
            form.energy_level = value;
        }
        if !self.activities.is_empty() {
            form.set_activities(&self.activities);
        }
    }
}

fn local_store(config: &Config) -> Result<PreferenceStore> {
    let store = SqliteKeyValueStore::new(&config.db_path())?;
    Ok(PreferenceStore::new(Arc::new(store)))
}

fn saved_form(store: &PreferenceStore) -> RoutineForm {
    let mut form = RoutineForm::default();
    match store.load() {
        Ok(Some(saved)) => form.populate(&saved),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "using default form values"),
    }
    form
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,routine_builder=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?
        .with_api_key(cli.api_key)
        .with_db_path(cli.db);

    match cli.command {
        Commands::Generate { form } => {
            let builder = RoutineBuilder::from_config(&config)?;
            let mut controller = builder.controller();
            form.apply(controller.form_mut());
            match controller.submit().await {
                ResultView::Routine { html } => println!("{html}"),
                ResultView::Error { message } => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
                ResultView::Hidden => {}
            }
        }
        Commands::Prompt { form: args } => {
            let store = local_store(&config)?;
            let mut form = saved_form(&store);
            args.apply(&mut form);
            println!("{}", build_prompt(&form.preferences()));
        }
        Commands::Show => {
            let store = local_store(&config)?;
            if let Some(saved) = store.load()? {
                let json = serde_json::to_string_pretty(&saved)
                    .map_err(|e| RoutineError::Serialization(e.to_string()))?;
                println!("{json}");
            }
        }
        Commands::Render { file } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(path)
                    .map_err(|e| RoutineError::Runtime(e.to_string()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(|e| RoutineError::Runtime(e.to_string()))?;
                    buf
                }
            };
            println!("{}", markdown::render(&input));
        }
        Commands::Serve { host, port, token } => {
            let builder = RoutineBuilder::from_config(&config)?;
            server::run(&host, port, AppState { builder, token }).await?;
        }
    }

    Ok(())
}
