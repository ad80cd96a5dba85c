use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// Ask a PostgreSQL database questions in plain language
#[derive(Parser, Debug, Default)]
#[command(name = "askdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to ./askdb.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address the web server listens on
    #[arg(short, long, env = "ASKDB_BIND")]
    pub bind: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI compatible API
    #[arg(long, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    /// Chat model used to write and answer queries
    #[arg(short, long, env = "ASKDB_MODEL")]
    pub model: Option<String>,

    /// Tables the agent may query, comma separated (empty for all)
    #[arg(long, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,

    /// Maximum number of rows a generated query should return
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Skip the model's second look at each generated query
    #[arg(long)]
    pub no_query_checker: bool,
}

impl Cli {
    /// Overrides `settings` with every option that was given.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(bind) = &self.bind {
            settings.server.bind = bind.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.openai.api_key = Some(api_key.clone());
        }
        if let Some(api_base) = &self.api_base {
            settings.openai.api_base = Some(api_base.clone());
        }
        if let Some(model) = &self.model {
            settings.openai.model = model.clone();
        }
        if let Some(tables) = &self.tables {
            settings.database.include_tables = tables
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        if let Some(top_k) = self.top_k {
            settings.database.top_k = top_k;
        }
        if self.no_query_checker {
            settings.database.use_query_checker = false;
        }
    }
}
