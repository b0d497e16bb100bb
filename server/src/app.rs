//! Core application

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::filters::{
    AggregateOperator, CompileContext, FilterCompiler, TimeSeriesQuery, parse_filter_set,
};
use crate::utils::file::read_input;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub compiler: Arc<FilterCompiler>,
}

/// Arguments of the `compile` subcommand
struct CompileArgs {
    file: Option<PathBuf>,
    metric: String,
    aggregation: AggregateOperator,
    exclude: Vec<String>,
    group_by: Vec<String>,
    query: bool,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Compile {
                file,
                metric,
                aggregation,
                exclude,
                group_by,
                query,
            }) => {
                let app = Self::init(&cli_config)?;
                let output = app.compile_command(CompileArgs {
                    file,
                    metric,
                    aggregation,
                    exclude,
                    group_by,
                    query,
                })?;
                println!("{}", output);
                Ok(())
            }
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config)?;
                Self::start_server(app).await
            }
        }
    }

    /// Build the application from resolved configuration
    pub fn new(config: AppConfig) -> Self {
        let compiler = Arc::new(FilterCompiler::new(
            config.query.backend,
            config.query.implicit_predicates.clone(),
        ));
        Self {
            shutdown: ShutdownService::new(),
            config,
            compiler,
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        Ok(Self::new(config))
    }

    fn compile_command(&self, args: CompileArgs) -> Result<String> {
        let body = read_input(args.file.as_deref())?;
        let filter_set = parse_filter_set(&body, self.config.query.max_filter_items)
            .context("Failed to decode filter set")?;

        let ctx = CompileContext::new(&args.metric)
            .with_exclude_keys(&args.exclude)
            .with_aggregation(args.aggregation);

        if args.query || !args.group_by.is_empty() {
            let query = TimeSeriesQuery::new(&self.compiler, &self.config.query.table)
                .build(&filter_set, &ctx, &args.group_by)?;
            Ok(query)
        } else {
            Ok(self.compiler.compile(&filter_set, &ctx)?)
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        ApiServer::new(app).start().await
    }
}
