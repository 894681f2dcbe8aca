//! Resume matcher: resume and job description matching tool

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::ReportGenerator;
use resume_matcher::processing::{AnalysisEngine, SkillVocabulary};
use resume_matcher::server::{self, AppState};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            skills,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let vocabulary = load_vocabulary(skills.as_deref(), &config);
            let engine = AnalysisEngine::new(vocabulary);
            let mut input_manager = InputManager::new();

            info!("Extracting resume text from {}", resume.display());
            let resume_text = input_manager.extract_text(&resume).await?;

            let job_description = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "md", "markdown", "pdf"]).map_err(|e| {
                        ResumeMatcherError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    input_manager.extract_text(&path).await?.into_string()
                }
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(ResumeMatcherError::InvalidInput(
                        "Either --job or --job-text is required".to_string(),
                    ))
                }
            };

            let result = engine.analyze_text(&resume_text, &job_description);

            let use_colors = config.output.color_output && output_format == OutputFormat::Console;
            let report = ReportGenerator::new(use_colors).format(&result, output_format)?;
            println!("{}", report);
        }

        Commands::Extract { path } => {
            let text = InputManager::new().with_cache(false).extract_text(&path).await?;
            println!("{}", text);
        }

        Commands::Serve { bind, port, skills } => {
            let mut server_config = config.server.clone();
            if let Some(bind) = bind {
                server_config.bind = bind;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let vocabulary = load_vocabulary(skills.as_deref(), &config);
            let engine = Arc::new(AnalysisEngine::new(vocabulary));
            server::run_server(AppState::new(engine, server_config)).await?;
        }

        Commands::Skills { skills } => {
            let vocabulary = load_vocabulary(skills.as_deref(), &config);
            println!("{} skills:", vocabulary.len());
            for label in vocabulary.labels() {
                println!("  • {}", label);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n{}", path.display(), content);
                }
                ConfigAction::Path => println!("{}", path.display()),
                ConfigAction::Reset => {
                    Config::reset(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// The vocabulary is loaded once per process and shared read-only.
fn load_vocabulary(override_path: Option<&Path>, config: &Config) -> Arc<SkillVocabulary> {
    let path = override_path.or_else(|| config.vocabulary_path());
    Arc::new(SkillVocabulary::load_or_default(path))
}
