//! CLI Tooling
//!
//! Command-line interface for the countdown and the syllabus checklist.

use crate::checklist::render_subject;
use crate::config::{ConfigLoader, SyllabusConfig};
use crate::countdown::{time_left, CountdownDisplay};
use crate::error::ApiError;
use crate::session::ChecklistSession;
use crate::store::{
    CookieJarStore, DurableStore, PersistenceAdapter, SledStore, UnavailableStore,
};
use crate::tooling::browse::run_browse;
use crate::tooling::format::{
    format_countdown, format_resources_text, format_subjects_json, format_subjects_text,
    format_tree_text,
};
use crate::types::{NodeKey, Subject};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Syllabus CLI - exam countdown and persisted syllabus checklist
#[derive(Parser)]
#[command(name = "syllabus")]
#[command(about = "Exam countdown and persisted syllabus checklist")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Subject document path (overrides config)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Directory for persisted checklist state (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<SyllabusConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(document) = &self.document {
            config.document.path = Some(document.clone());
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = Some(data_dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show time left until the target date
    Countdown {
        /// Show total days instead of segmented units
        #[arg(long)]
        days: bool,
        /// Keep ticking once per second
        #[arg(long)]
        watch: bool,
        /// Stop watching after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// List subjects with checklist progress
    Subjects {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a subject's topic checklist
    Tree {
        /// Subject id or name
        subject: String,
        /// Show collapsed branches too
        #[arg(long)]
        all: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List a subject's resource links
    Resources {
        /// Subject id or name
        subject: String,
    },
    /// Click a node's checkbox (leaf toggles, topic checks or clears all)
    Check {
        /// Node key, e.g. 1:2:3
        key: String,
    },
    /// Expand or collapse a topic
    Expand {
        /// Node key, e.g. 1:2
        key: String,
    },
    /// Interactive browser
    Browse,
    /// Print the normalized subject document as JSON
    Normalize,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Countdown { .. } => "countdown",
        Commands::Subjects { .. } => "subjects",
        Commands::Tree { .. } => "tree",
        Commands::Resources { .. } => "resources",
        Commands::Check { .. } => "check",
        Commands::Expand { .. } => "expand",
        Commands::Browse => "browse",
        Commands::Normalize => "normalize",
        Commands::Config { .. } => "config",
    }
}

/// CLI context owning configuration and the checklist session
pub struct CliContext {
    config: SyllabusConfig,
    session: ChecklistSession,
}

impl CliContext {
    /// Load the document and open both stores.
    ///
    /// A primary store that cannot be opened (held by another process, or
    /// a file in its place) is logged and replaced, so state comes from the
    /// cookie jar or starts empty.
    pub fn new(config: SyllabusConfig) -> Result<Self, ApiError> {
        let forest = config.document.load()?;
        let paths = config.storage.resolve_paths()?;
        let primary: Box<dyn DurableStore> = match SledStore::open(&paths.store_path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(
                    path = %paths.store_path.display(),
                    "Primary store unavailable, falling back to cookie jar: {}",
                    e
                );
                Box::new(UnavailableStore::new(e.to_string()))
            }
        };
        let secondary = CookieJarStore::new(paths.cookie_path).with_limits(
            config.storage.cookie_max_bytes,
            config.storage.cookie_max_age_days,
        );
        let persistence = PersistenceAdapter::new(
            primary,
            Box::new(secondary),
            config.storage.schema_version.clone(),
        );
        let session = ChecklistSession::open(forest, persistence);
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &SyllabusConfig {
        &self.config
    }

    pub fn session(&self) -> &ChecklistSession {
        &self.session
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), "Executing command");
        let result = self.execute_inner(command);
        if let Err(e) = &result {
            tracing::error!(command = command_name(command), "Command failed: {}", e);
        }
        result
    }

    fn execute_inner(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Countdown { days, watch, ticks } => {
                let display = if *days {
                    CountdownDisplay::TotalDays
                } else {
                    CountdownDisplay::Segmented
                };
                if *watch {
                    self.watch_countdown(display, *ticks)
                } else {
                    self.countdown_line(display)
                }
            }
            Commands::Subjects { format } => {
                let forest = self.session.forest();
                let state = self.session.state();
                match format.as_str() {
                    "json" => to_json(&format_subjects_json(forest, state)),
                    "text" => Ok(format_subjects_text(forest, state)),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Tree {
                subject,
                all,
                format,
            } => {
                let subject = self.find_subject(subject)?;
                let rows = render_subject(subject, self.session.state(), *all);
                match format.as_str() {
                    "json" => to_json(&rows),
                    "text" => Ok(format_tree_text(subject, &rows)),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Resources { subject } => {
                let subject = self.find_subject(subject)?;
                Ok(format_resources_text(subject))
            }
            Commands::Check { key } => {
                self.session.click(key)?;
                Ok(self.describe_node(key))
            }
            Commands::Expand { key } => {
                self.session.toggle_open(key)?;
                Ok(self.describe_node(key))
            }
            Commands::Browse => run_browse(&mut self.session, &self.config.countdown),
            Commands::Normalize => to_json(self.session.forest()),
            Commands::Config {
                command: ConfigCommands::Show,
            } => toml::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to serialize configuration: {}", e))
            }),
        }
    }

    fn find_subject(&self, query: &str) -> Result<&Subject, ApiError> {
        self.session
            .forest()
            .find_subject(query)
            .ok_or_else(|| ApiError::SubjectNotFound(query.to_string()))
    }

    /// `<key> <name>: checked|unchecked[, expanded|collapsed]` after a mutation.
    fn describe_node(&self, key: &str) -> String {
        let Some((subject_id, path)) = NodeKey::parse(key) else {
            return key.to_string();
        };
        let Ok(subject) = self.session.subject(&subject_id) else {
            return key.to_string();
        };
        let Some(node) = subject.find_node(&path) else {
            return key.to_string();
        };
        let parent = &path[..path.len() - 1];
        let state = self.session.state();
        let checked = if state.is_fully_checked(&subject.id, parent, node) {
            "checked"
        } else {
            "unchecked"
        };
        if node.is_leaf() {
            format!("{} {}: {}", key, node.name, checked)
        } else {
            let open = if state.is_open(&NodeKey::new(&subject.id, &path)) {
                "expanded"
            } else {
                "collapsed"
            };
            format!("{} {}: {}, {}", key, node.name, checked, open)
        }
    }

    fn countdown_line(&self, display: CountdownDisplay) -> Result<String, ApiError> {
        let target = self.config.countdown.target_datetime()?;
        let left = time_left(&target, &Local::now());
        Ok(format_countdown(&left, display))
    }

    /// Redraw the countdown in place once per second.
    fn watch_countdown(
        &self,
        display: CountdownDisplay,
        ticks: Option<u64>,
    ) -> Result<String, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start timer runtime: {}", e)))?;

        runtime.block_on(async {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            let mut remaining = ticks;
            loop {
                interval.tick().await;
                let line = self.countdown_line(display)?;
                if remaining == Some(0) {
                    return Ok::<String, ApiError>(line);
                }
                print!("\r{}", line);
                std::io::stdout()
                    .flush()
                    .map_err(|e| ApiError::InputError(format!("Failed to flush stdout: {}", e)))?;
                remaining = remaining.map(|n| n - 1);
            }
        })
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(crate::error::StorageError::Serialization(e)))
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidArgument(format!("Unknown format '{}' (expected text or json)", format))
}
