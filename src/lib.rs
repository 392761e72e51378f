//! `erp`: keyboard-first ERP demo console.
//!
//! The library holds the record store, the search index, the quick-jump
//! resolver, the command palette and the keyboard dispatcher. The binary in
//! `main.rs` only parses arguments and maps [`CliError`] to an exit code.

pub mod model;
pub mod prefs;
pub mod search;
pub mod shell;
pub mod ui;

use crate::model::RecordStore;
use crate::prefs::{
    CONTACTS_WIDTH_KEY, FileStore, KeyValueStore, MemoryStore, Preferences, PrefsError,
    SIDEBAR_WIDTH_KEY, THEME_KEY,
};
use crate::search::{JumpOutcome, SearchIndex};
use crate::ui::app::{Action, App};
use crate::ui::components::palette::PaletteState;
use crate::ui::components::theme::{ThemeMode, ThemePalette};
use crate::ui::render;
use crate::ui::resize::{CONTACTS_PANEL, SIDEBAR};
use crate::ui::shortcuts::KeyEvent;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "erp",
    version,
    about = "Keyboard-first ERP console: quick-jump, command palette, go-to shortcuts"
)]
pub struct Cli {
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Preferences file (defaults to $ERP_PREFS_PATH or the config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Jump to a record by exact id or code
    Jump { token: String },
    /// List palette entries matching QUERY, grouped by category
    Palette { query: Option<String> },
    /// Replay key events (e.g. `g c`, `ctrl+k`, `/`, `esc`) and print the final state
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },
    /// Dump the full search index
    Index,
    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        command: Option<PrefsCommand>,
    },
    /// Interactive session over stdin
    Shell,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PrefsCommand {
    Show,
    Theme {
        #[arg(value_enum)]
        mode: ThemeArg,
    },
    Sidebar { px: u32 },
    ContactsPanel { px: u32 },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
    /// Forget the stored theme and follow the environment
    System,
    Toggle,
}

#[derive(Debug)]
pub struct ParsedCli {
    pub cli: Cli,
}

#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    pub code: i32,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub retryable: bool,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

impl CliError {
    fn usage(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            code: 2,
            kind: "usage",
            message: message.into(),
            hint: hint.map(str::to_string),
            retryable: false,
        }
    }

    fn prefs(err: PrefsError) -> Self {
        Self {
            code: 3,
            kind: "prefs",
            message: err.to_string(),
            hint: Some("check --prefs / ERP_PREFS_PATH".to_string()),
            retryable: true,
        }
    }

    fn io(err: impl std::fmt::Display) -> Self {
        Self {
            code: 1,
            kind: "io",
            message: err.to_string(),
            hint: None,
            retryable: false,
        }
    }
}

impl From<PrefsError> for CliError {
    fn from(err: PrefsError) -> Self {
        Self::prefs(err)
    }
}

pub type CliResult<T = ()> = Result<T, CliError>;

/// Parse argv. Help and version requests come back as a `CliError` with
/// code 0 and the rendered text as the message.
pub fn parse_cli(args: Vec<String>) -> CliResult<ParsedCli> {
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(ParsedCli { cli }),
        Err(err) => {
            use clap::error::ErrorKind;
            match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Err(CliError {
                    code: 0,
                    kind: "help",
                    message: err.to_string(),
                    hint: None,
                    retryable: false,
                }),
                _ => Err(CliError::usage(
                    err.to_string().trim().trim_start_matches("error: ").to_string(),
                    Some("run `erp --help`"),
                )),
            }
        }
    }
}

/// Install the stderr subscriber. `-v` wins over `ERP_LOG`/`RUST_LOG`.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("ERP_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_prefs_store(path: Option<&PathBuf>) -> Box<dyn KeyValueStore> {
    match path {
        Some(p) => Box::new(FileStore::new(p)),
        None => match FileStore::open_default() {
            Ok(store) => {
                debug!(path = %store.path().display(), "preferences file");
                Box::new(store)
            }
            Err(e) => {
                warn!(error = %e, "no preferences location, changes will not persist");
                Box::new(MemoryStore::new())
            }
        },
    }
}

fn print_json(value: &impl Serialize) -> CliResult {
    let out = serde_json::to_string_pretty(value).map_err(CliError::io)?;
    println!("{out}");
    Ok(())
}

fn parse_keys(keys: &[String]) -> CliResult<Vec<KeyEvent>> {
    keys.iter()
        .map(|k| {
            k.parse::<KeyEvent>().map_err(|e| CliError {
                code: 2,
                kind: "key",
                message: e.to_string(),
                hint: Some("keys look like `g`, `/`, `ctrl+k`, `esc`, `enter`".to_string()),
                retryable: false,
            })
        })
        .collect()
}

pub fn run_with_parsed(parsed: ParsedCli) -> CliResult {
    let cli = parsed.cli;
    init_logging(cli.verbose);
    let json = cli.json;
    let store = RecordStore::demo();

    match cli.command {
        Commands::Jump { token } => run_jump(&token, store, cli.prefs.as_ref(), json),
        Commands::Palette { query } => {
            let prefs = Preferences::load(open_prefs_store(cli.prefs.as_ref()).as_ref());
            run_palette(query.as_deref(), &store, prefs.theme, json)
        }
        Commands::Keys { keys } => {
            let events = parse_keys(&keys)?;
            let mut app = App::new(store, open_prefs_store(cli.prefs.as_ref()));
            for ev in events {
                app.handle(Action::Key(ev));
            }
            if json {
                return print_json(&json!({
                    "route": app.route(),
                    "palette": {
                        "open": app.palette().open,
                        "query": app.palette().query,
                    },
                    "pending": app.keys().is_pending(),
                }));
            }
            let theme = app.theme_palette();
            println!("→ {}", app.route());
            if app.palette().open {
                print!("{}", render::render_palette(app.palette(), &theme));
            } else {
                print!(
                    "{}",
                    render::render_view_with(app.route(), app.store(), &app.view_state(), &theme)
                );
            }
            Ok(())
        }
        Commands::Index => {
            let index = SearchIndex::from_store(&store);
            if json {
                return print_json(&index.entries());
            }
            print!("{}", render::render_index(&index));
            Ok(())
        }
        Commands::Prefs { command } => {
            let mut kv = open_prefs_store(cli.prefs.as_ref());
            run_prefs(command.unwrap_or(PrefsCommand::Show), kv.as_mut(), json)
        }
        Commands::Shell => {
            let mut app = App::new(store, open_prefs_store(cli.prefs.as_ref()));
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            shell::run(&mut app, stdin.lock(), stdout.lock())
                .map_err(|e| CliError::io(format!("{e:#}")))
        }
    }
}

fn run_jump(token: &str, store: RecordStore, prefs: Option<&PathBuf>, json: bool) -> CliResult {
    let outcome = search::resolve(token, &store);
    if json {
        return print_json(&outcome);
    }
    let prefs = Preferences::load(open_prefs_store(prefs).as_ref());
    let theme = ThemePalette::for_mode(prefs.theme);
    match outcome {
        JumpOutcome::Navigate { route } => {
            println!("→ {route}");
            print!("{}", render::render_view(&route, &store, &theme));
        }
        JumpOutcome::OpenSearch => {
            println!("open search: no record with id or code '{}'", token.trim());
            let mut palette = PaletteState::new(ui::components::palette::items_from_index(
                &SearchIndex::from_store(&store),
            ));
            palette.open_with_query(token);
            print!("{}", render::render_palette(&palette, &theme));
        }
    }
    Ok(())
}

fn run_palette(query: Option<&str>, store: &RecordStore, theme: ThemeMode, json: bool) -> CliResult {
    let index = SearchIndex::from_store(store);
    let query = query.unwrap_or_default();
    if json {
        let hits: Vec<_> = index
            .filter(query)
            .into_iter()
            .map(|e| {
                json!({
                    "category": e.category(),
                    "entry": e,
                    "route": e.target_route(),
                })
            })
            .collect();
        return print_json(&hits);
    }
    let mut palette = PaletteState::new(ui::components::palette::items_from_index(&index));
    palette.open_with_query(query);
    print!("{}", render::render_palette(&palette, &ThemePalette::for_mode(theme)));
    Ok(())
}

fn run_prefs(command: PrefsCommand, kv: &mut dyn KeyValueStore, json: bool) -> CliResult {
    match command {
        PrefsCommand::Show => {}
        PrefsCommand::Theme { mode } => {
            let value = match mode {
                ThemeArg::Light => ThemeMode::Light.as_str(),
                ThemeArg::Dark => ThemeMode::Dark.as_str(),
                ThemeArg::System => "",
                ThemeArg::Toggle => Preferences::load(&*kv).theme.toggled().as_str(),
            };
            kv.set(THEME_KEY, value)?;
        }
        PrefsCommand::Sidebar { px } => {
            kv.set(SIDEBAR_WIDTH_KEY, &SIDEBAR.clamp(i64::from(px)).to_string())?;
        }
        PrefsCommand::ContactsPanel { px } => {
            kv.set(
                CONTACTS_WIDTH_KEY,
                &CONTACTS_PANEL.clamp(i64::from(px)).to_string(),
            )?;
        }
    }

    // Read-back goes through the same loader the app uses.
    let prefs = Preferences::load(&*kv);
    if json {
        return print_json(&json!({
            "theme": prefs.theme,
            "theme_stored": prefs.theme_stored,
            "sidebar_width": prefs.sidebar_width,
            "contacts_width": prefs.contacts_width,
        }));
    }
    let source = if prefs.theme_stored { "stored" } else { "system" };
    println!(
        "{} {} ({source})",
        console::style("theme").bold(),
        prefs.theme
    );
    println!("{} {}", console::style("sidebar").bold(), prefs.sidebar_width);
    println!(
        "{} {}",
        console::style("contacts-panel").bold(),
        prefs.contacts_width
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("erp")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn global_flags_after_subcommand() {
        let parsed = parse_cli(argv(&["jump", "apl", "--json", "-vv"])).unwrap();
        assert!(parsed.cli.json);
        assert_eq!(parsed.cli.verbose, 2);
        assert!(matches!(parsed.cli.command, Commands::Jump { ref token } if token == "apl"));
    }

    #[test]
    fn prefs_subcommands_parse() {
        let parsed = parse_cli(argv(&["prefs", "theme", "system"])).unwrap();
        assert!(matches!(
            parsed.cli.command,
            Commands::Prefs {
                command: Some(PrefsCommand::Theme {
                    mode: ThemeArg::System
                })
            }
        ));
        let parsed = parse_cli(argv(&["prefs", "contacts-panel", "500"])).unwrap();
        assert!(matches!(
            parsed.cli.command,
            Commands::Prefs {
                command: Some(PrefsCommand::ContactsPanel { px: 500 })
            }
        ));
    }

    #[test]
    fn usage_errors_map_to_code_two() {
        let err = parse_cli(argv(&["jump"])).unwrap_err();
        assert_eq!(err.code, 2);
        assert_eq!(err.kind, "usage");

        let err = parse_cli(argv(&["--help"])).unwrap_err();
        assert_eq!(err.code, 0);
        assert!(err.message.contains("quick-jump"));
    }

    #[test]
    fn bad_key_is_reported() {
        let err = parse_keys(&["hyper+k".to_string()]).unwrap_err();
        assert_eq!(err.kind, "key");
        assert!(err.message.contains("hyper"));
    }

    #[test]
    fn prefs_commands_write_clamped_values() {
        let mut kv = MemoryStore::new();
        run_prefs(PrefsCommand::Sidebar { px: 9999 }, &mut kv, true).unwrap();
        assert_eq!(kv.get(SIDEBAR_WIDTH_KEY).unwrap().as_deref(), Some("480"));

        run_prefs(PrefsCommand::Theme { mode: ThemeArg::Dark }, &mut kv, true).unwrap();
        run_prefs(PrefsCommand::Theme { mode: ThemeArg::Toggle }, &mut kv, true).unwrap();
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        run_prefs(PrefsCommand::Theme { mode: ThemeArg::System }, &mut kv, true).unwrap();
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some(""));
    }
}
