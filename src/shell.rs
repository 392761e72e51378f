//! Line-oriented interactive session over [`App`].
//!
//! Each input line parses into one [`ShellCommand`], which maps to one or
//! more [`Action`]s. After each command the shell prints whatever changed:
//! the view after navigation, the palette while it is open, and a short
//! status line for preference changes.

use crate::model::types::UnknownVariant;
use crate::model::{Contact, Employee, Module, Opportunity, Stage};
use crate::ui::app::{Action, App, DragPhase, Outcome, Panel};
use crate::ui::components::theme::ThemeMode;
use crate::ui::render;
use crate::ui::shortcuts::{Focus, Key, KeyEvent, KeyParseError};
use anyhow::Context;
use std::io::{BufRead, Write};
use thiserror::Error;

pub const PROMPT: &str = "erp> ";

pub const HELP: &str = "\
Commands:
  show                          current view
  nav [FILTER]                  sidebar entries
  jump TOKEN                    quick-jump by id or code
  key KEY...                    key events, e.g. `key g c`, `key ctrl+k`
  palette [QUERY]               open the command palette
  type TEXT                     set the palette query
  up | down | enter | esc       palette navigation
  go MODULE                     sidebar click
  emp add ID FIRST NAME [CODE]  add employee
  emp update ID FIRST NAME CODE update employee
  emp rm ID                     remove employee
  contact new NAME|CITY|EMAIL   create contact
  contact update ID NAME|CITY|EMAIL
  contact search [TEXT]         filter the contacts list
  opp add ID OWNER AMOUNT TITLE add opportunity (stage open)
  opp move ID STAGE             move opportunity (open, qualified, won, lost)
  article sellable | buyable    toggle article flags
  article picker [QUERY]        production-type picker
  article pick ID               choose production type
  article close                 close the picker
  theme [light|dark|toggle]     switch theme
  sidebar collapse|expand|toggle
  sidebar drag FROM TO          resize sidebar
  panel drag FROM TO            resize contacts list
  focus page|input              who owns keyboard focus
  help
  quit";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command '{0}' (try `help`)")]
    UnknownCommand(String),

    #[error("{command}: missing {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{command}: invalid {what} '{value}'")]
    InvalidArgument {
        command: &'static str,
        what: &'static str,
        value: String,
    },

    #[error("unbalanced quotes")]
    UnbalancedQuotes,

    #[error(transparent)]
    Key(#[from] KeyParseError),

    #[error(transparent)]
    Variant(#[from] UnknownVariant),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarCommand {
    Collapse,
    Expand,
    Toggle,
    Drag(i32, i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArticleCommand {
    ToggleSellable,
    ToggleBuyable,
    Picker(String),
    Pick(String),
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Show,
    Nav(String),
    Jump(String),
    Keys(Vec<KeyEvent>),
    Palette(Option<String>),
    Type(String),
    Go(Module),
    AddEmployee(Employee),
    UpdateEmployee(Employee),
    RemoveEmployee(String),
    NewContact {
        name: String,
        city: String,
        email: String,
    },
    UpdateContact(Contact),
    SearchContacts(String),
    AddOpportunity(Opportunity),
    MoveOpportunity {
        id: String,
        stage: Stage,
    },
    Article(ArticleCommand),
    Theme(Option<ThemeMode>),
    Sidebar(SidebarCommand),
    PanelDrag(i32, i32),
    Focus(Focus),
    Quit,
    Blank,
}

fn required<'a>(
    it: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ShellError> {
    it.next()
        .ok_or(ShellError::MissingArgument { command, what })
}

fn coordinate(value: &str, command: &'static str) -> Result<i32, ShellError> {
    value.parse().map_err(|_| ShellError::InvalidArgument {
        command,
        what: "coordinate",
        value: value.to_string(),
    })
}

fn drag_args<'a>(
    it: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(i32, i32), ShellError> {
    let from = coordinate(required(it, command, "FROM")?, command)?;
    let to = coordinate(required(it, command, "TO")?, command)?;
    Ok((from, to))
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let tokens = shell_words::split(line).map_err(|_| ShellError::UnbalancedQuotes)?;
        let Some((head, tail)) = tokens.split_first() else {
            return Ok(Self::Blank);
        };
        let rest = tail.join(" ");
        let mut args = tail.iter().map(String::as_str);

        let cmd = match head.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "show" => Self::Show,
            "nav" => Self::Nav(rest),
            "jump" | "j" => Self::Jump(required(&mut args, "jump", "TOKEN")?.to_string()),
            "key" | "keys" => {
                let keys = args
                    .map(str::parse)
                    .collect::<Result<Vec<KeyEvent>, _>>()?;
                if keys.is_empty() {
                    return Err(ShellError::MissingArgument {
                        command: "key",
                        what: "KEY",
                    });
                }
                Self::Keys(keys)
            }
            "palette" | "p" => Self::Palette((!rest.is_empty()).then_some(rest)),
            "type" => Self::Type(rest),
            "up" => Self::Keys(vec![KeyEvent::plain(Key::Up)]),
            "down" => Self::Keys(vec![KeyEvent::plain(Key::Down)]),
            "enter" => Self::Keys(vec![KeyEvent::plain(Key::Enter)]),
            "esc" => Self::Keys(vec![KeyEvent::plain(Key::Esc)]),
            "go" => Self::Go(required(&mut args, "go", "MODULE")?.parse()?),
            "emp" => match required(&mut args, "emp", "add|update|rm")? {
                "add" => {
                    let id = required(&mut args, "emp add", "ID")?;
                    let first = required(&mut args, "emp add", "FIRST")?;
                    let name = required(&mut args, "emp add", "NAME")?;
                    let code = args.next().unwrap_or(id);
                    Self::AddEmployee(Employee::new(id, first, name, code))
                }
                "update" => {
                    let id = required(&mut args, "emp update", "ID")?;
                    let first = required(&mut args, "emp update", "FIRST")?;
                    let name = required(&mut args, "emp update", "NAME")?;
                    let code = required(&mut args, "emp update", "CODE")?;
                    Self::UpdateEmployee(Employee::new(id, first, name, code))
                }
                "rm" | "remove" => {
                    Self::RemoveEmployee(required(&mut args, "emp rm", "ID")?.to_string())
                }
                other => {
                    return Err(ShellError::InvalidArgument {
                        command: "emp",
                        what: "subcommand",
                        value: other.to_string(),
                    });
                }
            },
            "contact" => {
                let sub = required(&mut args, "contact", "new|update|search")?;
                let fields_after = |n: usize| -> Vec<String> {
                    let fields = tail[n..].join(" ");
                    let mut parts = fields.splitn(3, '|').map(|p| p.trim().to_string());
                    (0..3).map(|_| parts.next().unwrap_or_default()).collect()
                };
                match sub {
                    "new" => {
                        let f = fields_after(1);
                        Self::NewContact {
                            name: f[0].clone(),
                            city: f[1].clone(),
                            email: f[2].clone(),
                        }
                    }
                    "update" => {
                        let id = required(&mut args, "contact update", "ID")?;
                        let f = fields_after(2);
                        if f[0].is_empty() {
                            return Err(ShellError::MissingArgument {
                                command: "contact update",
                                what: "NAME",
                            });
                        }
                        Self::UpdateContact(Contact::new(id, &f[0], &f[1], &f[2]))
                    }
                    "search" => Self::SearchContacts(tail[1..].join(" ")),
                    other => {
                        return Err(ShellError::InvalidArgument {
                            command: "contact",
                            what: "subcommand",
                            value: other.to_string(),
                        });
                    }
                }
            }
            "opp" => match required(&mut args, "opp", "add|move")? {
                "add" => {
                    let id = required(&mut args, "opp add", "ID")?.to_string();
                    let owner = required(&mut args, "opp add", "OWNER")?.to_string();
                    let raw = required(&mut args, "opp add", "AMOUNT")?;
                    let amount = raw.parse().map_err(|_| ShellError::InvalidArgument {
                        command: "opp add",
                        what: "amount",
                        value: raw.to_string(),
                    })?;
                    let title = args.collect::<Vec<_>>().join(" ");
                    if title.is_empty() {
                        return Err(ShellError::MissingArgument {
                            command: "opp add",
                            what: "TITLE",
                        });
                    }
                    Self::AddOpportunity(Opportunity {
                        id,
                        title,
                        owner,
                        amount,
                        stage: Stage::Open,
                    })
                }
                "move" => {
                    let id = required(&mut args, "opp move", "ID")?.to_string();
                    let stage = required(&mut args, "opp move", "STAGE")?.parse()?;
                    Self::MoveOpportunity { id, stage }
                }
                other => {
                    return Err(ShellError::InvalidArgument {
                        command: "opp",
                        what: "subcommand",
                        value: other.to_string(),
                    });
                }
            },
            "article" => match required(
                &mut args,
                "article",
                "sellable|buyable|picker|pick|close",
            )? {
                "sellable" => Self::Article(ArticleCommand::ToggleSellable),
                "buyable" => Self::Article(ArticleCommand::ToggleBuyable),
                "picker" => Self::Article(ArticleCommand::Picker(tail[1..].join(" "))),
                "pick" => Self::Article(ArticleCommand::Pick(
                    required(&mut args, "article pick", "ID")?.to_string(),
                )),
                "close" => Self::Article(ArticleCommand::Close),
                other => {
                    return Err(ShellError::InvalidArgument {
                        command: "article",
                        what: "subcommand",
                        value: other.to_string(),
                    });
                }
            },
            "theme" => match args.next() {
                None | Some("toggle") => Self::Theme(None),
                Some(mode) => Self::Theme(Some(mode.parse()?)),
            },
            "sidebar" => match required(&mut args, "sidebar", "collapse|expand|toggle|drag")? {
                "collapse" => Self::Sidebar(SidebarCommand::Collapse),
                "expand" => Self::Sidebar(SidebarCommand::Expand),
                "toggle" => Self::Sidebar(SidebarCommand::Toggle),
                "drag" => {
                    let (from, to) = drag_args(&mut args, "sidebar drag")?;
                    Self::Sidebar(SidebarCommand::Drag(from, to))
                }
                other => {
                    return Err(ShellError::InvalidArgument {
                        command: "sidebar",
                        what: "subcommand",
                        value: other.to_string(),
                    });
                }
            },
            "panel" => {
                let sub = required(&mut args, "panel", "drag")?;
                if sub != "drag" {
                    return Err(ShellError::InvalidArgument {
                        command: "panel",
                        what: "subcommand",
                        value: sub.to_string(),
                    });
                }
                let (from, to) = drag_args(&mut args, "panel drag")?;
                Self::PanelDrag(from, to)
            }
            "focus" => match required(&mut args, "focus", "page|input")? {
                "page" => Self::Focus(Focus::Page),
                "input" => Self::Focus(Focus::TextInput),
                other => {
                    return Err(ShellError::InvalidArgument {
                        command: "focus",
                        what: "target",
                        value: other.to_string(),
                    });
                }
            },
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(cmd)
    }
}

fn drag(app: &mut App, panel: Panel, from: i32, to: i32) -> Outcome {
    app.handle(Action::Drag {
        panel,
        phase: DragPhase::Begin(from),
    });
    app.handle(Action::Drag {
        panel,
        phase: DragPhase::Move(to),
    });
    app.handle(Action::Drag {
        panel,
        phase: DragPhase::End,
    })
}

/// Apply one command. Returns the outcome of the last action it produced.
pub fn execute(app: &mut App, cmd: ShellCommand) -> Outcome {
    match cmd {
        ShellCommand::Help
        | ShellCommand::Show
        | ShellCommand::Nav(_)
        | ShellCommand::Quit
        | ShellCommand::Blank => Outcome::Nothing,
        ShellCommand::Jump(token) => app.handle(Action::QuickJump(token)),
        ShellCommand::Keys(keys) => keys
            .into_iter()
            .fold(Outcome::Nothing, |_, k| app.handle(Action::Key(k))),
        ShellCommand::Palette(None) => app.handle(Action::OpenPalette),
        ShellCommand::Palette(Some(q)) => {
            app.handle(Action::OpenPalette);
            app.handle(Action::PaletteQuery(q))
        }
        ShellCommand::Type(text) => {
            if !app.palette().open {
                app.handle(Action::OpenPalette);
            }
            app.handle(Action::PaletteQuery(text))
        }
        ShellCommand::Go(module) => app.handle(Action::Go(module)),
        ShellCommand::AddEmployee(e) => app.handle(Action::AddEmployee(e)),
        ShellCommand::UpdateEmployee(e) => app.handle(Action::UpdateEmployee(e)),
        ShellCommand::RemoveEmployee(id) => app.handle(Action::RemoveEmployee(id)),
        ShellCommand::NewContact { name, city, email } => {
            app.handle(Action::CreateContact { name, city, email })
        }
        ShellCommand::UpdateContact(contact) => app.handle(Action::UpdateContact(contact)),
        ShellCommand::SearchContacts(query) => {
            // The search field lives on the contacts view.
            if app.route().module != Module::Contacts {
                app.handle(Action::Go(Module::Contacts));
            }
            app.handle(Action::FilterContacts(query))
        }
        ShellCommand::AddOpportunity(opp) => app.handle(Action::AddOpportunity(opp)),
        ShellCommand::Article(cmd) => {
            if app.route().module != Module::Articles {
                app.handle(Action::Go(Module::Articles));
            }
            match cmd {
                ArticleCommand::ToggleSellable => app.handle(Action::ToggleSellable),
                ArticleCommand::ToggleBuyable => app.handle(Action::ToggleBuyable),
                ArticleCommand::Picker(query) => {
                    app.handle(Action::OpenProdTypePicker);
                    app.handle(Action::ProdTypeQuery(query))
                }
                ArticleCommand::Pick(id) => app.handle(Action::PickProdType(id)),
                ArticleCommand::Close => app.handle(Action::CloseProdTypePicker),
            }
        }
        ShellCommand::MoveOpportunity { id, stage } => {
            app.handle(Action::MoveOpportunity { id, stage })
        }
        ShellCommand::Theme(None) => app.handle(Action::ToggleTheme),
        ShellCommand::Theme(Some(mode)) => app.handle(Action::SetTheme(mode)),
        ShellCommand::Sidebar(SidebarCommand::Toggle) => app.handle(Action::ToggleSidebar),
        ShellCommand::Sidebar(SidebarCommand::Collapse) => {
            if app.sidebar().is_collapsed() {
                Outcome::Nothing
            } else {
                app.handle(Action::ToggleSidebar)
            }
        }
        ShellCommand::Sidebar(SidebarCommand::Expand) => {
            if app.sidebar().is_collapsed() {
                app.handle(Action::ToggleSidebar)
            } else {
                Outcome::Nothing
            }
        }
        ShellCommand::Sidebar(SidebarCommand::Drag(from, to)) => {
            drag(app, Panel::Sidebar, from, to)
        }
        ShellCommand::PanelDrag(from, to) => drag(app, Panel::Contacts, from, to),
        ShellCommand::Focus(focus) => app.handle(Action::SetFocus(focus)),
    }
}

/// Text to print after `cmd` produced `outcome`.
pub fn describe(app: &App, cmd: &ShellCommand, outcome: &Outcome) -> String {
    let theme = app.theme_palette();
    match cmd {
        ShellCommand::Help => return format!("{HELP}\n"),
        ShellCommand::Show => {
            return render::render_view_with(app.route(), app.store(), &app.view_state(), &theme);
        }
        ShellCommand::Nav(filter) => return render::render_nav(app.route(), filter, &theme),
        _ => {}
    }
    match outcome {
        Outcome::Navigated(route) => {
            format!(
                "→ {route}\n{}",
                render::render_view_with(route, app.store(), &app.view_state(), &theme)
            )
        }
        Outcome::ViewChanged => {
            render::render_view_with(app.route(), app.store(), &app.view_state(), &theme)
        }
        Outcome::PaletteOpened | Outcome::PaletteChanged => {
            render::render_palette(app.palette(), &theme)
        }
        Outcome::PaletteClosed => "palette closed\n".to_string(),
        Outcome::RecordsChanged => "ok\n".to_string(),
        Outcome::PrefsChanged => {
            let prefs = app.prefs();
            let sidebar = if app.sidebar().is_collapsed() {
                "collapsed".to_string()
            } else {
                app.sidebar().width().to_string()
            };
            format!(
                "theme={} sidebar={sidebar} contacts-panel={}\n",
                prefs.theme,
                app.contacts_panel().width()
            )
        }
        Outcome::NotFound(id) => format!("not found: {id}\n"),
        Outcome::Nothing => String::new(),
    }
}

/// Read commands from `input` until EOF or `quit`.
pub fn run(app: &mut App, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    prompt(&mut output)?;
    for (lineno, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading shell input line {}", lineno + 1))?;
        let text = match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(cmd) => {
                tracing::debug!(?cmd, "shell command");
                let outcome = execute(app, cmd.clone());
                describe(app, &cmd, &outcome)
            }
            Err(e) => format!("error: {e}\n"),
        };
        output
            .write_all(text.as_bytes())
            .context("writing shell output")?;
        prompt(&mut output)?;
    }
    Ok(())
}

fn prompt(output: &mut impl Write) -> anyhow::Result<()> {
    output
        .write_all(PROMPT.as_bytes())
        .and_then(|()| output.flush())
        .context("writing shell prompt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordStore;
    use crate::prefs::{MemoryStore, Preferences};
    use crate::ui::route::Route;

    fn app() -> App {
        App::with_preferences(
            RecordStore::demo(),
            Box::new(MemoryStore::new()),
            Preferences::default(),
        )
    }

    fn session(script: &str) -> (App, String) {
        let mut app = app();
        let mut out = Vec::new();
        run(&mut app, script.as_bytes(), &mut out).unwrap();
        (app, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_core_commands() {
        assert_eq!(
            ShellCommand::parse("jump apl").unwrap(),
            ShellCommand::Jump("apl".into())
        );
        assert_eq!(
            ShellCommand::parse("key g c").unwrap(),
            ShellCommand::Keys(vec![KeyEvent::char('g'), KeyEvent::char('c')])
        );
        assert_eq!(
            ShellCommand::parse("go kontakte").unwrap(),
            ShellCommand::Go(Module::Contacts)
        );
        assert_eq!(
            ShellCommand::parse("palette").unwrap(),
            ShellCommand::Palette(None)
        );
        assert_eq!(ShellCommand::parse("   ").unwrap(), ShellCommand::Blank);
        assert_eq!(
            ShellCommand::parse("emp add MKR Marie \"van Kraus\"").unwrap(),
            ShellCommand::AddEmployee(Employee::new("MKR", "Marie", "van Kraus", "MKR"))
        );
    }

    #[test]
    fn contact_fields_split_on_pipes() {
        assert_eq!(
            ShellCommand::parse("contact new Delta NV | Gent | info@delta.be").unwrap(),
            ShellCommand::NewContact {
                name: "Delta NV".into(),
                city: "Gent".into(),
                email: "info@delta.be".into(),
            }
        );
        assert_eq!(
            ShellCommand::parse("contact new").unwrap(),
            ShellCommand::NewContact {
                name: String::new(),
                city: String::new(),
                email: String::new(),
            }
        );
    }

    #[test]
    fn parse_errors_are_descriptive() {
        assert_eq!(
            ShellCommand::parse("frobnicate").unwrap_err(),
            ShellError::UnknownCommand("frobnicate".into())
        );
        assert!(matches!(
            ShellCommand::parse("jump").unwrap_err(),
            ShellError::MissingArgument { command: "jump", .. }
        ));
        assert!(matches!(
            ShellCommand::parse("opp move O001 later").unwrap_err(),
            ShellError::Variant(_)
        ));
        assert!(matches!(
            ShellCommand::parse("key hyper+x").unwrap_err(),
            ShellError::Key(_)
        ));
        assert_eq!(
            ShellCommand::parse("type \"open").unwrap_err(),
            ShellError::UnbalancedQuotes
        );
        assert!(matches!(
            ShellCommand::parse("sidebar drag 0 wide").unwrap_err(),
            ShellError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn session_jump_prints_route_and_view() {
        let (app, out) = session("jump c002\nquit\njump apl\n");
        assert!(out.contains("→ contacts/detail/C002"));
        assert!(out.contains("Diegem"));
        assert_eq!(app.route(), &Route::detail(Module::Contacts, "C002"));
    }

    #[test]
    fn session_palette_flow() {
        let (app, out) = session("palette\ntype lease\nenter\n");
        assert!(out.contains("> lease"));
        assert!(!app.palette().open);
        assert_eq!(app.route().module, Module::Contacts);
        assert_eq!(app.route().id.as_deref(), Some("C003"));
    }

    #[test]
    fn session_reports_errors_and_continues() {
        let (app, out) = session("nope\nkey g e\n");
        assert!(out.contains("error: unknown command 'nope'"));
        assert_eq!(app.route(), &Route::module(Module::Employees));
    }

    #[test]
    fn sidebar_collapse_is_idempotent() {
        let mut app = app();
        execute(&mut app, ShellCommand::Sidebar(SidebarCommand::Collapse));
        assert!(app.sidebar().is_collapsed());
        assert_eq!(
            execute(&mut app, ShellCommand::Sidebar(SidebarCommand::Collapse)),
            Outcome::Nothing
        );
        execute(&mut app, ShellCommand::Sidebar(SidebarCommand::Expand));
        assert!(!app.sidebar().is_collapsed());
    }

    #[test]
    fn contact_search_and_update() {
        let (app, out) = session("contact search ab\ncontact update C002 ABAX NV | Zaventem | hi@abax.com\n");
        assert!(out.contains("Suche: ab"));
        assert_eq!(app.contact_query(), "ab");
        assert_eq!(app.store().contact("C002").unwrap().city, "Zaventem");
        assert_eq!(app.route(), &Route::detail(Module::Contacts, "C002"));

        assert!(matches!(
            ShellCommand::parse("contact update C002").unwrap_err(),
            ShellError::MissingArgument { what: "NAME", .. }
        ));
    }

    #[test]
    fn opportunity_add_parses_title_and_amount() {
        assert_eq!(
            ShellCommand::parse("opp add O010 TPO 7500 Fleet add-on").unwrap(),
            ShellCommand::AddOpportunity(Opportunity {
                id: "O010".into(),
                title: "Fleet add-on".into(),
                owner: "TPO".into(),
                amount: 7500,
                stage: Stage::Open,
            })
        );
        assert!(matches!(
            ShellCommand::parse("opp add O010 TPO lots Title").unwrap_err(),
            ShellError::InvalidArgument { what: "amount", .. }
        ));
        let (app, out) = session("opp add O010 TPO 7500 Fleet add-on\njump o010\n");
        assert!(out.contains("7.500"));
        assert_eq!(app.route(), &Route::board("O010"));
    }

    #[test]
    fn article_form_session() {
        let (app, out) = session("article sellable\narticle picker prem\narticle pick pt002\n");
        assert_eq!(app.route().module, Module::Articles);
        assert!(out.contains("[x] Kann verkauft werden"));
        assert!(out.contains("> prem"));
        assert!(out.contains("Produktionstyp: Premium"));
        assert!(app.article().sellable);
        assert!(!app.article().picker_open());

        let (_, out) = session("article pick PT999\n");
        assert!(out.contains("not found: PT999"));
    }

    #[test]
    fn closed_output_is_reported_with_context() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = run(&mut app(), "show\n".as_bytes(), Closed).unwrap_err();
        assert_eq!(err.to_string(), "writing shell prompt");
    }

    #[test]
    fn prefs_status_line() {
        let (_, out) = session("theme dark\nsidebar drag 0 40\n");
        assert!(out.contains("theme=dark"));
        assert!(out.contains("sidebar=300"));
    }
}
