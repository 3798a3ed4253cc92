// UI layer: interactive menu built on `dialoguer`, progress feedback via
// `indicatif` and colored output via `crossterm`. Every handler returns to
// the menu loop; only terminal I/O failures end the program.

use crate::aggregate::{run_pass, AggregateSummary};
use crate::api::{CompletionTimeSource, HltbClient, SteamClient};
use crate::cli::Args;
use crate::config::Config;
use crate::duration::format_half_hourly;
use crate::error::Error;
use crate::models::{CompletionTimeRecord, Mode, SearchOutcome};
use crate::resolver::{resolve_app, AppLookup};
use crate::session::Session;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// How many times a malformed answer is re-prompted before giving up.
pub const MAX_INPUT_ATTEMPTS: usize = 3;

const MENU_ITEMS: [&str; 6] = [
    "Search by name",
    "Look up by HowLongToBeat ID",
    "Look up by Steam app ID",
    "Steam backlog (unplayed games)",
    "Steam library (all games)",
    "Quit",
];

/// Everything the menu needs for one run: the two service clients and the
/// Steam credentials once they are known.
pub struct App {
    hltb: HltbClient,
    steam: SteamClient,
    session: Option<Session>,
    steam_key: Option<String>,
    steam_id: Option<String>,
}

impl App {
    /// Bad credentials from flags or env are not fatal; the first library
    /// command asks for them again.
    pub fn new(config: &Config, args: &Args) -> crate::error::Result<Self> {
        let session = args.session().unwrap_or_else(|e| {
            tracing::warn!("ignoring Steam credentials from flags: {}", e);
            None
        });
        Ok(App {
            hltb: HltbClient::new(config)?,
            steam: SteamClient::new(config)?,
            session,
            steam_key: args.steam_key.clone(),
            steam_id: args.steam_id.clone(),
        })
    }
}

/// Main interactive menu. Runs until the user picks "Quit".
pub fn main_menu(mut app: App) -> Result<()> {
    loop {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&MENU_ITEMS)
            .default(0)
            .interact()?;
        match selection {
            0 => handle_search(&app)?,
            1 => handle_hltb_id(&app)?,
            2 => handle_steam_app(&app)?,
            3 => handle_library(&mut app, Mode::UnplayedOnly)?,
            4 => handle_library(&mut app, Mode::All)?,
            _ => break,
        }
    }
    Ok(())
}

fn handle_search(app: &App) -> Result<()> {
    let term: String = Input::new()
        .with_prompt("Game name or search phrase")
        .interact_text()?;
    if term.trim().is_empty() {
        println!("{}", "Nothing to search for.".yellow());
        return Ok(());
    }

    let spinner = spinner("Searching HowLongToBeat...")?;
    let outcome = app.hltb.search(&term);
    spinner.finish_and_clear();

    match outcome {
        Ok(SearchOutcome::Found(record)) => print_record(&record),
        Ok(SearchOutcome::NoMatch) => println!("{}", format!("No match for '{}'.", term.trim()).yellow()),
        Err(e) => report_error(&e),
    }
    Ok(())
}

fn handle_hltb_id(app: &App) -> Result<()> {
    let Some(game_id) = prompt_id("HowLongToBeat game ID")? else {
        return Ok(());
    };

    let spinner = spinner("Fetching game page...")?;
    let outcome = app.hltb.game_by_id(game_id);
    spinner.finish_and_clear();

    match outcome {
        Ok(record) => print_record(&record),
        Err(e) => report_error(&e),
    }
    Ok(())
}

fn handle_steam_app(app: &App) -> Result<()> {
    let Some(app_id) = prompt_id("Steam app ID")? else {
        return Ok(());
    };

    let spinner = spinner("Looking up Steam app...")?;
    let outcome = resolve_app(&app.steam, &app.hltb, app_id);
    spinner.finish_and_clear();

    match outcome {
        Ok(AppLookup::Found { steam_name, record }) => {
            println!("Steam: {}", steam_name.bold());
            print_record(&record);
        }
        Ok(AppLookup::NoMatch { steam_name }) => println!(
            "{}",
            format!("'{}' has no HowLongToBeat match.", steam_name).yellow()
        ),
        Ok(AppLookup::Removed) => println!(
            "{}",
            format!("App {} is no longer on the Steam store.", app_id).yellow()
        ),
        Ok(AppLookup::NonGameApplication) => println!(
            "{}",
            format!("App {} is not a game.", app_id).yellow()
        ),
        Err(e) => report_error(&e),
    }
    Ok(())
}

fn handle_library(app: &mut App, mode: Mode) -> Result<()> {
    let Some(session) = ensure_session(app)? else {
        return Ok(());
    };

    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:30}] {pos}/{len} {msg}",
    )?);
    bar.set_message("Checking library...");
    bar.enable_steady_tick(Duration::from_millis(100));

    let outcome = run_pass(&session, mode, &app.steam, &app.steam, &app.hltb, |done, total| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    });
    bar.finish_and_clear();

    match outcome {
        Ok(summary) => print_summary(&summary, mode),
        Err(e) => {
            report_error(&e);
            println!("{}", "The library pass was aborted; no totals were kept.".red());
        }
    }
    Ok(())
}

/// Return the run's session, asking for credentials the first time.
fn ensure_session(app: &mut App) -> Result<Option<Session>> {
    if let Some(session) = &app.session {
        return Ok(Some(session.clone()));
    }

    for _ in 0..MAX_INPUT_ATTEMPTS {
        let key = match &app.steam_key {
            Some(key) => key.clone(),
            None => Password::new().with_prompt("Steam Web API key").interact()?,
        };
        let id = match &app.steam_id {
            Some(id) => id.clone(),
            None => Input::new().with_prompt("Steam ID (64-bit)").interact_text()?,
        };

        match Session::new(&key, &id) {
            Ok(session) => {
                app.session = Some(session.clone());
                return Ok(Some(session));
            }
            Err(e) => {
                println!("{}", e.to_string().red());
                // Whatever came from flags was wrong; ask next time round.
                app.steam_key = None;
                app.steam_id = None;
            }
        }
    }

    println!("{}", "Too many invalid attempts, back to the menu.".yellow());
    Ok(None)
}

fn prompt_id(prompt: &str) -> Result<Option<u64>> {
    let id = retry_input(
        MAX_INPUT_ATTEMPTS,
        || Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
        parse_numeric_id,
        |e| println!("{}", e.to_string().red()),
    )?;
    if id.is_none() {
        println!("{}", "Too many invalid attempts, back to the menu.".yellow());
    }
    Ok(id)
}

/// Ask up to `attempts` times until `parse` accepts the answer. Returns
/// `None` when every attempt was rejected.
pub fn retry_input<T, A, P, R>(
    attempts: usize,
    mut ask: A,
    parse: P,
    mut on_reject: R,
) -> Result<Option<T>>
where
    A: FnMut() -> Result<String>,
    P: Fn(&str) -> crate::error::Result<T>,
    R: FnMut(&Error),
{
    for _ in 0..attempts {
        let answer = ask()?;
        match parse(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => on_reject(&e),
        }
    }
    Ok(None)
}

/// Ids must be plain digits; rejected before any request is made.
pub fn parse_numeric_id(raw: &str) -> crate::error::Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "'{}' is not a valid ID. Must be an integer.",
            trimmed
        )));
    }
    trimmed
        .parse()
        .map_err(|_| Error::InvalidInput(format!("'{}' is too large for an ID.", trimmed)))
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_record(record: &CompletionTimeRecord) {
    println!("{} (HowLongToBeat #{})", record.name.as_str().bold().green(), record.game_id);
    println!("  Main Story:      {}", format_half_hourly(record.main));
    println!("  Main + Extras:   {}", format_half_hourly(record.main_extra));
    println!("  Completionist:   {}", format_half_hourly(record.completionist));
    println!("  All Styles:      {}", format_half_hourly(record.all_styles));
}

fn print_summary(summary: &AggregateSummary, mode: Mode) {
    let title = match mode {
        Mode::All => "Steam library",
        Mode::UnplayedOnly => "Steam backlog",
    };
    println!("{}", title.bold().green());
    println!(
        "  Games checked:   {} of {} owned",
        summary.processed, summary.considered
    );
    println!("  Main Story:      {:.1} hours", summary.totals.main);
    println!("  Main + Extras:   {:.1} hours", summary.totals.main_extra);
    println!("  Completionist:   {:.1} hours", summary.totals.completionist);
    println!("  All Styles:      {:.1} hours", summary.totals.all_styles);
    println!("  Time played:     {:.1} hours", summary.total_playtime_hours());
    println!("  Never played:    {}", summary.never_played);

    if summary.skipped() > 0 {
        println!("{}", format!("  Skipped {} games:", summary.skipped()).yellow());
        println!("    no longer on store:    {}", summary.removed);
        println!("    not a game:            {}", summary.non_game);
        println!("    no HowLongToBeat data: {}", summary.lookup_failures);
    }
}

fn report_error(e: &Error) {
    println!("{}", "An error occurred making your request.".red());
    match e {
        Error::Transport { status, reason, .. } => {
            println!("\tStatus code: {}", status);
            println!("\tResponse: {}", reason);
        }
        other => println!("\t{}", other),
    }
    if e.is_transport() {
        println!("Please try again.");
    }
}
