// Thin terminal shell over the screen controller.

use crate::domain::{LocalZone, TimeOfDay};
use crate::frameworks::config;
use crate::interface_adapters::clients::booking::BookingClient;
use crate::interface_adapters::time::{NamedZone, SystemClock, SystemZone};
use crate::use_cases::{Notice, ScreenController, ScreenView, UiEvent};
use std::fmt::Write as _;
use std::io::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  start HH.MM      pick a start time
  end HH.MM        pick an end time
  headcount N      set the number of attendees
  check            ask whether the room is free
  create           book the room (after a successful check)
  reset            clear the selection
  show             redraw the screen
  quit             leave";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so they never interleave with the screen on stdout.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn build_controller() -> Result<ScreenController> {
    let base_url = config::booking_api_url();
    let timeout = config::booking_request_timeout();
    let client = BookingClient::new(&base_url, timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize booking client: {e}")))?;
    tracing::debug!(
        endpoint = %client.endpoint(),
        timeout_ms = timeout.as_millis(),
        "booking client configured"
    );

    let zone: Arc<dyn LocalZone> = match config::booking_timezone() {
        Some(tz) => {
            tracing::info!(timezone = %tz, "using configured booking zone");
            Arc::new(NamedZone(tz))
        }
        None => Arc::new(SystemZone),
    };

    Ok(ScreenController::new(
        Arc::new(SystemClock),
        zone,
        Arc::new(client),
    ))
}

pub async fn run() -> Result<()> {
    init_runtime();
    let mut controller = build_controller()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render(&controller.view()));
    println!("type `help` for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(unknown) => {
                        println!("unknown command {unknown:?}\n{HELP}");
                        continue;
                    }
                };

                match command {
                    Command::Quit => break,
                    Command::Help => println!("{HELP}"),
                    Command::Show => println!("{}", render(&controller.view())),
                    Command::Event(event) => {
                        if let Some(notice) = controller.handle(event) {
                            println!("{}", render_notice(&notice));
                        }
                        println!("{}", render(&controller.view()));
                    }
                }
            }
            Some(outcome) = controller.next_outcome() => {
                if let Some(notice) = controller.apply(outcome) {
                    println!("{}", render_notice(&notice));
                    println!("{}", render(&controller.view()));
                }
            }
        }
    }

    tracing::info!("booking screen closed");
    Ok(())
}

// Blank lines parse to `None`; unknown verbs come back as the error.
fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.collect::<Vec<_>>().join(" ");

    let command = match verb.to_ascii_lowercase().as_str() {
        "start" => Command::Event(UiEvent::StartSelected(arg)),
        "end" => Command::Event(UiEvent::EndSelected(arg)),
        "headcount" => Command::Event(UiEvent::HeadcountEdited(arg)),
        "check" => Command::Event(UiEvent::CheckPressed),
        "create" => Command::Event(UiEvent::CreatePressed),
        "reset" => Command::Event(UiEvent::ResetPressed),
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(verb.to_string()),
    };
    Ok(Some(command))
}

fn render(view: &ScreenView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Conference Room Booking: {} ==", view.date.format("%b %-d, %Y"));

    if view.no_start_time_left() {
        let _ = writeln!(out, "start options: none, no bookable start time remains today");
    } else {
        let _ = writeln!(out, "start options: {}", join(&view.start_options));
    }
    if view.start_time.is_some() {
        if view.end_options.is_empty() {
            let _ = writeln!(out, "end options:   none, pick an earlier start time");
        } else {
            let _ = writeln!(out, "end options:   {}", join(&view.end_options));
        }
    }

    let _ = writeln!(
        out,
        "selected:      {} - {}, headcount {}",
        show(view.start_time),
        show(view.end_time),
        view.headcount.map_or_else(|| "-".to_string(), |n| n.to_string())
    );

    let status = if view.busy {
        "waiting for the booking service..."
    } else if view.can_create {
        "room is free: `create` to book it"
    } else if view.can_check {
        "ready: `check` availability"
    } else {
        "pick start, end and headcount"
    };
    let _ = write!(out, "status:        {status}");
    out
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Backend(message) => format!(">> {message}"),
        Notice::Failure(message) => format!("!! {message}"),
        Notice::Rejected(message) => format!("?? {message}"),
    }
}

fn join(slots: &[TimeOfDay]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn show(time: Option<TimeOfDay>) -> String {
    time.map_or_else(|| "--.--".to_string(), |t| t.to_string())
}
