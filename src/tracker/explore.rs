// Interactive terminal session over the text rendering.

use std::io::{BufRead, Write};

use crate::tracker::render_text::render_text;
use crate::tracker::*;

const HELP: &str = "\
Commands:
  list <candidate>         show or hide the voters of a candidate in the list
  card <candidate>         show or hide the voters of a candidate in the cards
  voter <name>             open the ballot of a voter
  close                    close the ballot
  layout desktop|mobile    switch between the list and the cards
  help                     this message
  quit
A candidate is given by its name or its number.";

#[derive(Eq, PartialEq, Debug, Clone)]
enum Command {
    List(String),
    Card(String),
    Voter(String),
    Close,
    Layout(Layout),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    match (head, rest) {
        ("", _) => Command::Empty,
        ("list", x) if !x.is_empty() => Command::List(x.to_string()),
        ("card", x) if !x.is_empty() => Command::Card(x.to_string()),
        ("voter", x) if !x.is_empty() => Command::Voter(x.to_string()),
        ("close", "") => Command::Close,
        ("layout", x) => match Layout::parse(Some(x)) {
            Ok(l) => Command::Layout(l),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("help", _) | ("?", _) => Command::Help,
        ("quit", _) | ("exit", _) | ("q", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Toggles the voters of a candidate in one of the views. Returns a message when nothing changed.
fn toggle(dashboard: &Dashboard, disclosure: &mut Disclosure, key: &str) -> Option<String> {
    match dashboard.find_candidate(key) {
        None => Some(format!("No candidate {:?}.", key)),
        Some(c) if !c.has_voters() => Some(format!("{} has no public voter.", c.name)),
        Some(c) => {
            let expanded = disclosure.toggle(&c.name);
            debug!("explore: {:?} expanded: {}", c.name, expanded);
            None
        }
    }
}

/// Runs the session until `quit` or the end of the input.
pub fn run_session<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    state: &mut ViewState,
    layout: Layout,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let mut layout = layout;
    write!(output, "{}", render_text(dashboard, state, layout))?;
    writeln!(output, "Type 'help' for the list of commands.")?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }
        let command = parse_command(&line);
        debug!("explore: command {:?}", command);
        let message = match command {
            Command::Empty => continue,
            Command::Quit => return Ok(()),
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Command::Unknown(s) => {
                writeln!(output, "Unknown command {:?}. Type 'help' for the list of commands.", s)?;
                continue;
            }
            Command::List(key) => toggle(dashboard, &mut state.list, &key),
            Command::Card(key) => toggle(dashboard, &mut state.cards, &key),
            Command::Voter(name) => {
                if dashboard.voters().contains(&name.as_str()) {
                    state.open_ballot(dashboard, &name);
                    None
                } else {
                    Some(format!("No public voter {:?}.", name))
                }
            }
            Command::Close => {
                state.close_ballot();
                None
            }
            Command::Layout(l) => {
                layout = l;
                None
            }
        };
        match message {
            Some(m) => writeln!(output, "{}", m)?,
            None => write!(output, "{}", render_text(dashboard, state, layout))?,
        }
    }
}
