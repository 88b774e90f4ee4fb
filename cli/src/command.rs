use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    GoTo(u32),
    /// Zero based index of a card on the displayed page
    Toggle(usize),
    Favorites,
    Reload,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\s*([a-z]+)(?:\s+(\d+))?\s*$").unwrap();
    }
    let line = line.trim().to_lowercase();
    if line.is_empty() {
        return Command::Empty;
    }
    let unknown = || Command::Unknown(line.clone());
    let Some(captures) = RE.captures(&line) else {
        return unknown();
    };
    let name = captures.get(1).map_or("", |m| m.as_str());
    let number = captures.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
    match (name, number) {
        ("n" | "next", None) => Command::Next,
        ("p" | "prev" | "previous", None) => Command::Previous,
        ("g" | "go", Some(page)) => Command::GoTo(page),
        ("f" | "fav", Some(n)) if n >= 1 => Command::Toggle((n - 1) as usize),
        ("favs" | "favorites", None) => Command::Favorites,
        ("r" | "reload", None) => Command::Reload,
        ("h" | "help", None) => Command::Help,
        ("q" | "quit" | "exit", None) => Command::Quit,
        _ => unknown(),
    }
}
