use std::fmt;

use tracing::{debug, info};

use crate::domain::{Cents, Ledger, Subscription, format_cents, parse_cents};

use super::AppError;

/// State of one user session.
///
/// Handlers take the session by value and hand back the next one, so every
/// transition is an explicit function of (session, action).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    ledger: Ledger,
}

/// A mutation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add { name: String, cost_cents: Cents },
    /// One-based, as shown in the numbered list.
    Remove { position: usize },
    Clear,
}

/// What a successful action did, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Added(Subscription),
    Removed {
        position: usize,
        subscription: Subscription,
    },
    Cleared(usize),
}

pub type Outcome = Result<Feedback, AppError>;

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }
}

impl From<Ledger> for Session {
    fn from(ledger: Ledger) -> Self {
        Self { ledger }
    }
}

/// Apply one action to the session. A rejected action leaves the ledger untouched.
pub fn handle(mut session: Session, action: Action) -> (Session, Outcome) {
    let outcome = apply(&mut session.ledger, action);
    match &outcome {
        Ok(feedback) => debug!(%feedback, entries = session.ledger.len(), "action applied"),
        Err(err) => info!(error = %err, "action rejected"),
    }
    (session, outcome)
}

fn apply(ledger: &mut Ledger, action: Action) -> Outcome {
    match action {
        Action::Add { name, cost_cents } => {
            let added = ledger.add(&name, cost_cents)?;
            Ok(Feedback::Added(added.clone()))
        }
        Action::Remove { position } => {
            let len = ledger.len();
            let index = position
                .checked_sub(1)
                .filter(|i| *i < len)
                .ok_or_else(|| {
                    AppError::InvalidPosition(format!("{} (list has {} entries)", position, len))
                })?;
            let subscription = ledger.remove(index)?;
            Ok(Feedback::Removed {
                position,
                subscription,
            })
        }
        Action::Clear => Ok(Feedback::Cleared(ledger.clear())),
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Added(sub) => {
                write!(f, "Added {} ({})", sub.name, format_cents(sub.cost_cents))
            }
            Feedback::Removed {
                position,
                subscription,
            } => write!(f, "Removed #{}: {}", position, subscription.name),
            Feedback::Cleared(count) => write!(f, "Cleared {} subscriptions", count),
        }
    }
}

/// A line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    List,
    Report,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// `add` takes the cost as its last word so names may contain spaces:
/// `add Amazon Prime 14.99`.
pub fn parse_command(line: &str) -> Result<Option<Command>, AppError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword.to_lowercase().as_str() {
        "add" => Command::Apply(parse_add(&args)?),
        "remove" | "rm" => {
            let arg = args.first().ok_or(AppError::MissingArgument("position"))?;
            let position = arg
                .parse()
                .map_err(|_| AppError::InvalidPosition(arg.to_string()))?;
            Command::Apply(Action::Remove { position })
        }
        "clear" => Command::Apply(Action::Clear),
        "list" | "ls" => Command::List,
        "report" | "summary" => Command::Report,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(AppError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_add(args: &[&str]) -> Result<Action, AppError> {
    let (cost, name) = match args.split_last() {
        Some((cost, name)) if !name.is_empty() => (*cost, name.join(" ")),
        Some(_) => return Err(AppError::MissingArgument("name or cost")),
        None => return Err(AppError::MissingArgument("name")),
    };
    Ok(Action::Add {
        name,
        cost_cents: parse_amount(cost)?,
    })
}

/// Parse a user-typed amount, tolerating a leading `$`.
pub fn parse_amount(input: &str) -> Result<Cents, AppError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    parse_cents(digits).map_err(|e| AppError::InvalidAmount(format!("'{}' ({})", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LedgerError;

    fn add(name: &str, cost_cents: Cents) -> Action {
        Action::Add {
            name: name.into(),
            cost_cents,
        }
    }

    #[test]
    fn test_handle_add_and_remove() {
        let session = Session::new();
        let (session, outcome) = handle(session, add("Netflix", 1549));
        assert_eq!(
            outcome,
            Ok(Feedback::Added(Subscription::new("Netflix", 1549)))
        );

        let (session, outcome) = handle(session, Action::Remove { position: 1 });
        assert!(matches!(outcome, Ok(Feedback::Removed { position: 1, .. })));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_rejected_action_keeps_state() {
        let (session, _) = handle(Session::new(), add("Netflix", 1549));
        let before = session.clone();

        let (session, outcome) = handle(session, add("NETFLIX", 500));
        assert_eq!(
            outcome,
            Err(AppError::Ledger(LedgerError::Duplicate("Netflix".into())))
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_remove_position_bounds() {
        let (session, _) = handle(Session::new(), add("Netflix", 1549));

        let (session, outcome) = handle(session, Action::Remove { position: 0 });
        assert!(matches!(outcome, Err(AppError::InvalidPosition(_))));

        let (session, outcome) = handle(session, Action::Remove { position: 2 });
        assert!(matches!(outcome, Err(AppError::InvalidPosition(_))));
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_clear_reports_count() {
        let (session, _) = handle(Session::new(), add("Netflix", 1549));
        let (session, _) = handle(session, add("Spotify", 999));
        let (session, outcome) = handle(session, Action::Clear);
        assert_eq!(outcome, Ok(Feedback::Cleared(2)));
        assert_eq!(session.into_ledger(), Ledger::new());
    }

    #[test]
    fn test_session_from_existing_ledger() {
        let mut ledger = Ledger::new();
        ledger.add("Netflix", 1549).unwrap();

        let (session, outcome) = handle(Session::from(ledger), add("Spotify", 999));
        assert!(outcome.is_ok());
        assert_eq!(session.ledger().total(), 2548);
    }

    #[test]
    fn test_parse_add_with_spaces() {
        let cmd = parse_command("add Amazon Prime 14.99").unwrap();
        assert_eq!(cmd, Some(Command::Apply(add("Amazon Prime", 1499))));

        let cmd = parse_command("ADD Hulu $7.99").unwrap();
        assert_eq!(cmd, Some(Command::Apply(add("Hulu", 799))));
    }

    #[test]
    fn test_parse_add_errors() {
        assert_eq!(
            parse_command("add"),
            Err(AppError::MissingArgument("name"))
        );
        assert_eq!(
            parse_command("add 9.99"),
            Err(AppError::MissingArgument("name or cost"))
        );
        assert!(matches!(
            parse_command("add Netflix cheap"),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("remove 2"),
            Ok(Some(Command::Apply(Action::Remove { position: 2 })))
        );
        assert!(matches!(
            parse_command("remove two"),
            Err(AppError::InvalidPosition(_))
        ));
        assert_eq!(parse_command("clear"), Ok(Some(Command::Apply(Action::Clear))));
        assert_eq!(parse_command("list"), Ok(Some(Command::List)));
        assert_eq!(parse_command("report"), Ok(Some(Command::Report)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command("delete 1"),
            Err(AppError::UnknownCommand("delete".into()))
        );
    }

    #[test]
    fn test_feedback_display() {
        let added = Feedback::Added(Subscription::new("Netflix", 1549));
        assert_eq!(added.to_string(), "Added Netflix (15.49)");
        assert_eq!(Feedback::Cleared(3).to_string(), "Cleared 3 subscriptions");
    }
}
