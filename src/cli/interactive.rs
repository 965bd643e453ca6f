use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::application::{AppError, Command, LedgerReport, Session, handle, parse_command};

use super::render::Renderer;

const HELP: &str = "\
Commands:
  add <name> <cost>   Add a monthly subscription (e.g. add Amazon Prime 14.99)
  remove <n>          Remove the subscription at position n
  clear               Remove every subscription
  list                Show the numbered list
  report              Show totals and the breakdown table
  help                Show this message
  quit                End the session";

/// Read actions line by line until `quit` or end of input.
///
/// Every accepted change re-renders the totals. Rejected input, including
/// lines that are not UTF-8, is reported and the session carries on.
pub fn run_session<R, W>(
    mut session: Session,
    mut input: R,
    out: &mut W,
    renderer: &Renderer,
) -> Result<Session>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Budget session started. Type 'help' for commands.")?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            report_error(out, &AppError::InvalidEncoding)?;
            out.flush()?;
            continue;
        };

        match parse_command(line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Apply(action))) => {
                let (next, outcome) = handle(session, action);
                session = next;
                match outcome {
                    Ok(feedback) => {
                        writeln!(out, "{}", feedback)?;
                        renderer.write_totals(session.ledger(), out)?;
                    }
                    Err(err) => report_error(out, &err)?,
                }
            }
            Ok(Some(Command::List)) => renderer.write_list(session.ledger(), out)?,
            Ok(Some(Command::Report)) => {
                let report = LedgerReport::build(session.ledger());
                renderer.write_report(&report, out)?;
            }
            Ok(Some(Command::Help)) => writeln!(out, "{}", HELP)?,
            Err(err) => report_error(out, &err)?,
        }
        out.flush()?;
    }

    Ok(session)
}

fn report_error<W: Write>(out: &mut W, err: &AppError) -> io::Result<()> {
    let prefix = if err.is_validation() {
        "Invalid input"
    } else {
        "Error"
    };
    writeln!(out, "{}: {}", prefix, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> (Session, String) {
        let mut out = Vec::new();
        let session =
            run_session(Session::new(), script.as_bytes(), &mut out, &Renderer::new("$")).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_session_script() {
        let (session, out) = run("add Netflix 15.49\nadd Spotify 9.99\nreport\n");
        assert_eq!(session.ledger().len(), 2);
        assert!(out.contains("Added Netflix (15.49)"));
        assert!(out.contains("Total: $25.48/month ($305.76/year) across 2 subscriptions"));
        assert!(out.contains("Most expensive:     Netflix ($15.49)"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (session, out) = run("add Netflix 15.49\nadd netflix 5\nfrobnicate\nadd Hulu 7.99\n");
        assert!(out.contains("Error: Subscription already exists: Netflix"));
        assert!(out.contains("Error: Unknown command: frobnicate"));
        assert_eq!(session.ledger().len(), 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let script: &[u8] = b"add Netflix 15.49\nadd \xff\xfe 1\nadd Spotify 9.99\n";
        let mut out = Vec::new();
        let session = run_session(Session::new(), script, &mut out, &Renderer::new("$")).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Error: Input line is not valid UTF-8"));
        let names: Vec<_> = session.ledger().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Netflix", "Spotify"]);
    }

    #[test]
    fn test_validation_errors_use_input_prefix() {
        let (session, out) = run("add Netflix 0\nadd Netflix 10000000000000000\n");
        assert!(out.contains("Invalid input: Cost must be greater than zero (got 0 cents)"));
        assert!(out.contains("Invalid input: Cost 1000000000000000000 cents"));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, _) = run("add Netflix 15.49\nquit\nadd Spotify 9.99\n");
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_remove_and_list() {
        let (session, out) = run("add A 1\nadd B 2\nadd C 3\nremove 2\nlist\n");
        let names: Vec<_> = session.ledger().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(out.contains("Removed #2: B"));
        assert!(out.contains("  2. C - $3.00"));
    }
}
