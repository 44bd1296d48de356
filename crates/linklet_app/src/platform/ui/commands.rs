//! Line-oriented input: one command per line, translated into core messages.

use linklet_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages to dispatch in order.
    Msgs(Vec<Msg>),
    Help,
    Quit,
    /// Unrecognized input; the text explains what was expected.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => single(Msg::NoOp),
        "url" => single(Msg::UrlChanged(rest.to_string())),
        "code" => single(Msg::CustomCodeChanged(rest.to_string())),
        "submit" => single(Msg::SubmitClicked),
        "shorten" => shorten(rest),
        "use" => single(Msg::UseExistingClicked),
        "list" | "ls" => single(Msg::LinksRequested),
        "refresh" => single(Msg::RefreshClicked),
        "delete" | "rm" => with_code(rest, "delete", Msg::DeleteClicked),
        "stats" => with_code(rest, "stats", Msg::StatsRequested),
        "health" => single(Msg::HealthRequested),
        "dismiss" => single(Msg::NoticeDismissed),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

fn single(msg: Msg) -> Command {
    Command::Msgs(vec![msg])
}

/// `shorten <url> [code]` fills the whole form and submits it.
fn shorten(rest: &str) -> Command {
    let mut parts = rest.split_whitespace();
    let Some(url) = parts.next() else {
        return Command::Invalid("Usage: shorten <url> [code]".to_string());
    };
    let code = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Command::Invalid("Usage: shorten <url> [code]".to_string());
    }
    Command::Msgs(vec![
        Msg::UrlChanged(url.to_string()),
        Msg::CustomCodeChanged(code.to_string()),
        Msg::SubmitClicked,
    ])
}

fn with_code(rest: &str, name: &str, build: fn(String) -> Msg) -> Command {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [code] => single(build((*code).to_string())),
        _ => Command::Invalid(format!("Usage: {name} <code>")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_only_redraws() {
        assert_eq!(parse_line("   "), single(Msg::NoOp));
    }

    #[test]
    fn field_edits_keep_inner_text() {
        assert_eq!(
            parse_line("url  https://example.com/a b "),
            single(Msg::UrlChanged("https://example.com/a b".to_string()))
        );
        assert_eq!(
            parse_line("code"),
            single(Msg::CustomCodeChanged(String::new()))
        );
    }

    #[test]
    fn shorten_fills_form_then_submits() {
        assert_eq!(
            parse_line("shorten https://example.com docs"),
            Command::Msgs(vec![
                Msg::UrlChanged("https://example.com".to_string()),
                Msg::CustomCodeChanged("docs".to_string()),
                Msg::SubmitClicked,
            ])
        );
    }

    #[test]
    fn shorten_without_code_clears_previous_code() {
        let Command::Msgs(msgs) = parse_line("shorten https://example.com") else {
            panic!("expected messages");
        };
        assert_eq!(msgs[1], Msg::CustomCodeChanged(String::new()));
    }

    #[test]
    fn shorten_requires_a_url() {
        assert!(matches!(parse_line("shorten"), Command::Invalid(_)));
        assert!(matches!(parse_line("shorten a b c"), Command::Invalid(_)));
    }

    #[test]
    fn code_commands_take_exactly_one_code() {
        assert_eq!(
            parse_line("delete abc"),
            single(Msg::DeleteClicked("abc".to_string()))
        );
        assert_eq!(
            parse_line("STATS abc"),
            single(Msg::StatsRequested("abc".to_string()))
        );
        assert_eq!(
            parse_line("delete"),
            Command::Invalid("Usage: delete <code>".to_string())
        );
        assert!(matches!(parse_line("stats a b"), Command::Invalid(_)));
    }

    #[test]
    fn list_and_refresh_are_distinct() {
        assert_eq!(parse_line("list"), single(Msg::LinksRequested));
        assert_eq!(parse_line("refresh"), single(Msg::RefreshClicked));
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_line("?"), Command::Help);
        assert_eq!(parse_line("exit"), Command::Quit);
        assert_eq!(parse_line("q"), Command::Quit);
        assert!(matches!(parse_line("frobnicate"), Command::Invalid(_)));
    }
}
