//! Turns a line typed at the prompt into a request.
//!
//! Accepted forms: `COMMAND [data]` with a case-insensitive command name, or a
//! menu number `1`-`7` followed by the data. `help` (or `?`) shows the menu.

use irori_server::infrastructure::dto::{Command, Request};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Help,
    Send(Request),
}

/// Parse and validate one input line. Validation matches the server's, so an
/// invalid request is never sent.
pub fn parse_input(line: &str) -> Result<UserInput, ClientError> {
    let line = line.trim();
    let (head, data) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (line, ""),
    };

    if head.eq_ignore_ascii_case("help") || head == "?" {
        return Ok(UserInput::Help);
    }

    let command = match head.parse::<usize>() {
        Ok(n) if (1..=Command::KNOWN.len()).contains(&n) => Command::KNOWN[n - 1].clone(),
        Ok(n) => {
            return Err(ClientError::InvalidInput(format!(
                "No menu entry {n}, choose 1-{}",
                Command::KNOWN.len()
            )));
        }
        Err(_) => Command::from(head.to_ascii_uppercase()),
    };

    let request = Request::new(command, data);
    request
        .validate()
        .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
    Ok(UserInput::Send(request))
}
