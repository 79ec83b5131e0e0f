//! Response formatting for client display.

use irori_server::infrastructure::dto::{Command, Response};

/// Response formatter for client display
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format any line received from the server.
    ///
    /// Replies, the welcome and broadcast notifications share one shape, so
    /// they are rendered the same way: the message, then the data (indented
    /// line by line when it spans several lines).
    pub fn format_response(response: &Response) -> String {
        if !response.success {
            return format!("\n! {}\n", response.message);
        }

        let mut output = format!("\n{}", response.message);
        if response.data.is_empty() || Self::is_broadcast(response) {
            output.push('\n');
        } else if response.data.contains('\n') {
            output.push_str(":\n");
            for line in response.data.lines() {
                output.push_str(&format!("  {}\n", line));
            }
        } else {
            output.push_str(&format!(": {}\n", response.data));
        }
        output
    }

    /// A broadcast carries the sender in `data` and the formatted
    /// `[HH:MM:SS] sender: content` line in `message`.
    fn is_broadcast(response: &Response) -> bool {
        response.message.starts_with('[')
            && response
                .message
                .contains(&format!("] {}: ", response.data))
    }

    /// Format the command menu
    pub fn format_menu() -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Commands (name or number, names are case-insensitive):\n");
        for (i, command) in Command::KNOWN.iter().enumerate() {
            let argument = match command {
                Command::Register => " <name>",
                Command::Message => " <text>",
                Command::Echo => " <text>",
                _ => "",
            };
            output.push_str(&format!("  {}. {}{}\n", i + 1, command, argument));
        }
        output.push_str("  help  show this menu\n");
        output.push_str("============================================================\n");
        output
    }

    /// Format an input rejected before sending
    pub fn format_input_error(reason: &str) -> String {
        format!("! {}\n", reason)
    }
}
