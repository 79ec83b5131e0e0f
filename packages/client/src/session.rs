//! Interactive client session.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use irori_server::infrastructure::dto::Command;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{sync::mpsc, time::timeout};

use crate::{
    connection::ChatClient,
    error::ClientError,
    formatter::ResponseFormatter,
    input::{UserInput, parse_input},
    ui::{PROMPT, redisplay_prompt},
};

/// How long to wait for the server to close the connection after QUIT
const QUIT_GRACE: Duration = Duration::from_secs(5);

/// Run the interactive session until QUIT, end of input or disconnect
pub async fn run_client_session(addr: &str) -> Result<(), ClientError> {
    let client = ChatClient::connect(addr).await?;
    println!("\nConnected to {}. Type 'help' for the command list.", addr);
    print!("{}", ResponseFormatter::format_menu());

    let (mut reader, mut writer) = client.into_split();
    let quit_sent = Arc::new(AtomicBool::new(false));

    // Display task: every line from the server is one more response
    let mut read_task = tokio::spawn(async move {
        loop {
            match reader.recv().await {
                Ok(response) => {
                    print!("{}", ResponseFormatter::format_response(&response));
                    redisplay_prompt();
                }
                Err(ClientError::Codec(e)) => {
                    tracing::warn!("Ignoring undecodable line: {}", e);
                }
                Err(ClientError::ConnectionClosed) => {
                    tracing::info!("Server closed the connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!("Read error: {}", e);
                    return;
                }
            }
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Input task: parse, validate locally, send
    let quit_flag = quit_sent.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let request = match parse_input(&line) {
                Ok(UserInput::Help) => {
                    print!("{}", ResponseFormatter::format_menu());
                    redisplay_prompt();
                    continue;
                }
                Ok(UserInput::Send(request)) => request,
                Err(e) => {
                    print!("{}", ResponseFormatter::format_input_error(&e.to_string()));
                    redisplay_prompt();
                    continue;
                }
            };

            let is_quit = request.command == Command::Quit;
            if is_quit {
                quit_flag.store(true, Ordering::SeqCst);
            }
            writer.send_request(&request).await?;
            if is_quit {
                break;
            }
        }
        Ok::<(), ClientError>(())
    });

    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            if quit_sent.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ClientError::ConnectionClosed)
            }
        }
        write_result = &mut write_task => {
            if let Ok(Err(e)) = write_result {
                read_task.abort();
                return Err(e);
            }
            if quit_sent.load(Ordering::SeqCst) {
                // Let the display task print "Goodbye!" and see the close
                if timeout(QUIT_GRACE, &mut read_task).await.is_err() {
                    tracing::warn!("Server did not close the connection after QUIT");
                    read_task.abort();
                }
            } else {
                read_task.abort();
            }
            Ok(())
        }
    }
}
