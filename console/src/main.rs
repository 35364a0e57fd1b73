use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use console::session::TerminalSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let server_url = std::env::var("FDE_SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let workdir = std::env::var("FDE_WORKSPACE_PATH").unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| ".".to_string())
    });

    tracing::info!(%server_url, %workdir, "starting fde-console");

    let mut session = TerminalSession::new(&server_url, workdir)?;
    for entry in session.log() {
        println!("{entry}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        session
            .submit_with(&line, |entry| println!("{entry}"))
            .await;
    }

    Ok(())
}
