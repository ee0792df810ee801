mod config;
mod terminal;

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use rsvp_core::{flow::FlowState, gateway::HttpDirectoryGateway, RsvpClient, Severity};
use shared::domain::GuestKey;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the guest-directory endpoint from rsvp.toml.
    #[arg(long)]
    directory_url: Option<String>,
    /// Overrides the confirmation endpoint from rsvp.toml.
    #[arg(long)]
    confirm_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.directory_url {
        settings.directory_url = url;
    }
    if let Some(url) = args.confirm_url {
        settings.confirm_url = url;
    }

    let gateway = Arc::new(HttpDirectoryGateway::new(
        settings.directory_url.clone(),
        settings.confirm_url.clone(),
    ));
    let client = RsvpClient::new_with_dependencies(
        gateway,
        Box::new(terminal::TerminalSelector::default()),
        Arc::new(terminal::TerminalAcknowledgment),
        Arc::new(terminal::TerminalNavigator),
    );

    client.initialize().await?;

    println!("Comandos: <id> seleciona | marcar <id> | desmarcar <id> | limpar | enviar | ok | recarregar | sair");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let argument = parts.next().unwrap_or_default().trim();

        match command {
            "sair" => break,
            "recarregar" => {
                let _ = client.reload().await;
            }
            "limpar" => {
                let _ = client.on_select("").await;
            }
            "marcar" | "desmarcar" => {
                let key = GuestKey::from_raw(argument);
                if !client.set_attending(&key, command == "marcar").await {
                    println!("Convidado {argument} não está no grupo exibido.");
                }
            }
            "enviar" => {
                let _ = client.submit().await;
            }
            "ok" => {
                if client.confirm_acknowledgment().await == FlowState::Done {
                    break;
                }
            }
            raw => {
                let _ = client.on_select(raw).await;
            }
        }

        print_state(&client).await;
    }

    client.dispose().await;
    Ok(())
}

async fn print_state(client: &RsvpClient) {
    if let Some(status) = client.status().await {
        let tag = match status.severity {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Error => "!",
        };
        println!("{tag} {}", status.text);
    }

    let rows = client.checklist().await;
    if !rows.is_empty() {
        println!("Grupo:");
        for row in &rows {
            let mark = if row.checked { "x" } else { " " };
            println!("  [{mark}] {} [{}]", row.label, row.id);
        }
    }
}
