//! Google login through the external browser.
//!
//! The mobile app hands the redirect back via the registered URI scheme; a
//! terminal has no deep-link channel, so the user pastes the callback link
//! here instead.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use oauth_handshake::{BrowserLauncher, BrowserResult, DeepLinkHandshake, LOADING_FALLBACK_SECS};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use super::{refresh_volunteer_flag, AppContext};

/// Launcher for a terminal: "opening" the browser means printing the URL,
/// and dismissal resolves the pending browser result.
#[derive(Default)]
struct TerminalLauncher {
    pending: Mutex<Option<oneshot::Sender<BrowserResult>>>,
}

impl BrowserLauncher for TerminalLauncher {
    fn open(&self, auth_url: &str, _redirect_uri: &str) -> oneshot::Receiver<BrowserResult> {
        println!("Abra este endereço no navegador para entrar com o Google:");
        println!("  {}", auth_url);
        let (tx, rx) = oneshot::channel();
        *self.pending.lock().unwrap() = Some(tx);
        rx
    }

    fn dismiss(&self) {
        if let Some(tx) = self.pending.lock().unwrap().take() {
            let _ = tx.send(BrowserResult::Dismissed);
        }
    }
}

/// `probem google-login`
pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let launcher = Arc::new(TerminalLauncher::default());
    let handshake = Arc::new(DeepLinkHandshake::new(
        launcher,
        ctx.session.clone(),
        ctx.config.redirect_scheme.clone(),
    ));

    let _browser = handshake.begin(&ctx.config.google_auth_url(), &ctx.config.redirect_uri());
    println!(
        "Depois de autorizar, cole aqui o link de retorno ({}?...):",
        ctx.config.redirect_uri()
    );

    // Terminal stand-in for the OS deep-link channel: each pasted line is one
    // incoming URI.
    let (uri_tx, uri_rx) = mpsc::channel::<String>(4);
    let mut reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if uri_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let driver = {
        let handshake = handshake.clone();
        tokio::spawn(async move { handshake.run(uri_rx).await })
    };

    let mut session_rx = ctx.session.subscribe();
    let signed = loop {
        tokio::select! {
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break false;
                }
                if session_rx.borrow().signed() {
                    break true;
                }
            }
            _ = &mut reader => {
                // Input closed without a valid callback. Give a late redirect
                // the same grace the app's loading heuristic gives the
                // dismissed browser, then give up.
                tokio::time::sleep(Duration::from_secs(LOADING_FALLBACK_SECS)).await;
                break ctx.session.snapshot().signed();
            }
        }
    };
    reader.abort();
    driver.abort();

    if signed {
        refresh_volunteer_flag(ctx).await;
        let nome = ctx
            .session
            .snapshot()
            .user
            .map(|user| user.nome)
            .unwrap_or_default();
        println!("Login realizado. Bem-vindo(a), {}.", nome);
    } else {
        handshake.reset();
        println!("Login cancelado.");
    }

    Ok(())
}
