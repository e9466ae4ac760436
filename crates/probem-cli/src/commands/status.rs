//! Session status report.

use api_gateway::ErrorKind;
use tracing::warn;

use super::{refresh_volunteer_flag, AppContext};

/// `probem status`
pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.session.snapshot();
    let Some(user) = session.user else {
        println!("Nenhuma sessão ativa. Entre com: probem login <email> --senha <senha>");
        return Ok(());
    };

    println!("Sessão ativa");
    println!("  Nome:  {}", user.nome);
    println!("  Email: {}", user.email);
    println!("  Papel: {}", user.role);

    match ctx.client.token_status().await {
        Ok(_) => println!("  Token: válido"),
        Err(err) if err.kind == ErrorKind::SessionExpired => {
            // The 401 already cleared the stored tuple; align memory with it.
            ctx.session.sign_out()?;
            println!("  Token: expirado. Entre novamente.");
            return Ok(());
        }
        Err(err) => warn!(error = %err, "Could not probe token status"),
    }

    refresh_volunteer_flag(ctx).await;
    if ctx.session.snapshot().volunteer_approved {
        println!("  Voluntário: aprovado");
    } else {
        println!("  Voluntário: não cadastrado");
    }

    Ok(())
}
