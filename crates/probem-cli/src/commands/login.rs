//! Password and one-time-code login.

use std::io::{self, Write};

use super::{refresh_volunteer_flag, AppContext};
use anyhow::Context;

/// `probem login`
pub async fn password(ctx: &AppContext, email: &str, senha: &str) -> anyhow::Result<()> {
    let response = ctx.client.login(email, senha).await?;
    let (token, refresh, user) = response.into_parts();
    let nome = user.nome.clone();

    ctx.session.sign_in(&token, &refresh, user)?;
    refresh_volunteer_flag(ctx).await;

    println!("Login realizado. Bem-vindo(a), {}.", nome);
    Ok(())
}

/// `probem login-otp`
///
/// Requests the code, then reads it from the terminal.
pub async fn one_time_code(ctx: &AppContext, email: &str) -> anyhow::Result<()> {
    ctx.client.request_otp(email).await?;
    println!("Código enviado para {}.", email);

    print!("Digite o código: ");
    io::stdout().flush()?;
    let mut codigo = String::new();
    io::stdin()
        .read_line(&mut codigo)
        .context("Falha ao ler o código")?;
    let codigo = codigo.trim();
    if codigo.is_empty() {
        anyhow::bail!("Nenhum código informado");
    }

    let response = ctx.client.login_otp(email, codigo).await?;
    let (token, refresh, user) = response.into_parts();
    let nome = user.nome.clone();

    ctx.session.sign_in(&token, &refresh, user)?;
    refresh_volunteer_flag(ctx).await;

    println!("Login realizado. Bem-vindo(a), {}.", nome);
    Ok(())
}
