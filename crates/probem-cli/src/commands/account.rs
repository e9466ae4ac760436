//! Account lifecycle: registration, e-mail verification, password recovery.

use super::{refresh_volunteer_flag, AppContext};

/// `probem register`
pub async fn register(ctx: &AppContext, nome: &str, email: &str, senha: &str) -> anyhow::Result<()> {
    ctx.client.register(nome, email, senha).await?;
    println!("Conta criada. Um código de verificação foi enviado para {}.", email);
    println!("Confirme com: probem verify-email {} <codigo>", email);
    Ok(())
}

/// `probem verify-email`
///
/// A successful verification already yields the first session tuple, so the
/// user lands signed in.
pub async fn verify_email(ctx: &AppContext, email: &str, codigo: &str) -> anyhow::Result<()> {
    let response = ctx.client.verify_email(email, codigo).await?;
    let nome = response.user.nome.clone();

    ctx.session
        .sign_in(&response.access_token, &response.refresh_token, response.user)?;
    refresh_volunteer_flag(ctx).await;

    println!("E-mail verificado. Bem-vindo(a), {}.", nome);
    Ok(())
}

/// `probem recover`
pub async fn recover(ctx: &AppContext, email: &str) -> anyhow::Result<()> {
    ctx.client.request_password_reset(email).await?;
    println!("Se {} estiver cadastrado, um e-mail de recuperação foi enviado.", email);
    Ok(())
}

/// `probem reset-password`
pub async fn reset_password(
    ctx: &AppContext,
    email: &str,
    token: &str,
    nova_senha: &str,
) -> anyhow::Result<()> {
    ctx.client.reset_password(email, token, nova_senha).await?;
    println!("Senha alterada. Entre novamente com: probem login {}", email);
    Ok(())
}
