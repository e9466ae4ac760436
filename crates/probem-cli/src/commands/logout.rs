//! Sign out.

use super::AppContext;

/// `probem logout`. Idempotent: running it signed out is fine.
pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session.sign_out()?;
    println!("Sessão encerrada.");
    Ok(())
}
