use anyhow::{bail, Context as _, Result};

use gym_domain::Context;
use gym_store::Connection;

mod cli;
mod commands;
mod formatting;
mod logging;
mod validate;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::init();

    let db = Connection::open(&cli.data_dir)
        .await
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;

    let mut ctx = Context::current();
    if let Some(session) = db.session().await {
        ctx = ctx.with_user(session.username);
    }
    if cli.command.needs_session() && !db.is_authenticated().await {
        bail!("Not logged in. Run `gym login` first.");
    }

    let credentials = cli.credentials();
    match cli.command {
        Command::Login(cmd) => cmd.run(&db, &ctx, &credentials).await,
        Command::Logout(cmd) => cmd.run(&db).await,
        Command::Whoami(cmd) => cmd.run(&db).await,
        Command::Theme(cmd) => cmd.run(&db).await,
        Command::Members(cmd) => cmd.run(&db, &ctx).await,
        Command::Attendance(cmd) => cmd.run(&db, &ctx).await,
        Command::Expenses(cmd) => cmd.run(&db, &ctx).await,
        Command::Trainers(cmd) => cmd.run(&db, &ctx).await,
        Command::Classes(cmd) => cmd.run(&db, &ctx).await,
        Command::Stats(cmd) => cmd.run(&db, &ctx).await,
    }?;

    Ok(())
}
