use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use gym_domain::Context;
use gym_reports::DashboardStats;
use gym_store::Connection;

use crate::formatting::print_dashboard;

/// Bounds of the `--watch` refresh interval, in seconds.
const MIN_WATCH_SECS: u64 = 30;
const MAX_WATCH_SECS: u64 = 60;

#[derive(Args, Debug)]
pub struct ShowStats {
    /// Print the dashboard as JSON
    #[clap(long)]
    pub json: bool,
    /// Refresh every N seconds (30 to 60) until interrupted
    #[clap(short, long)]
    pub watch: Option<u64>,
}

fn watch_interval(secs: u64) -> Duration {
    Duration::from_secs(secs.clamp(MIN_WATCH_SECS, MAX_WATCH_SECS))
}

impl ShowStats {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        let Some(secs) = self.watch else {
            return self.show(db, ctx).await;
        };

        let mut interval = tokio::time::interval(watch_interval(secs));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let mut now = Context::current();
                    now.user = ctx.user.clone();
                    debug!(at = %now.now, "refreshing dashboard");
                    self.show(db, &now).await?;
                    println!();
                }
                _ = &mut ctrl_c => break,
            }
        }
        Ok(())
    }

    async fn show(&self, db: &Connection, ctx: &Context) -> Result<()> {
        let stats = DashboardStats::load(db, ctx).await;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_dashboard(&stats, ctx.now);
        }
        Ok(())
    }
}
