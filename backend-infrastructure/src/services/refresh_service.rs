use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use backend_application::commands::refresh_commands;
use backend_application::AppState;

/// Periodic fetch-and-reconcile, the server-side stand-in for the
/// dashboard's polling. An interval of zero disables it.
pub async fn schedule_refresh(state: AppState) {
    let seconds = state.config.refresh_interval_seconds;
    if seconds == 0 {
        info!("periodic refresh disabled");
        return;
    }
    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(err) = refresh_commands::refresh_sales(&state).await {
            error!("periodic refresh failed: {}", err);
        }
    }
}
