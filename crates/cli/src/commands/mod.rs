//! Command implementations for hapticctl

pub mod caps;
pub mod demo;
pub mod feedback;
pub mod play;

use std::sync::Arc;
use std::time::Duration;

use hapticore_engine::{Haptics, StaticAccessibility};
use hapticore_scheduler::SessionHandle;
use tokio::time::sleep;

use crate::output::Outcome;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// The facade plus the accessibility toggle it was built with.
pub struct App {
    pub haptics: Haptics,
    pub accessibility: Arc<StaticAccessibility>,
    pub json: bool,
}

/// Wait for `session` to finish, cancelling it after `cancel_after`.
pub async fn settle(
    haptics: &Haptics,
    session: SessionHandle,
    cancel_after: Option<Duration>,
) -> Outcome {
    if session.is_detached() {
        return Outcome::Skipped;
    }

    let finished = async {
        while haptics.scheduler().current_session() == Some(session) {
            sleep(POLL_INTERVAL).await;
        }
    };

    match cancel_after {
        Some(limit) => match tokio::time::timeout(limit, finished).await {
            Ok(()) => Outcome::Completed,
            Err(_) => {
                haptics.cancel();
                Outcome::Cancelled
            }
        },
        None => {
            finished.await;
            Outcome::Completed
        }
    }
}
