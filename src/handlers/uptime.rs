use std::time::Instant;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{Invocation, Outgoing};
use crate::domain::traits::{CommandModule, Gateway};

/// Reports how long the process has been up.
pub struct Uptime {
    started: Instant,
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(secs: u64) -> String {
    let (days, secs) = (secs / 86_400, secs % 86_400);
    let (hours, secs) = (secs / 3_600, secs % 3_600);
    let (minutes, secs) = (secs / 60, secs % 60);

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[async_trait]
impl CommandModule for Uptime {
    fn name(&self) -> &str {
        "uptime"
    }

    fn description(&self) -> Option<&str> {
        Some("Show how long the bot has been running")
    }

    fn slash_enabled(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        let up = format_duration(self.started.elapsed().as_secs());
        gateway
            .reply(
                &invocation.surface(),
                &Outgoing::text(format!("Up for {}", up)),
                false,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn durations_render_largest_unit_first() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(65), "1m 5s");
        assert_eq!(format_duration(3_605), "1h 0m 5s");
        assert_eq!(format_duration(90_061), "1d 1h 1m 1s");
    }
}
