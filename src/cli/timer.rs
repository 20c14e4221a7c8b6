use std::{io::Write, time::Duration};

use anyhow::Result;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::utils::clock::Clock;

/// Cancels `cancellation` when Ctrl+C is pressed. Returns early once something else cancels it.
pub async fn detect_interrupt(cancellation: CancellationToken) {
    select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => cancellation.cancel(),
                Err(e) => error!("Failed to listen for Ctrl+C {e:?}"),
            }
        },
        _ = cancellation.cancelled() => (),
    };
}

/// Counts down `minutes` in one second steps and returns how many minutes to log. Stopping
/// early through `cancellation` logs only the whole minutes that passed.
pub async fn run_countdown(
    minutes: u32,
    clock: &dyn Clock,
    cancellation: &CancellationToken,
    out: &mut impl Write,
) -> Result<u32> {
    writeln!(
        out,
        "Starting timer for {minutes} minutes. Press Ctrl+C to stop early."
    )?;
    let start = clock.instant();
    for remaining in (1..=u64::from(minutes) * 60).rev() {
        write!(out, "\rTime left: {:02}:{:02}", remaining / 60, remaining % 60)?;
        out.flush()?;

        select! {
            _ = cancellation.cancelled() => {
                let elapsed = clock.instant().duration_since(start).as_secs() / 60;
                let elapsed = u32::try_from(elapsed).unwrap_or(minutes).min(minutes);
                writeln!(out, "\nTimer stopped early. Logged {elapsed} minutes.")?;
                info!("Timer stopped after {elapsed} of {minutes} minutes");
                return Ok(elapsed);
            }
            _ = clock.sleep(Duration::from_secs(1)) => ()
        }
    }
    writeln!(out, "\nTimer finished!")?;
    Ok(minutes)
}

/// [run_countdown] that can be stopped with Ctrl+C.
pub async fn interruptible_countdown(
    minutes: u32,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<u32> {
    let cancellation = CancellationToken::new();
    let listener = tokio::spawn(detect_interrupt(cancellation.clone()));

    let result = run_countdown(minutes, clock, &cancellation, out).await;

    cancellation.cancel();
    if let Err(e) = listener.await {
        warn!("Interrupt listener ended abnormally {e:?}");
    }
    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use tokio_util::sync::CancellationToken;

    use crate::utils::{clock::DefaultClock, logging::TEST_LOGGING};

    use super::run_countdown;

    #[tokio::test(start_paused = true)]
    async fn test_countdown_finishes() -> Result<()> {
        *TEST_LOGGING;
        let mut out = Vec::new();

        let minutes = run_countdown(2, &DefaultClock, &CancellationToken::new(), &mut out).await?;

        assert_eq!(minutes, 2);
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("Starting timer for 2 minutes."));
        assert!(text.contains("\rTime left: 02:00"));
        assert!(text.contains("\rTime left: 01:00"));
        assert!(text.contains("\rTime left: 00:01"));
        assert!(!text.contains("00:00"));
        assert!(text.ends_with("\nTimer finished!\n"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_stopped_early() -> Result<()> {
        let cancellation = CancellationToken::new();
        let canceller = {
            let cancellation = cancellation.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(150)).await;
                cancellation.cancel();
            })
        };
        let mut out = Vec::new();

        let minutes = run_countdown(5, &DefaultClock, &cancellation, &mut out).await?;
        canceller.await?;

        assert_eq!(minutes, 2);
        let text = String::from_utf8(out)?;
        assert!(text.ends_with("\nTimer stopped early. Logged 2 minutes.\n"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_stopped_immediately() -> Result<()> {
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let mut out = Vec::new();

        let minutes = run_countdown(25, &DefaultClock, &cancellation, &mut out).await?;

        assert_eq!(minutes, 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_minute_countdown() -> Result<()> {
        let mut out = Vec::new();
        let minutes = run_countdown(0, &DefaultClock, &CancellationToken::new(), &mut out).await?;
        assert_eq!(minutes, 0);
        assert!(String::from_utf8(out)?.ends_with("Timer finished!\n"));
        Ok(())
    }
}
