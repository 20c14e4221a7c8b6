//! Optional reactions to water being logged. Commands work the same whichever notifier is used.

use std::io::Write;

use ansi_term::Colour::Green;
use anyhow::Result;
use tracing::debug;

pub trait WaterNotifier {
    /// Called after `amount` was logged and saved. `total_today` already includes `amount`.
    /// Anything shown to the user goes to `out`.
    fn water_logged(
        &self,
        amount: i64,
        total_today: i64,
        goal: i64,
        out: &mut dyn Write,
    ) -> Result<()>;
}

pub struct NoopNotifier;

impl WaterNotifier for NoopNotifier {
    fn water_logged(
        &self,
        _amount: i64,
        _total_today: i64,
        _goal: i64,
        _out: &mut dyn Write,
    ) -> Result<()> {
        Ok(())
    }
}

/// Prints a notice on the log that reaches the daily goal.
pub struct ConsoleNotifier;

impl WaterNotifier for ConsoleNotifier {
    fn water_logged(
        &self,
        amount: i64,
        total_today: i64,
        goal: i64,
        out: &mut dyn Write,
    ) -> Result<()> {
        debug!("Water logged {amount} oz, {total_today}/{goal} oz today");
        if goal_reached(amount, total_today, goal) {
            writeln!(
                out,
                "{}",
                Green.bold().paint(format!("Daily water goal of {goal} oz reached!"))
            )?;
        }
        Ok(())
    }
}

/// True only for the log that crosses the goal, later logs on the same day don't count.
pub fn goal_reached(amount: i64, total_today: i64, goal: i64) -> bool {
    goal > 0 && total_today >= goal && total_today - amount < goal
}
