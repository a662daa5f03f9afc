//! Poll releases until a property reaches a requested state
//!
//! Every cycle fetches all tracked records concurrently and then judges the
//! whole set at once, so a single failing record ends the wait for all.

use std::time::Duration;

use futures::future::try_join_all;
use log::debug;
use serde_json::Value;
use tokio::time::Instant;

use crate::client::models::ReleaseDescriptor;
use crate::client::{FodApi, ReleaseApi};
use crate::error::{ApiError, Result, WaitError};

/// When a wait is satisfied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UntilMode {
    /// Every record is in a match state
    #[default]
    AllMatch,
    /// At least one record is in a match state
    AnyMatch,
}

/// What to observe and which values end the wait
#[derive(Debug, Clone)]
pub struct WaitSpec {
    pub property: String,
    /// Values that are valid but neither success nor failure
    pub known_states: Vec<String>,
    pub failure_states: Vec<String>,
    pub match_states: Vec<String>,
    pub until: UntilMode,
    pub interval: Duration,
    pub timeout: Duration,
}

impl WaitSpec {
    /// Wait until `suspended` equals `target` on the tracked releases.
    pub fn suspended(target: bool, interval: Duration, timeout: Duration) -> Self {
        Self {
            property: "suspended".to_string(),
            known_states: vec!["true".to_string(), "false".to_string()],
            failure_states: Vec::new(),
            match_states: vec![target.to_string()],
            until: UntilMode::AllMatch,
            interval,
            timeout,
        }
    }

    pub fn until(mut self, until: UntilMode) -> Self {
        self.until = until;
        self
    }

    fn is_recognized(&self, state: &str) -> bool {
        [&self.known_states, &self.failure_states, &self.match_states]
            .iter()
            .any(|set| set.iter().any(|s| s == state))
    }
}

/// One record's state as seen in a poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedState {
    pub release_id: i64,
    /// Qualified release name
    pub label: String,
    pub state: String,
}

/// Render states as `label: state` lines
pub fn format_states<'a>(states: impl IntoIterator<Item = &'a ObservedState>) -> String {
    states
        .into_iter()
        .map(|s| format!("{}: {}", s.label, s.state))
        .collect::<Vec<_>>()
        .join("\n")
}

fn property_state(record: &Value, property: &str) -> String {
    match record.get(property) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "null".to_string(),
        Some(other) => other.to_string(),
    }
}

async fn observe<C: FodApi + ?Sized>(
    client: &C,
    release: &ReleaseDescriptor,
    label: String,
    property: &str,
) -> Result<ObservedState> {
    let record = client
        .get_release_record(release.release_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Release {}", label)))?;

    Ok(ObservedState {
        release_id: release.release_id,
        state: property_state(&record, property),
        label,
    })
}

/// `Ok(true)` when the states satisfy the `until` mode, `Ok(false)` to keep polling.
fn evaluate(spec: &WaitSpec, states: &[ObservedState]) -> std::result::Result<bool, WaitError> {
    if let Some(unknown) = states.iter().find(|s| !spec.is_recognized(&s.state)) {
        return Err(WaitError::UnexpectedState {
            record: unknown.label.clone(),
            property: spec.property.clone(),
            state: unknown.state.clone(),
        });
    }

    let failed: Vec<&ObservedState> = states
        .iter()
        .filter(|s| spec.failure_states.contains(&s.state))
        .collect();
    if !failed.is_empty() {
        return Err(WaitError::FailureState {
            states: format_states(failed),
        });
    }

    let matched = |s: &ObservedState| spec.match_states.contains(&s.state);
    Ok(match spec.until {
        UntilMode::AllMatch => states.iter().all(matched),
        UntilMode::AnyMatch => states.iter().any(matched),
    })
}

/// Poll `releases` until they reach a match state, one fails, or the timeout elapses.
///
/// `on_cycle` sees the states of every cycle, for progress display.
/// Returns the states of the final cycle.
pub async fn wait_for<C, F>(
    client: &C,
    releases: &[ReleaseDescriptor],
    delimiter: &str,
    spec: &WaitSpec,
    mut on_cycle: F,
) -> Result<Vec<ObservedState>>
where
    C: FodApi + ?Sized,
    F: FnMut(&[ObservedState]),
{
    let started = Instant::now();

    loop {
        let states = try_join_all(releases.iter().map(|release| {
            observe(
                client,
                release,
                release.qualified_name(delimiter),
                &spec.property,
            )
        }))
        .await?;
        on_cycle(&states);

        if evaluate(spec, &states)? {
            debug!("Wait satisfied after {:?}", started.elapsed());
            return Ok(states);
        }

        let elapsed = started.elapsed();
        if elapsed >= spec.timeout {
            return Err(WaitError::Timeout {
                elapsed,
                states: format_states(&states),
            }
            .into());
        }

        let pause = spec.interval.min(spec.timeout - elapsed);
        debug!("Waiting {:?} before next poll", pause);
        tokio::time::sleep(pause).await;
    }
}
