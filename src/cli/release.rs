//! Release commands: create, get, list and wait-for

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde_json::Value;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs, ReleaseCreateArgs, ReleaseFilterArgs, WaitArgs};
use crate::client::models::ReleaseDescriptor;
use crate::client::parallel::DEFAULT_CONCURRENCY;
use crate::client::{FodApi, PaginationParams, ReleaseApi, fetch_remaining_pages};
use crate::error::{ApiError, Result};
use crate::output::Formattable;
use crate::output::formatters::format_duration;
use crate::output::transform::{
    Pipeline, action, application_filter, include_filter, qualified_name,
};
use crate::release::wait::ObservedState;
use crate::release::{ReleaseRef, Resolver, WaitSpec, create_release, wait_for};

/// Action tag of records returned by `wait-for`
pub const WAIT_COMPLETE: &str = "WAIT_COMPLETE";

/// Run `release create`
pub async fn create(opts: &GlobalOptions, args: &ReleaseCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let options = args.to_options(&ctx.delimiter)?;

    let records = run_create(ctx.client.as_ref(), &ctx.delimiter, &options).await?;
    records.print(ctx.format)
}

async fn run_create<C: FodApi + ?Sized>(
    client: &C,
    delimiter: &str,
    options: &crate::release::CreateOptions,
) -> Result<Vec<Value>> {
    let outcome = create_release(client, delimiter, options).await?;
    for warning in outcome.diagnostics.warnings() {
        warn!("{}", warning);
    }

    let tag = outcome.result.tag();
    debug!("Create finished with {}", tag);

    let pipeline = Pipeline::new()
        .then(qualified_name(delimiter))
        .then(action(tag));
    Ok(pipeline.apply_all([serde_json::to_value(&outcome.release)?]))
}

/// Run `release get`
pub async fn get(opts: &GlobalOptions, release: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = run_get(ctx.client.as_ref(), &ctx.delimiter, release).await?;
    records.print(ctx.format)
}

async fn run_get<C: FodApi + ?Sized>(
    client: &C,
    delimiter: &str,
    release: &str,
) -> Result<Vec<Value>> {
    let release_ref = ReleaseRef::parse(release, delimiter)?;
    let release = Resolver::new(client, delimiter)
        .require_release_ref(&release_ref)
        .await?;

    let pipeline = Pipeline::new().then(qualified_name(delimiter));
    Ok(pipeline.apply_all([serde_json::to_value(&release)?]))
}

/// Run `release list`
pub async fn list(
    opts: &GlobalOptions,
    filters: &ReleaseFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = run_list(ctx.client.clone(), &ctx.delimiter, filters, pagination).await?;
    records.print(ctx.format)
}

async fn run_list<C>(
    client: Arc<C>,
    delimiter: &str,
    filters: &ReleaseFilterArgs,
    pagination: &PaginationArgs,
) -> Result<Vec<Value>>
where
    C: FodApi + 'static,
{
    if let Some(id) = filters.app_id()
        && Resolver::new(client.as_ref(), delimiter)
            .find_application_by_id(id)
            .await?
            .is_none()
    {
        return Err(ApiError::NotFound(format!("Application {}", id)).into());
    }

    let query = filters.to_filters();
    // Without `active` the server still returns active releases, and a name
    // filter may not be sendable; paging then cannot honor --limit/--offset.
    let server_side = filters.server_side() && query.is_exact();
    let params = if server_side {
        pagination.to_params()
    } else {
        PaginationParams::new()
    };

    debug!("Fetching releases");
    let first = client.list_releases(&query, &params).await?;
    let offsets = if server_side {
        pagination.clip_offsets(first.remaining_offsets())
    } else {
        first.remaining_offsets()
    };
    let page_size = first.limit;

    let mut releases: Vec<ReleaseDescriptor> = first.items;
    let rest = fetch_remaining_pages(
        offsets,
        |offset| {
            let client = client.clone();
            let query = query.clone();
            async move {
                let params = PaginationParams::new().limit(page_size).offset(offset);
                client
                    .list_releases(&query, &params)
                    .await
                    .map(|page| page.items)
            }
        },
        DEFAULT_CONCURRENCY,
    )
    .await?;
    releases.extend(rest);
    debug!("Fetched {} releases", releases.len());

    let pipeline = Pipeline::new()
        .then(application_filter(filters.app_name()))
        .then(include_filter(&filters.include))
        .then(qualified_name(delimiter));
    let records = releases
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut records = pipeline.apply_all(records);

    if !server_side {
        let skip = pagination.offset.unwrap_or(0).min(records.len());
        records.drain(..skip);
    }
    if let Some(limit) = pagination.limit {
        records.truncate(limit);
    }
    Ok(records)
}

/// Run `release wait-for`
pub async fn wait(opts: &GlobalOptions, releases: &[String], args: &WaitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let spec = WaitSpec::suspended(
        args.target_suspended(),
        args.interval.unwrap_or_else(|| ctx.config.wait.interval()),
        args.timeout.unwrap_or_else(|| ctx.config.wait.timeout()),
    )
    .until(args.until);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Waiting for {} release(s), timeout {}",
        releases.len(),
        format_duration(spec.timeout)
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = run_wait(
        ctx.client.as_ref(),
        &ctx.delimiter,
        releases,
        &spec,
        |states| {
            let matched = states
                .iter()
                .filter(|s| spec.match_states.contains(&s.state))
                .count();
            spinner.set_message(format!(
                "{}/{} release(s) with {} = {}",
                matched,
                states.len(),
                spec.property,
                spec.match_states.join("|")
            ));
        },
    )
    .await;
    spinner.finish_and_clear();

    result?.print(ctx.format)
}

async fn run_wait<C, F>(
    client: &C,
    delimiter: &str,
    releases: &[String],
    spec: &WaitSpec,
    on_cycle: F,
) -> Result<Vec<Value>>
where
    C: FodApi + ?Sized,
    F: FnMut(&[ObservedState]),
{
    let resolver = Resolver::new(client, delimiter);
    let mut tracked = Vec::with_capacity(releases.len());
    for release in releases {
        let release_ref = ReleaseRef::parse(release, delimiter)?;
        tracked.push(resolver.require_release_ref(&release_ref).await?);
    }

    let states = wait_for(client, &tracked, delimiter, spec, on_cycle).await?;

    let pipeline = Pipeline::new()
        .then(qualified_name(delimiter))
        .then(action(WAIT_COMPLETE));
    let mut records = Vec::with_capacity(tracked.len());
    for (release, observed) in tracked.iter().zip(&states) {
        let mut record = serde_json::to_value(release)?;
        if let Some(obj) = record.as_object_mut() {
            let value = serde_json::from_str(&observed.state)
                .unwrap_or_else(|_| Value::String(observed.state.clone()));
            obj.insert(spec.property.clone(), value);
        }
        records.push(record);
    }
    Ok(pipeline.apply_all(records))
}
