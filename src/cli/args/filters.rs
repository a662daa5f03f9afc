//! Filter argument types for CLI commands

use clap::Args;

use crate::client::FilterParams;
use crate::client::models::ReleaseInclude;
use crate::client::query::render_query_flags;

/// Filter arguments for `release list`.
#[derive(Args, Debug, Clone)]
pub struct ReleaseFilterArgs {
    /// Only list releases of this application (name or numeric ID)
    #[arg(long, short = 'a')]
    pub app: Option<String>,

    /// Release states to include (active, suspended)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "active",
        hide_possible_values = true
    )]
    pub include: Vec<ReleaseInclude>,
}

impl ReleaseFilterArgs {
    /// The `--app` value when it is a numeric application ID
    pub fn app_id(&self) -> Option<i64> {
        self.app.as_deref().and_then(|app| app.trim().parse().ok())
    }

    /// The `--app` value when it is an application name
    pub fn app_name(&self) -> Option<&str> {
        if self.app_id().is_some() {
            return None;
        }
        self.app.as_deref().map(str::trim).filter(|app| !app.is_empty())
    }

    /// Whether the server already returns exactly the selected releases.
    ///
    /// Active releases are always returned, so selecting only suspended ones
    /// needs client-side filtering.
    pub fn server_side(&self) -> bool {
        self.include.contains(&ReleaseInclude::Active)
    }

    /// Server-side filters and switches for these arguments
    pub fn to_filters(&self) -> FilterParams {
        let filters = match (self.app_id(), self.app_name()) {
            (Some(id), _) => FilterParams::new().filter("applicationId", id),
            (None, Some(app)) => FilterParams::new().filter("applicationName", app),
            _ => FilterParams::new(),
        };
        filters.flags(render_query_flags(&self.include))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(app: Option<&str>, include: Vec<ReleaseInclude>) -> ReleaseFilterArgs {
        ReleaseFilterArgs {
            app: app.map(String::from),
            include,
        }
    }

    #[test]
    fn test_app_name_or_id() {
        let by_name = args(Some("WebGoat"), vec![ReleaseInclude::Active]).to_filters();
        assert_eq!(by_name.get("applicationName"), Some("WebGoat"));

        let by_id = args(Some("42"), vec![ReleaseInclude::Active]).to_filters();
        assert_eq!(by_id.get("applicationId"), Some("42"));
        assert_eq!(by_id.get("applicationName"), None);

        assert_eq!(args(Some(" 7 "), vec![]).app_id(), Some(7));
        assert_eq!(args(Some("App2"), vec![]).app_id(), None);
        assert_eq!(args(Some(" App2 "), vec![]).app_name(), Some("App2"));
        assert_eq!(args(Some("42"), vec![]).app_name(), None);
    }

    #[test]
    fn test_include_suspended_sets_flag() {
        let active = args(None, vec![ReleaseInclude::Active]).to_filters();
        assert!(!active.has_flag("includeSuspended"));

        let both = args(None, vec![ReleaseInclude::Active, ReleaseInclude::Suspended]).to_filters();
        assert!(both.has_flag("includeSuspended"));
    }

    #[test]
    fn test_suspended_only_needs_client_side_filtering() {
        assert!(args(None, vec![ReleaseInclude::Active]).server_side());
        assert!(args(None, vec![ReleaseInclude::Suspended, ReleaseInclude::Active]).server_side());
        assert!(!args(None, vec![ReleaseInclude::Suspended]).server_side());
    }
}
