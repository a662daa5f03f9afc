//! Arguments for `release create`

use clap::Args;

use crate::client::models::{AppType, Criticality, SdlcStatus};
use crate::error::Result;
use crate::release::create::AppCreateOptions;
use crate::release::{CreateOptions, QualifiedReleaseName, ReleaseRef};

/// Parse a single `name=value` attribute assignment.
///
/// The value may itself contain `=`; the name may not be empty.
pub fn parse_attribute(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid attribute '{}': expected <name>=<value>", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid attribute '{}': name is empty", s));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Arguments for `release create`.
#[derive(Args, Debug, Clone)]
pub struct ReleaseCreateArgs {
    /// Qualified release name
    pub qualified_name: String,

    /// Release description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// SDLC status of the new release
    #[arg(long, value_enum)]
    pub sdlc_status: SdlcStatus,

    /// Return the existing release instead of failing
    #[arg(long)]
    pub skip_if_exists: bool,

    /// Fill required attributes that were not given with default values
    #[arg(long)]
    pub auto_required_attrs: bool,

    /// Copy state from another release of the same application (name or ID)
    #[arg(long)]
    pub copy_from: Option<String>,

    /// Attribute assignments as name=value, comma-separated or repeated
    #[arg(long, value_delimiter = ',', value_parser = parse_attribute)]
    pub attrs: Vec<(String, String)>,

    #[command(flatten)]
    pub app: AppCreateArgs,
}

impl ReleaseCreateArgs {
    /// Parse names with `delimiter` and collect the workflow options.
    pub fn to_options(&self, delimiter: &str) -> Result<CreateOptions> {
        let name = QualifiedReleaseName::parse(&self.qualified_name, delimiter)?;
        let copy_from = self
            .copy_from
            .as_deref()
            .map(|s| ReleaseRef::parse(s, delimiter))
            .transpose()?;

        let mut options = CreateOptions::new(name, self.sdlc_status);
        options.description = self.description.clone();
        options.skip_if_exists = self.skip_if_exists;
        options.auto_required_attrs = self.auto_required_attrs;
        options.copy_from = copy_from;
        options.attributes = self.attrs.clone();
        options.app = AppCreateOptions::from(&self.app);
        Ok(options)
    }
}

/// Application settings, only used when the application does not exist yet.
#[derive(Args, Debug, Clone, Default)]
pub struct AppCreateArgs {
    /// Description of the new application
    #[arg(long)]
    pub app_description: Option<String>,

    /// Email addresses to notify about the new application
    #[arg(long, value_delimiter = ',')]
    pub app_notify: Vec<String>,

    /// Owner of the new application (user name or ID)
    #[arg(long)]
    pub app_owner: Option<String>,

    /// User groups with access to the new application (names or IDs)
    #[arg(long, value_delimiter = ',')]
    pub app_groups: Vec<String>,

    /// Type of the new application
    #[arg(long, value_enum)]
    pub app_type: Option<AppType>,

    /// Business criticality of the new application
    #[arg(long, value_enum)]
    pub app_criticality: Option<Criticality>,
}

impl From<&AppCreateArgs> for AppCreateOptions {
    fn from(args: &AppCreateArgs) -> Self {
        Self {
            description: args.app_description.clone(),
            notify: args.app_notify.clone(),
            owner: args.app_owner.clone(),
            groups: args.app_groups.clone(),
            app_type: args.app_type,
            criticality: args.app_criticality,
        }
    }
}
