//! Conditional release creation
//!
//! Given a qualified release name, figure out which of application,
//! microservice and release already exist and create only the missing ones,
//! in that order. All validation and argument checks for a step run before
//! its first mutating call. Nothing is rolled back: if release creation
//! fails after the application was created, the application stays.

use log::debug;

use super::lookup::{self, AttributeScope};
use super::name::{QualifiedReleaseName, ReleaseRef};
use super::resolver::Resolver;
use super::Diagnostics;
use crate::client::models::{
    AppCreateRequest, AppType, ApplicationDescriptor, Criticality, MicroserviceDescriptor,
    ReleaseCreateRequest, ReleaseDescriptor, SdlcStatus,
};
use crate::client::{ApplicationApi, FodApi, MicroserviceApi, ReleaseApi};
use crate::error::{ApiError, Error, Result, ValidationError};

pub const APP_CREATED: &str = "APP_CREATED";
pub const MICROSERVICE_CREATED: &str = "MICROSERVICE_CREATED";
pub const RELEASE_CREATED: &str = "RELEASE_CREATED";
pub const SKIPPED_EXISTING: &str = "SKIPPED_EXISTING";

/// Options only used when the application has to be created
#[derive(Debug, Clone, Default)]
pub struct AppCreateOptions {
    pub description: Option<String>,
    pub notify: Vec<String>,
    /// User ID or user name
    pub owner: Option<String>,
    /// User group IDs or names
    pub groups: Vec<String>,
    pub app_type: Option<AppType>,
    pub criticality: Option<Criticality>,
}

/// Input of [`create_release`]
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub name: QualifiedReleaseName,
    pub description: Option<String>,
    pub sdlc_status: SdlcStatus,
    pub skip_if_exists: bool,
    pub auto_required_attrs: bool,
    pub copy_from: Option<ReleaseRef>,
    /// `name=value` attribute assignments, names or IDs
    pub attributes: Vec<(String, String)>,
    pub app: AppCreateOptions,
}

impl CreateOptions {
    pub fn new(name: QualifiedReleaseName, sdlc_status: SdlcStatus) -> Self {
        Self {
            name,
            description: None,
            sdlc_status,
            skip_if_exists: false,
            auto_required_attrs: false,
            copy_from: None,
            attributes: Vec::new(),
            app: AppCreateOptions::default(),
        }
    }
}

/// Which entities a run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateResult {
    pub app_created: bool,
    pub microservice_created: bool,
    pub release_created: bool,
}

impl CreateResult {
    /// Newline-joined names of the created entities, or `SKIPPED_EXISTING`.
    pub fn tag(&self) -> String {
        let parts: Vec<&str> = [
            (self.app_created, APP_CREATED),
            (self.microservice_created, MICROSERVICE_CREATED),
            (self.release_created, RELEASE_CREATED),
        ]
        .into_iter()
        .filter_map(|(created, tag)| created.then_some(tag))
        .collect();

        if parts.is_empty() {
            SKIPPED_EXISTING.to_string()
        } else {
            parts.join("\n")
        }
    }
}

#[derive(Debug)]
pub struct CreateOutcome {
    pub release: ReleaseDescriptor,
    pub result: CreateResult,
    pub diagnostics: Diagnostics,
}

/// What exists before anything is created
enum AppState {
    AppMissing,
    /// Application organizes releases under microservices and the named one is missing
    MicroserviceMissing {
        app: ApplicationDescriptor,
        microservice: String,
    },
    /// Application exists, and so does the microservice if one is needed
    Ready {
        app: ApplicationDescriptor,
        microservice: Option<MicroserviceDescriptor>,
    },
}

/// Create the release named in `options`, plus its application and
/// microservice when they do not exist yet.
pub async fn create_release<C: FodApi + ?Sized>(
    client: &C,
    delimiter: &str,
    options: &CreateOptions,
) -> Result<CreateOutcome> {
    let resolver = Resolver::new(client, delimiter);
    let mut diagnostics = Diagnostics::default();

    if options.skip_if_exists
        && let Some(existing) = resolver.find_release(&options.name).await?
    {
        debug!(
            "Release '{}' already exists, skipping",
            options.name.qualified_name(delimiter)
        );
        return Ok(CreateOutcome {
            release: existing,
            result: CreateResult::default(),
            diagnostics,
        });
    }

    let (release, result) = match resolve_state(&resolver, &options.name, &mut diagnostics).await?
    {
        AppState::AppMissing => {
            create_with_application(client, &resolver, options, &mut diagnostics).await?
        }
        AppState::MicroserviceMissing { app, microservice } => {
            create_in_application(
                client,
                &resolver,
                options,
                &app,
                MicroserviceTarget::Create(microservice),
                &mut diagnostics,
            )
            .await?
        }
        AppState::Ready { app, microservice } => {
            create_in_application(
                client,
                &resolver,
                options,
                &app,
                MicroserviceTarget::Existing(microservice),
                &mut diagnostics,
            )
            .await?
        }
    };

    Ok(CreateOutcome {
        release,
        result,
        diagnostics,
    })
}

async fn resolve_state<C: FodApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    name: &QualifiedReleaseName,
    diagnostics: &mut Diagnostics,
) -> Result<AppState> {
    let Some(app) = resolver.find_application(name.application()).await? else {
        return Ok(AppState::AppMissing);
    };

    if !app.has_microservices {
        if let Some(ms) = name.microservice() {
            diagnostics.warn(format!(
                "Ignoring microservice '{}' as application '{}' does not have microservices",
                ms, app.application_name
            ));
        }
        return Ok(AppState::Ready {
            app,
            microservice: None,
        });
    }

    let Some(ms_name) = name.microservice().filter(|ms| !ms.trim().is_empty()) else {
        return Err(ValidationError::new(
            "create release",
            vec!["Microservice name must be specified for microservices application".to_string()],
        )
        .into());
    };

    Ok(match resolver.find_microservice(&app, ms_name).await? {
        Some(ms) => AppState::Ready {
            app,
            microservice: Some(ms),
        },
        None => AppState::MicroserviceMissing {
            app,
            microservice: ms_name.to_string(),
        },
    })
}

/// Application absent: one create-application call establishes the
/// application, its first microservice and the release.
async fn create_with_application<C: FodApi + ?Sized>(
    client: &C,
    resolver: &Resolver<'_, C>,
    options: &CreateOptions,
    diagnostics: &mut Diagnostics,
) -> Result<(ReleaseDescriptor, CreateResult)> {
    if options.copy_from.is_some() {
        diagnostics.warn("Ignoring --copy-from option as this is the first release on a new application");
    }

    let with_microservices = options.app.app_type.is_some_and(AppType::is_microservice);
    let name = if with_microservices {
        options.name.clone()
    } else {
        if let Some(ms) = options.name.microservice() {
            diagnostics.warn(format!(
                "Ignoring microservice '{}' as the new application does not have microservices",
                ms
            ));
        }
        options.name.without_microservice()
    };

    let owner_id = match options.app.owner.as_deref() {
        Some(owner) => Some(lookup::resolve_owner(client, owner).await?),
        None => None,
    };
    let user_group_ids = lookup::resolve_user_groups(client, &options.app.groups).await?;
    let attributes = lookup::resolve_attributes(
        client,
        &options.attributes,
        AttributeScope::All,
        options.auto_required_attrs,
        diagnostics,
    )
    .await?;

    let request = AppCreateRequest::builder()
        .qualified_name(&name)
        .app_type(options.app.app_type)
        .application_description(options.app.description.as_deref())
        .release_description(options.description.as_deref())
        .business_criticality(options.app.criticality)
        .sdlc_status(Some(options.sdlc_status))
        .notify(&options.app.notify)
        .owner_id(owner_id)
        .user_group_ids(user_group_ids)
        .attributes(attributes)
        .build()
        .validate()?;

    let created = client.create_application(&request).await?;
    debug!("Created application {}", created.application_id);

    let release = resolver.find_release(&name).await?.ok_or_else(|| {
        Error::from(ApiError::InvalidResponse(format!(
            "Release '{}' not found after creating application {}",
            name.qualified_name(resolver.delimiter()),
            created.application_id
        )))
    })?;

    Ok((
        release,
        CreateResult {
            app_created: true,
            microservice_created: with_microservices,
            release_created: true,
        },
    ))
}

enum MicroserviceTarget {
    Existing(Option<MicroserviceDescriptor>),
    Create(String),
}

/// Application present: create the microservice when missing, then the release.
async fn create_in_application<C: FodApi + ?Sized>(
    client: &C,
    resolver: &Resolver<'_, C>,
    options: &CreateOptions,
    app: &ApplicationDescriptor,
    microservice: MicroserviceTarget,
    diagnostics: &mut Diagnostics,
) -> Result<(ReleaseDescriptor, CreateResult)> {
    let target = if app.has_microservices {
        options.name.clone()
    } else {
        options.name.without_microservice()
    };
    let copy_from = resolve_copy_from(resolver, options, &target, app, diagnostics).await?;
    let attributes = lookup::resolve_attributes(
        client,
        &options.attributes,
        AttributeScope::Release,
        options.auto_required_attrs,
        diagnostics,
    )
    .await?;

    let existing_ms_id = match &microservice {
        MicroserviceTarget::Existing(ms) => ms.as_ref().map(|m| m.microservice_id),
        MicroserviceTarget::Create(_) => None,
    };
    let request = ReleaseCreateRequest::builder()
        .application_id(app.application_id)
        .release_name(options.name.release())
        .release_description(options.description.as_deref())
        .sdlc_status(options.sdlc_status)
        .microservice_id(existing_ms_id)
        .copy_state_from(copy_from)
        .attributes(attributes)
        .build()
        .validate()?;

    let mut result = CreateResult::default();
    let request = match microservice {
        MicroserviceTarget::Create(ms_name) => {
            let ms = client
                .create_microservice(app.application_id, &ms_name)
                .await?;
            debug!("Created microservice {}", ms.microservice_id);
            result.microservice_created = true;
            request.with_microservice_id(Some(ms.microservice_id))
        }
        MicroserviceTarget::Existing(_) => request,
    };

    let release = client.create_release(&request).await?;
    debug!("Created release {}", release.release_id);
    result.release_created = true;

    Ok((release, result))
}

/// Release ID to copy state from, if `--copy-from` applies.
async fn resolve_copy_from<C: FodApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    options: &CreateOptions,
    target: &QualifiedReleaseName,
    app: &ApplicationDescriptor,
    diagnostics: &mut Diagnostics,
) -> Result<Option<i64>> {
    let Some(copy_from) = &options.copy_from else {
        return Ok(None);
    };
    let same_as_target =
        "Ignoring --copy-from option as it's the same as the release being created";

    if let ReleaseRef::Name(name) = copy_from
        && name == target
    {
        diagnostics.warn(same_as_target);
        return Ok(None);
    }

    let source = resolver.find_release_ref(copy_from).await?.ok_or_else(|| {
        Error::InvalidArgument(format!(
            "Release to copy from not found: {}",
            copy_from.display(resolver.delimiter())
        ))
    })?;

    if source.qualified_name(resolver.delimiter()) == target.qualified_name(resolver.delimiter()) {
        diagnostics.warn(same_as_target);
        return Ok(None);
    }
    if source.application_id != app.application_id {
        return Err(Error::InvalidArgument(
            "Copy release from different application is not allowed".to_string(),
        ));
    }

    Ok(Some(source.release_id))
}
