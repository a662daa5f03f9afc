//! Name-to-entity resolution against the API
//!
//! Lookups narrow with server-side filters and then match names exactly.
//! A missing entity is `Ok(None)`; only transport and ambiguity problems
//! are errors.

use log::debug;

use super::name::{QualifiedReleaseName, ReleaseRef};
use crate::client::models::{ApplicationDescriptor, MicroserviceDescriptor, ReleaseDescriptor};
use crate::client::{
    ApplicationApi, FilterParams, FodApi, MicroserviceApi, PaginationParams, ReleaseApi,
};
use crate::error::{ApiError, Error, Result};

/// Resolves applications, microservices and releases by name or ID.
pub struct Resolver<'a, C: FodApi + ?Sized> {
    client: &'a C,
    delimiter: &'a str,
}

fn single<T>(mut matches: Vec<T>, describe: impl FnOnce() -> String) -> Result<Option<T>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => Err(Error::InvalidArgument(format!(
            "{} matches {} records; use a numeric ID instead",
            describe(),
            n
        ))),
    }
}

impl<'a, C: FodApi + ?Sized> Resolver<'a, C> {
    pub fn new(client: &'a C, delimiter: &'a str) -> Self {
        Self { client, delimiter }
    }

    pub fn delimiter(&self) -> &str {
        self.delimiter
    }

    pub async fn find_application(&self, name: &str) -> Result<Option<ApplicationDescriptor>> {
        debug!("Looking up application '{}'", name);
        let filters = FilterParams::new().filter("applicationName", name);
        let first = self
            .client
            .list_applications(&filters, &PaginationParams::new())
            .await?;
        let offsets = first.remaining_offsets();
        let mut items = first.items;
        if !filters.is_exact() {
            for offset in offsets {
                let params = PaginationParams::new().offset(offset);
                items.extend(self.client.list_applications(&filters, &params).await?.items);
            }
        }
        let matches = items
            .into_iter()
            .filter(|a| a.application_name == name)
            .collect();
        single(matches, || format!("Application name '{}'", name))
    }

    pub async fn find_application_by_id(&self, id: i64) -> Result<Option<ApplicationDescriptor>> {
        debug!("Looking up application {}", id);
        self.client.get_application(id).await
    }

    pub async fn find_microservice(
        &self,
        app: &ApplicationDescriptor,
        name: &str,
    ) -> Result<Option<MicroserviceDescriptor>> {
        debug!(
            "Looking up microservice '{}' of application {}",
            name, app.application_id
        );
        let matches = self
            .client
            .list_microservices(app.application_id)
            .await?
            .into_iter()
            .filter(|m| m.microservice_name == name)
            .collect();
        single(matches, || {
            format!("Microservice name '{}{}{}'", app.application_name, self.delimiter, name)
        })
    }

    /// Find a release by qualified name.
    ///
    /// Suspended releases are included. A name without microservice only
    /// matches releases that have none.
    pub async fn find_release(
        &self,
        name: &QualifiedReleaseName,
    ) -> Result<Option<ReleaseDescriptor>> {
        let qualified = name.qualified_name(self.delimiter);
        debug!("Looking up release '{}'", qualified);

        let filters = FilterParams::new()
            .filter("applicationName", name.application())
            .filter("releaseName", name.release())
            .filter_opt("microserviceName", name.microservice())
            .flags(["includeSuspended"]);
        let first = self
            .client
            .list_releases(&filters, &PaginationParams::new())
            .await?;
        let offsets = first.remaining_offsets();
        let mut items = first.items;
        if !filters.is_exact() {
            for offset in offsets {
                let params = PaginationParams::new().offset(offset);
                items.extend(self.client.list_releases(&filters, &params).await?.items);
            }
        }

        let matches = items
            .into_iter()
            .filter(|r| {
                r.application_name == name.application()
                    && r.release_name == name.release()
                    && r.microservice() == name.microservice()
            })
            .collect();
        single(matches, || format!("Release name '{}'", qualified))
    }

    pub async fn find_release_by_id(&self, id: i64) -> Result<Option<ReleaseDescriptor>> {
        self.client.get_release(id).await
    }

    pub async fn find_release_ref(&self, release: &ReleaseRef) -> Result<Option<ReleaseDescriptor>> {
        match release {
            ReleaseRef::Id(id) => self.find_release_by_id(*id).await,
            ReleaseRef::Name(name) => self.find_release(name).await,
        }
    }

    /// Like [`find_release_ref`](Self::find_release_ref), but absence is an error.
    pub async fn require_release_ref(&self, release: &ReleaseRef) -> Result<ReleaseDescriptor> {
        self.find_release_ref(release).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Release {}", release.display(self.delimiter))).into()
        })
    }
}
