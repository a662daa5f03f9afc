//! Create-request payloads and their builders
//!
//! Requests are only constructed through builders. Setters are named for their
//! effect and set derived fields together, so fields that must agree (for
//! example `applicationType` and `hasMicroservices`) cannot drift apart.

use serde::Serialize;
use serde_json::Value;

use super::{AppType, AttributeValue, Criticality, SdlcStatus};
use crate::error::{Result, ValidationError};
use crate::release::name::QualifiedReleaseName;

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn require(messages: &mut Vec<String>, present: bool, message: &str) {
    if !present {
        messages.push(message.to_string());
    }
}

// ============================================================================
// Application create
// ============================================================================

/// Payload creating an application together with its first release
/// (and first microservice, for microservice applications).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    application_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_criticality_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sdlc_status_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_type: Option<String>,
    has_microservices: bool,
    microservices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_microservice_name: Option<String>,
    attributes: Vec<AttributeValue>,
    user_group_ids: Vec<i64>,
}

impl AppCreateRequest {
    pub fn builder() -> AppCreateRequestBuilder {
        AppCreateRequestBuilder::default()
    }

    /// Check every required field, collecting all violations.
    pub fn validate(self) -> Result<Self> {
        let mut messages = Vec::new();
        require(
            &mut messages,
            !is_blank(self.application_name.as_deref()),
            "Required application name not specified",
        );
        require(
            &mut messages,
            !is_blank(self.business_criticality_type.as_deref()),
            "Required application business criticality not specified",
        );
        require(
            &mut messages,
            !is_blank(self.release_name.as_deref()),
            "Required release name not specified",
        );
        require(
            &mut messages,
            !is_blank(self.sdlc_status_type.as_deref()),
            "Required release SDLC status not specified",
        );
        require(
            &mut messages,
            self.owner_id.is_some(),
            "Required application owner not specified",
        );
        require(
            &mut messages,
            !is_blank(self.application_type.as_deref()),
            "Required application type not specified",
        );
        if self.has_microservices {
            require(
                &mut messages,
                !is_blank(self.release_microservice_name.as_deref()),
                "Required release microservice name not specified",
            );
        }

        if messages.is_empty() {
            Ok(self)
        } else {
            Err(ValidationError::new("create application", messages).into())
        }
    }

    /// Wire payload. `applicationType` is dropped for microservice applications
    /// because the API rejects both being present.
    pub fn payload(&self) -> Result<Value> {
        let mut body = serde_json::to_value(self)?;
        if self.has_microservices
            && let Some(obj) = body.as_object_mut()
        {
            obj.remove("applicationType");
        }
        Ok(body)
    }
}

/// Builder for [`AppCreateRequest`]
#[derive(Debug, Clone, Default)]
pub struct AppCreateRequestBuilder {
    application_name: Option<String>,
    application_description: Option<String>,
    business_criticality_type: Option<String>,
    email_list: Option<String>,
    release_name: Option<String>,
    release_description: Option<String>,
    sdlc_status_type: Option<String>,
    owner_id: Option<i64>,
    application_type: Option<String>,
    has_microservices: bool,
    microservices: Vec<String>,
    release_microservice_name: Option<String>,
    attributes: Vec<AttributeValue>,
    user_group_ids: Vec<i64>,
}

impl AppCreateRequestBuilder {
    /// Application, microservice and release names from one qualified name.
    pub fn qualified_name(self, name: &QualifiedReleaseName) -> Self {
        let mut builder = self.microservice_name(name.microservice());
        builder.application_name = Some(name.application().to_string());
        builder.release_name = Some(name.release().to_string());
        builder
    }

    /// Sets the release's microservice and the list of microservices to create.
    pub fn microservice_name(mut self, name: Option<&str>) -> Self {
        let name = non_blank(name);
        self.microservices = name.iter().cloned().collect();
        self.release_microservice_name = name;
        self
    }

    /// Sets `applicationType` and `hasMicroservices` together.
    pub fn app_type(mut self, app_type: Option<AppType>) -> Self {
        match app_type {
            Some(t) => {
                self.application_type = Some(t.api_value().to_string());
                self.has_microservices = t.is_microservice();
            }
            None => {
                self.application_type = None;
                self.has_microservices = false;
            }
        }
        self
    }

    pub fn application_description(mut self, description: Option<&str>) -> Self {
        self.application_description = non_blank(description);
        self
    }

    pub fn release_description(mut self, description: Option<&str>) -> Self {
        self.release_description = non_blank(description);
        self
    }

    pub fn business_criticality(mut self, criticality: Option<Criticality>) -> Self {
        self.business_criticality_type = criticality.map(|c| c.api_value().to_string());
        self
    }

    pub fn sdlc_status(mut self, status: Option<SdlcStatus>) -> Self {
        self.sdlc_status_type = status.map(|s| s.api_value().to_string());
        self
    }

    /// Notification recipients, sent as a `;`-separated email list.
    pub fn notify(mut self, emails: &[String]) -> Self {
        let emails: Vec<&str> = emails
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect();
        self.email_list = if emails.is_empty() {
            None
        } else {
            Some(emails.join(";"))
        };
        self
    }

    pub fn owner_id(mut self, owner_id: Option<i64>) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn user_group_ids(mut self, ids: Vec<i64>) -> Self {
        self.user_group_ids = ids;
        self
    }

    pub fn attributes(mut self, attributes: Vec<AttributeValue>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn build(self) -> AppCreateRequest {
        AppCreateRequest {
            application_name: self.application_name,
            application_description: self.application_description,
            business_criticality_type: self.business_criticality_type,
            email_list: self.email_list,
            release_name: self.release_name,
            release_description: self.release_description,
            sdlc_status_type: self.sdlc_status_type,
            owner_id: self.owner_id,
            application_type: self.application_type,
            has_microservices: self.has_microservices,
            microservices: self.microservices,
            release_microservice_name: self.release_microservice_name,
            attributes: self.attributes,
            user_group_ids: self.user_group_ids,
        }
    }
}

// ============================================================================
// Release create
// ============================================================================

/// Payload creating a release under an existing application
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    application_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_description: Option<String>,
    copy_state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    copy_state_release_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sdlc_status_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    microservice_id: Option<i64>,
    attributes: Vec<AttributeValue>,
}

impl ReleaseCreateRequest {
    pub fn builder() -> ReleaseCreateRequestBuilder {
        ReleaseCreateRequestBuilder::default()
    }

    pub fn validate(self) -> Result<Self> {
        let mut messages = Vec::new();
        require(
            &mut messages,
            self.application_id.is_some(),
            "Required application id not specified",
        );
        require(
            &mut messages,
            !is_blank(self.release_name.as_deref()),
            "Required release name not specified",
        );
        require(
            &mut messages,
            !is_blank(self.sdlc_status_type.as_deref()),
            "Required release SDLC status not specified",
        );

        if messages.is_empty() {
            Ok(self)
        } else {
            Err(ValidationError::new("create release", messages).into())
        }
    }

    /// Attach a microservice ID after the request was validated.
    ///
    /// The microservice may only exist once validation passed.
    pub fn with_microservice_id(mut self, microservice_id: Option<i64>) -> Self {
        self.microservice_id = microservice_id;
        self
    }

    pub fn payload(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builder for [`ReleaseCreateRequest`]
#[derive(Debug, Clone, Default)]
pub struct ReleaseCreateRequestBuilder {
    application_id: Option<i64>,
    release_name: Option<String>,
    release_description: Option<String>,
    copy_state_release_id: Option<i64>,
    sdlc_status_type: Option<String>,
    microservice_id: Option<i64>,
    attributes: Vec<AttributeValue>,
}

impl ReleaseCreateRequestBuilder {
    pub fn application_id(mut self, id: i64) -> Self {
        self.application_id = Some(id);
        self
    }

    pub fn release_name(mut self, name: &str) -> Self {
        self.release_name = non_blank(Some(name));
        self
    }

    pub fn release_description(mut self, description: Option<&str>) -> Self {
        self.release_description = non_blank(description);
        self
    }

    pub fn sdlc_status(mut self, status: SdlcStatus) -> Self {
        self.sdlc_status_type = Some(status.api_value().to_string());
        self
    }

    pub fn microservice_id(mut self, id: Option<i64>) -> Self {
        self.microservice_id = id;
        self
    }

    /// Copy issue state from another release. Sets `copyState` and
    /// `copyStateReleaseId` together; `None` clears both.
    pub fn copy_state_from(mut self, release_id: Option<i64>) -> Self {
        self.copy_state_release_id = release_id;
        self
    }

    pub fn attributes(mut self, attributes: Vec<AttributeValue>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn build(self) -> ReleaseCreateRequest {
        ReleaseCreateRequest {
            application_id: self.application_id,
            release_name: self.release_name,
            release_description: self.release_description,
            copy_state: self.copy_state_release_id.is_some(),
            copy_state_release_id: self.copy_state_release_id,
            sdlc_status_type: self.sdlc_status_type,
            microservice_id: self.microservice_id,
            attributes: self.attributes,
        }
    }
}
