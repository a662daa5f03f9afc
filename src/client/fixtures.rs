//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use serde_json::Map;

use super::models::{
    ApplicationDescriptor, AttributeDefinition, MicroserviceDescriptor, PicklistValue,
    ReleaseDescriptor, UserDescriptor, UserGroupDescriptor,
};

// ============================================================================
// ApplicationBuilder
// ============================================================================

/// Builder for test [`ApplicationDescriptor`] instances.
///
/// ```ignore
/// let app = ApplicationBuilder::new(1, "X").microservices().build();
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    id: i64,
    name: String,
    has_microservices: bool,
}

impl ApplicationBuilder {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_microservices: false,
        }
    }

    /// Mark the application as organizing releases under microservices.
    pub fn microservices(mut self) -> Self {
        self.has_microservices = true;
        self
    }

    pub fn build(self) -> ApplicationDescriptor {
        ApplicationDescriptor {
            application_id: self.id,
            application_name: self.name,
            has_microservices: self.has_microservices,
            application_type: Some("Web_Thick_Client".to_string()),
            business_criticality_type: Some("High".to_string()),
            extra: Map::new(),
        }
    }
}

// ============================================================================
// ReleaseBuilder
// ============================================================================

/// Builder for test [`ReleaseDescriptor`] instances.
///
/// Defaults to an active Development release without microservice.
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    id: i64,
    name: String,
    application_id: i64,
    application_name: String,
    microservice: Option<(i64, String)>,
    sdlc_status: String,
    suspended: bool,
}

impl ReleaseBuilder {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            application_id: 1,
            application_name: "App".to_string(),
            microservice: None,
            sdlc_status: "Development".to_string(),
            suspended: false,
        }
    }

    pub fn application(mut self, app: &ApplicationDescriptor) -> Self {
        self.application_id = app.application_id;
        self.application_name = app.application_name.clone();
        self
    }

    pub fn microservice(mut self, ms: &MicroserviceDescriptor) -> Self {
        self.microservice = Some((ms.microservice_id, ms.microservice_name.clone()));
        self
    }

    pub fn sdlc_status(mut self, status: impl Into<String>) -> Self {
        self.sdlc_status = status.into();
        self
    }

    pub fn suspended(mut self) -> Self {
        self.suspended = true;
        self
    }

    pub fn build(self) -> ReleaseDescriptor {
        let (microservice_id, microservice_name) = match self.microservice {
            Some((id, name)) => (Some(id), Some(name)),
            None => (None, None),
        };
        ReleaseDescriptor {
            release_id: self.id,
            release_name: self.name,
            application_id: self.application_id,
            application_name: self.application_name,
            microservice_id,
            microservice_name,
            sdlc_status_type: Some(self.sdlc_status),
            suspended: self.suspended,
            extra: Map::new(),
        }
    }
}

// ============================================================================
// AttributeBuilder
// ============================================================================

/// Builder for test [`AttributeDefinition`] instances.
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    id: i64,
    name: String,
    attribute_type: String,
    data_type: String,
    required: bool,
    picklist: Vec<String>,
}

impl AttributeBuilder {
    /// A non-required Application-level Text attribute.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attribute_type: "Application".to_string(),
            data_type: "Text".to_string(),
            required: false,
            picklist: Vec::new(),
        }
    }

    pub fn attribute_type(mut self, attribute_type: impl Into<String>) -> Self {
        self.attribute_type = attribute_type.into();
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Picklist values; also switches the data type to Picklist.
    pub fn picklist(mut self, values: &[&str]) -> Self {
        self.data_type = "Picklist".to_string();
        self.picklist = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn build(self) -> AttributeDefinition {
        AttributeDefinition {
            id: self.id,
            name: self.name,
            attribute_type: self.attribute_type,
            attribute_data_type: self.data_type,
            is_required: self.required,
            picklist_values: self
                .picklist
                .into_iter()
                .enumerate()
                .map(|(i, name)| PicklistValue {
                    id: i as i64 + 1,
                    name,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Small helpers
// ============================================================================

pub fn microservice(id: i64, name: &str, app: &ApplicationDescriptor) -> MicroserviceDescriptor {
    MicroserviceDescriptor {
        microservice_id: id,
        microservice_name: name.to_string(),
        application_id: Some(app.application_id),
    }
}

pub fn user(id: i64, name: &str) -> UserDescriptor {
    UserDescriptor {
        user_id: id,
        user_name: name.to_string(),
        email: Some(format!("{}@example.com", name)),
    }
}

pub fn user_group(id: i64, name: &str) -> UserGroupDescriptor {
    UserGroupDescriptor {
        id,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_builder_links_application_and_microservice() {
        let app = ApplicationBuilder::new(3, "X").microservices().build();
        let ms = microservice(9, "MS1", &app);
        let release = ReleaseBuilder::new(7, "R1")
            .application(&app)
            .microservice(&ms)
            .suspended()
            .build();

        assert_eq!(release.application_id, 3);
        assert_eq!(release.qualified_name("/"), "X/MS1/R1");
        assert!(release.suspended);
    }

    #[test]
    fn test_attribute_builder_picklist() {
        let attr = AttributeBuilder::new(1, "Region")
            .picklist(&["EU", "US"])
            .required()
            .build();
        assert_eq!(attr.attribute_data_type, "Picklist");
        assert_eq!(attr.picklist_values[0].name, "EU");
        assert!(attr.is_required);
    }
}
