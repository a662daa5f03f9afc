//! Attribute models

use serde::{Deserialize, Serialize};

/// Attribute definition as configured for the tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    /// Attribute ID
    pub id: i64,

    /// Attribute name
    pub name: String,

    /// Entity the attribute applies to: Application, Release, Microservice, Vulnerability
    pub attribute_type: String,

    /// Value type: Text, Boolean, Date, Picklist, User
    pub attribute_data_type: String,

    /// Whether a value must be supplied on create
    #[serde(default)]
    pub is_required: bool,

    /// Allowed values for Picklist attributes
    #[serde(default)]
    pub picklist_values: Vec<PicklistValue>,
}

/// One allowed value of a Picklist attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    pub id: i64,
    pub name: String,
}

/// Attribute value as sent in create requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub value: String,
}
