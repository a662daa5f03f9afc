//! Enumerations accepted by the create endpoints

use clap::ValueEnum;

use crate::client::query::QueryFlag;

/// Application type selected on `--app-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppType {
    #[value(name = "Web")]
    Web,
    #[value(name = "ThickClient")]
    ThickClient,
    #[value(name = "Mobile")]
    Mobile,
    #[value(name = "Microservice")]
    Microservice,
}

impl AppType {
    /// Wire value of the `applicationType` field
    pub fn api_value(self) -> &'static str {
        match self {
            AppType::Web | AppType::ThickClient | AppType::Microservice => "Web_Thick_Client",
            AppType::Mobile => "Mobile",
        }
    }

    /// Whether applications of this type organize releases under microservices
    pub fn is_microservice(self) -> bool {
        matches!(self, AppType::Microservice)
    }
}

/// Business criticality of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Criticality {
    #[value(name = "High")]
    High,
    #[value(name = "Medium")]
    Medium,
    #[value(name = "Low")]
    Low,
}

impl Criticality {
    pub fn api_value(self) -> &'static str {
        match self {
            Criticality::High => "High",
            Criticality::Medium => "Medium",
            Criticality::Low => "Low",
        }
    }
}

/// Release lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SdlcStatus {
    #[value(name = "Production")]
    Production,
    #[value(name = "QA")]
    Qa,
    #[value(name = "Development")]
    Development,
    #[value(name = "Retired")]
    Retired,
}

impl SdlcStatus {
    pub fn api_value(self) -> &'static str {
        match self {
            SdlcStatus::Production => "Production",
            SdlcStatus::Qa => "QA",
            SdlcStatus::Development => "Development",
            SdlcStatus::Retired => "Retired",
        }
    }
}

/// Release states selected on `release list --include`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseInclude {
    Active,
    Suspended,
}

impl ReleaseInclude {
    /// Whether a release with the given `suspended` value is selected
    pub fn selects(self, suspended: bool) -> bool {
        match self {
            ReleaseInclude::Active => !suspended,
            ReleaseInclude::Suspended => suspended,
        }
    }
}

impl QueryFlag for ReleaseInclude {
    fn request_param(&self) -> Option<&'static str> {
        match self {
            ReleaseInclude::Active => None,
            ReleaseInclude::Suspended => Some("includeSuspended"),
        }
    }
}
