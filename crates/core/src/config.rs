//! Facade configuration, owned by the caller and lent to each facade.

use crate::error::CloudOpsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model used by `invoke_model` when the caller does not name one.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-v2";

/// Region in which S3 accepts bucket creation without a location constraint.
pub const S3_DEFAULT_REGION: &str = "us-east-1";

/// What the model facade does with a collaborator fault.
///
/// Identity and storage facades always propagate; this only governs model
/// listing and invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the fault and return an empty result. An unknown model id is
    /// still returned as `InvalidModel`; only collaborator faults degrade.
    #[default]
    Degrade,
    /// Return the fault to the caller.
    Propagate,
}

impl FromStr for ErrorPolicy {
    type Err = CloudOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "propagate" => Ok(Self::Propagate),
            other => Err(CloudOpsError::Config(format!(
                "unknown error policy '{other}' (expected degrade or propagate)"
            ))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => f.write_str("degrade"),
            Self::Propagate => f.write_str("propagate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    /// `None` defers to the SDK's region resolution.
    pub region: Option<String>,
    pub default_model_id: String,
    pub error_policy: ErrorPolicy,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            region: None,
            default_model_id: DEFAULT_MODEL_ID.to_string(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl FacadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Fills in `region` from what the SDK resolved, unless one was set
    /// explicitly.
    pub fn with_resolved_region(mut self, resolved: Option<&str>) -> Self {
        if self.region.is_none() {
            self.region = resolved.map(str::to_owned);
        }
        self
    }

    pub fn with_default_model(mut self, model_id: impl Into<String>) -> Self {
        self.default_model_id = model_id.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Location constraint to send with CreateBucket, if the region needs one.
    pub fn bucket_location_constraint(&self) -> Option<&str> {
        self.region
            .as_deref()
            .filter(|region| *region != S3_DEFAULT_REGION)
    }
}
