//! Allocation queries against the `/allocation` endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::de::present;
use crate::window::Window;

/// The `data` field of an allocation response, passed through untouched.
///
/// Normally an array of allocation sets, but `null` or any other JSON value
/// the provider sends is returned as-is.
pub type AllocationData = Value;

/// Label dimensions allocations are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationDimension {
    WorkloadType,
    ProjectId,
    ProjectName,
    StartingUser,
    Organization,
    BillingTag,
}

impl AllocationDimension {
    /// Every dimension, in the order sent to the API.
    pub const ALL: [Self; 6] = [
        Self::WorkloadType,
        Self::ProjectId,
        Self::ProjectName,
        Self::StartingUser,
        Self::Organization,
        Self::BillingTag,
    ];

    /// Kubernetes label key backing this dimension.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::WorkloadType => "dominodatalab.com/workload-type",
            Self::ProjectId => "dominodatalab.com/project-id",
            Self::ProjectName => "dominodatalab.com/project-name",
            Self::StartingUser => "dominodatalab.com/starting-user-username",
            Self::Organization => "dominodatalab.com/organization-name",
            Self::BillingTag => "dominodatalab.com/billing-tag",
        }
    }

    /// `aggregate` value for `dimensions`: each label followed by `,`.
    #[must_use]
    pub fn aggregate(dimensions: &[Self]) -> String {
        dimensions.iter().map(|d| format!("{d},")).collect()
    }
}

impl std::fmt::Display for AllocationDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "label:{}", self.label_key())
    }
}

/// How idle and shared costs are split across allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareSplit {
    #[default]
    Weighted,
    Even,
}

impl std::fmt::Display for ShareSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weighted => write!(f, "weighted"),
            Self::Even => write!(f, "even"),
        }
    }
}

/// Parameters for an aggregated allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationQuery {
    pub window: Window,
    pub dimensions: Vec<AllocationDimension>,
    pub accumulate: bool,
    pub share_idle: bool,
    pub share_tenancy_costs: bool,
    pub share_split: ShareSplit,
}

impl AllocationQuery {
    /// The fixed aggregation used for cost reports: all six label
    /// dimensions, per-step sets, idle and tenancy costs shared by weight.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            window,
            dimensions: AllocationDimension::ALL.to_vec(),
            accumulate: false,
            share_idle: true,
            share_tenancy_costs: true,
            share_split: ShareSplit::Weighted,
        }
    }

    /// Query pairs in request order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("window", self.window.to_string()),
            ("aggregate", AllocationDimension::aggregate(&self.dimensions)),
            ("accumulate", self.accumulate.to_string()),
            ("shareIdle", self.share_idle.to_string()),
            ("shareTenancyCosts", self.share_tenancy_costs.to_string()),
            ("shareSplit", self.share_split.to_string()),
        ]
    }
}

/// Response body of `/allocation`; only `data` is read.
///
/// `data` is `None` when the field is absent and `Some(Value::Null)` when it
/// is an explicit `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationResponse {
    #[serde(default, deserialize_with = "present")]
    pub data: Option<AllocationData>,
}
