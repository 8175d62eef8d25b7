//! Cloud cost totals from the `/cloudCost` endpoint.
//!
//! A deployment without cloud billing integration answers this endpoint with
//! an error or with no sets at all. That is a normal configuration, so the
//! summation never fails: it reports [`CloudCostAvailability::Unavailable`]
//! together with whatever was summed before the problem was hit.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::de::present;
use crate::error::CostApiError;

/// Value of the `aggregate` parameter sent to `/cloudCost`.
pub const CLOUD_COST_AGGREGATE: &str = "invoiceEntityID";

// ============================================================================
// Wire models
// ============================================================================

/// Response body of `/cloudCost`.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudCostResponse {
    pub data: CloudCostData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudCostData {
    pub sets: Vec<CloudCostSet>,
}

/// One cost record. `cloud_costs` keeps the payload's key order.
///
/// `None` means the record has no `cloudCosts` field at all, `Some(None)`
/// means it was `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudCostSet {
    #[serde(rename = "cloudCosts", default, deserialize_with = "present")]
    pub cloud_costs: Option<Option<Map<String, Value>>>,
}

impl CloudCostSet {
    /// Non-empty cost entries, `Ok(None)` for a `null` or empty mapping.
    ///
    /// A record without the field is malformed.
    fn entries(&self) -> Result<Option<&Map<String, Value>>, String> {
        match &self.cloud_costs {
            None => Err("missing cloudCosts".to_string()),
            Some(costs) => Ok(costs.as_ref().filter(|costs| !costs.is_empty())),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Whether cloud cost data could be obtained.
#[derive(Debug)]
pub enum CloudCostAvailability {
    Available,
    /// Not configured, no data, or the request failed.
    Unavailable(CostApiError),
}

/// Outcome of a cloud cost summation.
#[derive(Debug)]
pub struct CloudCostSum {
    /// Amortized net cost summed over all sets (partial if unavailable).
    pub total: f64,
    pub availability: CloudCostAvailability,
}

impl CloudCostSum {
    #[must_use]
    pub fn available(total: f64) -> Self {
        Self {
            total,
            availability: CloudCostAvailability::Available,
        }
    }

    #[must_use]
    pub fn unavailable(total: f64, cause: CostApiError) -> Self {
        Self {
            total,
            availability: CloudCostAvailability::Unavailable(cause),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.availability, CloudCostAvailability::Available)
    }

    /// Underlying error when cloud cost is unavailable.
    #[must_use]
    pub fn cause(&self) -> Option<&CostApiError> {
        match &self.availability {
            CloudCostAvailability::Available => None,
            CloudCostAvailability::Unavailable(cause) => Some(cause),
        }
    }
}

/// Report flags kept by the caller across refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostReportState {
    /// Whether the last cloud cost summation succeeded.
    pub cloud_cost_available: bool,
    /// Set once any cloud cost summation has completed.
    pub default_is_updated: bool,
}

impl CostReportState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a summation outcome into the flags.
    pub fn record(&mut self, sum: &CloudCostSum) {
        self.cloud_cost_available = sum.is_available();
        self.default_is_updated = true;
    }
}

// ============================================================================
// Summation
// ============================================================================

/// Sum `amortizedNetCost.cost` across sets.
///
/// The invoice entity key is read from the first set and reused for every
/// other set. Sets whose `cloudCosts` is `null` or empty are skipped; a set
/// without `cloudCosts` stops the summation.
///
/// # Errors
///
/// On failure returns the partial sum accumulated so far with the cause.
pub fn sum_amortized_net_cost(sets: &[CloudCostSet]) -> Result<f64, (f64, CostApiError)> {
    let first = sets.first().ok_or_else(|| {
        (
            0.0,
            CostApiError::MalformedResponse("cloud cost response contains no sets".to_string()),
        )
    })?;

    let invoice_entity_id = first
        .entries()
        .ok()
        .flatten()
        .and_then(|costs| costs.keys().next())
        .ok_or_else(|| {
            (
                0.0,
                CostApiError::MalformedResponse(
                    "first cloud cost set has no invoice entity".to_string(),
                ),
            )
        })?;

    let mut total = 0.0;
    for (index, set) in sets.iter().enumerate() {
        let costs = match set.entries() {
            Ok(Some(costs)) => costs,
            Ok(None) => continue,
            Err(reason) => {
                return Err((
                    total,
                    CostApiError::MalformedResponse(format!("set {index}: {reason}")),
                ));
            }
        };
        match amortized_net_cost(costs, invoice_entity_id) {
            Ok(cost) => total += cost,
            Err(reason) => {
                return Err((
                    total,
                    CostApiError::MalformedResponse(format!("set {index}: {reason}")),
                ));
            }
        }
    }

    Ok(total)
}

fn amortized_net_cost(costs: &Map<String, Value>, invoice_entity_id: &str) -> Result<f64, String> {
    let entry = costs
        .get(invoice_entity_id)
        .ok_or_else(|| format!("missing invoice entity '{invoice_entity_id}'"))?;

    entry
        .pointer("/amortizedNetCost/cost")
        .ok_or_else(|| format!("'{invoice_entity_id}' has no amortizedNetCost.cost"))?
        .as_f64()
        .ok_or_else(|| format!("'{invoice_entity_id}' amortizedNetCost.cost is not a number"))
}

/// Parse a raw `/cloudCost` body and sum it.
///
/// # Errors
///
/// Same as [`sum_amortized_net_cost`]; a body that does not parse yields a
/// zero partial sum.
pub fn sum_from_body(body: &str) -> Result<f64, (f64, CostApiError)> {
    let response: CloudCostResponse =
        serde_json::from_str(body).map_err(|e| (0.0, CostApiError::Serialization(e)))?;
    sum_amortized_net_cost(&response.data.sets)
}
