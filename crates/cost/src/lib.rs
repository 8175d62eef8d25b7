#![allow(clippy::doc_markdown)] // Allow product names like Kubecost without backticks

//! Client for cluster cost-reporting APIs (Kubecost-style).
//!
//! Three request/response helpers, each a single HTTP round trip:
//!
//! - **Token** - fetch a bearer token from the auth endpoint
//! - **Cloud cost** - sum amortized net cloud cost over a window
//! - **Allocations** - fetch allocations grouped by workload, project,
//!   user, organization and billing tag labels
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cluster_cost::{bearer_headers, CostApi, CostApiClient, CostReportState, Window};
//!
//! #[tokio::main]
//! async fn main() -> cluster_cost::Result<()> {
//!     // Reads COST_API_BASE_URL and COST_API_AUTH_URL
//!     let client = CostApiClient::from_env()?;
//!
//!     let token = client.get_token().await?;
//!     let headers = bearer_headers(&token)?;
//!     let window = Window::days(7);
//!
//!     let mut state = CostReportState::new();
//!     let cloud = client.get_cloud_cost_sum(&window, &headers).await;
//!     state.record(&cloud);
//!
//!     if state.cloud_cost_available {
//!         println!("Cloud cost: ${:.2}", cloud.total);
//!     }
//!
//!     let allocations = client.get_aggregated_allocations(&window, &headers).await?;
//!     if let Some(sets) = allocations.as_array() {
//!         println!("{} allocation sets", sets.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Cloud cost availability
//!
//! Clusters without a cloud billing integration answer `/cloudCost` with an
//! error or empty data. [`CostApi::get_cloud_cost_sum`] never fails; check
//! [`CloudCostSum::is_available`] (or a [`CostReportState`]) to tell
//! "zero cost" apart from "feature unavailable".

pub mod allocation;
pub mod auth;
pub mod client;
pub mod cloud_cost;
pub mod config;
mod de;
mod error;
pub mod window;

pub use allocation::{AllocationData, AllocationDimension, AllocationQuery, ShareSplit};
pub use auth::{bearer_headers, Token, TOKEN_EXPIRED_SENTINEL};
pub use client::{CostApi, CostApiClient};
pub use cloud_cost::{CloudCostAvailability, CloudCostSum, CostReportState};
pub use config::CostApiConfig;
pub use error::{CostApiError, Result};
pub use window::Window;
