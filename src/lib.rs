//! # Twine Cost Models
//!
//! Software project cost-curve models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given a list of work modules, an hourly rate, an initial cost, and a team
//! size, each model produces a day-by-day cost curve shaped like a Rayleigh
//! staffing profile, along with summary metrics.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations for cost estimation.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Example
//!
//! ```
//! use twine_cost_models::models::cost::{
//!     Estimator, ModelKind, ModuleConfig, ModuleSize, ProjectParams,
//! };
//!
//! let params = ProjectParams {
//!     modules: vec![
//!         ModuleConfig::new("User Authentication", ModuleSize::Medium, 1.2),
//!         ModuleConfig::new("Payment Integration", ModuleSize::Large, 1.8),
//!     ],
//!     developer_rate: 45.0,
//!     initial_cost: 200.0,
//!     team_size: 2,
//! };
//!
//! let estimate = Estimator::default()
//!     .estimate(ModelKind::Cocomo, &params)
//!     .unwrap();
//!
//! let result = estimate.result();
//! let last = result.cost_breakdown.last().unwrap();
//! assert_eq!(last.cumulative_cost, result.total_cost);
//! ```
//!
//! ## Logging
//!
//! Estimation stages emit [`tracing`] events at `debug` and `trace` level,
//! and a `warn` event when normalization lifts clamped days above the daily
//! capacity.
//! Install a subscriber in the host application to see them.

pub mod models;
pub mod support;
