#![forbid(unsafe_code)]

//! Roster model, rank taxonomy and chart style for the muster org-chart renderer.
//!
//! Design goals:
//! - layout stays a pure function: everything it needs (taxonomy, style, injected
//!   timestamps) is an explicit value constructed here, never ambient state
//! - configuration mistakes fail at construction; roster data never fails at layout
//! - deterministic, testable outputs

pub mod config;
pub mod error;
pub mod fit;
pub mod model;
pub mod taxonomy;

pub use config::{ChartStyle, FitBudgets};
pub use error::{Error, Result};
pub use model::{Member, RenderMeta, Roster};
pub use taxonomy::{RankDescriptor, RankGroup, RankTaxonomy, TaxonomyConfig, default_rav_config};
