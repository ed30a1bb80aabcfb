pub mod aggregate;
pub mod dataset;
pub mod export;
pub mod filter;
mod router;
mod sample;
pub mod session;
pub mod view;

pub use dataset::{Dataset, DatasetIntegrityError, ProjectRecord, ProjectStatus, ScoreBand};
pub use export::{ExportArtifact, ExportFormat};
pub use filter::{Drilldown, FilterController, FilterError, FilterState, ScoreBounds, ScoreRange};
pub use router::{dashboard_router, SharedSession};
pub use sample::SAMPLE_PROJECTS;
pub use session::{DashboardEvent, DashboardSession, EventOutcome, NavTab, SessionError};
pub use view::{project, DashboardView};
