//! Data model shared by the pipeline, statistics and worksheet adapter.

mod request;
mod result;
mod signals;

pub use request::{CheckRequest, ExpectedLink};
pub use result::{CheckResult, RedirectHop, ResolutionOutcome};
pub use signals::{
    DirectiveSource, IndexStatus, IndexingDirectives, IndexingVerdict, LinkCheckReport,
    LinkCheckResult, PageSignals, Presence,
};
