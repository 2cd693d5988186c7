// Job pipeline: normalization, dedup, preference scoring, and page views.
// Everything except `pipeline` and `handlers` is pure and synchronous.

pub mod dedup;
pub mod filters;
pub mod handlers;
pub mod normalize;
pub mod pipeline;
pub mod roles;
pub mod scoring;
pub mod selection;
