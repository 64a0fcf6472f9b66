use crate::{auth::AuthError, upstream::UpstreamError};

mod activities;
mod aggregator;
mod comments;
pub mod join;
mod render;

pub use activities::ActivityFetcher;
pub use aggregator::TimelineAggregator;
pub use comments::CommentFetcher;
pub use render::*;

#[cfg(test)]
mod test;

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
