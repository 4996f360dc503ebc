use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown course id: {0}")]
    UnknownCourse(String),
}

/// Why a candidate node did not yield a course.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("node has no anchor with an href")]
    MissingHref,
    #[error("href {0:?} does not resolve to a url")]
    InvalidUrl(String),
    #[error("host {host:?} is outside the target domain")]
    ForeignHost { host: String },
    #[error("no course id in url {0}")]
    NoCourseId(String),
}
