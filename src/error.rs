use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid bbox [{xmin}, {ymin}, {xmax}, {ymax}]: area must be positive")]
    InvalidBox {
        xmin: i32,
        ymin: i32,
        xmax: i32,
        ymax: i32,
    },

    #[error("Threshold {0}% is out of range, expected 0..=100")]
    ThresholdOutOfRange(i64),

    #[error("Image key {key:?} found twice: {first:?} and {second:?}")]
    DuplicateImageKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{} image(s) without a counterpart: {}", .0.len(), .0.join(", "))]
    UnpairedImages(Vec<String>),

    #[error("IO Error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Xml Error in {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Invalid annotation {path:?}: {source}")]
    Annotation {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Report output failed: {0}")]
    Report(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
