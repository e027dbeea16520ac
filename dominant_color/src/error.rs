//! Error types for the dominant color engine

use thiserror::Error;

/// Caller-facing description shared by every failure.
pub const USER_MESSAGE: &str = "could not derive color";

pub type Result<T> = std::result::Result<T, ColorError>;

#[derive(Error, Debug)]
pub enum ColorError {
    /// Transport failure or non-success status while fetching the image
    #[error("failed to fetch image from {url}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The surrounding request was cancelled before the fetch finished
    #[error("fetch of {url} was cancelled")]
    Cancelled { url: String },

    /// Bytes are not a decodable raster image
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),

    /// The image has no pixels to sample
    #[error("image has no pixels ({width}x{height})")]
    DegenerateInput { width: u32, height: u32 },

    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    /// The blocking color worker panicked or was aborted
    #[error("color worker failed")]
    Worker(#[from] tokio::task::JoinError),
}

impl ColorError {
    pub fn fetch<E>(url: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fetch {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Every variant collapses to the same message for callers; the variant and its
    /// source chain are for logs.
    pub fn user_message(&self) -> &'static str {
        USER_MESSAGE
    }
}
