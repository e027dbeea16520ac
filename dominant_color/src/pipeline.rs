// THEORY:
// The `pipeline` module is the top-level API for the engine. It wires the stages
// together behind one call: a URL goes in, an `rgba(...)` accent string comes out.
//
// Stage layout per invocation:
//   Stage 1: Fetch (async, cancellable, bounded by the client timeout)
//   Stage 2: Decode + Sample + Quantize (CPU-bound, run on the blocking pool)
//   Stage 3: Format
// Nothing is shared between invocations, so `derive_many` simply runs several of them
// at once.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use image::{DynamicImage, GenericImageView};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::config::PipelineConfig;
use crate::core_modules::color::color::Color;
use crate::core_modules::formatter::formatter;
use crate::core_modules::quantizer::quantizer::Quantizer;
use crate::core_modules::sampler::sampler;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::{ColorError, Result};
use crate::fetcher::{HttpFetcher, ImageFetcher};

/// The main, top-level struct for the engine.
pub struct ColorPipeline<F = HttpFetcher> {
    fetcher: F,
    config: PipelineConfig,
}

impl ColorPipeline<HttpFetcher> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: ImageFetcher> ColorPipeline<F> {
    pub fn with_fetcher(fetcher: F, config: PipelineConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.config.max_depth)
    }

    /// Fetches `url` and returns its accent color as `rgba(R, G, B, 0.8)`.
    #[instrument(skip(self), fields(max_depth = self.config.max_depth))]
    pub async fn dominant_color(&self, url: &str) -> Result<String> {
        let fetched = self.fetcher.fetch(url).await;
        self.finish(fetched).await
    }

    /// As `dominant_color`, but aborts the fetch once `cancel` becomes `true`.
    /// A dropped sender never cancels.
    #[instrument(skip(self, cancel), fields(max_depth = self.config.max_depth))]
    pub async fn dominant_color_until(
        &self,
        url: &str,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<String> {
        let fetched = tokio::select! {
            fetched = self.fetcher.fetch(url) => fetched,
            _ = cancelled(&mut cancel) => Err(ColorError::Cancelled { url: url.to_string() }),
        };
        self.finish(fetched).await
    }

    /// Derives colors for every URL, at most one in flight per CPU, in input order.
    pub async fn derive_many(
        &self,
        urls: &[String],
        cancel: watch::Receiver<bool>,
    ) -> Vec<Result<String>> {
        stream::iter(urls)
            .map(|url| self.dominant_color_until(url, cancel.clone()))
            .buffered(num_cpus::get().max(1))
            .collect()
            .await
    }

    /// Runs the CPU-bound stages for already fetched bytes on the blocking pool.
    pub async fn derive_from_bytes(&self, bytes: Bytes) -> Result<String> {
        let quantizer = self.quantizer();
        let color =
            tokio::task::spawn_blocking(move || dominant_color_from_bytes(&bytes, quantizer))
                .await??;

        Ok(formatter::to_rgba_string(color))
    }

    async fn finish(&self, fetched: Result<Bytes>) -> Result<String> {
        let result = match fetched {
            Ok(bytes) => self.derive_from_bytes(bytes).await,
            Err(e) => Err(e),
        };
        result.inspect_err(|e| warn!(error = %e, "could not derive color"))
    }
}

async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let outcome = cancel.wait_for(|cancelled| *cancelled).await.map(|_| ());
    if outcome.is_err() {
        std::future::pending::<()>().await;
    }
}

pub fn dominant_color_from_bytes(bytes: &[u8], quantizer: Quantizer) -> Result<Color> {
    let image = image_helper::decode(bytes)?;
    dominant_color_of(&image, quantizer)
}

pub fn dominant_color_of(image: &DynamicImage, quantizer: Quantizer) -> Result<Color> {
    let (width, height) = image.dimensions();
    let mut pixels = sampler::sample_pixels(image)?;
    debug!(width, height, pixels = pixels.len(), "sampled image");

    quantizer
        .dominant(&mut pixels)
        .ok_or(ColorError::DegenerateInput { width, height })
}
