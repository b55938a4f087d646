//! Accent colors sampled from team logo images.

use image::RgbaImage;
use palette::Srgb;
use thiserror::Error;
use tracing::warn;

use crate::{
    dto::colors::{ColorPair, DeriveColorsRequest, DeriveColorsResponse, SingleColor},
    error::ServiceError,
    state::SharedState,
};

/// Rough number of pixels sampled per image.
const SAMPLE_BUDGET: u64 = 160_000;
/// Pixels more transparent than this are ignored.
const MIN_ALPHA: u8 = 0x20;
const BLACK: &str = "#000000";

/// Failure while turning a logo URL into a color.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Request could not be sent or the body not read.
    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),
    /// Server answered with a non-success status.
    #[error("image request returned {0}")]
    Status(reqwest::StatusCode),
    /// Bytes are not a supported image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// Blocking decode task panicked or was cancelled.
    #[error("image decoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Compute the average color of a single image or of both team logos.
///
/// A single `url` must succeed. For a logo pair each side is best effort and
/// comes back empty when its image cannot be used.
pub async fn derive_colors(
    state: &SharedState,
    request: DeriveColorsRequest,
) -> Result<DeriveColorsResponse, ServiceError> {
    let DeriveColorsRequest {
        url,
        home_logo,
        away_logo,
    } = request;

    if let Some(url) = non_blank(url) {
        let color = average_color_from_url(state, &url)
            .await
            .map_err(|err| {
                warn!(%url, error = %err, "cannot derive color from image");
                ServiceError::Upstream(format!("cannot load image or compute its color: {err}"))
            })?;
        return Ok(DeriveColorsResponse::Single(SingleColor { color }));
    }

    let home_logo = non_blank(home_logo);
    let away_logo = non_blank(away_logo);
    if home_logo.is_none() && away_logo.is_none() {
        return Err(ServiceError::InvalidInput(
            "provide `url` or `homeLogo`/`awayLogo`".into(),
        ));
    }

    let (primary_color, secondary_color) = tokio::join!(
        best_effort_color(state, home_logo),
        best_effort_color(state, away_logo)
    );
    Ok(DeriveColorsResponse::Pair(ColorPair {
        primary_color,
        secondary_color,
    }))
}

/// Fetch an image and return its average color as `#rrggbb`.
pub async fn average_color_from_url(state: &SharedState, url: &str) -> Result<String, ColorError> {
    let response = state
        .http()
        .get(url)
        .timeout(state.config().logo_fetch_timeout())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ColorError::Status(status));
    }

    let bytes = response.bytes().await?;
    let color = tokio::task::spawn_blocking(move || average_color(&bytes)).await??;
    Ok(color)
}

/// Decode an encoded image (PNG, JPEG, GIF) and average its opaque pixels.
pub fn average_color(bytes: &[u8]) -> Result<String, image::ImageError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    Ok(average_hex(&image))
}

/// Average the sufficiently opaque pixels of `image` on a stride grid.
///
/// Channels are weighted by alpha before averaging, so translucent edges pull
/// the result towards black.
///
/// Large images are sampled every `step` pixels, doubling the step on the
/// shorter axis until roughly [`SAMPLE_BUDGET`] samples remain. Empty or fully
/// transparent images yield black.
pub fn average_hex(image: &RgbaImage) -> String {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return BLACK.into();
    }

    let (mut step_x, mut step_y) = (1u32, 1u32);
    while u64::from(width / step_x) * u64::from(height / step_y) > SAMPLE_BUDGET {
        if step_x <= step_y {
            step_x *= 2;
        } else {
            step_y *= 2;
        }
    }

    let (mut red, mut green, mut blue, mut count) = (0u64, 0u64, 0u64, 0u64);
    for y in (0..height).step_by(step_y as usize) {
        for x in (0..width).step_by(step_x as usize) {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            if a < MIN_ALPHA {
                continue;
            }
            let alpha = u64::from(a);
            red += u64::from(r) * alpha / 255;
            green += u64::from(g) * alpha / 255;
            blue += u64::from(b) * alpha / 255;
            count += 1;
        }
    }

    if count == 0 {
        return BLACK.into();
    }

    let channel = |sum: u64| u8::try_from(sum / count).unwrap_or(u8::MAX);
    format!("#{:x}", Srgb::new(channel(red), channel(green), channel(blue)))
}

async fn best_effort_color(state: &SharedState, url: Option<String>) -> String {
    let Some(url) = url else {
        return String::new();
    };
    match average_color_from_url(state, &url).await {
        Ok(color) => color,
        Err(err) => {
            warn!(%url, error = %err, "cannot derive logo color");
            String::new()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
