use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, ScalerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Formats the service can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceImageType {
    Jpeg,
    Png,
    Webp,
    Heic,
    Tiff,
    Gif,
    Bmp,
}

/// Formats the service can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationImageType {
    Jpeg,
    Png,
    Heic,
}

/// Crop rectangle with every edge expressed as a fraction of the source size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCrop {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl NormalizedCrop {
    pub fn validate(&self) -> Result<()> {
        let edges = [self.left, self.top, self.right, self.bottom];
        if edges.iter().any(|e| !(0.0..=1.0).contains(e)) {
            return Err(ScalerError::Validation(
                "Crop edges must be within [0, 1]".to_string(),
            ));
        }
        if self.left >= self.right || self.top >= self.bottom {
            return Err(ScalerError::Validation(
                "Crop rectangle must have a positive area".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadMethod {
    Post,
    Put,
}

/// A pre-signed destination the service writes the output to directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<UploadMethod>,
}

impl Upload {
    pub fn put(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Some(UploadMethod::Put),
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Some(UploadMethod::Post),
        }
    }
}

/// Where a single output should end up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageDelivery {
    #[default]
    Buffer,
    SaveToLocalPath(PathBuf),
    Upload(Upload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub fit: Size,
    pub image_type: DestinationImageType,
    pub quality: Option<f32>,
    pub crop: Option<NormalizedCrop>,
    pub delivery: ImageDelivery,
}

impl Destination {
    pub fn new(fit: Size, image_type: DestinationImageType) -> Self {
        Self {
            fit,
            image_type,
            quality: None,
            crop: None,
            delivery: ImageDelivery::Buffer,
        }
    }

    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn crop(mut self, crop: NormalizedCrop) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn save_to_local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.delivery = ImageDelivery::SaveToLocalPath(path.into());
        self
    }

    pub fn upload(mut self, upload: Upload) -> Self {
        self.delivery = ImageDelivery::Upload(upload);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(quality) = self.quality {
            if !(0.0..=1.0).contains(&quality) {
                return Err(ScalerError::Validation(format!(
                    "Quality must be within [0, 1], got {}",
                    quality
                )));
            }
        }
        if let Some(crop) = &self.crop {
            crop.validate()?;
        }
        if let ImageDelivery::Upload(upload) = &self.delivery {
            if upload.url.trim().is_empty() {
                return Err(ScalerError::Validation("Upload url is empty".to_string()));
            }
        }
        Ok(())
    }
}

/// The image to transform. Exactly one kind of source is ever sent.
///
/// `Body` declares that the bytes travel in the submission request body
/// without the client supplying them up front.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Buffer(Bytes),
    LocalPath(PathBuf),
    RemoteUrl(String),
    Body,
}

/// Loosely specified source, resolved with the precedence
/// buffer, then local path, then remote URL. Nothing set resolves to
/// [`ImageSource::Body`].
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub buffer: Option<Bytes>,
    pub local_path: Option<PathBuf>,
    pub remote_url: Option<String>,
}

impl From<SourceOptions> for ImageSource {
    fn from(options: SourceOptions) -> Self {
        match options {
            SourceOptions {
                buffer: Some(buffer),
                ..
            } => ImageSource::Buffer(buffer),
            SourceOptions {
                local_path: Some(path),
                ..
            } => ImageSource::LocalPath(path),
            SourceOptions {
                remote_url: Some(url),
                ..
            } => ImageSource::RemoteUrl(url),
            _ => ImageSource::Body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformRequest {
    pub source: ImageSource,
    pub destinations: Vec<Destination>,
}

impl TransformRequest {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            destinations: Vec::new(),
        }
    }

    pub fn single(source: ImageSource, destination: Destination) -> Self {
        Self {
            source,
            destinations: vec![destination],
        }
    }

    pub fn destination(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImageInfo {
    pub pixel_size: Size,
    pub byte_size: u64,
}

/// The resolved form of one output image.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputImageResult {
    Buffer(Bytes),
    LocalPath(PathBuf),
    Uploaded,
}

impl OutputImageResult {
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            OutputImageResult::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            OutputImageResult::LocalPath(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, OutputImageResult::Uploaded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationImage {
    pub fit: Size,
    pub pixel_size: Size,
    pub image: OutputImageResult,
}

/// Wall-clock breakdown in milliseconds. Credential refresh is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    pub sign_ms: u64,
    pub send_image_ms: u64,
    pub transform_ms: u64,
    pub get_images_ms: u64,
    pub total_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformResponse {
    pub source_image: SourceImageInfo,
    pub destination_images: Vec<DestinationImage>,
    pub time_stats: TimeStats,
}

impl TransformResponse {
    /// Result of the first destination.
    pub fn image(&self) -> Option<&OutputImageResult> {
        self.destination_images.first().map(|d| &d.image)
    }

    pub fn into_image(self) -> Option<OutputImageResult> {
        self.destination_images.into_iter().next().map(|d| d.image)
    }
}
