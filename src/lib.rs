//! Client for a remote image transform service.
//!
//! The service does the decoding, resizing and encoding. This crate manages
//! the access token, signs the request, streams the source image, and turns
//! the outputs into in-memory buffers, saved files, or upload confirmations.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use client::Scaler;
pub use config::ScalerConfig;
pub use error::{Result, ScalerError};
pub use models::{
    Destination, DestinationImage, DestinationImageType, ImageDelivery, ImageSource,
    NormalizedCrop, OutputImageResult, Size, SourceImageInfo, SourceImageType, SourceOptions,
    TimeStats, TransformRequest, TransformResponse, Upload, UploadMethod,
};
