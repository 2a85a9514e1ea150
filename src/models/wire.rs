use serde::{Deserialize, Serialize};

use super::transform::{DestinationImageType, NormalizedCrop, Size, SourceImageInfo, Upload};

/// `source` value telling the service the image bytes arrive on the signed URL.
pub const BODY_SOURCE: &str = "body";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireTransformRequest {
    pub source: String,
    pub destinations: Vec<WireDestination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireDestination {
    pub fit: Size,
    #[serde(rename = "type")]
    pub image_type: DestinationImageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<Upload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<NormalizedCrop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignResponse {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTransformResponse {
    pub source_image: SourceImageInfo,
    pub destination_images: Vec<OutputDescriptor>,
    #[serde(default)]
    pub delete_url: Option<String>,
    pub time_stats: ServiceTimeStats,
}

/// One produced image as reported by the service. A missing `download_url`
/// means the service already delivered it to the caller's upload target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    pub fit: Size,
    pub pixel_size: Size,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTimeStats {
    pub transform_ms: u64,
    #[serde(default)]
    pub upload_images_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDeleteBody {
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_destination_omits_unset_fields() {
        let dest = WireDestination {
            fit: Size::square(512),
            image_type: DestinationImageType::Jpeg,
            quality: None,
            upload: None,
            crop: None,
        };
        assert_eq!(
            serde_json::to_value(&dest).unwrap(),
            json!({ "fit": { "width": 512, "height": 512 }, "type": "jpeg" })
        );
    }

    #[test]
    fn test_upload_method_serialized_uppercase() {
        let dest = WireDestination {
            fit: Size::new(1280, 720),
            image_type: DestinationImageType::Png,
            quality: Some(0.5),
            upload: Some(Upload::put("https://bucket/out.png")),
            crop: None,
        };
        let value = serde_json::to_value(&dest).unwrap();
        assert_eq!(value["upload"], json!({ "url": "https://bucket/out.png", "method": "PUT" }));
        assert_eq!(value["quality"], json!(0.5));
    }

    #[test]
    fn test_service_response_parses_optional_fields() {
        let body = json!({
            "sourceImage": { "pixelSize": { "width": 4032, "height": 3024 }, "byteSize": 2048 },
            "destinationImages": [
                {
                    "fit": { "width": 512, "height": 512 },
                    "pixelSize": { "width": 512, "height": 384 },
                    "downloadUrl": "https://dl/1",
                    "fileId": "f-1"
                },
                {
                    "fit": { "width": 256, "height": 256 },
                    "pixelSize": { "width": 256, "height": 192 }
                }
            ],
            "deleteUrl": "https://del",
            "timeStats": { "transformMs": 120 }
        });

        let parsed: ServiceTransformResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.source_image.byte_size, 2048);
        assert_eq!(parsed.destination_images.len(), 2);
        assert_eq!(parsed.destination_images[0].file_id.as_deref(), Some("f-1"));
        assert!(parsed.destination_images[1].download_url.is_none());
        assert_eq!(parsed.delete_url.as_deref(), Some("https://del"));
        assert_eq!(parsed.time_stats.transform_ms, 120);
        assert_eq!(parsed.time_stats.upload_images_ms, None);
    }
}
