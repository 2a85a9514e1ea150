use crate::{
    error::{Result, ScalerError},
    models::{
        Destination, ImageDelivery, ImageSource, TransformRequest, WireDestination,
        WireTransformRequest, BODY_SOURCE,
    },
};

/// Maps a caller request onto the body of the sign call.
pub fn build_wire_request(request: &TransformRequest) -> Result<WireTransformRequest> {
    if request.destinations.is_empty() {
        return Err(ScalerError::Validation("No destination provided".to_string()));
    }

    let destinations = request
        .destinations
        .iter()
        .map(wire_destination)
        .collect::<Result<Vec<_>>>()?;

    let source = match &request.source {
        ImageSource::RemoteUrl(url) => url.clone(),
        ImageSource::Buffer(_) | ImageSource::LocalPath(_) | ImageSource::Body => {
            BODY_SOURCE.to_string()
        }
    };

    Ok(WireTransformRequest {
        source,
        destinations,
    })
}

fn wire_destination(dest: &Destination) -> Result<WireDestination> {
    dest.validate()?;

    let upload = match &dest.delivery {
        ImageDelivery::Upload(upload) => Some(upload.clone()),
        ImageDelivery::Buffer | ImageDelivery::SaveToLocalPath(_) => None,
    };

    Ok(WireDestination {
        fit: dest.fit,
        image_type: dest.image_type,
        quality: dest.quality,
        upload,
        crop: dest.crop,
    })
}
