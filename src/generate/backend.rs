use crate::{foundation::error::PosterResult, generate::prompt::TextToImageRequest};

/// Seam to an external text-to-image service.
///
/// Implementations own transport and authentication; the crate only builds requests and
/// decides what to do with the returned raster bytes.
pub trait TextToImageBackend {
    /// Run one request and return the encoded raster (any format the `image` crate decodes).
    fn request_text_to_image(&self, request: &TextToImageRequest) -> PosterResult<Vec<u8>>;
}

impl<F> TextToImageBackend for F
where
    F: Fn(&TextToImageRequest) -> PosterResult<Vec<u8>>,
{
    fn request_text_to_image(&self, request: &TextToImageRequest) -> PosterResult<Vec<u8>> {
        self(request)
    }
}
