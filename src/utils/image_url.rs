//! Validation of image references attached to listings and services.
//!
//! Images are either absolute `http(s)` URLs (CDN-hosted photos) or
//! site-relative paths served from the static directory.

use url::Url;

/// Errors that can occur while validating an image reference.
#[derive(Debug, thiserror::Error)]
pub enum ImageUrlError {
    #[error("Image reference is empty")]
    Empty,

    #[error("Invalid image URL: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS image URLs are allowed")]
    UnsupportedProtocol,
}

/// Validates an image reference and returns it in canonical form.
///
/// # Rules
///
/// 1. Relative paths must start with a single `/` and are returned trimmed
/// 2. Absolute URLs must use HTTP or HTTPS
/// 3. Hostnames are lower-cased and fragments removed
///
/// # Examples
///
/// ```
/// use dealership::utils::image_url::normalize_image_url;
///
/// assert_eq!(normalize_image_url(" /images/camry.jpg ").unwrap(), "/images/camry.jpg");
/// assert_eq!(
///     normalize_image_url("https://CDN.Example.com/a.jpg#zoom").unwrap(),
///     "https://cdn.example.com/a.jpg"
/// );
/// assert!(normalize_image_url("javascript:alert(1)").is_err());
/// ```
pub fn normalize_image_url(input: &str) -> Result<String, ImageUrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ImageUrlError::Empty);
    }

    if input.starts_with('/') {
        if input.starts_with("//") {
            return Err(ImageUrlError::InvalidFormat(
                "protocol-relative URLs are not allowed".to_string(),
            ));
        }
        return Ok(input.to_string());
    }

    let mut url = Url::parse(input).map_err(|e| ImageUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(ImageUrlError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase))
            .map_err(|e| ImageUrlError::InvalidFormat(e.to_string()))?;
    }

    url.set_fragment(None);

    Ok(url.to_string())
}

/// Validates every reference in `images`, stopping at the first bad one.
///
/// # Errors
///
/// Returns the index of the offending entry alongside the error.
pub fn normalize_image_urls(images: &[String]) -> Result<Vec<String>, (usize, ImageUrlError)> {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| normalize_image_url(image).map_err(|e| (i, e)))
        .collect()
}
