//! # Delivery URLs
//!
//! Transformation directives are encoded as one comma-separated path segment,
//! e.g. `.../image/upload/w_800,h_600,q_auto,f_auto/products/beam-h200`.

use crate::types::TransformOptions;

pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Plain delivery URL without transformations.
pub fn image_url(delivery_base: &str, cloud_name: &str, public_id: &str) -> String {
    format!("{}/{}/image/upload/{}", delivery_base.trim_end_matches('/'), cloud_name, public_id)
}

/// Comma-joined transformation directives for `options`.
pub fn transform_directives(options: &TransformOptions) -> String {
    let mut directives = Vec::with_capacity(4);

    if let Some(width) = options.width {
        directives.push(format!("w_{width}"));
    }
    if let Some(height) = options.height {
        directives.push(format!("h_{height}"));
    }
    directives.push(format!("q_{}", options.quality.as_deref().unwrap_or("auto")));
    directives.push(format!("f_{}", options.format.as_deref().unwrap_or("auto")));

    directives.join(",")
}

/// Delivery URL with transformation directives.
pub fn optimized_url(
    delivery_base: &str,
    cloud_name: &str,
    public_id: &str,
    options: &TransformOptions,
) -> String {
    format!(
        "{}/{}/image/upload/{}/{}",
        delivery_base.trim_end_matches('/'),
        cloud_name,
        transform_directives(options),
        public_id
    )
}
