//! Remote source of paged image listings.

use std::future::Future;

use crate::types::errors::ImageError;
use crate::types::image::{ImageSort, RemoteImage};

/// Anything that can serve page `page` (1-based) of `per_page` images.
///
/// Implementations reject pages they cannot serve with
/// [`ImageError::PageLimitExceeded`] or [`ImageError::PreconditionViolation`]
/// without making a request. Timeouts are reported as ordinary failures.
pub trait RemoteImageSource {
    fn fetch_page(
        &self,
        page: u32,
        per_page: usize,
        order_by: ImageSort,
    ) -> impl Future<Output = Result<Vec<RemoteImage>, ImageError>> + Send;
}

/// Checks the page bounds shared by every source.
pub fn check_page(page: u32, max_page: u32) -> Result<(), ImageError> {
    if page < 1 {
        return Err(ImageError::PreconditionViolation(
            "pages start at 1".to_string(),
        ));
    }
    if page > max_page {
        return Err(ImageError::PageLimitExceeded {
            page,
            max: max_page,
        });
    }
    Ok(())
}
