use super::PlatformScraper;
use crate::platform::GENERIC_PLATFORM;

/// Pipeline only, using the detected store profile.
pub struct GenericScraper;

impl PlatformScraper for GenericScraper {
    fn platform(&self) -> &'static str {
        GENERIC_PLATFORM
    }
}
