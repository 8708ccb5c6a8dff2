//! Latest radar swirl image published by the Malaysian Meteorological Department.

use chrono_tz::Tz;

use super::{AreaVariant, RemoteResource, Source};
use crate::window::CaptureInstant;

const LATEST_URL: &str = "https://api.met.gov.my/static/images/swirl-latest.gif";

const VARIANTS: [AreaVariant; 1] = [AreaVariant::MySwirl];

#[derive(Debug, Clone)]
pub struct Malaysia {
    latest_url: String,
}

impl Malaysia {
    pub fn with_latest_url(latest_url: &str) -> Self {
        Malaysia {
            latest_url: latest_url.to_string(),
        }
    }
}

impl Default for Malaysia {
    fn default() -> Self {
        Malaysia::with_latest_url(LATEST_URL)
    }
}

impl Source for Malaysia {
    fn name(&self) -> &'static str {
        "malaysia"
    }

    fn time_zone(&self) -> Tz {
        chrono_tz::Asia::Kuala_Lumpur
    }

    fn variants(&self) -> &'static [AreaVariant] {
        &VARIANTS
    }

    fn safety_offset_minutes(&self) -> i64 {
        0
    }

    /// The source only serves the latest frame under a fixed name, so the file is named
    /// after the capture instant instead.
    fn locate(&self, instant: CaptureInstant, variant: AreaVariant) -> Option<RemoteResource> {
        match variant {
            AreaVariant::MySwirl => Some(RemoteResource::with_file_name(
                self.latest_url.clone(),
                format!("{}.gif", instant),
            )),
            _ => None,
        }
    }
}

// -- Tests -------------------------------------------------------------------
