//! Rain area radar images published by weather.gov.sg.

use chrono_tz::Tz;

use super::{file_name_time, AreaVariant, RemoteResource, Source};
use crate::window::CaptureInstant;

const BASE_URL: &str = "http://www.weather.gov.sg/files/rainarea";

// Largest area first
const VARIANTS: [AreaVariant; 3] = [
    AreaVariant::Sg480km,
    AreaVariant::Sg240km,
    AreaVariant::Sg50km,
];

#[derive(Debug, Clone)]
pub struct Singapore {
    base_url: String,
}

impl Singapore {
    pub fn with_base_url(base_url: &str) -> Self {
        Singapore {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Singapore {
    fn default() -> Self {
        Singapore::with_base_url(BASE_URL)
    }
}

impl Source for Singapore {
    fn name(&self) -> &'static str {
        "singapore"
    }

    fn time_zone(&self) -> Tz {
        chrono_tz::Asia::Singapore
    }

    fn variants(&self) -> &'static [AreaVariant] {
        &VARIANTS
    }

    // The newest frame is usually not published yet
    fn safety_offset_minutes(&self) -> i64 {
        10
    }

    fn locate(&self, instant: CaptureInstant, variant: AreaVariant) -> Option<RemoteResource> {
        let time = file_name_time(instant, variant.cadence_minutes(), self.time_zone())?;

        let url = match variant {
            AreaVariant::Sg50km => format!(
                "{}/50km/v2/dpsri_70km_{}dBR.dpsri.png",
                self.base_url, time
            ),
            AreaVariant::Sg240km => format!(
                "{}/240km/dpsri_240km_{}dBR.dpsri.png",
                self.base_url, time
            ),
            AreaVariant::Sg480km => format!(
                "{}/480km/dpsri_480km_{}dBR.dpsri.png",
                self.base_url, time
            ),
            _ => return None,
        };

        RemoteResource::from_url(url)
    }
}

// -- Tests -------------------------------------------------------------------
