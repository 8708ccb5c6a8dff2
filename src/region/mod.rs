//! Regional image sources: where each frame lives remotely and where it is archived locally.

pub mod malaysia;
pub mod singapore;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::Url;

use crate::window::CaptureInstant;

pub use malaysia::Malaysia;
pub use singapore::Singapore;

/// An image source for one region.
pub trait Source {
    /// Directory name of the region under the data root.
    fn name(&self) -> &'static str;

    /// Civil timezone used both by the source's file names and the archive layout.
    fn time_zone(&self) -> Tz;

    /// Variants served by this source, in fetch order.
    fn variants(&self) -> &'static [AreaVariant];

    /// How far behind the reference time the newest frame is requested.
    fn safety_offset_minutes(&self) -> i64;

    /// Remote location of a frame, or `None` when this source does not serve the variant.
    fn locate(&self, instant: CaptureInstant, variant: AreaVariant) -> Option<RemoteResource>;

    /// Day directory of the frame, or `None` when the instant is outside the calendar range.
    fn archive_path(
        &self,
        instant: CaptureInstant,
        variant: AreaVariant,
        data_root: &Path,
    ) -> Option<ArchivePath> {
        let [year, month, day] = date_parts(instant, self.time_zone())?;

        Some(ArchivePath {
            data_root: data_root.to_path_buf(),
            region: self.name().to_string(),
            year,
            month,
            day,
            area_label: variant.label().map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Image resolution/range tiers, each with its own capture cadence and look-back count.
pub enum AreaVariant {
    Sg50km,
    Sg240km,
    Sg480km,
    MySwirl,
}

impl AreaVariant {
    pub fn cadence_minutes(&self) -> u32 {
        match self {
            AreaVariant::Sg50km => 5,
            AreaVariant::Sg240km => 15,
            AreaVariant::Sg480km => 30,
            // Nominal only: the swirl is always the latest frame and its URL carries no time
            AreaVariant::MySwirl => 15,
        }
    }

    /// Number of frames kept in the look-back window.
    pub fn count(&self) -> usize {
        match self {
            AreaVariant::Sg50km => 25,
            AreaVariant::Sg240km => 9,
            AreaVariant::Sg480km => 5,
            AreaVariant::MySwirl => 1,
        }
    }

    /// Sub-directory under the day directory, if the region has more than one variant.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AreaVariant::Sg50km => Some("50"),
            AreaVariant::Sg240km => Some("240"),
            AreaVariant::Sg480km => Some("480"),
            AreaVariant::MySwirl => None,
        }
    }
}

impl fmt::Display for AreaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AreaVariant::Sg50km => "sg50km",
            AreaVariant::Sg240km => "sg240km",
            AreaVariant::Sg480km => "sg480km",
            AreaVariant::MySwirl => "my-swirl",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResource {
    pub url: String,
    pub file_name: String,
}

impl RemoteResource {
    /// Uses the last segment of the URL path as the file name.
    pub fn from_url(url: String) -> Option<Self> {
        let file_name = Url::parse(&url)
            .ok()?
            .path_segments()?
            .last()
            .filter(|segment| !segment.is_empty())?
            .to_string();

        Some(RemoteResource { url, file_name })
    }

    pub fn with_file_name(url: String, file_name: String) -> Self {
        RemoteResource { url, file_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Day directory a frame is archived under: `<root>/<region>/<YYYY>/<MM>/<DD>/[<label>/]`.
pub struct ArchivePath {
    pub data_root: PathBuf,
    pub region: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub area_label: Option<String>,
}

impl ArchivePath {
    pub fn dir(&self) -> PathBuf {
        let mut dir = self
            .data_root
            .join(&self.region)
            .join(&self.year)
            .join(&self.month)
            .join(&self.day);
        if let Some(label) = &self.area_label {
            dir.push(label);
        }

        dir
    }
}

/// Renders the instant, floored to `minutes`, as `YYYYMMDDHHmmssSS` in `tz`.
pub fn file_name_time(instant: CaptureInstant, minutes: u32, tz: Tz) -> Option<String> {
    let zoned = to_zoned(instant.floor_to(minutes), tz)?;

    Some(format!(
        "{}{:02}",
        zoned.format("%Y%m%d%H%M%S"),
        zoned.timestamp_subsec_millis() / 10
    ))
}

/// Year, month and day of the instant in the civil calendar of `tz`.
pub fn date_parts(instant: CaptureInstant, tz: Tz) -> Option<[String; 3]> {
    let zoned = to_zoned(instant, tz)?;

    Some([
        zoned.format("%Y").to_string(),
        zoned.format("%m").to_string(),
        zoned.format("%d").to_string(),
    ])
}

fn to_zoned(instant: CaptureInstant, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(instant.millis()).map(|utc| utc.with_timezone(&tz))
}

// -- Tests -------------------------------------------------------------------
