// Domain models - Fact sheet and movie record

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::tags;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Technical facts about one media file
///
/// Built once by the probe collaborator and read-only afterwards, except for
/// `file_path` which the caller updates after renaming the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactSheet {
    pub file_name: String,
    pub file_path: PathBuf,
    pub file_size: u64,
    pub container: String,
    pub container_version: String,
    /// Duration in whole seconds
    pub duration_secs: u64,
    pub overall_bit_rate: Option<u64>,
    pub movie_name: String,
    pub encoded_date: String,
    pub writing_application: String,
    pub writing_library: String,
    pub video: VideoFacts,
    /// Audio tracks in probe order; the first one is the primary track
    pub audio: Vec<AudioFacts>,
    pub subtitles: Vec<SubtitleFacts>,
}

/// Video track facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFacts {
    pub codec: String,
    pub codec_info: String,
    pub codec_profile: String,
    pub codec_id: String,
    pub width: u32,
    pub height: u32,
    pub bit_rate: Option<u64>,
    pub frame_rate: Option<f64>,
    pub frame_rate_mode: String,
    pub aspect_ratio: String,
    pub bit_depth: Option<u32>,
    /// Raw HDR format text as reported by the probe
    pub hdr_format: String,
    pub transfer_characteristics: String,
    pub chroma_subsampling: String,
    pub color_space: String,
    pub color_range: String,
    pub color_primaries: String,
    pub matrix_coefficients: String,
    pub stream_size: Option<u64>,
}

/// Audio track facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFacts {
    pub codec: String,
    pub codec_info: String,
    pub commercial_name: String,
    pub codec_id: String,
    pub channels: u32,
    /// Explicit layout string from the probe, may be empty
    pub channel_layout: String,
    pub sample_rate: Option<u32>,
    pub bit_rate: Option<u64>,
    pub bit_rate_mode: String,
    pub bit_depth: Option<u32>,
    pub compression_mode: String,
    pub stream_size: Option<u64>,
    /// ISO-639 code (2 or 3 letters), may be empty
    pub language: String,
    pub title: String,
    pub service_kind: String,
    pub default: bool,
    pub forced: bool,
}

/// Subtitle track facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleFacts {
    pub format: String,
    pub codec_id: String,
    pub language: String,
    pub title: String,
    pub default: bool,
    pub forced: bool,
}

impl FactSheet {
    /// Name of the file on disk, following renames of `file_path`
    pub fn display_file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// File size with binary units, e.g. `1.50 GiB`
    pub fn file_size_formatted(&self) -> String {
        format_binary_size(self.file_size)
    }

    /// Duration as `1 h 52 min` or `52 min`
    pub fn duration_formatted(&self) -> String {
        let hours = self.duration_secs / 3600;
        let minutes = (self.duration_secs % 3600) / 60;

        if hours > 0 {
            format!("{} h {} min", hours, minutes)
        } else {
            format!("{} min", minutes)
        }
    }

    /// Primary audio track
    pub fn primary_audio(&self) -> Option<&AudioFacts> {
        self.audio.first()
    }

    /// Share of the whole file taken by a stream, in percent
    pub fn stream_share(&self, stream_size: u64) -> f64 {
        if self.file_size == 0 {
            return 0.0;
        }
        stream_size as f64 / self.file_size as f64 * 100.0
    }
}

impl VideoFacts {
    /// Resolution bucket (`2160p`, `1080p`, ...)
    pub fn resolution(&self) -> String {
        tags::resolution_bucket(self.width, self.height)
    }

    /// HDR bucket, empty for SDR content
    pub fn hdr(&self) -> String {
        tags::hdr_bucket(&self.hdr_format, &self.transfer_characteristics)
    }

    /// Release codec tag (`x265`, `x264`, ...)
    pub fn codec_tag(&self) -> String {
        tags::video_codec_tag(&self.codec)
    }

    /// Stream size as `12.34 GiB`
    pub fn stream_size_formatted(&self) -> Option<String> {
        self.stream_size
            .map(|size| format!("{:.2} GiB", size as f64 / GIB))
    }
}

impl AudioFacts {
    /// Release codec tag, taking the track title into account
    pub fn codec_tag(&self) -> String {
        tags::audio_codec_tag(&self.codec, &self.title)
    }

    /// Short layout such as `5.1`
    pub fn layout_short(&self) -> String {
        tags::channel_layout_short(self.channels)
    }

    /// Speaker layout such as `L R C LFE Ls Rs`
    pub fn layout_explicit(&self) -> String {
        tags::channel_layout_explicit(&self.channel_layout, self.channels)
    }

    /// Stream size as `640 MiB`
    pub fn stream_size_formatted(&self) -> Option<String> {
        self.stream_size
            .map(|size| format!("{:.0} MiB", size as f64 / MIB))
    }
}

impl SubtitleFacts {
    /// Display name of the subtitle format
    pub fn format_name(&self) -> String {
        tags::subtitle_format_name(&self.format, &self.codec_id)
    }
}

/// Format a byte count with binary units
pub fn format_binary_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if size < UNIT {
        return format!("{} B", size);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.2} {}iB", size as f64 / div as f64, PREFIXES[exp])
}

/// Movie record from the movie database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    /// Free-form release date (`2009-08-19`, `19/08/2009 (FR)`, `2009`, ...)
    pub release_date: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub vote_average: f64,
    pub vote_count: u32,
    /// Runtime in minutes
    pub runtime: u32,
    pub tagline: String,
    pub imdb_id: String,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<CastMember>,
}

/// Cast member in billing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub order: u32,
    pub profile_path: String,
}

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digit boundaries: CJK dates such as `2009年8月19日` have no word boundary.
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^0-9])([0-9]{4})(?:[^0-9]|$)").expect("year regex should compile")
    })
}

impl Movie {
    /// Release year, or an empty string when the date holds no 4-digit year
    pub fn year(&self) -> String {
        year_regex()
            .captures(&self.release_date)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// Title used for naming, falling back to the localized title
    pub fn naming_title(&self) -> &str {
        if self.original_title.is_empty() {
            &self.title
        } else {
            &self.original_title
        }
    }

    /// Whether the original title differs from the displayed one
    pub fn has_distinct_original_title(&self) -> bool {
        !self.original_title.is_empty() && self.original_title != self.title
    }

    /// Full poster URL, `w500` when no size is given
    pub fn poster_url(&self, size: Option<&str>) -> String {
        if self.poster_path.is_empty() {
            return String::new();
        }
        format!("{}{}{}", IMAGE_BASE_URL, size.unwrap_or("w500"), self.poster_path)
    }

    pub fn imdb_url(&self) -> String {
        if self.imdb_id.is_empty() {
            return String::new();
        }
        format!("https://www.imdb.com/title/{}", self.imdb_id)
    }

    pub fn tmdb_url(&self) -> String {
        format!("https://www.themoviedb.org/movie/{}", self.id)
    }

    /// Names of the first `count` billed cast members
    pub fn top_cast(&self, count: usize) -> Vec<&str> {
        self.cast.iter().take(count).map(|c| c.name.as_str()).collect()
    }
}
