//! mediainfo JSON parsing into fact sheets

use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::domain::model::{AudioFacts, FactSheet, SubtitleFacts, VideoFacts};
use crate::error::{AioError, AioResult};

pub mod inspector;

pub use inspector::MediaInfoInspector;

/// Top level of `mediainfo --Output=JSON`
#[derive(Debug, Default, Deserialize)]
pub struct MediaInfoDocument {
    #[serde(default)]
    pub media: Option<MediaSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaSection {
    /// Path of the inspected file as mediainfo saw it
    #[serde(rename = "@ref", default)]
    pub reference: String,
    #[serde(rename = "track", default)]
    pub tracks: Vec<RawTrack>,
}

/// One track as mediainfo prints it: every value is text
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTrack {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "Format", deserialize_with = "text")]
    pub format: String,
    #[serde(rename = "Format_Info", deserialize_with = "text")]
    pub format_info: String,
    #[serde(rename = "Format_Profile", deserialize_with = "text")]
    pub format_profile: String,
    #[serde(rename = "Format_Commercial_IfAny", deserialize_with = "text")]
    pub format_commercial: String,
    #[serde(rename = "Format_Version", deserialize_with = "text")]
    pub format_version: String,
    #[serde(rename = "CodecID", deserialize_with = "text")]
    pub codec_id: String,
    #[serde(rename = "FileSize", deserialize_with = "text")]
    pub file_size: String,
    #[serde(rename = "Duration", deserialize_with = "text")]
    pub duration: String,
    #[serde(rename = "OverallBitRate", deserialize_with = "text")]
    pub overall_bit_rate: String,
    #[serde(rename = "Movie", deserialize_with = "text")]
    pub movie: String,
    #[serde(rename = "Encoded_Date", deserialize_with = "text")]
    pub encoded_date: String,
    #[serde(rename = "Encoded_Application", alias = "Writing_Application", deserialize_with = "text")]
    pub writing_application: String,
    #[serde(rename = "Encoded_Library", alias = "Writing_Library", deserialize_with = "text")]
    pub writing_library: String,
    #[serde(rename = "Width", deserialize_with = "text")]
    pub width: String,
    #[serde(rename = "Height", deserialize_with = "text")]
    pub height: String,
    #[serde(rename = "BitRate", deserialize_with = "text")]
    pub bit_rate: String,
    #[serde(rename = "BitRate_Mode", deserialize_with = "text")]
    pub bit_rate_mode: String,
    #[serde(rename = "FrameRate", deserialize_with = "text")]
    pub frame_rate: String,
    #[serde(rename = "FrameRate_Mode", deserialize_with = "text")]
    pub frame_rate_mode: String,
    #[serde(rename = "DisplayAspectRatio", deserialize_with = "text")]
    pub display_aspect_ratio: String,
    #[serde(rename = "BitDepth", deserialize_with = "text")]
    pub bit_depth: String,
    #[serde(rename = "HDR_Format", deserialize_with = "text")]
    pub hdr_format: String,
    #[serde(rename = "transfer_characteristics", deserialize_with = "text")]
    pub transfer_characteristics: String,
    #[serde(rename = "ColorSpace", deserialize_with = "text")]
    pub color_space: String,
    #[serde(rename = "ChromaSubsampling", deserialize_with = "text")]
    pub chroma_subsampling: String,
    #[serde(rename = "colour_range", deserialize_with = "text")]
    pub colour_range: String,
    #[serde(rename = "colour_primaries", deserialize_with = "text")]
    pub colour_primaries: String,
    #[serde(rename = "matrix_coefficients", deserialize_with = "text")]
    pub matrix_coefficients: String,
    #[serde(rename = "StreamSize", deserialize_with = "text")]
    pub stream_size: String,
    #[serde(rename = "Channels", deserialize_with = "text")]
    pub channels: String,
    #[serde(rename = "ChannelLayout", deserialize_with = "text")]
    pub channel_layout: String,
    #[serde(rename = "SamplingRate", deserialize_with = "text")]
    pub sampling_rate: String,
    #[serde(rename = "Compression_Mode", deserialize_with = "text")]
    pub compression_mode: String,
    #[serde(rename = "ServiceKind", deserialize_with = "text")]
    pub service_kind: String,
    #[serde(rename = "Language", deserialize_with = "text")]
    pub language: String,
    #[serde(rename = "Title", deserialize_with = "text")]
    pub title: String,
    #[serde(rename = "Default", deserialize_with = "text")]
    pub default: String,
    #[serde(rename = "Forced", deserialize_with = "text")]
    pub forced: String,
}

/// Accept strings, numbers and booleans; anything else becomes empty
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Lenient integer: spaces removed, integer or truncated float, else `None`
pub fn parse_number(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(n) = cleaned.parse::<u64>() {
        return Some(n);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f.trunc() as u64)
}

pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_u32(raw: &str) -> Option<u32> {
    parse_number(raw).and_then(|n| u32::try_from(n).ok())
}

fn parse_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("yes")
}

impl RawTrack {
    fn video(&self) -> VideoFacts {
        VideoFacts {
            codec: self.format.clone(),
            codec_info: self.format_info.clone(),
            codec_profile: self.format_profile.clone(),
            codec_id: self.codec_id.clone(),
            width: parse_u32(&self.width).unwrap_or_default(),
            height: parse_u32(&self.height).unwrap_or_default(),
            bit_rate: parse_number(&self.bit_rate),
            frame_rate: parse_float(&self.frame_rate),
            frame_rate_mode: self.frame_rate_mode.clone(),
            aspect_ratio: self.display_aspect_ratio.clone(),
            bit_depth: parse_u32(&self.bit_depth),
            hdr_format: self.hdr_format.clone(),
            transfer_characteristics: self.transfer_characteristics.clone(),
            chroma_subsampling: self.chroma_subsampling.clone(),
            color_space: self.color_space.clone(),
            color_range: self.colour_range.clone(),
            color_primaries: self.colour_primaries.clone(),
            matrix_coefficients: self.matrix_coefficients.clone(),
            stream_size: parse_number(&self.stream_size),
        }
    }

    fn audio(&self) -> AudioFacts {
        AudioFacts {
            codec: self.format.clone(),
            codec_info: self.format_info.clone(),
            commercial_name: self.format_commercial.clone(),
            codec_id: self.codec_id.clone(),
            channels: parse_u32(&self.channels).unwrap_or_default(),
            channel_layout: self.channel_layout.clone(),
            sample_rate: parse_u32(&self.sampling_rate),
            bit_rate: parse_number(&self.bit_rate),
            bit_rate_mode: self.bit_rate_mode.clone(),
            bit_depth: parse_u32(&self.bit_depth),
            compression_mode: self.compression_mode.clone(),
            stream_size: parse_number(&self.stream_size),
            language: self.language.clone(),
            title: self.title.clone(),
            service_kind: self.service_kind.clone(),
            default: parse_flag(&self.default),
            forced: parse_flag(&self.forced),
        }
    }

    fn subtitle(&self) -> SubtitleFacts {
        SubtitleFacts {
            format: self.format.clone(),
            codec_id: self.codec_id.clone(),
            language: self.language.clone(),
            title: self.title.clone(),
            default: parse_flag(&self.default),
            forced: parse_flag(&self.forced),
        }
    }
}

/// Build a fact sheet from a mediainfo JSON document
///
/// Only the first video track is kept. A document without one is rejected.
/// A zero `file_size` falls back to the size mediainfo reported.
pub fn parse_document(json: &str, path: &Path, file_size: u64) -> AioResult<FactSheet> {
    let document: MediaInfoDocument = serde_json::from_str(json)?;
    let tracks = document.media.map(|m| m.tracks).unwrap_or_default();
    build_sheet(&tracks, path, file_size)
}

/// Build a fact sheet from saved mediainfo output, using the path it recorded
pub fn parse_saved_document(json: &str) -> AioResult<FactSheet> {
    let document: MediaInfoDocument = serde_json::from_str(json)?;
    let media = document.media.unwrap_or_default();
    build_sheet(&media.tracks, Path::new(&media.reference), 0)
}

fn build_sheet(tracks: &[RawTrack], path: &Path, file_size: u64) -> AioResult<FactSheet> {
    let mut sheet = FactSheet {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        file_path: path.to_path_buf(),
        file_size,
        ..Default::default()
    };
    let mut video = None;

    for track in tracks {
        match track.kind.as_str() {
            "General" => {
                if sheet.file_size == 0 {
                    sheet.file_size = parse_number(&track.file_size).unwrap_or_default();
                }
                sheet.container = track.format.clone();
                sheet.container_version = track.format_version.clone();
                sheet.duration_secs = parse_number(&track.duration).unwrap_or_default();
                sheet.overall_bit_rate = parse_number(&track.overall_bit_rate);
                sheet.movie_name = track.movie.clone();
                sheet.encoded_date = track.encoded_date.clone();
                sheet.writing_application = track.writing_application.clone();
                sheet.writing_library = track.writing_library.clone();
            }
            "Video" if video.is_none() => video = Some(track.video()),
            "Audio" => sheet.audio.push(track.audio()),
            "Text" => sheet.subtitles.push(track.subtitle()),
            other => debug!("Ignoring {} track", other),
        }
    }

    sheet.video = video.ok_or_else(|| AioError::NoVideoTrack {
        path: path.display().to_string(),
    })?;

    debug!(
        audio = sheet.audio.len(),
        subtitles = sheet.subtitles.len(),
        "Parsed mediainfo document"
    );
    Ok(sheet)
}
