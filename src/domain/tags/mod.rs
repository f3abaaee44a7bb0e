// Tag classifier - Raw probe strings to canonical release tags
//
// Every function here is total: unknown input falls through to an echo of the
// raw value, never to an error. Rules are evaluated top to bottom and the
// more specific compound rules always come before their parent codec.

/// Resolution bucket from frame dimensions
///
/// Width and height are each sufficient on their own, so a wide but short
/// frame still lands in the bucket its width implies.
pub fn resolution_bucket(width: u32, height: u32) -> String {
    if height >= 2160 || width >= 3840 {
        return "2160p".to_string();
    }
    if height >= 1080 || width >= 1920 {
        return "1080p".to_string();
    }
    if height >= 720 || width >= 1280 {
        return "720p".to_string();
    }
    if height >= 480 {
        return "480p".to_string();
    }
    format!("{}p", height)
}

/// HDR bucket from the HDR format and transfer characteristics fields
pub fn hdr_bucket(hdr_format: &str, transfer_characteristics: &str) -> String {
    let hdr = hdr_format.to_lowercase();
    let transfer = transfer_characteristics.to_lowercase();
    let mut formats = Vec::new();

    if hdr.contains("dolby vision") {
        formats.push("DV");
    }
    if hdr.contains("hdr10+") || transfer.contains("hdr10+") {
        formats.push("HDR10+");
    } else if hdr.contains("hdr10") || transfer.contains("pq") {
        formats.push("HDR10");
    }
    if hdr.contains("hlg") {
        formats.push("HLG");
    }

    formats.join("+")
}

const VIDEO_CODEC_RULES: &[(&[&str], &str)] = &[
    (&["hevc", "h265", "x265"], "x265"),
    (&["avc", "h264", "x264"], "x264"),
    (&["av1"], "AV1"),
    (&["vp9"], "VP9"),
];

/// Video codec tag, first matching rule wins
pub fn video_codec_tag(codec: &str) -> String {
    let lower = codec.to_lowercase();

    VIDEO_CODEC_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, tag)| tag.to_string())
        .unwrap_or_else(|| codec.to_uppercase())
}

/// Audio codec tag; the track title disambiguates Atmos, DTS:X and DTS-HD MA
pub fn audio_codec_tag(codec: &str, title: &str) -> String {
    let codec_lower = codec.to_lowercase();
    let title_lower = title.to_lowercase();
    let has = |needle: &str| codec_lower.contains(needle);
    let titled = |needle: &str| title_lower.contains(needle);

    let tag = if has("truehd") && titled("atmos") {
        "TrueHD.Atmos"
    } else if has("truehd") {
        "TrueHD"
    } else if has("dts") && titled("x") {
        "DTS-X"
    } else if has("dts-hd") || (has("dts") && titled("ma")) {
        "DTS-HD.MA"
    } else if has("dts") {
        "DTS"
    } else if has("e-ac-3") || has("eac3") {
        if titled("atmos") {
            "EAC3.Atmos"
        } else {
            "EAC3"
        }
    } else if has("ac-3") || has("ac3") {
        "AC3"
    } else if has("aac") {
        "AAC"
    } else if has("flac") {
        "FLAC"
    } else if has("opus") {
        "Opus"
    } else {
        return codec.to_uppercase();
    };

    tag.to_string()
}

/// Short channel layout (`2.0`, `5.1`, ...)
pub fn channel_layout_short(channels: u32) -> String {
    match channels {
        1 => "1.0".to_string(),
        2 => "2.0".to_string(),
        6 => "5.1".to_string(),
        8 => "7.1".to_string(),
        n => format!("{}.0", n),
    }
}

/// Speaker layout, preferring the probe's explicit layout
pub fn channel_layout_explicit(layout: &str, channels: u32) -> String {
    if !layout.is_empty() {
        return layout.to_string();
    }

    match channels {
        1 => "C",
        2 => "L R",
        6 => "L R C LFE Ls Rs",
        8 => "L R C LFE Ls Rs Lb Rb",
        _ => "",
    }
    .to_string()
}

const SRT: &str = "SRT (UTF-8)";

/// Display name of a subtitle format from its format name and codec id
pub fn subtitle_format_name(format: &str, codec_id: &str) -> String {
    let format_lower = format.to_lowercase();
    let codec_lower = codec_id.to_lowercase();

    let name = if format_lower.contains("subrip") {
        SRT
    } else if format_lower == "utf-8" && (codec_lower == "s_text/utf8" || codec_lower.is_empty()) {
        SRT
    } else if codec_lower == "s_text/utf8" {
        SRT
    } else if format_lower.contains("pgs") || codec_lower == "s_hdmv/pgs" {
        "PGS"
    } else if format_lower.contains("vobsub") || codec_lower == "s_vobsub" {
        "VobSub"
    } else if format_lower.contains("ass") {
        "ASS"
    } else if format_lower.contains("ssa") {
        "SSA"
    } else if codec_lower == "s_text/ass" || codec_lower == "s_text/ssa" {
        "ASS"
    } else if format_lower.contains("webvtt") {
        "WebVTT"
    } else if format_lower.contains("dvb") {
        "DVB"
    } else if format_lower.contains("ttml") {
        "TTML"
    } else if !format.is_empty() && format != "UTF-8" {
        return format.to_string();
    } else {
        SRT
    };

    name.to_string()
}

/// Canonical tags of a fact sheet, derived on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTags {
    pub resolution: String,
    pub hdr: String,
    pub video_codec: String,
    pub ten_bit: bool,
    /// `<codec>.<layout>` of the primary audio track
    pub primary_audio: Option<String>,
}

impl CanonicalTags {
    /// Derive the release tags of a fact sheet
    pub fn derive(sheet: &crate::domain::model::FactSheet) -> Self {
        Self {
            resolution: sheet.video.resolution(),
            hdr: sheet.video.hdr(),
            video_codec: sheet.video.codec_tag(),
            ten_bit: sheet.video.bit_depth == Some(10),
            primary_audio: sheet
                .primary_audio()
                .map(|audio| format!("{}.{}", audio.codec_tag(), audio.layout_short())),
        }
    }
}

#[cfg(test)]
mod tests;
