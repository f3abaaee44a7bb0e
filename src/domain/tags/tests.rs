// Unit tests for the tag classifier

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::tags::*;

    #[test]
    fn test_resolution_thresholds() {
        assert_eq!(resolution_bucket(3840, 2160), "2160p");
        assert_eq!(resolution_bucket(3840, 1600), "2160p");
        assert_eq!(resolution_bucket(1920, 1080), "1080p");
        assert_eq!(resolution_bucket(1440, 1080), "1080p");
        assert_eq!(resolution_bucket(1280, 720), "720p");
        assert_eq!(resolution_bucket(720, 480), "480p");
        assert_eq!(resolution_bucket(480, 360), "360p");
    }

    #[test]
    fn test_resolution_boundaries() {
        assert_eq!(resolution_bucket(1440, 1079), "720p");
        assert_eq!(resolution_bucket(1920, 1079), "1080p");
        assert_eq!(resolution_bucket(1920, 800), "1080p");
        assert_eq!(resolution_bucket(0, 2160), "2160p");
    }

    #[test]
    fn test_hdr_bucket() {
        assert_eq!(hdr_bucket("", ""), "");
        assert_eq!(hdr_bucket("SMPTE ST 2086, HDR10 compatible", "PQ"), "HDR10");
        assert_eq!(hdr_bucket("", "PQ"), "HDR10");
        assert_eq!(hdr_bucket("SMPTE ST 2094 App 4, HDR10+ Profile B compatible", "PQ"), "HDR10+");
        assert_eq!(hdr_bucket("", "HDR10+"), "HDR10+");
        assert_eq!(hdr_bucket("ARIB STD-B67 (HLG)", "HLG"), "HLG");
    }

    #[test]
    fn test_hdr_bucket_combinations_keep_detection_order() {
        assert_eq!(
            hdr_bucket("Dolby Vision, Version 1.0, dvhe.08.06, BL+RPU, HDR10 compatible", "PQ"),
            "DV+HDR10"
        );
        assert_eq!(hdr_bucket("Dolby Vision / HDR10+", ""), "DV+HDR10+");
        assert_eq!(hdr_bucket("dolby vision, hlg", ""), "DV+HLG");
        assert_eq!(hdr_bucket("Dolby Vision", "BT.709"), "DV");
    }

    #[test]
    fn test_video_codec_tag() {
        assert_eq!(video_codec_tag("HEVC"), "x265");
        assert_eq!(video_codec_tag("AVC"), "x264");
        assert_eq!(video_codec_tag("h264"), "x264");
        assert_eq!(video_codec_tag("AV1"), "AV1");
        assert_eq!(video_codec_tag("VP9"), "VP9");
        assert_eq!(video_codec_tag("MPEG-4 Visual"), "MPEG-4 VISUAL");
        assert_eq!(video_codec_tag(""), "");
    }

    #[test]
    fn test_audio_codec_truehd_atmos_before_truehd() {
        assert_eq!(audio_codec_tag("MLP FBA 16-ch TrueHD", "TrueHD ATMOS 7.1"), "TrueHD.Atmos");
        assert_eq!(audio_codec_tag("TrueHD", "atmos"), "TrueHD.Atmos");
        assert_eq!(audio_codec_tag("TrueHD", "Surround"), "TrueHD");
    }

    #[test]
    fn test_audio_codec_dts_family() {
        assert_eq!(audio_codec_tag("DTS", "DTS:X"), "DTS-X");
        assert_eq!(audio_codec_tag("DTS", "DTS-HD MA 5.1"), "DTS-HD.MA");
        assert_eq!(audio_codec_tag("DTS-HD", ""), "DTS-HD.MA");
        assert_eq!(audio_codec_tag("DTS", ""), "DTS");
    }

    #[test]
    fn test_audio_codec_ac3_family() {
        assert_eq!(audio_codec_tag("E-AC-3", "Atmos"), "EAC3.Atmos");
        assert_eq!(audio_codec_tag("E-AC-3", ""), "EAC3");
        assert_eq!(audio_codec_tag("eac3", "Stereo"), "EAC3");
        assert_eq!(audio_codec_tag("AC-3", ""), "AC3");
    }

    #[test]
    fn test_audio_codec_plain_and_fallback() {
        assert_eq!(audio_codec_tag("AAC LC", ""), "AAC");
        assert_eq!(audio_codec_tag("FLAC", ""), "FLAC");
        assert_eq!(audio_codec_tag("Opus", ""), "Opus");
        assert_eq!(audio_codec_tag("PCM", ""), "PCM");
        assert_eq!(audio_codec_tag("mp3", ""), "MP3");
    }

    #[test]
    fn test_channel_layouts() {
        assert_eq!(channel_layout_short(1), "1.0");
        assert_eq!(channel_layout_short(2), "2.0");
        assert_eq!(channel_layout_short(6), "5.1");
        assert_eq!(channel_layout_short(8), "7.1");
        assert_eq!(channel_layout_short(3), "3.0");

        assert_eq!(channel_layout_explicit("L R C", 6), "L R C");
        assert_eq!(channel_layout_explicit("", 6), "L R C LFE Ls Rs");
        assert_eq!(channel_layout_explicit("", 8), "L R C LFE Ls Rs Lb Rb");
        assert_eq!(channel_layout_explicit("", 4), "");
    }

    #[test]
    fn test_subtitle_format_names() {
        assert_eq!(subtitle_format_name("SubRip", ""), "SRT (UTF-8)");
        assert_eq!(subtitle_format_name("UTF-8", "S_TEXT/UTF8"), "SRT (UTF-8)");
        assert_eq!(subtitle_format_name("UTF-8", ""), "SRT (UTF-8)");
        assert_eq!(subtitle_format_name("PGS", "S_HDMV/PGS"), "PGS");
        assert_eq!(subtitle_format_name("", "S_HDMV/PGS"), "PGS");
        assert_eq!(subtitle_format_name("VobSub", ""), "VobSub");
        assert_eq!(subtitle_format_name("ASS", "S_TEXT/ASS"), "ASS");
        assert_eq!(subtitle_format_name("", "S_TEXT/SSA"), "ASS");
        assert_eq!(subtitle_format_name("WebVTT", ""), "WebVTT");
        assert_eq!(subtitle_format_name("DVB Subtitle", ""), "DVB");
        assert_eq!(subtitle_format_name("TTML", ""), "TTML");
        assert_eq!(subtitle_format_name("Timed Text", ""), "Timed Text");
        assert_eq!(subtitle_format_name("", ""), "SRT (UTF-8)");
    }

    #[test]
    fn test_canonical_tags_derive() {
        let sheet = FactSheet {
            video: VideoFacts {
                codec: "HEVC".to_string(),
                width: 3840,
                height: 1608,
                bit_depth: Some(10),
                hdr_format: "SMPTE ST 2086, HDR10 compatible".to_string(),
                ..Default::default()
            },
            audio: vec![AudioFacts {
                codec: "DTS".to_string(),
                title: "DTS-HD MA".to_string(),
                channels: 8,
                ..Default::default()
            }],
            ..Default::default()
        };

        let tags = CanonicalTags::derive(&sheet);
        assert_eq!(tags.resolution, "2160p");
        assert_eq!(tags.hdr, "HDR10");
        assert_eq!(tags.video_codec, "x265");
        assert!(tags.ten_bit);
        assert_eq!(tags.primary_audio.as_deref(), Some("DTS-HD.MA.7.1"));
    }
}
