//! Boxed fixed-width technical report (NFO)

use chrono::NaiveDate;

use crate::domain::model::{AudioFacts, FactSheet, Movie, SubtitleFacts};

/// Inner width of the box, borders excluded
pub const BOX_WIDTH: usize = 80;
const LABEL_WIDTH: usize = 25;
const VALUE_WIDTH: usize = BOX_WIDTH - LABEL_WIDTH - 4;
const TEXT_WIDTH: usize = BOX_WIDTH - 2;
const ELLIPSIS: &str = "...";
const CAST_IN_REPORT: usize = 5;

/// Row builder for the box report
///
/// Every line it emits is `BOX_WIDTH + 2` characters wide, counted in runes.
#[derive(Debug, Default)]
pub struct BoxBuilder {
    out: String,
}

impl BoxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&mut self) -> &mut Self {
        self.edge('╔', '═', '╗')
    }

    pub fn divider(&mut self) -> &mut Self {
        self.edge('╠', '═', '╣')
    }

    pub fn thin_divider(&mut self) -> &mut Self {
        self.edge('╠', '─', '╣')
    }

    pub fn bottom(&mut self) -> &mut Self {
        self.edge('╚', '═', '╝')
    }

    fn edge(&mut self, left: char, fill: char, right: char) -> &mut Self {
        self.out.push(left);
        self.out.extend(std::iter::repeat(fill).take(BOX_WIDTH));
        self.out.push(right);
        self.out.push('\n');
        self
    }

    /// Centered line, truncated when it would touch the borders
    pub fn center(&mut self, text: &str) -> &mut Self {
        let text = truncate(text, BOX_WIDTH - 4);
        let len = text.chars().count();
        let left = (BOX_WIDTH - len) / 2;
        let right = BOX_WIDTH - left - len;

        self.out.push('║');
        self.out.push_str(&" ".repeat(left));
        self.out.push_str(&text);
        self.out.push_str(&" ".repeat(right));
        self.out.push_str("║\n");
        self
    }

    /// Section title followed by a thin divider
    pub fn section(&mut self, title: &str) -> &mut Self {
        self.center(title).thin_divider()
    }

    /// `label : value` row
    pub fn row(&mut self, label: &str, value: &str) -> &mut Self {
        let value = truncate(value, VALUE_WIDTH);
        self.out.push_str(&format!(
            "║ {}: {} ║\n",
            pad(label, LABEL_WIDTH),
            pad(&value, VALUE_WIDTH)
        ));
        self
    }

    /// Row emitted only when a value is present
    pub fn optional_row(&mut self, label: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.row(label, &value);
        }
        self
    }

    /// Row emitted only for a non-empty value
    pub fn text_row(&mut self, label: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.row(label, value);
        }
        self
    }

    /// Free text, greedily wrapped on word boundaries
    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        for line in wrap_text(text, TEXT_WIDTH) {
            self.out.push_str(&format!("║ {} ║\n", pad(&line, TEXT_WIDTH)));
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Truncate to `max` runes, ending with `...` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
    format!("{}{}", kept, ELLIPSIS)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Greedy word wrap by rune count
///
/// Words are never split; a single word longer than the line is truncated.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn kbps(bit_rate: Option<u64>) -> Option<String> {
    bit_rate
        .filter(|rate| *rate > 0)
        .map(|rate| format!("{} kb/s", rate / 1000))
}

/// NFO renderer for one release group
#[derive(Debug, Clone)]
pub struct NfoRenderer {
    group: String,
}

impl NfoRenderer {
    pub fn new(group: impl Into<String>) -> Self {
        Self { group: group.into() }
    }

    /// Render the full report
    ///
    /// The generation date is supplied by the caller so rendering stays
    /// deterministic.
    pub fn render(&self, movie: &Movie, sheet: &FactSheet, generated_on: NaiveDate) -> String {
        let mut b = BoxBuilder::new();

        b.top()
            .center(&format!("{} presents", self.group))
            .divider()
            .center(&movie.title);
        if movie.has_distinct_original_title() {
            b.center(&format!("({})", movie.original_title));
        }
        b.divider();

        self.general(&mut b, sheet);
        b.divider();
        self.video(&mut b, sheet);

        for (index, audio) in sheet.audio.iter().enumerate() {
            b.divider().section(&format!("Audio #{}", index + 1));
            self.audio(&mut b, sheet, audio);
        }
        for (index, subtitle) in sheet.subtitles.iter().enumerate() {
            b.divider().section(&format!("Text #{}", index + 1));
            self.subtitle(&mut b, subtitle);
        }

        b.divider();
        self.movie_info(&mut b, movie);

        if !movie.overview.is_empty() {
            b.divider().section("Synopsis").paragraph(&movie.overview);
        }

        b.divider()
            .center("Generated by torrent AIO")
            .center(&generated_on.format("%Y-%m-%d").to_string())
            .bottom();

        b.finish()
    }

    fn general(&self, b: &mut BoxBuilder, sheet: &FactSheet) {
        b.section("General")
            .row("Complete name", &sheet.display_file_name())
            .row("Format", &sheet.container)
            .text_row("Format version", &sheet.container_version)
            .row("File size", &sheet.file_size_formatted())
            .row("Duration", &sheet.duration_formatted())
            .optional_row("Overall bit rate", kbps(sheet.overall_bit_rate))
            .text_row("Movie name", &sheet.movie_name)
            .text_row("Encoded date", &sheet.encoded_date)
            .text_row("Writing application", &sheet.writing_application)
            .text_row("Writing library", &sheet.writing_library);
    }

    fn video(&self, b: &mut BoxBuilder, sheet: &FactSheet) {
        let video = &sheet.video;
        let stream_size = video.stream_size.filter(|size| *size > 0).and_then(|size| {
            video
                .stream_size_formatted()
                .map(|formatted| format!("{} ({:.0}%)", formatted, sheet.stream_share(size)))
        });

        b.section("Video")
            .row("Format", &video.codec)
            .text_row("Format/Info", &video.codec_info)
            .text_row("Format profile", &video.codec_profile)
            .text_row("Codec ID", &video.codec_id)
            .row("Duration", &sheet.duration_formatted())
            .optional_row("Bit rate", kbps(video.bit_rate))
            .row("Width", &format!("{} pixels", video.width))
            .row("Height", &format!("{} pixels", video.height))
            .text_row("Display aspect ratio", &video.aspect_ratio)
            .text_row("Frame rate mode", &video.frame_rate_mode)
            .optional_row("Frame rate", video.frame_rate.map(|fps| format!("{:.3} FPS", fps)))
            .text_row("Color space", &video.color_space)
            .text_row("Chroma subsampling", &video.chroma_subsampling)
            .optional_row(
                "Bit depth",
                video.bit_depth.filter(|d| *d > 0).map(|d| format!("{} bits", d)),
            )
            .optional_row("Stream size", stream_size)
            .text_row("Color range", &video.color_range)
            .text_row("Color primaries", &video.color_primaries)
            .text_row("Transfer characteristics", &video.transfer_characteristics)
            .text_row("Matrix coefficients", &video.matrix_coefficients)
            .text_row("HDR format", &video.hdr());
    }

    fn audio(&self, b: &mut BoxBuilder, sheet: &FactSheet, audio: &AudioFacts) {
        let stream_size = audio.stream_size.filter(|size| *size > 0).and_then(|size| {
            audio
                .stream_size_formatted()
                .map(|formatted| format!("{} ({:.0}%)", formatted, sheet.stream_share(size)))
        });

        b.row("Format", &audio.codec)
            .text_row("Format/Info", &audio.codec_info)
            .text_row("Commercial name", &audio.commercial_name)
            .text_row("Codec ID", &audio.codec_id)
            .row("Duration", &sheet.duration_formatted())
            .text_row("Bit rate mode", &audio.bit_rate_mode)
            .optional_row("Bit rate", kbps(audio.bit_rate))
            .row("Channel(s)", &format!("{} channels", audio.channels))
            .text_row("Channel layout", &audio.layout_explicit())
            .optional_row(
                "Sampling rate",
                audio
                    .sample_rate
                    .filter(|rate| *rate > 0)
                    .map(|rate| format!("{:.1} kHz", rate as f64 / 1000.0)),
            )
            .optional_row(
                "Bit depth",
                audio.bit_depth.filter(|d| *d > 0).map(|d| format!("{} bits", d)),
            )
            .text_row("Compression mode", &audio.compression_mode)
            .optional_row("Stream size", stream_size)
            .text_row("Title", &audio.title)
            .text_row("Language", &audio.language)
            .text_row("Service kind", &audio.service_kind)
            .row("Default", yes_no(audio.default))
            .row("Forced", yes_no(audio.forced));
    }

    fn subtitle(&self, b: &mut BoxBuilder, subtitle: &SubtitleFacts) {
        b.row("Format", &subtitle.format)
            .text_row("Codec ID", &subtitle.codec_id)
            .text_row("Title", &subtitle.title)
            .text_row("Language", &subtitle.language)
            .row("Default", yes_no(subtitle.default))
            .row("Forced", yes_no(subtitle.forced));
    }

    fn movie_info(&self, b: &mut BoxBuilder, movie: &Movie) {
        let non_empty = |items: &[String]| {
            if items.is_empty() {
                None
            } else {
                Some(items.join(", "))
            }
        };
        let cast = movie.top_cast(CAST_IN_REPORT);

        b.section("Movie Info")
            .text_row("Release Date", &movie.release_date)
            .optional_row("Genre", non_empty(&movie.genres))
            .optional_row(
                "Runtime",
                Some(movie.runtime).filter(|r| *r > 0).map(|r| format!("{} min", r)),
            )
            .optional_row(
                "Rating",
                Some(movie.vote_average)
                    .filter(|v| *v > 0.0)
                    .map(|v| format!("{:.1}/10", v)),
            )
            .text_row("IMDb", &movie.imdb_url())
            .row("TMDB", &movie.tmdb_url())
            .optional_row("Director", non_empty(&movie.directors));
        if !cast.is_empty() {
            b.row("Cast", &cast.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CastMember, VideoFacts};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn sample_movie() -> Movie {
        Movie {
            id: 693134,
            title: "Dune : Deuxième partie".to_string(),
            original_title: "Dune: Part Two".to_string(),
            overview: "Paul Atreides s'unit à Chani et aux Fremen pour mener la révolte."
                .to_string(),
            release_date: "28/02/2024 (FR)".to_string(),
            runtime: 167,
            vote_average: 8.2,
            imdb_id: "tt15239678".to_string(),
            genres: vec!["Science-Fiction".to_string(), "Aventure".to_string()],
            directors: vec!["Denis Villeneuve".to_string()],
            cast: (0..7)
                .map(|i| CastMember {
                    name: format!("Actor {}", i),
                    order: i,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn sample_sheet() -> FactSheet {
        FactSheet {
            file_path: "/media/Dune.Part.Two.mkv".into(),
            file_size: 10 * 1024 * 1024 * 1024,
            container: "Matroska".to_string(),
            duration_secs: 9960,
            overall_bit_rate: Some(8_530_000),
            video: VideoFacts {
                codec: "HEVC".to_string(),
                width: 3840,
                height: 1606,
                bit_depth: Some(10),
                stream_size: Some(5 * 1024 * 1024 * 1024),
                ..Default::default()
            },
            audio: vec![AudioFacts {
                codec: "E-AC-3".to_string(),
                channels: 6,
                sample_rate: Some(48000),
                bit_rate: Some(768_000),
                language: "fr".to_string(),
                default: true,
                ..Default::default()
            }],
            subtitles: vec![SubtitleFacts {
                format: "UTF-8".to_string(),
                language: "fr".to_string(),
                forced: true,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_every_line_has_box_width() {
        let report = NfoRenderer::new("AIO").render(&sample_movie(), &sample_sheet(), date());
        for line in report.lines() {
            assert_eq!(line.chars().count(), BOX_WIDTH + 2, "bad line: {:?}", line);
        }
        assert!(report.starts_with('╔'));
        assert!(report.trim_end().ends_with('╝'));
    }

    #[test]
    fn test_sections_in_order() {
        let report = NfoRenderer::new("AIO").render(&sample_movie(), &sample_sheet(), date());
        let markers = [
            "AIO presents",
            "Dune : Deuxième partie",
            "(Dune: Part Two)",
            "General",
            "Video",
            "Audio #1",
            "Text #1",
            "Movie Info",
            "Synopsis",
            "Generated by torrent AIO",
            "2024-03-09",
        ];
        let mut last = 0;
        for marker in markers {
            let position = report[last..]
                .find(marker)
                .unwrap_or_else(|| panic!("{} missing or out of order", marker));
            last += position;
        }
    }

    #[test]
    fn test_rows_and_values() {
        let report = NfoRenderer::new("AIO").render(&sample_movie(), &sample_sheet(), date());
        assert!(report.contains("Complete name            : Dune.Part.Two.mkv"));
        assert!(report.contains("Overall bit rate         : 8530 kb/s"));
        assert!(report.contains("Stream size              : 5.00 GiB (50%)"));
        assert!(report.contains("Sampling rate            : 48.0 kHz"));
        assert!(report.contains("Channel layout           : L R C LFE Ls Rs"));
        assert!(report.contains("Rating                   : 8.2/10"));
        assert!(report.contains("Cast                     : Actor 0, Actor 1, Actor 2, Actor 3, Actor 4 "));
        assert!(report.contains("Forced                   : Yes"));
    }

    #[test]
    fn test_absent_values_omit_rows() {
        let report =
            NfoRenderer::new("AIO").render(&Movie::default(), &FactSheet::default(), date());
        assert!(!report.contains("Overall bit rate"));
        assert!(!report.contains("Frame rate "));
        assert!(!report.contains("Synopsis"));
        assert!(!report.contains("Audio #1"));
        assert!(!report.contains("Genre"));
        assert!(!report.contains("IMDb"));
        assert!(report.contains("TMDB"));
    }

    #[test]
    fn test_hdr_row_uses_classified_bucket() {
        let mut sheet = sample_sheet();
        sheet.video.hdr_format =
            "Dolby Vision, Version 1.0, dvhe.08.06, BL+RPU, HDR10 compatible".to_string();
        let report = NfoRenderer::new("AIO").render(&sample_movie(), &sheet, date());
        assert!(report.contains("HDR format               : DV+HDR10 "));
        assert!(!report.contains("dvhe.08.06"));

        let report = NfoRenderer::new("AIO").render(&sample_movie(), &sample_sheet(), date());
        assert!(!report.contains("HDR format"));
    }

    #[test]
    fn test_truncate_counts_runes() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 8), "ééééé...");
        assert_eq!(truncate("exactly", 7), "exactly");
    }

    #[test]
    fn test_long_values_are_truncated() {
        let mut b = BoxBuilder::new();
        b.row("Title", &"é".repeat(200)).center(&"x".repeat(200));
        let out = b.finish();
        for line in out.lines() {
            assert_eq!(line.chars().count(), BOX_WIDTH + 2);
            assert!(line.contains("..."));
        }
    }

    #[test]
    fn test_wrap_text_keeps_words() {
        let text = "Le jeune Paul Atreides s'unit à Chani et aux Fremen";
        let lines = wrap_text(text, 20);
        assert_eq!(
            lines,
            vec!["Le jeune Paul", "Atreides s'unit à", "Chani et aux Fremen"]
        );
        for line in &lines {
            assert!(line.chars().count() <= 20);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_overlong_word() {
        let lines = wrap_text("a supercalifragilistic b", 10);
        assert_eq!(lines, vec!["a", "superca...", "b"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 10).is_empty());
    }
}
