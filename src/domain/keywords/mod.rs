// Search keywords from scene file names, and direct movie id parsing

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

const MAX_WORDS: usize = 4;

const SCENE_PATTERNS: &[&str] = &[
    r"\b(1080p|720p|2160p|4k|uhd|hdr|bluray|brrip|webrip|web-dl|hdtv|dvdrip)\b",
    r"\b(x264|x265|h264|h265|hevc|avc|xvid)\b",
    r"\b(dts|dd5\.1|ac3|aac|flac|truehd|atmos)\b",
    r"\b(multi|french|vff|vfi|vostfr|truefrench|english)\b",
    r"\b(proper|repack|internal|limited|extended|unrated|directors\.cut)\b",
    r"\[(.*?)\]",
    r"\{(.*?)\}",
    r"[-_.]",
];

fn scene_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        SCENE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){}", pattern)).expect("scene pattern should compile")
            })
            .collect()
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex should compile"))
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex should compile"))
}

/// Extract movie search keywords from a release file name
///
/// Scene tags and separators are stripped, the text is cut before an
/// embedded year when one follows the title, and at most four words are kept.
pub fn extract_keywords(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    let mut result = name.to_lowercase();
    for re in scene_regexes() {
        result = re.replace_all(&result, " ").into_owned();
    }
    result = whitespace_regex().replace_all(&result, " ").trim().to_string();

    // Cut just before the year; the year itself is dropped with the tail.
    if let Some(year) = year_regex().find(&result) {
        if year.start() > 0 {
            result = result[..year.start()].trim().to_string();
        }
    }

    result
        .split_whitespace()
        .take(MAX_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a direct movie id: `id:603`, `tmdb:603` or a bare positive number
pub fn parse_direct_id(input: &str) -> Option<u64> {
    let input = input.trim().to_lowercase();

    for prefix in ["id:", "tmdb:"] {
        if let Some(rest) = input.strip_prefix(prefix) {
            if let Ok(id) = rest.trim().parse::<u64>() {
                return Some(id);
            }
        }
    }

    input.parse::<u64>().ok().filter(|id| *id > 0)
}
