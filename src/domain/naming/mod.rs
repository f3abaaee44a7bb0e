// Release name composer - Title.Year.Resolution.Source.HDR.Codec.Audio.Lang-GROUP

use tracing::debug;

use crate::domain::language::resolve_marker;
use crate::domain::model::{FactSheet, Movie};
use crate::domain::tags::CanonicalTags;

/// Composes release names for one release group
#[derive(Debug, Clone)]
pub struct ReleaseNamer {
    group: String,
}

impl ReleaseNamer {
    /// Create a namer appending `-<group>` to every name
    pub fn new(group: impl Into<String>) -> Self {
        Self { group: group.into() }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Compose the release name
    ///
    /// Each segment is only emitted when its value is non-empty, so partial
    /// inputs still yield a usable name.
    pub fn compose(&self, movie: &Movie, sheet: &FactSheet, source_type: &str) -> String {
        let tags = CanonicalTags::derive(sheet);
        let mut segments: Vec<String> = Vec::new();
        let mut push = |segment: String| {
            if !segment.is_empty() {
                segments.push(segment);
            }
        };

        push(sanitize_title(movie.naming_title()));
        push(movie.year());
        push(normalize_segment(&tags.resolution));
        push(normalize_segment(source_type));
        push(normalize_segment(&tags.hdr));
        push(normalize_segment(&tags.video_codec));
        if tags.ten_bit {
            push("10bit".to_string());
        }
        if let Some(audio) = tags.primary_audio {
            push(normalize_segment(&audio));
        }
        push(normalize_segment(&resolve_marker(&sheet.audio)));

        debug!(?segments, "Composed release name segments");

        let name = segments.join(".");
        if self.group.is_empty() {
            name
        } else {
            format!("{}-{}", name, self.group)
        }
    }
}

const REMOVED_CHARS: &[char] = &[
    ':', '\'', '"', '/', '\\', '?', '!', '*', '<', '>', '|', '#', '%', '(', ')', '{', '}', '[',
    ']', ',', ';', '-',
];

/// Sanitize a title for use in a release name
///
/// Substitution runs before dot collapsing, so `Spider-Man: No Way Home`
/// becomes `SpiderMan.No.Way.Home`. The result is a fixed point.
pub fn sanitize_title(title: &str) -> String {
    let mut substituted = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            c if REMOVED_CHARS.contains(&c) => {}
            '&' => substituted.push_str("and"),
            '@' => substituted.push_str("at"),
            ' ' => substituted.push('.'),
            c => substituted.push(c),
        }
    }

    let mut collapsed = String::with_capacity(substituted.len());
    for c in substituted.chars() {
        if c == '.' && collapsed.ends_with('.') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed.trim_matches('.').to_string()
}

/// Make a technical tag safe inside a release name
///
/// Unclassified codecs echo the raw probe text (`MPEG-4 VISUAL`), so spaces
/// become dots, path separators are dropped and dot runs collapse.
pub fn normalize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        let c = match c {
            '/' | '\\' => continue,
            c if c.is_whitespace() => '.',
            c => c,
        };
        if c == '.' && (out.is_empty() || out.ends_with('.')) {
            continue;
        }
        out.push(c);
    }
    out.trim_end_matches('.').to_string()
}
