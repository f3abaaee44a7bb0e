//! Forum presentation in BBCode

use std::fmt::Write;

use tracing::error;

use crate::domain::language;
use crate::domain::model::{FactSheet, Movie};

const CAST_IN_LIST: usize = 5;
const CAST_PICTURES: usize = 2;
const PROFILE_BASE_URL: &str = "https://image.tmdb.org/t/p/w138_and_h175_face";
const RATING_ICON: &str = "https://zupimages.net/up/21/02/xro7.png";
const TMDB_ICON: &str = "https://zupimages.net/up/21/03/mxao.png";
const IMDB_ICON: &str = "https://zupimages.net/up/21/03/od5a.png";

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!(
        "[font=Verdana][color=#9900ff][size=150][b]{}[/b][/size][/color][/font]\n \n",
        title
    ));
}

/// Render the BBCode presentation of a release
///
/// Sections always come in the same order; rows whose data is absent are
/// left out.
pub fn render_presentation(movie: &Movie, sheet: &FactSheet) -> String {
    let mut out = String::new();
    if let Err(e) = render(&mut out, movie, sheet) {
        error!("Presentation rendering failed: {}", e);
    }
    out
}

fn render(out: &mut String, movie: &Movie, sheet: &FactSheet) -> std::fmt::Result {
    out.push_str("[center]");
    write_header(out, movie)?;
    write_informations(out, movie)?;
    write_synopsis(out, movie)?;
    write_technical(out, sheet)?;

    heading(out, "Téléchargements");
    writeln!(out, "[b]Fichier :[/b] {}", sheet.display_file_name())?;
    write!(out, "[b]Poids Total :[/b] {}", sheet.file_size_formatted())?;
    out.push_str("[/center] \n");
    Ok(())
}

fn write_header(out: &mut String, movie: &Movie) -> std::fmt::Result {
    writeln!(
        out,
        "[font=Verdana][size=200][color=#aa0000][b]{}[/b][/color][/size][/font]",
        movie.title
    )?;
    let year = movie.year();
    if !year.is_empty() {
        writeln!(
            out,
            "[font=Verdana][size=150][color=#aa0000]({})[/color][/size][/font]",
            year
        )?;
    }
    out.push_str("\n\n");

    if !movie.poster_path.is_empty() {
        write!(out, "[img]{}[/img]\n\n", movie.poster_url(None))?;
    }
    if !movie.tagline.is_empty() {
        writeln!(
            out,
            "[font=Verdana][size=100][color=#aa0000][i]« {} »[/i][/color][/size][/font]",
            movie.tagline
        )?;
        out.push_str(" \n \n");
    }
    Ok(())
}

fn write_informations(out: &mut String, movie: &Movie) -> std::fmt::Result {
    heading(out, "Informations");
    out.push_str("[font=Verdana]");

    if movie.has_distinct_original_title() {
        writeln!(out, "[b]Titre original :[/b] {}", movie.original_title)?;
    }
    if !movie.release_date.is_empty() {
        writeln!(out, "[b]Sortie :[/b] {}", movie.release_date)?;
    }
    if movie.runtime > 0 {
        writeln!(out, "[b]Durée :[/b] {} min", movie.runtime)?;
    }
    out.push_str(" \n");

    if !movie.directors.is_empty() {
        write!(out, "[b]Réalisateur :[/b] {}\n \n", movie.directors.join(", "))?;
    }
    let cast = movie.top_cast(CAST_IN_LIST);
    if !cast.is_empty() {
        write!(out, "[b]Acteurs :[/b]\n{}\n \n", cast.join(", "))?;
    }
    if !movie.genres.is_empty() {
        write!(out, "[b]Genres :[/b]\n{}\n \n", movie.genres.join(", "))?;
    }
    if movie.vote_average > 0.0 {
        write!(out, "[img]{}[/img] {:.2}\n \n", RATING_ICON, movie.vote_average)?;
    }

    writeln!(
        out,
        "[img]{}[/img] [url={}]Fiche du film[/url]",
        TMDB_ICON,
        movie.tmdb_url()
    )?;
    if !movie.imdb_id.is_empty() {
        writeln!(
            out,
            "[img]{}[/img] [url={}]{}[/url]",
            IMDB_ICON,
            movie.imdb_url(),
            movie.imdb_id
        )?;
    }
    out.push_str("[/font]\n \n");
    Ok(())
}

fn write_synopsis(out: &mut String, movie: &Movie) -> std::fmt::Result {
    heading(out, "Synopsis");
    out.push_str("[font=Verdana]\n");
    out.push_str(&movie.overview);
    out.push_str("\n \n \n[/font]\n");

    let pictures: Vec<&str> = movie
        .cast
        .iter()
        .take(CAST_PICTURES)
        .map(|member| member.profile_path.as_str())
        .filter(|path| !path.is_empty())
        .collect();
    if !pictures.is_empty() {
        for path in pictures {
            write!(out, " [img]{}{}[/img] ", PROFILE_BASE_URL, path)?;
        }
        out.push_str("\n \n \n");
    }
    Ok(())
}

fn write_technical(out: &mut String, sheet: &FactSheet) -> std::fmt::Result {
    let video = &sheet.video;

    heading(out, "Détails techniques");
    out.push_str("[font=Verdana]");
    writeln!(out, "[b]Format :[/b] {}", sheet.container.to_uppercase())?;
    write!(out, "[b]Codec Vidéo :[/b] {}", video.codec_tag())?;
    if video.bit_depth == Some(10) {
        out.push_str(" 10-bit");
    }
    out.push('\n');

    if let Some(rate) = video.bit_rate.filter(|rate| *rate > 0) {
        writeln!(out, "[b]Débit Vidéo :[/b] ~{} kb/s", rate / 1000)?;
    }
    write!(out, "[b]Résolution :[/b] {}\n \n", video.resolution())?;

    if !sheet.audio.is_empty() {
        out.push_str("[b]Langue(s) :[/b]\n");
        for audio in &sheet.audio {
            write!(
                out,
                "{} {} [{}] | {}",
                language::flag(&audio.language),
                language::display_name(&audio.language),
                audio.layout_short(),
                audio.codec_tag()
            )?;
            if let Some(rate) = audio.bit_rate.filter(|rate| *rate > 0) {
                write!(out, " à {} kb/s", rate / 1000)?;
            }
            out.push('\n');
        }
        out.push_str("\n \n");
    }

    if !sheet.subtitles.is_empty() {
        out.push_str("[b]Sous-titres :[/b]\n");
        for subtitle in &sheet.subtitles {
            writeln!(
                out,
                "{} {} | {} ({})",
                language::flag(&subtitle.language),
                language::display_name(&subtitle.language),
                subtitle.format_name(),
                if subtitle.forced { "forced" } else { "full" }
            )?;
        }
        out.push_str("\n \n");
    }

    if let Some(rate) = sheet.overall_bit_rate.filter(|rate| *rate > 0) {
        write!(out, "[b]Débit Global :[/b] ~{} kb/s", rate / 1000)?;
    }
    out.push_str("[/font]\n \n");
    Ok(())
}
