//! HTML parsing of TMDB search, movie and cast pages

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::model::{CastMember, Movie};
use crate::error::{AioError, AioResult};

const MAX_CAST: usize = 10;

fn selector(css: &str) -> AioResult<Selector> {
    Selector::parse(css).map_err(|e| AioError::TmdbError {
        message: format!("Invalid CSS selector '{}': {:?}", css, e),
    })
}

fn movie_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/movie/(\d+)").expect("movie id regex should compile"))
}

fn image_path_regexes() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r#"/t/p/[^/]+(/[^"\s]+)"#).expect("image path regex should compile"),
            Regex::new(r#"/p/[^/]+(/[^"\s]+)"#).expect("image path regex should compile"),
        ]
    })
}

fn imdb_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"tt\d+").expect("imdb id regex should compile"))
}

fn runtime_regexes() -> &'static (Regex, Regex) {
    static RE: OnceLock<(Regex, Regex)> = OnceLock::new();
    RE.get_or_init(|| {
        (
            Regex::new(r"(\d+)\s*h").expect("hours regex should compile"),
            Regex::new(r"(\d+)\s*m").expect("minutes regex should compile"),
        )
    })
}

/// Collapse whitespace runs and trim
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

fn first_text(scope: ElementRef, css: &Selector) -> String {
    scope.select(css).next().map(element_text).unwrap_or_default()
}

/// TMDB id from a `/movie/<id>-slug` link
pub fn extract_movie_id(href: &str) -> Option<u64> {
    movie_id_regex()
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Relative image path from a full image URL
pub fn extract_image_path(src: &str) -> String {
    image_path_regexes()
        .iter()
        .find_map(|re| re.captures(src).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Runtime in minutes from text such as `2h 15m`, `135m` or `2 h 15 min`
pub fn parse_runtime(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let (hours_re, minutes_re) = runtime_regexes();
    let capture = |re: &Regex| -> u32 {
        re.captures(&lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    capture(hours_re)
        .saturating_mul(60)
        .saturating_add(capture(minutes_re))
}

/// Movie cards of a search results page, in page order
///
/// Cards without an id or a title are dropped.
pub fn parse_search_results(html: &str) -> AioResult<Vec<Movie>> {
    let document = Html::parse_document(html);
    let card_sel = selector("div.search_results.movie div.card")?;
    let link_sel = selector("a.result")?;
    let title_sel = selector("h2")?;
    let original_sel = selector("h2 span.title")?;
    let date_sel = selector("span.release_date")?;
    let overview_sel = selector("div.overview p")?;
    let poster_sel = selector("img.poster")?;

    let mut movies = Vec::new();
    for card in document.select(&card_sel) {
        let id = card
            .select(&link_sel)
            .find_map(|link| link.value().attr("href"))
            .and_then(extract_movie_id)
            .unwrap_or(0);

        // The h2 also wraps the original title span; keep its own text only.
        let title = card
            .select(&title_sel)
            .next()
            .map(|h2| {
                clean_text(
                    &h2.children()
                        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
                        .collect::<String>(),
                )
            })
            .unwrap_or_default();
        let original = first_text(card, &original_sel);
        let original = clean_text(original.trim_start_matches('(').trim_end_matches(')'));

        let movie = Movie {
            id,
            original_title: if original.is_empty() {
                title.clone()
            } else {
                original
            },
            title,
            release_date: first_text(card, &date_sel),
            overview: first_text(card, &overview_sel),
            poster_path: card
                .select(&poster_sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(extract_image_path)
                .unwrap_or_default(),
            ..Default::default()
        };

        if movie.id > 0 && !movie.title.is_empty() {
            movies.push(movie);
        }
    }
    Ok(movies)
}

/// Movie record from a movie page; credits come from a separate page
pub fn parse_movie_page(html: &str, id: u64) -> AioResult<Movie> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let mut movie = Movie {
        id,
        ..Default::default()
    };

    let title_link_sel = selector("div.title h2 a")?;
    let title_sel = selector("div.title h2")?;
    movie.title = first_text(root, &title_link_sel);
    if movie.title.is_empty() {
        movie.title = first_text(root, &title_sel);
    }

    let fact_sel = selector("section.facts.left_column p.wrap")?;
    let strong_sel = selector("strong")?;
    for fact in document.select(&fact_sel) {
        let label = first_text(fact, &strong_sel);
        let lower = label.to_lowercase();
        let is_original = (lower.contains("titre") && lower.contains("origine"))
            || lower.contains("original title");
        if is_original {
            let full = element_text(fact);
            movie.original_title = full
                .strip_prefix(&label)
                .unwrap_or(&full)
                .trim()
                .to_string();
        }
    }
    if movie.original_title.is_empty() {
        movie.original_title = movie.title.clone();
    }

    movie.tagline = first_text(root, &selector("section.content_wrapper h3.tagline")?);
    movie.overview = first_text(root, &selector("section.content_wrapper div.overview p")?);
    movie.release_date = document
        .select(&selector("section.content_wrapper span.release")?)
        .map(element_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default();
    movie.runtime = document
        .select(&selector("section.content_wrapper span.runtime")?)
        .last()
        .map(|span| parse_runtime(&element_text(span)))
        .unwrap_or(0);
    movie.genres = document
        .select(&selector("section.content_wrapper span.genres a")?)
        .map(element_text)
        .filter(|genre| !genre.is_empty())
        .collect();

    if let Some(score) = document
        .select(&selector("div.user_score_chart")?)
        .filter_map(|chart| chart.value().attr("data-percent"))
        .filter_map(|percent| percent.trim().parse::<f64>().ok())
        .last()
    {
        movie.vote_average = score / 10.0;
    }

    movie.poster_path = document
        .select(&selector("section.content_wrapper img.poster")?)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(extract_image_path)
        .unwrap_or_default();
    movie.backdrop_path = document
        .select(&selector("div.image_content.backdrop img")?)
        .filter_map(|img| img.value().attr("src"))
        .map(extract_image_path)
        .last()
        .unwrap_or_default();

    movie.imdb_id = document
        .select(&selector("a.social_link")?)
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains("imdb.com"))
        .filter_map(|href| imdb_id_regex().find(href).map(|m| m.as_str().to_string()))
        .last()
        .unwrap_or_default();

    Ok(movie)
}

/// Fill cast and directors from a cast page
pub fn apply_credits(html: &str, movie: &mut Movie) -> AioResult<()> {
    let document = Html::parse_document(html);
    let cast_sel = selector("section.panel.top_billed ol.people li")?;
    let crew_sel = selector("section.panel ol.people.crew li")?;
    let name_sel = selector("p a")?;
    let role_sel = selector("p.character")?;
    let profile_sel = selector("img.profile")?;

    for (order, person) in document.select(&cast_sel).take(MAX_CAST).enumerate() {
        let name = first_text(person, &name_sel);
        if name.is_empty() {
            continue;
        }
        movie.cast.push(CastMember {
            name,
            character: first_text(person, &role_sel),
            order: order as u32,
            profile_path: person
                .select(&profile_sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(extract_image_path)
                .unwrap_or_default(),
        });
    }

    for person in document.select(&crew_sel) {
        let job = first_text(person, &role_sel).to_lowercase();
        if job.contains("director") || job.contains("réalisateur") {
            let name = first_text(person, &name_sel);
            if !name.is_empty() {
                movie.directors.push(name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
      <html><body>
      <div class="search_results movie">
        <div class="card">
          <a class="result" href="/movie/27205-inception?language=fr-FR">
            <img class="poster" src="https://media.themoviedb.org/t/p/w94_and_h141_bestv2/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg">
          </a>
          <h2>Inception <span class="title">(Inception)</span></h2>
          <span class="release_date">16 juillet 2010</span>
          <div class="overview"><p>Dom Cobb est un voleur
             expérimenté.</p></div>
        </div>
        <div class="card">
          <a class="result" href="/movie/64956-inception-the-cobol-job">
          </a>
          <h2>Inception: The Cobol Job</h2>
        </div>
        <div class="card">
          <a class="result" href="/tv/1">
          </a>
          <h2>Not a movie</h2>
        </div>
      </div>
      </body></html>
    "#;

    const MOVIE_PAGE: &str = r#"
      <html><body>
      <div class="image_content backdrop">
        <img src="https://media.themoviedb.org/t/p/w1920_and_h800_multi_faces/backdrop.jpg">
      </div>
      <section class="content_wrapper">
        <img class="poster" src="https://media.themoviedb.org/t/p/w300_and_h450_bestv2/poster.jpg">
        <div class="title"><h2><a href="/movie/27205">Inception</a> <span class="tag">(2010)</span></h2></div>
        <span class="release">16/07/2010 (FR)</span>
        <span class="genres"><a href="/genre/28">Action</a>, <a href="/genre/878">Science-Fiction</a></span>
        <span class="runtime">2h 28m</span>
        <div class="user_score_chart" data-percent="84.0"></div>
        <h3 class="tagline">Votre esprit est la scène du crime</h3>
        <div class="overview"><p>Dom Cobb est un voleur expérimenté.</p></div>
      </section>
      <a class="social_link" href="https://twitter.com/inception">tw</a>
      <a class="social_link" href="https://www.imdb.com/title/tt1375666/">imdb</a>
      <section class="facts left_column">
        <p class="wrap"><strong><bdi>Titre d'origine</bdi></strong> Inception</p>
        <p class="wrap"><strong><bdi>Statut</bdi></strong> Sorti</p>
      </section>
      </body></html>
    "#;

    const CAST_PAGE: &str = r#"
      <html><body>
      <section class="panel top_billed">
        <ol class="people">
          <li><img class="profile" src="https://media.themoviedb.org/t/p/w66_and_h66_face/leo.jpg">
              <p><a href="/person/6193">Leonardo DiCaprio</a></p><p class="character">Dom Cobb</p></li>
          <li><p><a href="/person/24045">Joseph Gordon-Levitt</a></p><p class="character">Arthur</p></li>
          <li><p class="character">Nobody</p></li>
        </ol>
      </section>
      <section class="panel">
        <ol class="people crew">
          <li><p><a href="/person/525">Christopher Nolan</a></p><p class="character">Director, Screenplay</p></li>
          <li><p><a href="/person/556">Emma Thomas</a></p><p class="character">Producer</p></li>
        </ol>
      </section>
      </body></html>
    "#;

    #[test]
    fn test_parse_search_results() {
        let movies = parse_search_results(SEARCH_PAGE).unwrap();
        assert_eq!(movies.len(), 2);

        assert_eq!(movies[0].id, 27205);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[0].original_title, "Inception");
        assert_eq!(movies[0].release_date, "16 juillet 2010");
        assert_eq!(movies[0].overview, "Dom Cobb est un voleur expérimenté.");
        assert_eq!(movies[0].poster_path, "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg");

        assert_eq!(movies[1].id, 64956);
        assert_eq!(movies[1].original_title, "Inception: The Cobol Job");
    }

    #[test]
    fn test_parse_search_results_empty_page() {
        assert!(parse_search_results("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_movie_page() {
        let movie = parse_movie_page(MOVIE_PAGE, 27205).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.original_title, "Inception");
        assert_eq!(movie.release_date, "16/07/2010 (FR)");
        assert_eq!(movie.year(), "2010");
        assert_eq!(movie.runtime, 148);
        assert_eq!(movie.genres, vec!["Action", "Science-Fiction"]);
        assert_eq!(movie.vote_average, 8.4);
        assert_eq!(movie.tagline, "Votre esprit est la scène du crime");
        assert_eq!(movie.poster_path, "/poster.jpg");
        assert_eq!(movie.backdrop_path, "/backdrop.jpg");
        assert_eq!(movie.imdb_id, "tt1375666");
    }

    #[test]
    fn test_apply_credits() {
        let mut movie = Movie::default();
        apply_credits(CAST_PAGE, &mut movie).unwrap();

        assert_eq!(movie.cast.len(), 2);
        assert_eq!(movie.cast[0].name, "Leonardo DiCaprio");
        assert_eq!(movie.cast[0].character, "Dom Cobb");
        assert_eq!(movie.cast[0].profile_path, "/leo.jpg");
        assert_eq!(movie.cast[1].order, 1);
        assert_eq!(movie.directors, vec!["Christopher Nolan"]);
    }

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("2h 15m"), 135);
        assert_eq!(parse_runtime("135m"), 135);
        assert_eq!(parse_runtime("2 h 15 min"), 135);
        assert_eq!(parse_runtime("3h"), 180);
        assert_eq!(parse_runtime(""), 0);
    }

    #[test]
    fn test_parse_runtime_saturates() {
        assert_eq!(parse_runtime("4000000000h 59m"), u32::MAX);
        assert_eq!(parse_runtime("71582788h 59m"), u32::MAX);
    }

    #[test]
    fn test_extract_helpers() {
        assert_eq!(extract_movie_id("/movie/603-the-matrix"), Some(603));
        assert_eq!(extract_movie_id("/tv/1399"), None);
        assert_eq!(
            extract_image_path("https://media.themoviedb.org/t/p/w94_and_h141_face/abc.jpg"),
            "/abc.jpg"
        );
        assert_eq!(extract_image_path("https://example.com/p/w500/x.png"), "/x.png");
        assert_eq!(extract_image_path("data:image/png;base64,AAAA"), "");
        assert_eq!(clean_text("  a\n\tb   c "), "a b c");
    }
}
