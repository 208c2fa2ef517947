use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Kind of catalog entry. Serialized with the catalog's wire names
/// (`"movie"` / `"tv"`), which are also the URL path segments for the
/// per-item detail endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Series),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

/// Identity key for deduplication and pagination exclusion.
///
/// Catalog ids are only unique within a media type, so the type is part of
/// the key; a movie and a series may legitimately share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaKey {
    pub id: u64,
    pub media_type: MediaType,
}

/// Unified catalog record for a movie or TV series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    /// Empty when the catalog has no date for the entry
    #[serde(default)]
    pub release_date: String,
    /// `0.0` means "unrated", not a zero rating
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    pub media_type: MediaType,
    /// Model-attributed justification for the recommendation, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MediaItem {
    pub fn key(&self) -> MediaKey {
        MediaKey {
            id: self.id,
            media_type: self.media_type,
        }
    }
}

/// Structured analysis of the user's free-text request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedInput {
    /// Genre names ordered by relevance as emitted by the model
    pub relevant_genres: Vec<String>,
    pub other_context_clues: String,
}

impl AnalyzedInput {
    /// Context clues with the model's "none" sentinel filtered out.
    ///
    /// The backend emits the literal string `"none"` (any casing) when it
    /// found nothing beyond genres; consumers must treat that as empty.
    pub fn context_clues(&self) -> Option<&str> {
        let clues = self.other_context_clues.trim();
        if clues.is_empty() || clues.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(clues)
        }
    }
}

/// One candidate emitted by the recommendation generator
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecommendedTitle {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// Pipeline output: resolved items in generator-emission order, plus the
/// input analysis on the first page of a session only.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEnvelope {
    pub media: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalyzedInput>,
}

/// Genre id to display name, merged from the movie and TV genre lists
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreMap(HashMap<u64, String>);

impl GenreMap {
    /// Merges both genre lists; movie entries win id collisions.
    pub fn from_lists(movie: Vec<Genre>, tv: Vec<Genre>) -> Self {
        let mut map = HashMap::new();
        for genre in movie {
            map.insert(genre.id, genre.name);
        }
        for genre in tv {
            map.entry(genre.id).or_insert(genre.name);
        }
        Self(map)
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A video attached to a catalog entry (trailers, teasers, clips)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    fn is_youtube(&self) -> bool {
        self.site == "YouTube"
    }

    fn is_trailer(&self) -> bool {
        self.kind == "Trailer"
    }

    /// Deterministic trailer pick: an official YouTube trailer, then any
    /// YouTube trailer, then any YouTube video at all.
    pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
        videos
            .iter()
            .find(|v| v.is_trailer() && v.is_youtube() && v.official)
            .or_else(|| videos.iter().find(|v| v.is_trailer() && v.is_youtube()))
            .or_else(|| videos.iter().find(|v| v.is_youtube()))
    }
}

/// Cast entry from the per-item credits endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

/// User review from the per-item reviews endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub url: Option<String>,
}

// ============================================================================
// Catalog API wire types
// ============================================================================

/// Raw search hit from the catalog.
///
/// Movie and TV rows use different field names for the display name and the
/// date; combined search additionally interleaves person rows, which carry a
/// `media_type` discriminator and no date at all.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    /// Present only in combined (`search/multi`) responses
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbSearchResult>,
}

impl TmdbSearchResult {
    /// Media type tag from a combined search row, if it names a kind this
    /// service handles. Person rows and anything else map to `None`.
    pub fn tagged_type(&self) -> Option<MediaType> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaType::Movie),
            Some("tv") => Some(MediaType::Series),
            _ => None,
        }
    }

    /// Normalizes the raw row into the unified record.
    ///
    /// `media_type` comes from the row's own tag (combined search) or from
    /// the endpoint that was queried (typed search).
    pub fn into_media_item(self, media_type: MediaType) -> MediaItem {
        let title = match media_type {
            MediaType::Movie => self.title.or(self.name),
            MediaType::Series => self.name.or(self.title),
        }
        .unwrap_or_default();

        MediaItem {
            id: self.id,
            title,
            overview: self.overview,
            poster_path: self.poster_path,
            release_date: self.release_date.or(self.first_air_date).unwrap_or_default(),
            vote_average: self.vote_average,
            popularity: self.popularity,
            genre_ids: self.genre_ids,
            media_type,
            reason: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenreList {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideosResponse {
    pub results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbReviewsResponse {
    #[serde(default)]
    pub results: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn video(kind: &str, site: &str, official: bool, key: &str) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: format!("{} on {}", kind, site),
            site: site.to_string(),
            kind: kind.to_string(),
            official,
        }
    }

    #[test]
    fn test_media_type_wire_names() {
        assert_eq!(serde_json::to_string(&MediaType::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaType::Series).unwrap(), "\"tv\"");
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("tv".parse::<MediaType>().unwrap(), MediaType::Series);
        assert!("person".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_key_distinguishes_types() {
        let movie = MediaKey {
            id: 42,
            media_type: MediaType::Movie,
        };
        let series = MediaKey {
            id: 42,
            media_type: MediaType::Series,
        };

        let mut keys = HashSet::new();
        assert!(keys.insert(movie));
        assert!(keys.insert(series));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_normalize_movie_row() {
        let raw: TmdbSearchResult = serde_json::from_str(
            r#"{
                "id": 4638,
                "media_type": "movie",
                "title": "Galaxy Quest",
                "overview": "The alumni cast of a space opera TV series...",
                "poster_path": "/galaxy.jpg",
                "release_date": "1999-12-25",
                "vote_average": 7.3,
                "popularity": 25.1,
                "genre_ids": [35, 878]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.tagged_type(), Some(MediaType::Movie));
        let item = raw.into_media_item(MediaType::Movie);
        assert_eq!(item.title, "Galaxy Quest");
        assert_eq!(item.release_date, "1999-12-25");
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.genre_ids, vec![35, 878]);
        assert_eq!(item.reason, None);
    }

    #[test]
    fn test_normalize_tv_row_uses_name_and_first_air_date() {
        let raw: TmdbSearchResult = serde_json::from_str(
            r#"{
                "id": 1396,
                "name": "Breaking Bad",
                "overview": "A chemistry teacher...",
                "first_air_date": "2008-01-20",
                "vote_average": 8.9,
                "popularity": 300.5,
                "genre_ids": [18, 80]
            }"#,
        )
        .unwrap();

        let item = raw.into_media_item(MediaType::Series);
        assert_eq!(item.title, "Breaking Bad");
        assert_eq!(item.release_date, "2008-01-20");
        assert_eq!(item.media_type, MediaType::Series);
    }

    #[test]
    fn test_normalize_missing_date_becomes_empty() {
        let raw: TmdbSearchResult =
            serde_json::from_str(r#"{"id": 7, "title": "Unreleased"}"#).unwrap();
        let item = raw.into_media_item(MediaType::Movie);
        assert_eq!(item.release_date, "");
        assert_eq!(item.vote_average, 0.0);
    }

    #[test]
    fn test_person_rows_have_no_tagged_type() {
        let raw: TmdbSearchResult =
            serde_json::from_str(r#"{"id": 500, "media_type": "person", "name": "Tom Cruise"}"#)
                .unwrap();
        assert_eq!(raw.tagged_type(), None);
    }

    #[test]
    fn test_context_clues_filters_none_sentinel() {
        let with_clues = AnalyzedInput {
            relevant_genres: vec!["Comedy".to_string()],
            other_context_clues: "set in space".to_string(),
        };
        assert_eq!(with_clues.context_clues(), Some("set in space"));

        for sentinel in ["none", "None", "NONE", "", "   "] {
            let analysis = AnalyzedInput {
                relevant_genres: vec![],
                other_context_clues: sentinel.to_string(),
            };
            assert_eq!(analysis.context_clues(), None, "sentinel {:?}", sentinel);
        }
    }

    #[test]
    fn test_genre_map_movie_entries_win_collisions() {
        let movie = vec![
            Genre {
                id: 10765,
                name: "Sci-Fi Movie".to_string(),
            },
            Genre {
                id: 35,
                name: "Comedy".to_string(),
            },
        ];
        let tv = vec![
            Genre {
                id: 10765,
                name: "Sci-Fi & Fantasy".to_string(),
            },
            Genre {
                id: 10759,
                name: "Action & Adventure".to_string(),
            },
        ];

        let map = GenreMap::from_lists(movie, tv);
        assert_eq!(map.len(), 3);
        assert_eq!(map.name(10765), Some("Sci-Fi Movie"));
        assert_eq!(map.name(10759), Some("Action & Adventure"));
        assert_eq!(map.name(99999), None);
    }

    #[test]
    fn test_pick_trailer_prefers_official_youtube_trailer() {
        let videos = vec![
            video("Clip", "YouTube", true, "clip"),
            video("Trailer", "YouTube", false, "unofficial"),
            video("Trailer", "YouTube", true, "official"),
        ];
        assert_eq!(Video::pick_trailer(&videos).unwrap().key, "official");
    }

    #[test]
    fn test_pick_trailer_falls_back_to_any_youtube_trailer() {
        let videos = vec![
            video("Clip", "YouTube", true, "clip"),
            video("Trailer", "Vimeo", true, "vimeo"),
            video("Trailer", "YouTube", false, "unofficial"),
        ];
        assert_eq!(Video::pick_trailer(&videos).unwrap().key, "unofficial");
    }

    #[test]
    fn test_pick_trailer_falls_back_to_any_youtube_video() {
        let videos = vec![
            video("Trailer", "Vimeo", true, "vimeo"),
            video("Featurette", "YouTube", false, "featurette"),
        ];
        assert_eq!(Video::pick_trailer(&videos).unwrap().key, "featurette");
    }

    #[test]
    fn test_pick_trailer_none_without_youtube() {
        let videos = vec![video("Trailer", "Vimeo", true, "vimeo")];
        assert_eq!(Video::pick_trailer(&videos), None);
        assert_eq!(Video::pick_trailer(&[]), None);
    }

    #[test]
    fn test_recommended_title_wire_shape() {
        let candidate: RecommendedTitle =
            serde_json::from_str(r#"{"title": "Severance", "type": "tv"}"#).unwrap();
        assert_eq!(candidate.title, "Severance");
        assert_eq!(candidate.media_type, MediaType::Series);
    }

    #[test]
    fn test_envelope_omits_absent_analysis() {
        let envelope = ResultEnvelope {
            media: vec![],
            analysis: None,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("analysis").is_none());
    }
}
