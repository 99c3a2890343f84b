//! The searchable catalog of events, cities, themes and venues.

use crate::error::{Result, SearchError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Highest allowed popularity.
pub const MAX_POPULARITY: u8 = 100;

/// Category of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A kind of event the business plans
    Event,
    /// A city the business operates in
    City,
    /// A decoration theme
    Theme,
    /// A bookable venue
    Venue,
}

impl EntryKind {
    /// All kinds, in display order.
    pub const ALL: [EntryKind; 4] = [Self::Event, Self::City, Self::Theme, Self::Venue];

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::City => "city",
            Self::Theme => "theme",
            Self::Venue => "venue",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SearchError::UnknownKind(s.to_string()))
    }
}

/// One searchable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier
    pub id: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Display string, primary match target
    pub title: String,
    /// Secondary descriptive string
    #[serde(default)]
    pub subtitle: String,
    /// 0-100, default ordering and tie-break
    pub popularity: u8,
}

impl CatalogEntry {
    /// Creates a new entry.
    pub fn new(
        id: impl Into<String>,
        kind: EntryKind,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        popularity: u8,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            popularity,
        }
    }

    /// Text the matcher scores against: title and subtitle joined by a space.
    #[must_use]
    pub fn search_text(&self) -> String {
        if self.subtitle.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.subtitle)
        }
    }
}

/// A validated, immutable list of entries.
///
/// Ids are unique and popularity is within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct CatalogFile {
    entries: Vec<CatalogEntry>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    entries: vec![
        CatalogEntry::new(
            "wedding-hyderabad",
            EntryKind::Event,
            "Plan a Wedding in Hyderabad",
            "Mandap decor and catering",
            95,
        ),
        CatalogEntry::new(
            "guntur",
            EntryKind::City,
            "Events in Guntur",
            "Celebrations across coastal Andhra",
            70,
        ),
        CatalogEntry::new(
            "birthday-themes",
            EntryKind::Theme,
            "Birthday Party Themes",
            "Balloons, cakes and confetti",
            88,
        ),
        CatalogEntry::new(
            "corporate-events",
            EntryKind::Event,
            "Corporate Event Planning",
            "Conferences and offsites",
            80,
        ),
        CatalogEntry::new(
            "nellore",
            EntryKind::City,
            "Events in Nellore",
            "Festivals by the Penna river",
            65,
        ),
        CatalogEntry::new(
            "royal-theme",
            EntryKind::Theme,
            "Royal Palace Theme",
            "Regal decor for receptions",
            75,
        ),
        CatalogEntry::new(
            "banquet-halls",
            EntryKind::Venue,
            "Banquet Halls in Hyderabad",
            "Air conditioned halls for 500",
            85,
        ),
        CatalogEntry::new(
            "beach-venues",
            EntryKind::Venue,
            "Beachside Venues in Puri",
            "Sunset ceremonies on the coast",
            60,
        ),
    ],
});

impl Catalog {
    /// Builds a catalog, checking id uniqueness and popularity range.
    ///
    /// # Errors
    /// Returns the first invariant violation found, in entry order.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(SearchError::InvalidEntry(format!(
                    "entry titled {:?} has an empty id",
                    entry.title
                )));
            }
            if entry.title.trim().is_empty() {
                return Err(SearchError::InvalidEntry(format!(
                    "entry {} has an empty title",
                    entry.id
                )));
            }
            if entry.popularity > MAX_POPULARITY {
                return Err(SearchError::PopularityOutOfRange {
                    id: entry.id.clone(),
                    popularity: entry.popularity,
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(SearchError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The catalog compiled into the application.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parses a JSON array of entries.
    ///
    /// # Errors
    /// Fails on malformed JSON or an invariant violation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Parses a TOML document made of `[[entries]]` tables.
    ///
    /// # Errors
    /// Fails on malformed TOML or an invariant violation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml)?;
        Self::new(file.entries)
    }

    /// Loads a catalog file, picking the format from its extension.
    ///
    /// # Errors
    /// Fails when the extension is unknown, the file cannot be read, or its
    /// content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(SearchError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(path = %path.display(), entries = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterates entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries of one kind, in catalog order.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }
}

impl AsRef<[CatalogEntry]> for Catalog {
    fn as_ref(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, popularity: u8) -> CatalogEntry {
        CatalogEntry::new(id, EntryKind::Event, format!("Title {id}"), "", popularity)
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 8);
        assert!(Catalog::new(builtin.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_builtin_lookup() {
        let entry = Catalog::builtin().get("guntur").unwrap();
        assert_eq!(entry.title, "Events in Guntur");
        assert_eq!(entry.kind, EntryKind::City);
        assert!(Catalog::builtin().get("nowhere").is_none());
    }

    #[test]
    fn test_entries_of_kind() {
        let venues: Vec<_> = Catalog::builtin()
            .entries_of(EntryKind::Venue)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(venues, vec!["banquet-halls", "beach-venues"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![entry("a", 1), entry("b", 2), entry("a", 3)]).unwrap_err();
        assert!(matches!(err, SearchError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_popularity_out_of_range_rejected() {
        let err = Catalog::new(vec![entry("a", 101)]).unwrap_err();
        assert!(matches!(
            err,
            SearchError::PopularityOutOfRange { popularity: 101, .. }
        ));
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut bad = entry("a", 10);
        bad.title = "  ".to_string();
        assert!(matches!(
            Catalog::new(vec![bad]),
            Err(SearchError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_search_text_joins_title_and_subtitle() {
        let e = CatalogEntry::new("x", EntryKind::Theme, "Royal", "Palace", 1);
        assert_eq!(e.search_text(), "Royal Palace");
        let e = CatalogEntry::new("y", EntryKind::Theme, "Royal", "", 1);
        assert_eq!(e.search_text(), "Royal");
    }

    #[test]
    fn test_from_json_uses_type_field() {
        let catalog = Catalog::from_json_str(
            r#"[{"id": "goa", "type": "city", "title": "Events in Goa", "subtitle": "Beach parties", "popularity": 90}]"#,
        )
        .unwrap();
        assert_eq!(catalog.entries()[0].kind, EntryKind::City);
    }

    #[test]
    fn test_from_json_parse_error() {
        let err = Catalog::from_json_str("[{]").unwrap_err();
        assert!(matches!(err, SearchError::Parse { format: "json", .. }));
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[entries]]
            id = "mehndi"
            type = "event"
            title = "Mehndi Night"
            popularity = 77
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].subtitle, "");
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = Catalog::load("catalog.yaml").unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.JSON");
        std::fs::write(
            &path,
            r#"[{"id": "a", "type": "venue", "title": "Lakeside Lawn", "popularity": 40}]"#,
        )
        .unwrap();
        assert_eq!(Catalog::load(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_entry_kind_from_str() {
        assert_eq!("Venue".parse::<EntryKind>().unwrap(), EntryKind::Venue);
        assert!("castle".parse::<EntryKind>().is_err());
    }
}
