//! Record normalization
//!
//!     Turns tokenized spreadsheet rows into [Tile]s. The header row is mapped to known
//!     columns once; each data row is then read through that map, coerced field by field and
//!     either accepted or rejected as a whole. A bad row costs exactly that row, never the
//!     batch.
//!
//! Pipeline
//!
//!     1. Build: every row becomes a candidate tile. Missing columns read as empty, numbers
//!        that don't parse fall back to their defaults.
//!     2. Drop rows whose slug, lane or size is empty.
//!     3. Drop rows that are not published.
//!     4. Stable sort by `(sort, title)`.

use crate::tile::{Size, Tile};
use std::collections::HashMap;
use tracing::debug;

/// Feed-specific knobs of the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Tags beyond this count are dropped.
    pub max_tags: usize,
    /// Sort value for rows without a usable `sort` cell; sinks them to the end.
    pub default_sort: i64,
    pub default_child_order: i64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_tags: 8,
            default_sort: 9999,
            default_child_order: 0,
        }
    }
}

/// Columns the normalizer understands. Anything else in the header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Slug,
    Lane,
    Size,
    ParentSlug,
    ChildOrder,
    Title,
    Subtitle,
    Tags,
    ImageUrl,
    VideoUrl,
    ThumbUrl,
    Href,
    BodyMd,
    StartDate,
    EndDate,
    IsCurrent,
    Published,
    Featured,
    Sort,
}

impl Column {
    pub fn from_header(name: &str) -> Option<Column> {
        Some(match clean(name).as_str() {
            "slug" => Column::Slug,
            "lane" => Column::Lane,
            "size" => Column::Size,
            "parent_slug" => Column::ParentSlug,
            "child_order" => Column::ChildOrder,
            "title" => Column::Title,
            "subtitle" => Column::Subtitle,
            "tags" => Column::Tags,
            "image_url" => Column::ImageUrl,
            "video_url" => Column::VideoUrl,
            "thumb_url" => Column::ThumbUrl,
            "href" => Column::Href,
            "body_md" => Column::BodyMd,
            "start_date" => Column::StartDate,
            "end_date" => Column::EndDate,
            "is_current" => Column::IsCurrent,
            "published" => Column::Published,
            "featured" => Column::Featured,
            "sort" => Column::Sort,
            _ => return None,
        })
    }
}

/// Position of each known column in the header row. A repeated header keeps its last position.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    positions: HashMap<Column, usize>,
}

impl HeaderMap {
    pub fn new(header: &[String]) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| Column::from_header(name).map(|column| (column, idx)))
            .collect();
        Self { positions }
    }

    /// Raw cell for `column`; empty when the column or the cell is missing.
    pub fn cell<'r>(&self, row: &'r [String], column: Column) -> &'r str {
        self.positions
            .get(&column)
            .and_then(|&idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Why a row did not become a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingField(&'static str),
    Unpublished,
}

/// Normalize a tokenized document whose first row is the header.
pub fn normalize_tiles(rows: &[Vec<String>], options: &NormalizeOptions) -> Vec<Tile> {
    match rows.split_first() {
        Some((header, data)) if !data.is_empty() => normalize(header, data, options),
        _ => Vec::new(),
    }
}

/// Normalize data rows against a header row.
pub fn normalize(header: &[String], rows: &[Vec<String>], options: &NormalizeOptions) -> Vec<Tile> {
    let columns = HeaderMap::new(header);
    let mut tiles: Vec<Tile> = rows
        .iter()
        .enumerate()
        .filter_map(|(line, row)| match build_tile(&columns, row, options) {
            Ok(tile) => Some(tile),
            Err(reason) => {
                debug!(row = line + 1, ?reason, "dropping feed row");
                None
            }
        })
        .collect();

    tiles.sort_by(|a, b| a.sort.cmp(&b.sort).then_with(|| a.title.cmp(&b.title)));
    tiles
}

/// Build one tile from a data row, applying the drop rules in order.
pub fn build_tile(
    columns: &HeaderMap,
    row: &[String],
    options: &NormalizeOptions,
) -> Result<Tile, Rejection> {
    let cell = |column| columns.cell(row, column);

    let slug = clean(cell(Column::Slug));
    let lane = clean(cell(Column::Lane));
    let size_cell = clean(cell(Column::Size));
    for (name, value) in [("slug", &slug), ("lane", &lane), ("size", &size_cell)] {
        if value.is_empty() {
            return Err(Rejection::MissingField(name));
        }
    }
    if !to_bool(cell(Column::Published)) {
        return Err(Rejection::Unpublished);
    }

    let size = Size::parse(&size_cell).unwrap_or_else(|| {
        debug!(%slug, size = %size_cell, "unknown tile size, using medium");
        Size::Medium
    });

    Ok(Tile {
        parent_slug: Some(clean(cell(Column::ParentSlug))).filter(|p| !p.is_empty()),
        child_order: parse_int(cell(Column::ChildOrder), options.default_child_order),
        title: clean(cell(Column::Title)),
        subtitle: clean(cell(Column::Subtitle)),
        tags: split_tags(cell(Column::Tags), options.max_tags),
        image_url: first_url(cell(Column::ImageUrl)),
        video_url: first_url(cell(Column::VideoUrl)),
        thumb_url: first_url(cell(Column::ThumbUrl)),
        href: Some(clean(cell(Column::Href))).filter(|h| !h.is_empty()),
        body_md: clean(cell(Column::BodyMd)),
        start_date: clean(cell(Column::StartDate)),
        end_date: clean(cell(Column::EndDate)),
        is_current: to_bool(cell(Column::IsCurrent)),
        published: true,
        featured: to_bool(cell(Column::Featured)),
        sort: parse_int(cell(Column::Sort), options.default_sort),
        slug,
        lane,
        size,
    })
}

/// Trim a cell. Spreadsheet exports sometimes carry a byte order mark, which goes too.
pub fn clean(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// `TRUE` in any case is true, everything else is false.
pub fn to_bool(value: &str) -> bool {
    clean(value).eq_ignore_ascii_case("true")
}

pub fn split_tags(value: &str, max: usize) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(max)
        .map(str::to_string)
        .collect()
}

/// First non-empty entry of a comma or newline separated URL list.
pub fn first_url(value: &str) -> Option<String> {
    value
        .split([',', '\n'])
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

fn parse_int(value: &str, default: i64) -> i64 {
    clean(value).parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    const HEADER: &[&str] = &[
        "slug", "lane", "size", "parent_slug", "child_order", "title", "tags", "published", "sort",
    ];

    fn run(rows: &[&[&str]]) -> Vec<Tile> {
        let rows: Vec<Vec<String>> = rows.iter().map(|r| strings(r)).collect();
        normalize(&strings(HEADER), &rows, &NormalizeOptions::default())
    }

    #[test]
    fn test_clean_and_bool() {
        assert_eq!(clean("  x \t"), "x");
        assert_eq!(clean("\u{feff}slug"), "slug");
        assert!(to_bool("TRUE"));
        assert!(to_bool(" true "));
        assert!(to_bool("True"));
        assert!(!to_bool("yes"));
        assert!(!to_bool("1"));
        assert!(!to_bool(""));
    }

    #[test]
    fn test_split_tags_caps_and_trims() {
        assert_eq!(split_tags(" a, b ,,c ", 8), strings(&["a", "b", "c"]));
        assert_eq!(split_tags("a,b,c,d", 2), strings(&["a", "b"]));
        assert_eq!(split_tags("a,a", 8), strings(&["a", "a"]));
        assert!(split_tags("  ", 8).is_empty());
    }

    #[test]
    fn test_first_url() {
        assert_eq!(first_url(" , \nhttps://a, https://b").as_deref(), Some("https://a"));
        assert_eq!(first_url("https://a\nhttps://b").as_deref(), Some("https://a"));
        assert_eq!(first_url(" ,\n "), None);
    }

    #[test]
    fn test_numeric_fallbacks() {
        let tiles = run(&[&["a", "biz", "small", "", "x", "A", "", "TRUE", "soon"]]);
        assert_eq!(tiles[0].child_order, 0);
        assert_eq!(tiles[0].sort, 9999);

        let tiles = run(&[&["a", "biz", "small", "", " 3 ", "A", "", "TRUE", "0"]]);
        assert_eq!(tiles[0].child_order, 3);
        assert_eq!(tiles[0].sort, 0);
    }

    #[test]
    fn test_drop_rules() {
        let tiles = run(&[
            &["", "biz", "small", "", "", "No slug", "", "TRUE", "1"],
            &["b", "", "small", "", "", "No lane", "", "TRUE", "1"],
            &["c", "biz", " ", "", "", "No size", "", "TRUE", "1"],
            &["d", "biz", "small", "", "", "Draft", "", "FALSE", "1"],
            &["e", "biz", "small", "", "", "Kept", "", "true", "1"],
        ]);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].slug, "e");
    }

    #[test]
    fn test_missing_and_extra_columns() {
        let header = strings(&["title", "slug", "mystery", "lane", "size", "published"]);
        let rows = vec![strings(&["Alpha", "a", "???", "biz", "large"])];
        assert!(normalize(&header, &rows, &NormalizeOptions::default()).is_empty());

        let rows = vec![strings(&["Alpha", "a", "???", "biz", "large", "TRUE"])];
        let tiles = normalize(&header, &rows, &NormalizeOptions::default());
        assert_eq!(tiles.len(), 1);
        let tile = &tiles[0];
        assert_eq!(tile.title, "Alpha");
        assert_eq!(tile.size, Size::Large);
        assert_eq!(tile.parent_slug, None);
        assert!(tile.tags.is_empty());
        assert_eq!(tile.sort, 9999);
    }

    #[test]
    fn test_sort_by_sort_then_title() {
        let tiles = run(&[
            &["c", "biz", "small", "", "", "Charlie", "", "TRUE", "2"],
            &["b", "biz", "small", "", "", "Bravo", "", "TRUE", "1"],
            &["z", "biz", "small", "", "", "Zulu", "", "TRUE", ""],
            &["a", "biz", "small", "", "", "Alpha", "", "TRUE", "2"],
        ]);
        let order: Vec<&str> = tiles.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c", "z"]);
    }

    #[test]
    fn test_unknown_size_reads_as_medium() {
        let tiles = run(&[&["a", "biz", "Huge", "", "", "A", "", "TRUE", "1"]]);
        assert_eq!(tiles[0].size, Size::Medium);
    }

    #[test]
    fn test_header_only_document() {
        let rows = vec![strings(HEADER)];
        assert!(normalize_tiles(&rows, &NormalizeOptions::default()).is_empty());
        assert!(normalize_tiles(&[], &NormalizeOptions::default()).is_empty());
    }
}
