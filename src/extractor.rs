//! Positional extraction of a [`ProfileRecord`] from a profile page.
//!
//! The profile markup carries no stable ids, only repeated class names, so each
//! field is read by position inside a named region. Every region declares how
//! many matches it needs; a page that falls short fails with a single
//! `StructuralMismatch` naming the region instead of an out-of-range panic.

use scraper::{ElementRef, Html, Selector};

use crate::errors::AppError;
use crate::models::ProfileRecord;

/// A class-selected region of the profile page.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// Name used in errors and logs.
    pub name: &'static str,
    pub selector: &'static str,
    /// Descendant whose text is taken from each match. When a match has no such
    /// descendant its own text is used.
    pub inner: Option<&'static str>,
    /// Fewest matches a well-formed page has.
    pub min_count: usize,
}

pub const NAME: Region = Region {
    name: "name",
    selector: ".hero-profile__name",
    inner: None,
    min_count: 1,
};

pub const NICKNAME: Region = Region {
    name: "nickname",
    selector: ".hero-profile__nickname",
    inner: None,
    min_count: 0,
};

pub const DIVISION_TITLE: Region = Region {
    name: "division title",
    selector: ".hero-profile__division-title",
    inner: None,
    min_count: 1,
};

pub const DIVISION_BODY: Region = Region {
    name: "division body",
    selector: ".hero-profile__division-body",
    inner: None,
    min_count: 1,
};

pub const AGE: Region = Region {
    name: "age",
    selector: ".field--name-age",
    inner: None,
    min_count: 1,
};

pub const TAGS: Region = Region {
    name: "tags",
    selector: ".hero-profile__tag",
    inner: Some("p"),
    min_count: 2,
};

pub const STAT_NUMBERS: Region = Region {
    name: "stat numbers",
    selector: ".hero-profile__stat-numb",
    inner: Some("p"),
    min_count: 2,
};

pub const PERCENT_CIRCLES: Region = Region {
    name: "percent circles",
    selector: ".e-chart-circle__percent",
    inner: Some("text"),
    min_count: 2,
};

pub const BIOGRAPHY: Region = Region {
    name: "biography",
    selector: ".c-bio__text",
    inner: Some("div"),
    min_count: 9,
};

// Positions inside the tag region.
const TAG_STATUS: usize = 1;

// Positions inside the stat-number region.
const STAT_KNOCKOUTS: usize = 0;
const STAT_SUBMISSIONS: usize = 1;

// Positions inside the percent-circle region.
const PERCENT_STRIKING: usize = 0;
const PERCENT_TAKEDOWN: usize = 1;

// Positions inside the biography region.
const BIO_HOMETOWN: usize = 1;
const BIO_STYLE: usize = 3;
const BIO_HEIGHT: usize = 5;
const BIO_WEIGHT: usize = 6;
const BIO_REACH: usize = 8;

/// A parsed profile page, queried region by region.
pub struct ProfileDocument {
    html: Html,
}

impl ProfileDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Ordered, trimmed text fragments of `region`, one per match.
    pub fn fragments(&self, region: &Region) -> Result<Vec<String>, AppError> {
        let selector = compile(region, region.selector)?;
        let inner = region
            .inner
            .map(|inner| compile(region, inner))
            .transpose()?;

        let fragments: Vec<String> = self
            .html
            .select(&selector)
            .map(|element| fragment_text(element, inner.as_ref()))
            .collect();

        if fragments.len() < region.min_count {
            return Err(AppError::StructuralMismatch {
                region: region.name,
                reason: format!(
                    "expected at least {} match(es) for '{}', found {}",
                    region.min_count,
                    region.selector,
                    fragments.len()
                ),
            });
        }

        Ok(fragments)
    }

    /// Text of the first match; empty when the region is absent and allowed to be.
    pub fn single(&self, region: &Region) -> Result<String, AppError> {
        Ok(self
            .fragments(region)?
            .into_iter()
            .next()
            .unwrap_or_default())
    }
}

/// Maps a profile page to a complete record.
pub fn extract_profile(html: &str) -> Result<ProfileRecord, AppError> {
    let document = ProfileDocument::parse(html);

    let name = document.single(&NAME)?;
    if name.is_empty() {
        return Err(AppError::StructuralMismatch {
            region: NAME.name,
            reason: "name is blank".to_string(),
        });
    }

    let nickname = document.single(&NICKNAME)?;
    let division = document.single(&DIVISION_TITLE)?;
    let record = document.single(&DIVISION_BODY)?;
    let age = parse_integer("age", &document.single(&AGE)?)?;

    let tags = document.fragments(&TAGS)?;
    let status = tags[TAG_STATUS].clone();

    let stats = document
        .fragments(&STAT_NUMBERS)?
        .iter()
        .map(|text| parse_integer("stat number", text))
        .collect::<Result<Vec<_>, _>>()?;

    let percents = document
        .fragments(&PERCENT_CIRCLES)?
        .iter()
        .map(|text| parse_percentage("accuracy", text))
        .collect::<Result<Vec<_>, _>>()?;

    let bio = document.fragments(&BIOGRAPHY)?;
    let country = country_from_hometown(&bio[BIO_HOMETOWN])?;

    Ok(ProfileRecord {
        name,
        nickname,
        status,
        country,
        style: bio[BIO_STYLE].clone(),
        record,
        division,
        age,
        knockout_wins: stats[STAT_KNOCKOUTS],
        submission_wins: stats[STAT_SUBMISSIONS],
        height: f64::from(parse_integer("height", &bio[BIO_HEIGHT])?),
        weight: f64::from(parse_integer("weight", &bio[BIO_WEIGHT])?),
        reach: f64::from(parse_integer("reach", &bio[BIO_REACH])?),
        striking_accuracy: percents[PERCENT_STRIKING],
        takedown_accuracy: percents[PERCENT_TAKEDOWN],
    })
}

/// Parses integer text such as `"42"`.
pub fn parse_integer(field: &'static str, text: &str) -> Result<i32, AppError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| AppError::NumericCoercion {
            field,
            text: text.to_string(),
        })
}

/// Parses percentage text such as `"73%"` into a fraction (`0.73`).
pub fn parse_percentage(field: &'static str, text: &str) -> Result<f64, AppError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    match digits.parse::<u32>() {
        Ok(value) if value <= 100 => Ok(f64::from(value) / 100.0),
        _ => Err(AppError::NumericCoercion {
            field,
            text: text.to_string(),
        }),
    }
}

/// Second comma-separated segment of a hometown such as `"Denver, United States"`.
pub fn country_from_hometown(hometown: &str) -> Result<String, AppError> {
    hometown
        .split(',')
        .nth(1)
        .map(|country| country.trim().to_string())
        .ok_or_else(|| AppError::StructuralMismatch {
            region: BIOGRAPHY.name,
            reason: format!("hometown {:?} has no country segment", hometown),
        })
}

fn fragment_text(element: ElementRef<'_>, inner: Option<&Selector>) -> String {
    let text: String = match inner {
        Some(inner) => {
            let mut matches = element.select(inner).peekable();
            if matches.peek().is_some() {
                matches.flat_map(|m| m.text()).collect()
            } else {
                element.text().collect()
            }
        }
        None => element.text().collect(),
    };
    text.trim().to_string()
}

fn compile(region: &Region, selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|e| AppError::StructuralMismatch {
        region: region.name,
        reason: format!("invalid selector '{}': {}", selector, e),
    })
}
