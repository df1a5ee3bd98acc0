//! Document rendering settings.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_bidi::{BidiClass, BidiInfo};

use crate::detect::{detect_format_from_bytes, detect_format_from_path, SpecFormat};
use crate::error::{Error, Result};
use crate::labels::{Labels, Language};
use crate::synth::curl::BASE_URL_PLACEHOLDER;

/// Fallback colour for anything that is not a 3- or 6-digit hex value.
pub const FALLBACK_COLOR: &str = "#000000";

const DEFAULT_FONT: &str = "Tahoma";
const DEFAULT_H1: i32 = 18;
const DEFAULT_H2: i32 = 16;
const DEFAULT_H3: i32 = 14;
const DEFAULT_BODY: i32 = 12;
const DEFAULT_BORDER: i32 = 8;
const DEFAULT_MARGIN: i32 = 720;

/// Settings snapshot for one document build.
///
/// Sizes are in points, margins in twentieths of a point. A settings file
/// uses camelCase names (`h1Size`, `borderColor`, `isRightToLeft`, ...);
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderSettings {
    /// Font family for every run
    pub font: String,

    /// Level 1 heading size
    pub h1_size: i32,

    /// Level 2 heading size
    pub h2_size: i32,

    /// Level 3 heading size
    pub h3_size: i32,

    /// Body text size
    pub body_size: i32,

    /// Heading colour (`#RRGGBB`)
    pub head_color: String,

    /// Border and table header fill colour (`#RRGGBB`)
    pub border_color: String,

    /// Page and table border width in eighths of a point
    pub border_size: i32,

    /// Top margin
    pub margin_top: i32,

    /// Bottom margin
    pub margin_bottom: i32,

    /// Left margin
    pub margin_left: i32,

    /// Right margin
    pub margin_right: i32,

    /// Text direction
    #[serde(rename = "isRightToLeft", alias = "direction")]
    pub direction: TextDirection,

    /// Emit a table of contents field after the title
    pub include_table_of_contents: bool,

    /// Emit a page number footer field
    pub include_page_numbers: bool,

    /// Label preset for fixed strings and default titles
    pub language: Language,

    /// Document title
    pub title: Option<String>,

    /// Introduction body text
    pub intro_text: Option<String>,

    /// Shared response model body text
    pub shared_model_text: Option<String>,

    /// Shared errors body text
    pub shared_errors_text: Option<String>,

    /// Info section heading
    pub info_title: Option<String>,

    /// Table of contents heading
    pub table_of_contents_title: Option<String>,

    /// Introduction heading
    pub intro_title: Option<String>,

    /// Method index heading
    pub index_title: Option<String>,

    /// Changelog heading
    pub changelog_title: Option<String>,

    /// Shared response model heading
    pub shared_model_title: Option<String>,

    /// Shared errors heading
    pub shared_errors_title: Option<String>,

    /// Endpoints heading
    pub endpoints_title: Option<String>,

    /// Raw changelog text, ideally a JSON array of entries
    pub changelog: Option<String>,

    /// Release date shown in the info table
    pub release_date: Option<NaiveDate>,

    /// Require authentication on every operation
    pub auth_required: bool,

    /// Authentication header name
    pub auth_header_name: String,

    /// Authentication header value
    pub auth_header_value: String,

    /// Prefix for synthesized invocation URLs
    pub base_url_placeholder: String,
}

impl RenderSettings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)
            .map_err(|e| Error::InvalidSettings(format!("{}: {}", path.display(), e)))?;
        let text = std::fs::read_to_string(path)?;
        Self::parse_with_format(&text, format)
    }

    /// Parse settings text in the given container format.
    pub fn parse_with_format(text: &str, format: SpecFormat) -> Result<Self> {
        let settings: Self = match format {
            SpecFormat::Json => {
                serde_json::from_str(text).map_err(|e| Error::InvalidSettings(e.to_string()))?
            }
            SpecFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| Error::InvalidSettings(e.to_string()))?
            }
        };
        Ok(settings)
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set heading sizes for levels 1 to 3.
    pub fn with_heading_sizes(mut self, h1: i32, h2: i32, h3: i32) -> Self {
        self.h1_size = h1;
        self.h2_size = h2;
        self.h3_size = h3;
        self
    }

    /// Set the body text size.
    pub fn with_body_size(mut self, size: i32) -> Self {
        self.body_size = size;
        self
    }

    /// Set heading and border colours.
    pub fn with_colors(mut self, head: impl Into<String>, border: impl Into<String>) -> Self {
        self.head_color = head.into();
        self.border_color = border.into();
        self
    }

    /// Set the border width.
    pub fn with_border_size(mut self, size: i32) -> Self {
        self.border_size = size;
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, top: i32, bottom: i32, left: i32, right: i32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the text direction.
    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Force right-to-left or left-to-right layout.
    pub fn with_right_to_left(self, rtl: bool) -> Self {
        self.with_direction(if rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        })
    }

    /// Enable or disable the table of contents.
    pub fn with_table_of_contents(mut self, include: bool) -> Self {
        self.include_table_of_contents = include;
        self
    }

    /// Enable or disable page numbers.
    pub fn with_page_numbers(mut self, include: bool) -> Self {
        self.include_page_numbers = include;
        self
    }

    /// Select the label preset.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the introduction text.
    pub fn with_intro(mut self, text: impl Into<String>) -> Self {
        self.intro_text = Some(text.into());
        self
    }

    /// Set the shared response model and shared errors texts.
    pub fn with_shared_texts(mut self, model: impl Into<String>, errors: impl Into<String>) -> Self {
        self.shared_model_text = Some(model.into());
        self.shared_errors_text = Some(errors.into());
        self
    }

    /// Set the changelog text.
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }

    /// Set the release date.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Configure the authentication header.
    pub fn with_auth(
        mut self,
        required: bool,
        header: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.auth_required = required;
        self.auth_header_name = header.into();
        self.auth_header_value = value.into();
        self
    }

    /// Set the base URL placeholder used in invocations.
    pub fn with_base_url_placeholder(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_placeholder = base_url.into();
        self
    }

    /// Label preset for the configured language.
    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(self.language)
    }

    /// Whether the layout is right-to-left.
    ///
    /// `Auto` is decided by the first strong character of the configured
    /// title, then the introduction text, then the language preset.
    pub fn is_right_to_left(&self) -> bool {
        match self.direction {
            TextDirection::Rtl => true,
            TextDirection::Ltr => false,
            TextDirection::Auto => {
                let texts = [self.title.as_deref(), self.intro_text.as_deref()];
                detect_direction(texts.into_iter().flatten())
                    .unwrap_or(self.labels().right_to_left)
            }
        }
    }

    /// Apply defaulting rules.
    ///
    /// Blank font and non-positive sizes fall back to defaults, colours are
    /// normalised to `#RRGGBB`, blank titles take the language preset and
    /// `Auto` direction is resolved.
    pub fn normalized(&self) -> Self {
        let labels = self.labels();
        let mut s = self.clone();

        if s.font.trim().is_empty() {
            s.font = DEFAULT_FONT.to_string();
        }
        s.h1_size = positive_or(s.h1_size, DEFAULT_H1);
        s.h2_size = positive_or(s.h2_size, DEFAULT_H2);
        s.h3_size = positive_or(s.h3_size, DEFAULT_H3);
        s.body_size = positive_or(s.body_size, DEFAULT_BODY);
        s.border_size = positive_or(s.border_size, DEFAULT_BORDER);
        s.margin_top = positive_or(s.margin_top, DEFAULT_MARGIN);
        s.margin_bottom = positive_or(s.margin_bottom, DEFAULT_MARGIN);
        s.margin_left = positive_or(s.margin_left, DEFAULT_MARGIN);
        s.margin_right = positive_or(s.margin_right, DEFAULT_MARGIN);
        s.head_color = normalize_color(&s.head_color);
        s.border_color = normalize_color(&s.border_color);

        fill(&mut s.title, labels.document_title);
        fill(&mut s.intro_text, labels.intro_text);
        fill(&mut s.info_title, labels.info_title);
        fill(&mut s.table_of_contents_title, labels.toc_title);
        fill(&mut s.intro_title, labels.intro_title);
        fill(&mut s.index_title, labels.index_title);
        fill(&mut s.changelog_title, labels.changelog_title);
        fill(&mut s.shared_model_title, labels.shared_model_title);
        fill(&mut s.shared_errors_title, labels.shared_errors_title);
        fill(&mut s.endpoints_title, labels.endpoints_title);

        if s.auth_header_name.trim().is_empty() {
            s.auth_header_name = "Authorization".to_string();
        }
        if s.base_url_placeholder.is_empty() {
            s.base_url_placeholder = BASE_URL_PLACEHOLDER.to_string();
        }

        s.direction = if self.is_right_to_left() {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        };

        s
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            h1_size: DEFAULT_H1,
            h2_size: DEFAULT_H2,
            h3_size: DEFAULT_H3,
            body_size: DEFAULT_BODY,
            head_color: "#000000".to_string(),
            border_color: "#2B579A".to_string(),
            border_size: DEFAULT_BORDER,
            margin_top: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
            margin_left: DEFAULT_MARGIN,
            margin_right: DEFAULT_MARGIN,
            direction: TextDirection::Auto,
            include_table_of_contents: true,
            include_page_numbers: true,
            language: Language::English,
            title: None,
            intro_text: None,
            shared_model_text: None,
            shared_errors_text: None,
            info_title: None,
            table_of_contents_title: None,
            intro_title: None,
            index_title: None,
            changelog_title: None,
            shared_model_title: None,
            shared_errors_title: None,
            endpoints_title: None,
            changelog: None,
            release_date: None,
            auth_required: false,
            auth_header_name: "Authorization".to_string(),
            auth_header_value: "Bearer {TOKEN}".to_string(),
            base_url_placeholder: BASE_URL_PLACEHOLDER.to_string(),
        }
    }
}

impl FromStr for RenderSettings {
    type Err = Error;

    /// Parse settings text, sniffing JSON or YAML.
    fn from_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let format = detect_format_from_bytes(text.as_bytes())
            .map_err(|e| Error::InvalidSettings(e.to_string()))?;
        Self::parse_with_format(text, format)
    }
}

/// Layout direction.
///
/// Settings files may give a boolean (`isRightToLeft: true`) or one of the
/// strings `rtl`, `ltr` and `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawDirection")]
pub enum TextDirection {
    /// Right-to-left
    Rtl,
    /// Left-to-right
    Ltr,
    /// Decide from the document text
    #[default]
    Auto,
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextDirection::Rtl => f.write_str("rtl"),
            TextDirection::Ltr => f.write_str("ltr"),
            TextDirection::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for TextDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rtl" | "true" => Ok(TextDirection::Rtl),
            "ltr" | "false" => Ok(TextDirection::Ltr),
            "auto" | "" => Ok(TextDirection::Auto),
            other => Err(Error::InvalidSettings(format!(
                "unknown direction '{}' (expected rtl, ltr or auto)",
                other
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDirection {
    Flag(bool),
    Name(String),
}

impl TryFrom<RawDirection> for TextDirection {
    type Error = Error;

    fn try_from(raw: RawDirection) -> Result<Self> {
        match raw {
            RawDirection::Flag(true) => Ok(TextDirection::Rtl),
            RawDirection::Flag(false) => Ok(TextDirection::Ltr),
            RawDirection::Name(name) => name.parse(),
        }
    }
}

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("hex regex is valid"))
}

/// Normalise a colour to `#RRGGBB`.
///
/// The leading `#` is optional and 3-digit shorthand is expanded. Anything
/// else becomes `#000000`.
pub fn normalize_color(color: &str) -> String {
    let raw = color.trim();
    let raw = raw.strip_prefix('#').unwrap_or(raw);

    let expanded: String = if raw.chars().count() == 3 {
        raw.chars().flat_map(|c| [c, c]).collect()
    } else {
        raw.to_string()
    };

    if hex_regex().is_match(&expanded) {
        format!("#{}", expanded.to_ascii_uppercase())
    } else {
        FALLBACK_COLOR.to_string()
    }
}

/// Direction of the first text carrying a strong directional character.
pub fn detect_direction<'t>(texts: impl IntoIterator<Item = &'t str>) -> Option<bool> {
    texts.into_iter().find_map(|text| {
        let info = BidiInfo::new(text, None);
        let has_strong = info
            .original_classes
            .iter()
            .any(|c| matches!(c, BidiClass::L | BidiClass::R | BidiClass::AL));
        if !has_strong {
            return None;
        }
        info.paragraphs.first().map(|p| p.level.is_rtl())
    })
}

fn positive_or(value: i32, default: i32) -> i32 {
    if value <= 0 {
        default
    } else {
        value
    }
}

fn fill(slot: &mut Option<String>, default: &str) {
    if slot.as_deref().map_or(true, |s| s.trim().is_empty()) {
        *slot = Some(default.to_string());
    }
}
