//! Attribute interpretation.
//!
//! Every enumerated attribute has a fixed set of accepted keywords and a
//! default. Values outside the set fall back to the default instead of
//! failing; the validator is the only place that reports them.

use serde::Serialize;

use crate::types::Attrs;

pub const DEFAULT_GRID_COLUMNS: usize = 2;
pub const DEFAULT_CODE_LANG: &str = "text";
pub const DEFAULT_IMAGE_ALT: &str = "image";
pub const DEFAULT_VIDEO_TITLE: &str = "Video player";

/// A keyword attribute with a default for absent or unknown values.
pub trait AttrEnum: Sized + Copy + Default {
    /// All accepted keywords, used in diagnostics.
    const KEYWORDS: &'static [&'static str];

    /// Strict parse. `None` for a value outside the enumeration.
    fn parse(value: &str) -> Option<Self>;

    fn as_str(self) -> &'static str;

    fn from_attr(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

/// Owned copy of an attribute value, if present.
pub fn attr_string(attrs: &Attrs, key: &str) -> Option<String> {
    attrs.get(key).cloned()
}

/// Exact `"true"` comparison. `"TRUE"`, `"1"` and `"yes"` are all false.
pub fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Grid column count: a positive integer, anything else is the default.
pub fn grid_columns(value: Option<&str>) -> usize {
    parse_grid_columns(value).unwrap_or(DEFAULT_GRID_COLUMNS)
}

pub(crate) fn parse_grid_columns(value: Option<&str>) -> Option<usize> {
    value?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
}

/// Image drop shadow. On unless the author says otherwise.
pub fn image_shadow(value: Option<&str>) -> bool {
    value.is_none_or(|v| v == "true")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl AttrEnum for Align {
    const KEYWORDS: &'static [&'static str] = &["left", "center", "right"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageWidth {
    Sm,
    Md,
    Lg,
    #[default]
    Full,
}

impl AttrEnum for ImageWidth {
    const KEYWORDS: &'static [&'static str] = &["sm", "md", "lg", "full"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "sm" => Some(ImageWidth::Sm),
            "md" => Some(ImageWidth::Md),
            "lg" => Some(ImageWidth::Lg),
            "full" => Some(ImageWidth::Full),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ImageWidth::Sm => "sm",
            ImageWidth::Md => "md",
            ImageWidth::Lg => "lg",
            ImageWidth::Full => "full",
        }
    }
}

/// Video player kind. `youtube` embeds a frame; any other value plays the
/// source natively, so there is no out-of-range value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    #[default]
    Youtube,
    Native,
}

impl AttrEnum for VideoKind {
    const KEYWORDS: &'static [&'static str] = &["youtube"];

    fn parse(value: &str) -> Option<Self> {
        Some(if value == "youtube" {
            VideoKind::Youtube
        } else {
            VideoKind::Native
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            VideoKind::Youtube => "youtube",
            VideoKind::Native => "native",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
    Check,
}

impl AttrEnum for ListKind {
    const KEYWORDS: &'static [&'static str] = &["unordered", "ordered", "1", "check"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "ordered" | "1" => Some(ListKind::Ordered),
            "check" => Some(ListKind::Check),
            "unordered" => Some(ListKind::Unordered),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ListKind::Unordered => "unordered",
            ListKind::Ordered => "ordered",
            ListKind::Check => "check",
        }
    }
}

/// Styling key of an `api` block. The authored label is kept separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl AttrEnum for HttpMethod {
    const KEYWORDS: &'static [&'static str] = &["GET", "POST", "PUT", "DELETE"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Info,
    Warn,
    Danger,
    Success,
}

impl AttrEnum for AlertKind {
    const KEYWORDS: &'static [&'static str] = &["info", "warn", "danger", "success"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(AlertKind::Info),
            "warn" => Some(AlertKind::Warn),
            "danger" => Some(AlertKind::Danger),
            "success" => Some(AlertKind::Success),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warn => "warn",
            AlertKind::Danger => "danger",
            AlertKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Green,
    #[default]
    Orange,
    Blue,
}

impl AttrEnum for BadgeColor {
    const KEYWORDS: &'static [&'static str] = &["red", "green", "orange", "blue"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "red" => Some(BadgeColor::Red),
            "green" => Some(BadgeColor::Green),
            "orange" => Some(BadgeColor::Orange),
            "blue" => Some(BadgeColor::Blue),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Red => "red",
            BadgeColor::Green => "green",
            BadgeColor::Orange => "orange",
            BadgeColor::Blue => "blue",
        }
    }
}

/// Heading and navigation icon names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Globe,
    Server,
    Credit,
    Layout,
    #[default]
    Hash,
    Zap,
    List,
    Mouse,
}

impl AttrEnum for Icon {
    const KEYWORDS: &'static [&'static str] = &[
        "globe", "server", "credit", "layout", "hash", "zap", "list", "mouse",
    ];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "globe" => Some(Icon::Globe),
            "server" => Some(Icon::Server),
            "credit" => Some(Icon::Credit),
            "layout" => Some(Icon::Layout),
            "hash" => Some(Icon::Hash),
            "zap" => Some(Icon::Zap),
            "list" => Some(Icon::List),
            "mouse" => Some(Icon::Mouse),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Icon::Globe => "globe",
            Icon::Server => "server",
            Icon::Credit => "credit",
            Icon::Layout => "layout",
            Icon::Hash => "hash",
            Icon::Zap => "zap",
            Icon::List => "list",
            Icon::Mouse => "mouse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grid_columns_parse() {
        assert_eq!(grid_columns(Some("3")), 3);
        assert_eq!(grid_columns(Some("banana")), 2);
        assert_eq!(grid_columns(Some("0")), 2);
        assert_eq!(grid_columns(Some("-4")), 2);
        assert_eq!(grid_columns(None), 2);
    }

    #[test]
    fn exact_true_only() {
        assert!(is_true(Some("true")));
        assert!(!is_true(Some("TRUE")));
        assert!(!is_true(Some("True")));
        assert!(!is_true(Some("1")));
        assert!(!is_true(None));
    }

    #[test]
    fn shadow_defaults_on() {
        assert!(image_shadow(None));
        assert!(image_shadow(Some("true")));
        assert!(!image_shadow(Some("false")));
    }

    #[test]
    fn unknown_values_fall_back() {
        assert_eq!(BadgeColor::from_attr(Some("purple")), BadgeColor::Orange);
        assert_eq!(Align::from_attr(Some("justify")), Align::Center);
        assert_eq!(ImageWidth::from_attr(Some("xl")), ImageWidth::Full);
        assert_eq!(AlertKind::from_attr(Some("warning")), AlertKind::Info);
        assert_eq!(HttpMethod::from_attr(Some("PATCH")), HttpMethod::Get);
        assert_eq!(Icon::from_attr(Some("rocket")), Icon::Hash);
    }

    #[test]
    fn known_values_parse() {
        assert_eq!(BadgeColor::from_attr(Some("blue")), BadgeColor::Blue);
        assert_eq!(Align::from_attr(Some("right")), Align::Right);
        assert_eq!(ImageWidth::from_attr(Some("sm")), ImageWidth::Sm);
        assert_eq!(HttpMethod::from_attr(Some("DELETE")), HttpMethod::Delete);
    }

    #[test]
    fn http_method_is_case_sensitive() {
        assert_eq!(HttpMethod::parse("post"), None);
    }

    #[test]
    fn list_kinds() {
        assert_eq!(ListKind::from_attr(Some("ordered")), ListKind::Ordered);
        assert_eq!(ListKind::from_attr(Some("1")), ListKind::Ordered);
        assert_eq!(ListKind::from_attr(Some("check")), ListKind::Check);
        assert_eq!(ListKind::from_attr(Some("bullets")), ListKind::Unordered);
        assert_eq!(ListKind::from_attr(None), ListKind::Unordered);
    }

    #[test]
    fn video_kind_dispatch() {
        assert_eq!(VideoKind::from_attr(None), VideoKind::Youtube);
        assert_eq!(VideoKind::from_attr(Some("youtube")), VideoKind::Youtube);
        assert_eq!(VideoKind::from_attr(Some("mp4")), VideoKind::Native);
    }

    #[test]
    fn keywords_round_trip_through_parse() {
        for kw in BadgeColor::KEYWORDS {
            assert_eq!(BadgeColor::parse(kw).map(BadgeColor::as_str), Some(*kw));
        }
        for kw in Icon::KEYWORDS {
            assert_eq!(Icon::parse(kw).map(Icon::as_str), Some(*kw));
        }
    }
}
