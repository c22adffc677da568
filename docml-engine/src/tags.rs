/// The closed tag vocabulary.
///
/// Anything outside this set is an unknown tag and renders as a transparent
/// pass-through of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // structure
    Section,
    Grid,
    Col,
    Separator,
    // typography
    H1,
    H2,
    H3,
    P,
    Quote,
    // media
    Img,
    Video,
    // lists
    List,
    Li,
    // tables
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    // technical blocks
    Codeblock,
    Cmd,
    Usage,
    Api,
    // interactive
    Tabs,
    Tab,
    Details,
    // callouts
    Alert,
    Card,
    Step,
    // inline
    B,
    I,
    U,
    Kbd,
    Code,
    Link,
    Badge,
    Tooltip,
    Param,
}

impl Tag {
    pub const ALL: &'static [Tag] = &[
        Tag::Section,
        Tag::Grid,
        Tag::Col,
        Tag::Separator,
        Tag::H1,
        Tag::H2,
        Tag::H3,
        Tag::P,
        Tag::Quote,
        Tag::Img,
        Tag::Video,
        Tag::List,
        Tag::Li,
        Tag::Table,
        Tag::Thead,
        Tag::Tbody,
        Tag::Tr,
        Tag::Th,
        Tag::Td,
        Tag::Codeblock,
        Tag::Cmd,
        Tag::Usage,
        Tag::Api,
        Tag::Tabs,
        Tag::Tab,
        Tag::Details,
        Tag::Alert,
        Tag::Card,
        Tag::Step,
        Tag::B,
        Tag::I,
        Tag::U,
        Tag::Kbd,
        Tag::Code,
        Tag::Link,
        Tag::Badge,
        Tag::Tooltip,
        Tag::Param,
    ];

    /// Look up a lowercase tag name. `divider` is accepted for `separator`.
    pub fn from_name(name: &str) -> Option<Tag> {
        let tag = match name {
            "section" => Tag::Section,
            "grid" => Tag::Grid,
            "col" => Tag::Col,
            "separator" | "divider" => Tag::Separator,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "p" => Tag::P,
            "quote" => Tag::Quote,
            "img" => Tag::Img,
            "video" => Tag::Video,
            "list" => Tag::List,
            "li" => Tag::Li,
            "table" => Tag::Table,
            "thead" => Tag::Thead,
            "tbody" => Tag::Tbody,
            "tr" => Tag::Tr,
            "th" => Tag::Th,
            "td" => Tag::Td,
            "codeblock" => Tag::Codeblock,
            "cmd" => Tag::Cmd,
            "usage" => Tag::Usage,
            "api" => Tag::Api,
            "tabs" => Tag::Tabs,
            "tab" => Tag::Tab,
            "details" => Tag::Details,
            "alert" => Tag::Alert,
            "card" => Tag::Card,
            "step" => Tag::Step,
            "b" => Tag::B,
            "i" => Tag::I,
            "u" => Tag::U,
            "kbd" => Tag::Kbd,
            "code" => Tag::Code,
            "link" => Tag::Link,
            "badge" => Tag::Badge,
            "tooltip" => Tag::Tooltip,
            "param" => Tag::Param,
            _ => return None,
        };
        Some(tag)
    }

    /// Canonical source name.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Section => "section",
            Tag::Grid => "grid",
            Tag::Col => "col",
            Tag::Separator => "separator",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Quote => "quote",
            Tag::Img => "img",
            Tag::Video => "video",
            Tag::List => "list",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Codeblock => "codeblock",
            Tag::Cmd => "cmd",
            Tag::Usage => "usage",
            Tag::Api => "api",
            Tag::Tabs => "tabs",
            Tag::Tab => "tab",
            Tag::Details => "details",
            Tag::Alert => "alert",
            Tag::Card => "card",
            Tag::Step => "step",
            Tag::B => "b",
            Tag::I => "i",
            Tag::U => "u",
            Tag::Kbd => "kbd",
            Tag::Code => "code",
            Tag::Link => "link",
            Tag::Badge => "badge",
            Tag::Tooltip => "tooltip",
            Tag::Param => "param",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_tag_resolves_by_its_name() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.name()), Some(*tag));
        }
    }

    #[test]
    fn divider_is_an_alias() {
        assert_eq!(Tag::from_name("divider"), Some(Tag::Separator));
        assert_eq!(Tag::Separator.name(), "separator");
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Tag::from_name("marquee"), None);
        assert_eq!(Tag::from_name("root"), None);
        assert_eq!(Tag::from_name("SECTION"), None);
    }
}
