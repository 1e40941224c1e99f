//! KDoc documentation blocks.

/// Known KDoc block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KDocTagName {
    Param,
    Return,
    Constructor,
    Receiver,
    Property,
    Throws,
    Exception,
    Sample,
    See,
    Author,
    Since,
    Suppress,
    Version,
    PropertySetter,
    PropertyGetter,
}

impl KDocTagName {
    /// Maps a raw tag token (without `@`) to a known tag name.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let tag = match token {
            "param" => Self::Param,
            "return" => Self::Return,
            "constructor" => Self::Constructor,
            "receiver" => Self::Receiver,
            "property" => Self::Property,
            "throws" => Self::Throws,
            "exception" => Self::Exception,
            "sample" => Self::Sample,
            "see" => Self::See,
            "author" => Self::Author,
            "since" => Self::Since,
            "suppress" => Self::Suppress,
            "version" => Self::Version,
            "propertySetter" => Self::PropertySetter,
            "propertyGetter" => Self::PropertyGetter,
            _ => return None,
        };
        Some(tag)
    }
}

/// One parsed tag line (plus continuation lines) of a KDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KDocTag {
    /// The tag name.
    pub name: KDocTagName,
    /// The tag's text, continuation lines joined with spaces.
    pub text: String,
}

/// A parsed KDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KDoc {
    text: String,
    description: String,
    tags: Vec<KDocTag>,
}

impl KDoc {
    /// Parses a raw `/** ... */` block.
    ///
    /// The description is everything before the first tag line; unknown tag
    /// tokens are skipped rather than rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let inner = raw.trim();
        let inner = inner.strip_prefix("/**").unwrap_or(inner);
        let inner = inner.strip_suffix("*/").unwrap_or(inner);

        let mut description_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<KDocTag> = Vec::new();
        let mut in_tags = false;

        for line in inner.lines() {
            let line = line.trim().trim_start_matches('*').trim();
            if let Some(rest) = line.strip_prefix('@') {
                in_tags = true;
                let (token, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                if let Some(name) = KDocTagName::from_token(token) {
                    tags.push(KDocTag {
                        name,
                        text: value.trim().to_owned(),
                    });
                }
            } else if in_tags {
                if let Some(last) = tags.last_mut() {
                    if !line.is_empty() {
                        if !last.text.is_empty() {
                            last.text.push(' ');
                        }
                        last.text.push_str(line);
                    }
                }
            } else {
                description_lines.push(line);
            }
        }

        let description = description_lines.join("\n").trim().to_owned();
        Self {
            text: raw.to_owned(),
            description,
            tags,
        }
    }

    /// The raw block text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The free-form description before the first tag.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parsed tags in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[KDocTag] {
        &self.tags
    }

    /// Whether the block contains at least one tag with the given name.
    #[must_use]
    pub fn has_tag(&self, name: KDocTagName) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Whether the block satisfies every enabled requirement.
    #[must_use]
    pub fn satisfies(&self, req: &KDocRequirements) -> bool {
        if req.description && self.description.is_empty() {
            return false;
        }
        let tag_checks = [
            (req.param_tag, KDocTagName::Param),
            (req.return_tag, KDocTagName::Return),
            (req.constructor_tag, KDocTagName::Constructor),
            (req.receiver_tag, KDocTagName::Receiver),
            (req.property_tag, KDocTagName::Property),
            (req.throws_tag, KDocTagName::Throws),
            (req.exception_tag, KDocTagName::Exception),
            (req.sample_tag, KDocTagName::Sample),
            (req.see_tag, KDocTagName::See),
            (req.author_tag, KDocTagName::Author),
            (req.since_tag, KDocTagName::Since),
            (req.suppress_tag, KDocTagName::Suppress),
            (req.version_tag, KDocTagName::Version),
            (req.property_setter_tag, KDocTagName::PropertySetter),
            (req.property_getter_tag, KDocTagName::PropertyGetter),
        ];
        tag_checks
            .iter()
            .all(|&(enabled, tag)| !enabled || self.has_tag(tag))
    }
}

/// Per-tag verification toggles for `has_valid_kdoc`.
///
/// Every tag defaults to "not verified" except the description, which
/// defaults to "verified".
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs, clippy::struct_excessive_bools)]
pub struct KDocRequirements {
    pub description: bool,
    pub param_tag: bool,
    pub return_tag: bool,
    pub constructor_tag: bool,
    pub receiver_tag: bool,
    pub property_tag: bool,
    pub throws_tag: bool,
    pub exception_tag: bool,
    pub sample_tag: bool,
    pub see_tag: bool,
    pub author_tag: bool,
    pub since_tag: bool,
    pub suppress_tag: bool,
    pub version_tag: bool,
    pub property_setter_tag: bool,
    pub property_getter_tag: bool,
}

impl Default for KDocRequirements {
    fn default() -> Self {
        Self {
            description: true,
            param_tag: false,
            return_tag: false,
            constructor_tag: false,
            receiver_tag: false,
            property_tag: false,
            throws_tag: false,
            exception_tag: false,
            sample_tag: false,
            see_tag: false,
            author_tag: false,
            since_tag: false,
            suppress_tag: false,
            version_tag: false,
            property_setter_tag: false,
            property_getter_tag: false,
        }
    }
}

impl KDocRequirements {
    /// Requirements with every check disabled, including the description.
    #[must_use]
    pub fn none() -> Self {
        Self {
            description: false,
            ..Self::default()
        }
    }

    /// Toggles description verification.
    #[must_use]
    pub fn verify_description(mut self, enabled: bool) -> Self {
        self.description = enabled;
        self
    }

    /// Toggles `@param` verification.
    #[must_use]
    pub fn verify_param_tag(mut self, enabled: bool) -> Self {
        self.param_tag = enabled;
        self
    }

    /// Toggles `@return` verification.
    #[must_use]
    pub fn verify_return_tag(mut self, enabled: bool) -> Self {
        self.return_tag = enabled;
        self
    }

    /// Toggles `@constructor` verification.
    #[must_use]
    pub fn verify_constructor_tag(mut self, enabled: bool) -> Self {
        self.constructor_tag = enabled;
        self
    }

    /// Toggles `@receiver` verification.
    #[must_use]
    pub fn verify_receiver_tag(mut self, enabled: bool) -> Self {
        self.receiver_tag = enabled;
        self
    }

    /// Toggles `@property` verification.
    #[must_use]
    pub fn verify_property_tag(mut self, enabled: bool) -> Self {
        self.property_tag = enabled;
        self
    }

    /// Toggles `@throws` verification.
    #[must_use]
    pub fn verify_throws_tag(mut self, enabled: bool) -> Self {
        self.throws_tag = enabled;
        self
    }

    /// Toggles `@exception` verification.
    #[must_use]
    pub fn verify_exception_tag(mut self, enabled: bool) -> Self {
        self.exception_tag = enabled;
        self
    }

    /// Toggles `@sample` verification.
    #[must_use]
    pub fn verify_sample_tag(mut self, enabled: bool) -> Self {
        self.sample_tag = enabled;
        self
    }

    /// Toggles `@see` verification.
    #[must_use]
    pub fn verify_see_tag(mut self, enabled: bool) -> Self {
        self.see_tag = enabled;
        self
    }

    /// Toggles `@author` verification.
    #[must_use]
    pub fn verify_author_tag(mut self, enabled: bool) -> Self {
        self.author_tag = enabled;
        self
    }

    /// Toggles `@since` verification.
    #[must_use]
    pub fn verify_since_tag(mut self, enabled: bool) -> Self {
        self.since_tag = enabled;
        self
    }

    /// Toggles `@suppress` verification.
    #[must_use]
    pub fn verify_suppress_tag(mut self, enabled: bool) -> Self {
        self.suppress_tag = enabled;
        self
    }

    /// Toggles `@version` verification.
    #[must_use]
    pub fn verify_version_tag(mut self, enabled: bool) -> Self {
        self.version_tag = enabled;
        self
    }

    /// Toggles `@propertySetter` verification.
    #[must_use]
    pub fn verify_property_setter_tag(mut self, enabled: bool) -> Self {
        self.property_setter_tag = enabled;
        self
    }

    /// Toggles `@propertyGetter` verification.
    #[must_use]
    pub fn verify_property_getter_tag(mut self, enabled: bool) -> Self {
        self.property_getter_tag = enabled;
        self
    }
}
