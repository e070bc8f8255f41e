//! Element addressing

use std::fmt;

/// How an accessible name or visible text is matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextMatch {
    /// Case-sensitive, whole-string match.
    Exact(String),
    /// Case-insensitive substring match.
    Substring(String),
    /// Regular expression source; inline flags such as `(?i)` are allowed.
    Pattern(String),
}

/// Lazy description of one or more elements on the page.
///
/// Nothing is resolved until a [`super::UiHandle`] acts on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// ARIA role plus accessible name (`link`, `button`, `textbox`, `heading`).
    Role { role: String, name: TextMatch },
    /// Any element whose text matches.
    Text(TextMatch),
    Css(String),
    XPath(String),
    /// The zero-based `n`th element matched by the inner selector.
    Nth(Box<Selector>, usize),
    /// Each selector is resolved relative to the previous one.
    Chain(Vec<Selector>),
}

impl Selector {
    pub fn role(role: impl Into<String>, name: TextMatch) -> Self {
        Self::Role { role: role.into(), name }
    }

    pub fn css(css: impl Into<String>) -> Self {
        Self::Css(css.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Self::XPath(path.into())
    }

    pub fn text(text: TextMatch) -> Self {
        Self::Text(text)
    }

    /// Narrow to the `index`th match.
    pub fn nth(self, index: usize) -> Self {
        Self::Nth(Box::new(self), index)
    }

    /// Resolve `child` relative to `self`, flattening nested chains.
    pub fn then(self, child: Selector) -> Self {
        let mut parts = match self {
            Self::Chain(parts) => parts,
            other => vec![other],
        };
        match child {
            Self::Chain(mut rest) => parts.append(&mut rest),
            other => parts.push(other),
        }
        Self::Chain(parts)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(text) => write!(f, "\"{text}\""),
            Self::Substring(text) => write!(f, "\"{text}\"i"),
            Self::Pattern(pattern) => write!(f, "/{pattern}/"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role { role, name } => write!(f, "role={role}[name={name}]"),
            Self::Text(text) => write!(f, "text={text}"),
            Self::Css(css) => write!(f, "css={css}"),
            Self::XPath(path) => write!(f, "xpath={path}"),
            Self::Nth(inner, index) => write!(f, "{inner} >> nth={index}"),
            Self::Chain(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" >> ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}
