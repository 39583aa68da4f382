use std::fmt;

use toml::Table;

/// Target programming language of a code sample variant.
///
/// Serialization order is fixed: C# blocks always come before Python blocks
/// so identical inputs produce identical documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    CSharp,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::CSharp, Language::Python];

    pub fn from_name(name: &str) -> Option<Language> {
        match name {
            "csharp" => Some(Language::CSharp),
            "python" => Some(Language::Python),
            _ => None,
        }
    }

    /// Class name used to tag language specific markup
    pub fn as_class(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Leading html comment in toml format holding page or fragment attributes
    Attributes { table: Table },
    /// Literal markup passed through verbatim
    Text { text: String },
    /// `{{ name }}`
    Placeholder { name: String },
    /// `{% if flag %} .. {% else %} .. {% endif %}`
    If {
        flag: String,
        then: Vec<Token>,
        otherwise: Vec<Token>,
    },
    /// `{% include "fragment" %}` or `{% include "fragment" with family %}`
    Include {
        fragment: String,
        with_params: Option<String>,
    },
    /// `{% sample %} {% csharp %} .. {% python %} .. {% endsample %}`
    ///
    /// `qualified` is set when the sample names its own language set
    /// (`{% sample python %}`), marking an intentionally single language
    /// sample. Variant bodies only hold `Text` and `Placeholder` tokens.
    Sample {
        qualified: bool,
        variants: Vec<(Language, Vec<Token>)>,
    },
}
