use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label shared by every "pick your own" option.
pub const CUSTOM_LABEL: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryFormat {
    #[default]
    Paragraph,
    BulletPoints,
}

impl SummaryFormat {
    pub const ALL: [SummaryFormat; 2] = [SummaryFormat::Paragraph, SummaryFormat::BulletPoints];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SummaryFormat::Paragraph => "Paragraph",
            SummaryFormat::BulletPoints => "Bullet points",
        }
    }

    #[must_use]
    pub fn instruction(self) -> &'static str {
        match self {
            SummaryFormat::Paragraph => "Write a single cohesive paragraph.",
            SummaryFormat::BulletPoints => "Write concise bullet points, one idea per line.",
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paragraph" => Ok(SummaryFormat::Paragraph),
            "bullet points" | "bullet-points" | "bullets" | "bulletpoints" => {
                Ok(SummaryFormat::BulletPoints)
            }
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Declares a label-backed option enum whose last variant is the `Custom` sentinel.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])* $name:ident {
            default = $default:ident => $default_label:literal,
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            $default,
            $($variant,)+
            Custom,
        }

        impl $name {
            pub const ALL: &'static [$name] =
                &[$name::$default, $($name::$variant,)+ $name::Custom];

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $name::$default => $default_label,
                    $($name::$variant => $label,)+
                    $name::Custom => CUSTOM_LABEL,
                }
            }

            #[must_use]
            pub fn is_custom(self) -> bool {
                matches!(self, $name::Custom)
            }

            /// Labels in display order, `Custom` last.
            #[must_use]
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|c| c.label()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {}: {}", stringify!($name).to_lowercase(), wanted))
            }
        }
    };
}

choice_enum!(
    /// Style directive inserted into the prompt.
    Tone {
        default = Formal => "Formal",
        Friendly => "Friendly",
        Casual => "Casual",
        Professional => "Professional",
        Diplomatic => "Diplomatic",
        Confident => "Confident",
    }
);

choice_enum!(
    /// Language the summary is written in.
    Language {
        default = English => "English",
        Spanish => "Spanish",
        French => "French",
        German => "German",
        Portuguese => "Portuguese",
        Italian => "Italian",
        Hindi => "Hindi",
        Chinese => "Chinese",
        Japanese => "Japanese",
        Arabic => "Arabic",
    }
);

/// Everything the user picked besides the text itself.
///
/// `language` is `None` when the deployment runs without the language option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    pub format: SummaryFormat,
    pub tone: Tone,
    pub custom_tone: String,
    pub language: Option<Language>,
    pub custom_language: String,
}

impl SummaryOptions {
    /// Tone as it appears in the prompt.
    #[must_use]
    pub fn effective_tone(&self) -> &str {
        resolve_choice(self.tone.is_custom(), self.tone.label(), &self.custom_tone)
    }

    /// Language as it appears in the prompt, if the option is enabled.
    #[must_use]
    pub fn effective_language(&self) -> Option<&str> {
        self.language
            .map(|lang| resolve_choice(lang.is_custom(), lang.label(), &self.custom_language))
    }
}

fn resolve_choice<'a>(is_custom: bool, label: &'a str, custom: &'a str) -> &'a str {
    let custom = custom.trim();
    if is_custom && !custom.is_empty() {
        custom
    } else {
        label
    }
}
