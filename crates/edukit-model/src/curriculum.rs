//! Curriculum enumerations
//!
//! Every enum here crosses the persistence boundary, so each one carries a
//! fixed upper-case wire name (`KS2`, `MATHEMATICS`, `READ_WRITE`, ...) used
//! by serde, `Display` and `FromStr` alike.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Failed to parse an enum from its wire name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Enum being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// All values in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name
            #[inline]
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_enum! {
    /// UK key stage
    pub enum KeyStage {
        /// Early Years Foundation Stage
        Eyfs => "EYFS",
        /// Years 1-2
        Ks1 => "KS1",
        /// Years 3-6
        Ks2 => "KS2",
        /// Years 7-9
        Ks3 => "KS3",
        /// Years 10-11 (GCSE)
        Ks4 => "KS4",
        /// Years 12-13 (sixth form)
        Ks5 => "KS5",
    }
}

wire_enum! {
    /// National Curriculum subject
    pub enum Subject {
        /// Mathematics
        Mathematics => "MATHEMATICS",
        /// English
        English => "ENGLISH",
        /// Science
        Science => "SCIENCE",
        /// History
        History => "HISTORY",
        /// Geography
        Geography => "GEOGRAPHY",
        /// Computing
        Computing => "COMPUTING",
        /// Art and design
        ArtAndDesign => "ART_AND_DESIGN",
        /// Design and technology
        DesignAndTechnology => "DESIGN_AND_TECHNOLOGY",
        /// Music
        Music => "MUSIC",
        /// Physical education
        PhysicalEducation => "PHYSICAL_EDUCATION",
        /// Modern foreign languages
        Languages => "LANGUAGES",
    }
}

wire_enum! {
    /// Pitch of a piece of content
    pub enum DifficultyLevel {
        /// Foundation
        Foundation => "FOUNDATION",
        /// Core
        Core => "CORE",
        /// Extended
        Extended => "EXTENDED",
        /// Advanced
        Advanced => "ADVANCED",
    }
}

wire_enum! {
    /// Pedagogical role of a piece of content
    pub enum ContentType {
        /// Explanation
        Explanation => "EXPLANATION",
        /// Exercise
        Exercise => "EXERCISE",
        /// Assessment
        Assessment => "ASSESSMENT",
        /// Worked example
        Example => "EXAMPLE",
        /// Resource
        Resource => "RESOURCE",
        /// Project
        Project => "PROJECT",
        /// Discussion prompt
        Discussion => "DISCUSSION",
    }
}

wire_enum! {
    /// Delivery format
    pub enum ContentFormat {
        /// Plain text
        Text => "TEXT",
        /// Image
        Image => "IMAGE",
        /// Video
        Video => "VIDEO",
        /// Audio
        Audio => "AUDIO",
        /// Interactive activity
        Interactive => "INTERACTIVE",
        /// Document
        Document => "DOCUMENT",
        /// Slide deck
        Presentation => "PRESENTATION",
    }
}

wire_enum! {
    /// Editorial status
    ///
    /// `Approved` and `Published` exist for the wider platform; the editor
    /// itself only ever moves content between `Draft` and `Review`.
    pub enum ContentStatus {
        /// Being written
        Draft => "DRAFT",
        /// Submitted for review
        Review => "REVIEW",
        /// Approved
        Approved => "APPROVED",
        /// Published
        Published => "PUBLISHED",
    }
}

wire_enum! {
    /// Learning style a content variant is written for
    pub enum LearningStyle {
        /// Visual
        Visual => "VISUAL",
        /// Auditory
        Auditory => "AUDITORY",
        /// Kinesthetic
        Kinesthetic => "KINESTHETIC",
        /// Reading and writing
        ReadWrite => "READ_WRITE",
    }
}

impl LearningStyle {
    /// Number of learning styles
    pub const COUNT: usize = 4;

    /// Position in canonical order
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            LearningStyle::Visual => 0,
            LearningStyle::Auditory => 1,
            LearningStyle::Kinesthetic => 2,
            LearningStyle::ReadWrite => 3,
        }
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Core
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Explanation
    }
}

impl Default for ContentFormat {
    fn default() -> Self {
        ContentFormat::Text
    }
}

impl Default for ContentStatus {
    fn default() -> Self {
        ContentStatus::Draft
    }
}
