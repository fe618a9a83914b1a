//! Fixed value sets
//!
//! Every enumerated field in the planner (category, stage, payment method,
//! statuses, priority) is a closed set of Indonesian labels. The labels are
//! the wire format, so each set is generated as a plain enum whose serde
//! representation is the label itself.

use thiserror::Error;

/// A string that is not one of the labels of a fixed value set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Nilai {field} tidak valid: {value}")]
pub struct ChoiceParseError {
    /// Localized name of the field being parsed
    pub field: &'static str,
    /// The rejected input
    pub value: String,
}

/// Generate an enum over a fixed list of labels
///
/// Declaration order is the presentation order, and the derived `Ord`
/// follows it.
macro_rules! fixed_choice {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every value, in presentation order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label stored in documents and shown to the user
            pub const fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// The first value, used as the form default
            pub fn first() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::choice::ChoiceParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label() == wanted)
                    .or_else(|| {
                        Self::ALL
                            .iter()
                            .copied()
                            .find(|c| c.label().eq_ignore_ascii_case(wanted))
                    })
                    .ok_or_else(|| $crate::models::choice::ChoiceParseError {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use fixed_choice;
