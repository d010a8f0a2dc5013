//! Built-in starting layouts
//!
//! Tables are `(col, row)` pairs. The host half sits on the bottom rows, the
//! opponent half on the top rows.

use serde::{Deserialize, Serialize};
use std::fmt;

type Cells = &'static [(i8, i8)];

const STANDARD_OPPONENT: Cells = &[
    (5, 9), (6, 9), (7, 9), (4, 8), (5, 8), (6, 8), (8, 9),
    (7, 8), (8, 8), (9, 8), (5, 7), (6, 7), (7, 7), (9, 9),
];

const STANDARD_HOST: Cells = &[
    (1, 2), (2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (1, 1),
    (2, 1), (3, 1), (4, 1), (5, 1), (3, 3), (4, 3), (5, 3),
];

const BELGIAN_DAISY_OPPONENT: Cells = &[
    (5, 9), (6, 9), (8, 9), (9, 9), (4, 8), (5, 8), (6, 8),
    (7, 8), (8, 8), (9, 8), (4, 7), (5, 7), (7, 7), (8, 7),
];

const BELGIAN_DAISY_HOST: Cells = &[
    (2, 3), (3, 3), (5, 3), (6, 3), (1, 2), (2, 2), (3, 2),
    (4, 2), (5, 2), (6, 2), (1, 1), (2, 1), (4, 1), (5, 1),
];

const GERMAN_DAISY_OPPONENT: Cells = &[
    (4, 8), (5, 8), (3, 7), (4, 7), (5, 7), (3, 6), (4, 6),
    (8, 8), (9, 8), (7, 7), (8, 7), (9, 7), (7, 6), (8, 6),
];

const GERMAN_DAISY_HOST: Cells = &[
    (2, 4), (3, 4), (1, 3), (2, 3), (3, 3), (1, 2), (2, 2),
    (6, 4), (7, 4), (5, 3), (6, 3), (7, 3), (5, 2), (6, 2),
];

/// Named starting position. Unknown names resolve to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    #[default]
    Standard,
    BelgianDaisy,
    GermanDaisy,
    Empty,
}

impl Layout {
    pub const BUILT_IN: [Layout; 3] = [Layout::Standard, Layout::BelgianDaisy, Layout::GermanDaisy];

    /// Case-insensitive match on the display name
    pub fn from_name(name: &str) -> Layout {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Layout::Standard,
            "belgian daisy" => Layout::BelgianDaisy,
            "german daisy" => Layout::GermanDaisy,
            _ => Layout::Empty,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Standard => "Standard",
            Layout::BelgianDaisy => "Belgian Daisy",
            Layout::GermanDaisy => "German Daisy",
            Layout::Empty => "Empty",
        }
    }

    /// `(host, opponent)` coordinate tables
    pub(crate) fn cells(self) -> (Cells, Cells) {
        match self {
            Layout::Standard => (STANDARD_HOST, STANDARD_OPPONENT),
            Layout::BelgianDaisy => (BELGIAN_DAISY_HOST, BELGIAN_DAISY_OPPONENT),
            Layout::GermanDaisy => (GERMAN_DAISY_HOST, GERMAN_DAISY_OPPONENT),
            Layout::Empty => (&[], &[]),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Layout {
    fn from(name: String) -> Self {
        Layout::from_name(&name)
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.name().to_string()
    }
}
