//! Post kinds and the per-kind rule table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which acceptance rules apply to a post of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRules {
    /// A reachable `source_reference` is mandatory.
    pub requires_source: bool,
    /// `scheduled_at` must be after the configured cutoff.
    pub requires_future_date: bool,
}

impl KindRules {
    const NONE: Self = Self {
        requires_source: false,
        requires_future_date: false,
    };
}

/// The kind of content a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostKind {
    Article,
    Event,
    Scientific,
    Route,
    Quote,
}

impl PostKind {
    pub const ALL: [PostKind; 5] = [
        PostKind::Article,
        PostKind::Event,
        PostKind::Scientific,
        PostKind::Route,
        PostKind::Quote,
    ];

    /// Rule table for this kind. Adding a kind means adding one arm here.
    pub const fn rules(self) -> KindRules {
        match self {
            PostKind::Event => KindRules {
                requires_source: false,
                requires_future_date: true,
            },
            PostKind::Scientific => KindRules {
                requires_source: true,
                requires_future_date: false,
            },
            PostKind::Article | PostKind::Route | PostKind::Quote => KindRules::NONE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PostKind::Article => "ARTICLE",
            PostKind::Event => "EVENT",
            PostKind::Scientific => "SCIENTIFIC",
            PostKind::Route => "ROUTE",
            PostKind::Quote => "QUOTE",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown post kind: {0}")]
pub struct UnknownPostKind(pub String);

impl FromStr for PostKind {
    type Err = UnknownPostKind;

    /// Case-insensitive, so `event` and `EVENT` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPostKind(s.to_string()))
    }
}

/// Difficulty of a recommended route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteDifficulty {
    Easy,
    Medium,
    Hard,
}

impl RouteDifficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteDifficulty::Easy => "EASY",
            RouteDifficulty::Medium => "MEDIUM",
            RouteDifficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for RouteDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for RouteDifficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(RouteDifficulty::Easy),
            "MEDIUM" => Ok(RouteDifficulty::Medium),
            "HARD" => Ok(RouteDifficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}
