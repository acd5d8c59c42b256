//! PronounDB's pronoun vocabulary
//!
//! The lookup API answers with short codes (`"hh"`, `"tt"`, ...). The set is
//! fixed by the API version, so anything outside it is an error rather than
//! something to paper over with a default.

use crate::error::{PronounDbError, Result};

/// Pronoun codes returned by PronounDB's v1 lookup API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PronounCode {
    Unspecified,
    HeHim,
    HeIt,
    HeShe,
    HeThey,
    ItHim,
    ItIts,
    ItShe,
    ItThey,
    SheHe,
    SheHer,
    SheIt,
    SheThey,
    TheyHe,
    TheyIt,
    TheyShe,
    TheyThem,
    Any,
    Other,
    Ask,
    Avoid,
}

impl PronounCode {
    pub const ALL: [PronounCode; 21] = [
        Self::Unspecified,
        Self::HeHim,
        Self::HeIt,
        Self::HeShe,
        Self::HeThey,
        Self::ItHim,
        Self::ItIts,
        Self::ItShe,
        Self::ItThey,
        Self::SheHe,
        Self::SheHer,
        Self::SheIt,
        Self::SheThey,
        Self::TheyHe,
        Self::TheyIt,
        Self::TheyShe,
        Self::TheyThem,
        Self::Any,
        Self::Other,
        Self::Ask,
        Self::Avoid,
    ];

    /// Parse a code exactly as PronounDB sends it
    pub fn from_code(code: &str) -> Result<Self> {
        let parsed = match code {
            "unspecified" => Self::Unspecified,
            "hh" => Self::HeHim,
            "hi" => Self::HeIt,
            "hs" => Self::HeShe,
            "ht" => Self::HeThey,
            "ih" => Self::ItHim,
            "ii" => Self::ItIts,
            "is" => Self::ItShe,
            "it" => Self::ItThey,
            "shh" => Self::SheHe,
            "sh" => Self::SheHer,
            "si" => Self::SheIt,
            "st" => Self::SheThey,
            "th" => Self::TheyHe,
            "ti" => Self::TheyIt,
            "ts" => Self::TheyShe,
            "tt" => Self::TheyThem,
            "any" => Self::Any,
            "other" => Self::Other,
            "ask" => Self::Ask,
            "avoid" => Self::Avoid,
            _ => return Err(PronounDbError::unknown_code(code)),
        };
        Ok(parsed)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::HeHim => "hh",
            Self::HeIt => "hi",
            Self::HeShe => "hs",
            Self::HeThey => "ht",
            Self::ItHim => "ih",
            Self::ItIts => "ii",
            Self::ItShe => "is",
            Self::ItThey => "it",
            Self::SheHe => "shh",
            Self::SheHer => "sh",
            Self::SheIt => "si",
            Self::SheThey => "st",
            Self::TheyHe => "th",
            Self::TheyIt => "ti",
            Self::TheyShe => "ts",
            Self::TheyThem => "tt",
            Self::Any => "any",
            Self::Other => "other",
            Self::Ask => "ask",
            Self::Avoid => "avoid",
        }
    }

    /// Capitalized display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::HeHim => "He/Him",
            Self::HeIt => "He/It",
            Self::HeShe => "He/She",
            Self::HeThey => "He/They",
            Self::ItHim => "It/Him",
            Self::ItIts => "It/Its",
            Self::ItShe => "It/She",
            Self::ItThey => "It/They",
            Self::SheHe => "She/He",
            Self::SheHer => "She/Her",
            Self::SheIt => "She/It",
            Self::SheThey => "She/They",
            Self::TheyHe => "They/He",
            Self::TheyIt => "They/It",
            Self::TheyShe => "They/She",
            Self::TheyThem => "They/Them",
            Self::Any => "Any Pronouns",
            Self::Other => "Other Pronouns",
            Self::Ask => "Ask Me My Pronouns",
            Self::Avoid => "Avoid Pronouns, Use My Name",
        }
    }
}

/// Map a PronounDB code straight to its display label
pub fn lookup(code: &str) -> Result<&'static str> {
    PronounCode::from_code(code).map(PronounCode::label)
}
