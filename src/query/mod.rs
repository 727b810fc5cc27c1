//! Lookup-query parsing and windowed search-filter construction
//!
//! Turns the raw `kind:value` CLI token into a typed [`LookupQuery`] and
//! pairs it with the fixed one-day lookback [`TimeWindow`] every search
//! runs over.

pub mod window;

pub use window::TimeWindow;

use crate::inventory::SearchRequest;
use crate::{EntlookError, Result};

/// Entity kinds the platform inventory tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Machine,
    Image,
}

impl EntityKind {
    /// CLI keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Machine => "machine",
            EntityKind::Image => "image",
        }
    }

    /// Platform search field for this kind. `None` for kinds that are
    /// accepted on the command line but have no search implementation.
    pub fn search_field(self) -> Option<&'static str> {
        match self {
            EntityKind::User => Some("username"),
            EntityKind::Machine => Some("mid"),
            EntityKind::Image => None,
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = EntlookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(EntityKind::User),
            "machine" => Ok(EntityKind::Machine),
            "image" => Ok(EntityKind::Image),
            other => Err(EntlookError::InvalidQuery(format!(
                "unsupported entity kind '{}'; try one of user, machine, image",
                other
            ))),
        }
    }
}

/// One parsed lookup request: what kind of entity, and which value to
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub kind: EntityKind,
    pub value: String,
}

impl LookupQuery {
    /// Parse a raw `kind:value` token.
    ///
    /// Exactly two non-empty colon-delimited parts are required; anything
    /// else is an input error and never reaches the search path.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(EntlookError::InvalidQuery(format!(
                "expected a single <kind>:<value> argument, got '{}'",
                raw
            )));
        }

        Ok(Self {
            kind: parts[0].parse()?,
            value: parts[1].to_string(),
        })
    }

    /// Equality search request for this query over the given window.
    ///
    /// `None` when the kind has no search field.
    pub fn search_request(&self, window: &TimeWindow) -> Option<SearchRequest> {
        self.kind
            .search_field()
            .map(|field| SearchRequest::equals(field, &self.value, window))
    }
}
