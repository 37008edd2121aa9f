//! Building a validated `GenreSelection` from raw user-supplied names.
//!
//! The presentation shell hands over whatever strings the user picked;
//! everything is resolved against the catalog schema here, before any
//! matching work starts.

use crate::error::{MatchError, Result};
use crate::types::GenreSelection;
use catalog::GenreSchema;
use std::collections::BTreeSet;

/// Build a selection from raw genre names against the catalog schema.
///
/// Names match case/whitespace-insensitively and duplicates collapse.
/// Rejects an empty selection and any name outside the enumeration.
pub fn build_selection<I, S>(schema: &GenreSchema, names: I) -> Result<GenreSelection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids = BTreeSet::new();
    for name in names {
        let name = name.as_ref();
        let id = schema.id_of(name).ok_or_else(|| MatchError::UnknownGenre {
            name: name.to_string(),
        })?;
        ids.insert(id);
    }

    if ids.is_empty() {
        return Err(MatchError::EmptySelection);
    }

    Ok(GenreSelection::from_ids(ids))
}
