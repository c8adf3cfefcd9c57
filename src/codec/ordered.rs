//! Position-ordered list rebuilding
//!
//! Wiki.js returns ordered collections in storage order. Local models keep
//! them dense and indexed by position, with default placeholders in gaps.

use crate::config::api::MAX_POSITION_GAP;
use crate::error::{Result, WikiError};

/// A record that carries its own zero-based position
pub trait Positioned {
    fn position(&self) -> Result<usize>;
}

fn position_error(position: impl std::fmt::Display, message: &str) -> WikiError {
    WikiError::Decode {
        key: "order".to_string(),
        message: format!("position {} {}", position, message),
    }
}

/// Put `record` into slot `position`, growing the list with defaults if needed
///
/// A later record for the same slot replaces the earlier one. A position more
/// than `MAX_POSITION_GAP` slots past the end of the list is a decode error.
pub fn place_at<T: Default>(list: &mut Vec<T>, position: usize, record: T) -> Result<()> {
    if position.saturating_sub(list.len()) > MAX_POSITION_GAP {
        return Err(position_error(
            position,
            &format!("leaves more than {} empty slots", MAX_POSITION_GAP),
        ));
    }
    if list.len() <= position {
        let missing = position + 1 - list.len();
        list.extend(std::iter::repeat_with(T::default).take(missing));
    }
    list[position] = record;
    Ok(())
}

/// Clear `list` and rebuild it from `(position, record)` pairs
pub fn rebuild_ordered<T, I>(list: &mut Vec<T>, records: I) -> Result<()>
where
    T: Default,
    I: IntoIterator<Item = (usize, T)>,
{
    list.clear();
    for (position, record) in records {
        place_at(list, position, record)?;
    }
    Ok(())
}

/// Clear `list` and rebuild it with each record at its arrival index
pub fn rebuild_by_index<T, I>(list: &mut Vec<T>, records: I)
where
    I: IntoIterator<Item = T>,
{
    list.clear();
    list.extend(records);
}

/// Convert a wire position into a slot index; negative positions clamp to 0
pub(crate) fn slot(position: i64) -> Result<usize> {
    if position < 0 {
        return Ok(0);
    }
    usize::try_from(position).map_err(|_| position_error(position, "does not fit in memory"))
}
