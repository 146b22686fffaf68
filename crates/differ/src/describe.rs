//! Human-readable rendering of a change list

use differ_core::{Change, DiffResult};

/// Render changes as a header line followed by one `name: old -> new` line each
pub fn to_friendly_description<'a, I>(changes: I, subject_type_name: &str) -> String
where
    I: IntoIterator<Item = &'a Change>,
{
    let mut out = format!("{} had the following values changed:\n", subject_type_name);
    for change in changes {
        out.push_str(&change.to_string());
        out.push('\n');
    }
    out
}

/// Friendly description of a diff, headed by the subject type name
pub trait FriendlyDescription {
    fn to_friendly_description(&self) -> String;
}

impl FriendlyDescription for DiffResult {
    fn to_friendly_description(&self) -> String {
        to_friendly_description(self, self.subject)
    }
}
