use std::fmt;

use crate::diff::DiffKind;
use crate::snapshot::ItemSnapshot;

/// A notification-worthy change to a watched schedule item.
#[derive(Debug, Clone)]
pub struct ItemDiff {
    pub kind: DiffKind,
    /// The first watched field found to differ (updates only).
    pub field: Option<String>,
}

impl fmt::Display for ItemDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({field})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl ItemDiff {
    /// Decide whether a document write is notification-worthy.
    ///
    /// Creation and deletion always are. Otherwise the watched fields are
    /// compared in order; a field missing on either side is ignored, and
    /// the first differing field decides. Returns `None` when nothing
    /// watched changed.
    pub fn detect(
        watched: &[&str],
        before: Option<&ItemSnapshot>,
        after: Option<&ItemSnapshot>,
    ) -> Option<ItemDiff> {
        match (before, after) {
            (None, None) => None,
            (None, Some(_)) => Some(ItemDiff {
                kind: DiffKind::Create,
                field: None,
            }),
            (Some(_), None) => Some(ItemDiff {
                kind: DiffKind::Delete,
                field: None,
            }),
            (Some(old), Some(new)) => {
                for name in watched {
                    let (Some(old_value), Some(new_value)) = (old.field(name), new.field(name))
                    else {
                        continue;
                    };
                    if !old_value.same_value(new_value) {
                        return Some(ItemDiff {
                            kind: DiffKind::Update,
                            field: Some((*name).to_string()),
                        });
                    }
                }
                None
            }
        }
    }
}
