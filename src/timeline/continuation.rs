use crate::foundation::core::{AnimationId, SegmentHandle};

/// One-shot completion continuation for a fill animation.
///
/// A continuation is neither `Clone` nor `Copy`: whoever holds it can release it once, by
/// value. The timeline keeps the live one in an `Option` and `take`s it when a matching
/// natural completion arrives, so duplicate completions (for example from several
/// re-attached snapshots of the same animation) find nothing left to fire.
#[derive(Debug, PartialEq, Eq)]
pub struct Continuation {
    id: AnimationId,
    segment: SegmentHandle,
}

impl Continuation {
    pub(crate) fn new(id: AnimationId, segment: SegmentHandle) -> Self {
        Self { id, segment }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn segment(&self) -> SegmentHandle {
        self.segment
    }

    pub fn matches(&self, id: AnimationId) -> bool {
        self.id == id
    }
}

/// Take the continuation out of `slot` if it belongs to animation `id`.
pub(crate) fn take_matching(slot: &mut Option<Continuation>, id: AnimationId) -> Option<Continuation> {
    if slot.as_ref().is_some_and(|c| c.matches(id)) {
        slot.take()
    } else {
        None
    }
}
