use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventType {
    Click,
    Submit,
}

impl EventType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// One user interaction travelling through the attached handlers.
///
/// Handlers run in a fixed order. A handler that absorbs the event sets
/// `consumed`, and later page-wide handlers skip it.
#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: EventType,
    pub(crate) target: NodeId,
    pub(crate) consumed: bool,
}

impl EventState {
    pub(crate) fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            consumed: false,
        }
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }
}
