use bevy::prelude::*;

use crate::features::text_reveal::{BuildMethod, RevealHandle};

/// Request sent to a `DialogueText` entity.
#[derive(Event, Debug, Clone)]
pub struct DialogueCommand {
    /// The dialogue root to act on.
    pub entity: Entity,
    pub kind: DialogueCommandKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogueCommandKind {
    /// Replace the text and reveal it from scratch.
    Build(String),
    /// Reveal more text after what is already shown.
    Append(String),
    Stop,
    ForceComplete,
    HurryUp(bool),
    SetMethod(BuildMethod),
    SetSpeed(f32),
}

impl DialogueCommand {
    pub fn build(entity: Entity, text: impl Into<String>) -> Self {
        Self {
            entity,
            kind: DialogueCommandKind::Build(text.into()),
        }
    }

    pub fn append(entity: Entity, text: impl Into<String>) -> Self {
        Self {
            entity,
            kind: DialogueCommandKind::Append(text.into()),
        }
    }

    pub fn new(entity: Entity, kind: DialogueCommandKind) -> Self {
        Self { entity, kind }
    }
}

/// Event emitted when a reveal reaches its fully visible state.
#[derive(Event, Debug, Clone)]
pub struct RevealFinishedEvent {
    /// The dialogue root that finished.
    pub entity: Entity,
    pub handle: RevealHandle,
    pub method: BuildMethod,
    /// True if the reveal was force-completed rather than running out.
    pub forced: bool,
}
