//! Player interactions and the actions they resolve to.

use serde::{Deserialize, Serialize};

use crate::domain::state::{BuildId, CardSource, PlayerId, StackId};
use crate::domain::Card;

/// The card a player is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggedItem {
    pub card: Card,
    pub source: CardSource,
    pub player: PlayerId,
}

impl DraggedItem {
    pub fn from_hand(card: Card, player: PlayerId) -> Self {
        Self {
            card,
            source: CardSource::Hand,
            player,
        }
    }

    pub fn from_table(card: Card, player: PlayerId) -> Self {
        Self {
            card,
            source: CardSource::Table,
            player,
        }
    }

    pub fn from_captures(card: Card, player: PlayerId) -> Self {
        Self {
            card,
            source: CardSource::Captured,
            player,
        }
    }
}

/// Where the card was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetInfo {
    Loose {
        card: Card,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },
    Build {
        build_id: BuildId,
    },
    TemporaryStack {
        stack_id: StackId,
    },
    /// Empty table area.
    Table,
}

impl TargetInfo {
    pub fn loose(card: Card) -> Self {
        TargetInfo::Loose { card, index: None }
    }
}

/// What a capture takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureTarget {
    Loose { card: Card },
    Build { build_id: BuildId },
}

/// How a staging stack is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "as", rename_all = "snake_case")]
pub enum StackResolution {
    /// Leave the cards on the table as an owned build.
    Build,
    /// Take the cards with `card` from the player's hand.
    Capture { card: Card },
}

/// Closed set of game actions. Each variant carries everything needed to
/// apply it; nothing is re-derived from the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "capture")]
    Capture {
        card: Card,
        source: CardSource,
        target: CaptureTarget,
        value: u8,
    },
    #[serde(rename = "build.create")]
    BuildCreate {
        card: Card,
        target_card: Card,
        value: u8,
    },
    #[serde(rename = "build.extend")]
    BuildExtend {
        card: Card,
        build_id: BuildId,
        new_value: u8,
    },
    #[serde(rename = "build.augment")]
    BuildAugment {
        card: Card,
        build_id: BuildId,
        value: u8,
    },
    #[serde(rename = "createStagingStack")]
    CreateStagingStack {
        card: Card,
        source: CardSource,
        target_card: Card,
    },
    #[serde(rename = "addToStagingStack")]
    AddToStagingStack {
        card: Card,
        source: CardSource,
        stack_id: StackId,
    },
    #[serde(rename = "finalizeStagingStack")]
    FinalizeStagingStack {
        stack_id: StackId,
        build_value: u8,
        resolution: StackResolution,
    },
    #[serde(rename = "cancelStagingStack")]
    CancelStagingStack { stack_id: StackId },
    #[serde(rename = "trail")]
    Trail { card: Card },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Capture,
    BuildCreate,
    BuildExtend,
    BuildAugment,
    CreateStagingStack,
    AddToStagingStack,
    FinalizeStagingStack,
    CancelStagingStack,
    Trail,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Capture => "capture",
            ActionKind::BuildCreate => "build.create",
            ActionKind::BuildExtend => "build.extend",
            ActionKind::BuildAugment => "build.augment",
            ActionKind::CreateStagingStack => "createStagingStack",
            ActionKind::AddToStagingStack => "addToStagingStack",
            ActionKind::FinalizeStagingStack => "finalizeStagingStack",
            ActionKind::CancelStagingStack => "cancelStagingStack",
            ActionKind::Trail => "trail",
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Capture { .. } => ActionKind::Capture,
            Action::BuildCreate { .. } => ActionKind::BuildCreate,
            Action::BuildExtend { .. } => ActionKind::BuildExtend,
            Action::BuildAugment { .. } => ActionKind::BuildAugment,
            Action::CreateStagingStack { .. } => ActionKind::CreateStagingStack,
            Action::AddToStagingStack { .. } => ActionKind::AddToStagingStack,
            Action::FinalizeStagingStack { .. } => ActionKind::FinalizeStagingStack,
            Action::CancelStagingStack { .. } => ActionKind::CancelStagingStack,
            Action::Trail { .. } => ActionKind::Trail,
        }
    }

    /// Whether applying this action hands the turn to the opponent.
    pub fn ends_turn(&self) -> bool {
        !matches!(
            self,
            Action::CreateStagingStack { .. }
                | Action::AddToStagingStack { .. }
                | Action::CancelStagingStack { .. }
        )
    }
}
