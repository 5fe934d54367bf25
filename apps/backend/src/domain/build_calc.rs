//! Build segmentation: classify card sequences and track staging progress.
//!
//! Sequences are lists of card values in placement order, each tagged with the
//! source the card came from. Two views exist:
//!
//! - `detect_build_type` answers "what single build does this sequence form
//!   right now", with base > sum > segmented precedence.
//! - `BuildCalculator` is the incremental state a staging stack carries while
//!   cards are added one by one.
//!
//! `candidate_build_values`/`validate_build_strict` are the exhaustive check
//! used when a stack is finalized.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_BUILD_VALUE, MIN_BUILD_CARDS};
use crate::domain::state::CardSource;
use crate::errors::domain::{DomainError, ValidationKind};

/// How a build's value is justified by its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    /// One card equals the sum of all the others.
    Base,
    /// All cards add up to the value (at most 10).
    Sum,
    /// Every card has the same value.
    SameValue,
    /// Consecutive segments each add up to the value.
    Segmented,
}

/// One card in a sequence: its value and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedValue {
    pub value: u8,
    pub source: CardSource,
}

impl PlacedValue {
    pub const fn new(value: u8, source: CardSource) -> Self {
        Self { value, source }
    }

    pub const fn hand(value: u8) -> Self {
        Self::new(value, CardSource::Hand)
    }

    pub const fn table(value: u8) -> Self {
        Self::new(value, CardSource::Table)
    }
}

/// Result of classifying a whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildDetection {
    pub kind: BuildKind,
    pub value: u8,
    /// Number of complete segments the value splits the sequence into.
    pub segments: u8,
}

pub fn total(cards: &[PlacedValue]) -> u16 {
    cards.iter().map(|c| c.value as u16).sum()
}

/// A card pulled from a capture pile may only serve as the base when it is not
/// the first card; hand and table cards only when they are.
fn base_position_ok(index: usize, source: CardSource) -> bool {
    match source {
        CardSource::Captured => index != 0,
        CardSource::Hand | CardSource::Table => index == 0,
    }
}

fn is_base_at(cards: &[PlacedValue], index: usize, total: u16) -> bool {
    let v = cards[index].value as u16;
    v * 2 == total && base_position_ok(index, cards[index].source)
}

/// Index of the base card, if any. Larger values are considered first.
pub fn find_base_card(cards: &[PlacedValue]) -> Option<usize> {
    if cards.len() < MIN_BUILD_CARDS {
        return None;
    }
    let total = total(cards);
    let mut order: Vec<usize> = (0..cards.len()).collect();
    // Stable: ties keep placement order.
    order.sort_by(|a, b| cards[*b].value.cmp(&cards[*a].value));
    order.into_iter().find(|&i| is_base_at(cards, i, total))
}

/// Common value when every card matches.
pub fn same_value(cards: &[PlacedValue]) -> Option<u8> {
    let first = cards.first()?.value;
    if cards.len() >= MIN_BUILD_CARDS && cards.iter().all(|c| c.value == first) {
        Some(first)
    } else {
        None
    }
}

/// Number of consecutive segments summing to `target` that exactly cover
/// `cards`, or `None` when any segment overshoots or a remainder is left.
pub fn segment_count(cards: &[PlacedValue], target: u8) -> Option<u8> {
    if target == 0 || cards.is_empty() {
        return None;
    }
    match segment_progress(cards, target)? {
        (count, 0) => Some(count),
        _ => None,
    }
}

/// Greedy split of `cards` into segments of `target`: complete segments and
/// the sum of the trailing open one. `None` when a segment overshoots.
fn segment_progress(cards: &[PlacedValue], target: u8) -> Option<(u8, u8)> {
    let mut acc = 0u8;
    let mut count = 0u8;
    for c in cards {
        acc += c.value;
        if acc == target {
            count += 1;
            acc = 0;
        } else if acc > target {
            return None;
        }
    }
    Some((count, acc))
}

/// First prefix sum that partitions the rest of the sequence into further
/// segments of the same value.
fn first_segmented(cards: &[PlacedValue]) -> Option<(u8, u8)> {
    let mut prefix = 0u8;
    for end in 0..cards.len().saturating_sub(1) {
        prefix += cards[end].value;
        if prefix > MAX_BUILD_VALUE {
            return None;
        }
        if let Some(rest) = segment_count(&cards[end + 1..], prefix) {
            return Some((prefix, rest + 1));
        }
    }
    None
}

/// Classify a sequence as a build. Precedence: base, then sum (total at most
/// 10), then segmented. A build whose cards all share its value reports
/// `SameValue`.
pub fn detect_build_type(cards: &[PlacedValue]) -> Option<BuildDetection> {
    if cards.len() < MIN_BUILD_CARDS {
        return None;
    }
    let total = total(cards);

    let detection = if let Some(i) = find_base_card(cards) {
        BuildDetection {
            kind: BuildKind::Base,
            value: cards[i].value,
            // The base card and the cards it balances.
            segments: 2,
        }
    } else if total <= MAX_BUILD_VALUE as u16 {
        BuildDetection {
            kind: BuildKind::Sum,
            value: total as u8,
            segments: 1,
        }
    } else {
        let (value, segments) = first_segmented(cards)?;
        BuildDetection {
            kind: BuildKind::Segmented,
            value,
            segments,
        }
    };

    if same_value(cards) == Some(detection.value) {
        return Some(BuildDetection {
            kind: BuildKind::SameValue,
            ..detection
        });
    }
    Some(detection)
}

/// Every build value the sequence could legally be finalized at, ascending.
pub fn candidate_build_values(cards: &[PlacedValue]) -> Vec<u8> {
    if cards.len() < MIN_BUILD_CARDS {
        return Vec::new();
    }
    (1..=MAX_BUILD_VALUE)
        .filter(|v| kind_for_value(cards, *v).is_some())
        .collect()
}

/// How the sequence justifies `value`, if it does.
pub fn kind_for_value(cards: &[PlacedValue], value: u8) -> Option<BuildKind> {
    if cards.len() < MIN_BUILD_CARDS || value == 0 || value > MAX_BUILD_VALUE {
        return None;
    }
    let total = total(cards);
    if same_value(cards) == Some(value) {
        return Some(BuildKind::SameValue);
    }
    if (0..cards.len()).any(|i| cards[i].value == value && is_base_at(cards, i, total)) {
        return Some(BuildKind::Base);
    }
    if total == value as u16 {
        return Some(BuildKind::Sum);
    }
    match segment_count(cards, value) {
        Some(n) if n >= 2 => Some(BuildKind::Segmented),
        _ => None,
    }
}

/// Exhaustive check used on finalize: `requested` must be reachable by some
/// valid interpretation of the sequence.
pub fn validate_build_strict(
    cards: &[PlacedValue],
    requested: u8,
) -> Result<BuildKind, DomainError> {
    if cards.len() < MIN_BUILD_CARDS {
        return Err(DomainError::validation(
            ValidationKind::InvalidBuild,
            format!("A build needs at least {MIN_BUILD_CARDS} cards"),
        ));
    }
    kind_for_value(cards, requested).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidBuild,
            format!(
                "Cards cannot form a build of {requested}; possible values: {:?}",
                candidate_build_values(cards)
            ),
        )
    })
}

/// Value shown to the player for an in-progress stack: a total, a deficit
/// (negative, cards still missing from the current segment) or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayValue {
    Value(i16),
    Invalid,
}

impl Serialize for DisplayValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DisplayValue::Value(v) => serializer.serialize_i16(*v),
            DisplayValue::Invalid => serializer.serialize_str("INVALID"),
        }
    }
}

impl<'de> Deserialize<'de> for DisplayValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i16),
            Str(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Num(v) => Ok(DisplayValue::Value(v)),
            Raw::Str(s) if s == "INVALID" => Ok(DisplayValue::Invalid),
            Raw::Str(s) => Err(serde::de::Error::custom(format!(
                "Invalid display value: {s}"
            ))),
        }
    }
}

/// Incremental build state carried by a staging stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCalculator {
    /// Committed build value, once one has been detected.
    pub build_value: Option<u8>,
    /// Sum of the current, incomplete segment.
    pub running_sum: u8,
    pub segment_count: u8,
    pub display_value: DisplayValue,
    pub is_valid: bool,
    pub is_building: bool,
    pub build_kind: Option<BuildKind>,
}

impl Default for BuildCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildCalculator {
    pub fn new() -> Self {
        Self {
            build_value: None,
            running_sum: 0,
            segment_count: 0,
            display_value: DisplayValue::Value(0),
            is_valid: true,
            is_building: true,
            build_kind: None,
        }
    }

    /// Replay a whole sequence card by card.
    pub fn from_cards(cards: &[PlacedValue]) -> Self {
        let mut calc = Self::new();
        for n in 1..=cards.len() {
            calc.push(&cards[..n]);
        }
        calc
    }

    /// True when the stack currently ends on a segment boundary.
    pub fn is_complete(&self) -> bool {
        self.is_valid && !self.is_building && self.build_value.is_some()
    }

    /// Account for the last card of `cards`, which holds the full sequence so far.
    ///
    /// Once invalid the calculator never changes again.
    pub fn push(&mut self, cards: &[PlacedValue]) {
        if !self.is_valid {
            return;
        }
        let Some(last) = cards.last() else {
            return;
        };
        let total = total(cards);

        if self.build_value.is_none() || total <= MAX_BUILD_VALUE as u16 {
            self.redetect(cards, total);
            return;
        }

        let Some(build) = self.build_value else {
            return;
        };
        // A base card in the middle commits a value the earlier cards do not
        // segment into; such a stack has to be classified afresh.
        let Some((segments, open)) = segment_progress(&cards[..cards.len() - 1], build) else {
            self.redetect(cards, total);
            return;
        };
        let running = open as u16 + last.value as u16;
        if running > build as u16 {
            self.is_valid = false;
            self.is_building = false;
            self.display_value = DisplayValue::Invalid;
            return;
        }
        if running == build as u16 {
            self.running_sum = 0;
            self.segment_count = segments.saturating_add(1);
            self.display_value = DisplayValue::Value(build as i16);
            self.is_building = false;
            self.build_kind = Some(if same_value(cards) == Some(build) {
                BuildKind::SameValue
            } else {
                BuildKind::Segmented
            });
        } else {
            self.running_sum = running as u8;
            self.segment_count = segments;
            self.display_value = DisplayValue::Value(running as i16 - build as i16);
            self.is_building = true;
        }
    }

    fn redetect(&mut self, cards: &[PlacedValue], total: u16) {
        match detect_build_type(cards) {
            Some(found) => self.commit(found),
            None => {
                self.build_value = None;
                self.build_kind = None;
                self.running_sum = 0;
                self.segment_count = 0;
                self.display_value = DisplayValue::Value(total as i16);
                self.is_building = true;
            }
        }
    }

    fn commit(&mut self, found: BuildDetection) {
        self.build_value = Some(found.value);
        self.running_sum = 0;
        self.segment_count = found.segments;
        self.display_value = DisplayValue::Value(found.value as i16);
        self.is_building = false;
        self.build_kind = Some(found.kind);
    }
}
