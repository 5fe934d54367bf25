pub const PLAYERS: usize = 2;
pub const DECK_SIZE: usize = 40;
pub const DEFAULT_HAND_SIZE: u8 = 10;

/// Largest value a build (or a capturing card) can have.
pub const MAX_BUILD_VALUE: u8 = 10;

/// Minimum number of cards in any build.
pub const MIN_BUILD_CARDS: usize = 2;

/// Rule priorities; higher fires first.
pub mod priority {
    pub const SAME_VALUE_AUTO_CAPTURE: u16 = 210;
    pub const LOOSE_CARD_STRATEGIC_OPTIONS: u16 = 205;
    pub const SINGLE_CARD_CAPTURE: u16 = 200;
    pub const TEMP_STACK_ADDITION: u16 = 100;
    pub const UNIVERSAL_STAGING_CREATION: u16 = 95;
    pub const CAPTURED_CARD_CAPTURE: u16 = 50;
    pub const BUILD_CAPTURE: u16 = 45;
    pub const TEMP_STACK_CAPTURE: u16 = 40;
    pub const OWN_BUILD_AUGMENTATION: u16 = 40;
    pub const CREATE_OWN_BUILD: u16 = 35;
    pub const EXTEND_OWN_BUILD: u16 = 30;
    pub const EXTEND_OPPONENT_BUILD: u16 = 25;
    pub const TRAIL: u16 = 10;
}

/// Number of rounds needed to deal the whole deck at `hand_size` cards per player.
///
/// Returns `None` when the deck does not divide into whole rounds.
pub fn rounds_for_hand_size(hand_size: u8) -> Option<u8> {
    let per_round = hand_size as usize * PLAYERS;
    if per_round == 0 || DECK_SIZE % per_round != 0 {
        return None;
    }
    u8::try_from(DECK_SIZE / per_round).ok()
}
