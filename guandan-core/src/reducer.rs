//! The domain state reducer.
//!
//! [`Store`] owns the canonical [`MatchState`] plus the locally-derived
//! layer (the local hand, card selection, turn flags, transient errors).
//! It consumes decoded messages one at a time and evolves the state
//! atomically per message - callers never observe a partially-applied
//! event. The store assumes events were already gated for version
//! continuity; it never inspects versions beyond recording them.

use guandan_types::{
    Card, CardGroup, CardsDealtPayload, CardsPlayedPayload, DealStartedPayload, DealState,
    GameEvent, MatchCreatedPayload, MatchState, MatchStatus, Player, PlayerPassedPayload, Rank,
    Seat, SnapshotDeal, SnapshotState, TrickWonPayload, Version,
};
use serde_json::Value;
use thiserror::Error;

/// Why a local play or pass was rejected before reaching the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// It is not the local seat's turn.
    #[error("not your turn")]
    NotYourTurn,
    /// Nothing selected.
    #[error("no cards selected")]
    EmptySelection,
    /// The match is not in the playing state.
    #[error("game not in progress")]
    NotPlaying,
    /// A selected card is not (or not in sufficient copies) in the hand.
    #[error("you don't have this card: {0}")]
    MissingCard(Card),
}

/// An immutable view of the store published to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// The canonical match state.
    pub state: MatchState,
    /// The locally-owned seat.
    pub my_seat: Seat,
    /// The local hand.
    pub my_hand: Vec<Card>,
    /// The current card selection.
    pub selected: Vec<Card>,
    /// Whether it is the local seat's turn.
    pub is_my_turn: bool,
    /// Whether the local seat may act right now.
    pub can_play: bool,
    /// Transient error message for the UI, if any.
    pub error_message: Option<String>,
    /// Count of tolerated card-token decode anomalies (diagnostic).
    pub decode_anomalies: u64,
}

/// The single-owner state object behind the synchronization engine.
#[derive(Debug, Clone)]
pub struct Store {
    state: MatchState,
    my_seat: Seat,
    my_hand: Vec<Card>,
    selected: Vec<Card>,
    is_my_turn: bool,
    can_play: bool,
    error_message: Option<String>,
    decode_anomalies: u64,
}

impl Store {
    /// Create an empty store for the given locally-owned seat.
    pub fn new(my_seat: Seat) -> Self {
        Self {
            state: MatchState::default(),
            my_seat,
            my_hand: Vec::new(),
            selected: Vec::new(),
            is_my_turn: false,
            can_play: false,
            error_message: None,
            decode_anomalies: 0,
        }
    }

    /// The canonical match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The locally-owned seat.
    pub fn my_seat(&self) -> Seat {
        self.my_seat
    }

    /// The local hand.
    pub fn my_hand(&self) -> &[Card] {
        &self.my_hand
    }

    /// The current selection.
    pub fn selected(&self) -> &[Card] {
        &self.selected
    }

    /// Count of tolerated card-token decode anomalies.
    pub fn decode_anomalies(&self) -> u64 {
        self.decode_anomalies
    }

    /// Snapshot the store into a UI-facing view.
    pub fn view(&self) -> TableView {
        TableView {
            state: self.state.clone(),
            my_seat: self.my_seat,
            my_hand: self.my_hand.clone(),
            selected: self.selected.clone(),
            is_my_turn: self.is_my_turn,
            can_play: self.can_play,
            error_message: self.error_message.clone(),
            decode_anomalies: self.decode_anomalies,
        }
    }

    /// Replace all local state from an authoritative snapshot.
    ///
    /// Applied unconditionally and atomically; derived flags are recomputed
    /// and any pending validation-error UI state is cleared.
    pub fn apply_snapshot(&mut self, snapshot: &SnapshotState) {
        self.state.match_id = snapshot.match_id.clone();
        self.state.players = snapshot.players.clone();
        self.state.status = snapshot.status;
        self.state.version = snapshot.version;
        self.state.current_deal = snapshot.current_deal.as_ref().map(|d| self.decode_deal(d));

        self.my_hand = match &snapshot.current_deal {
            Some(deal) => match deal.player_hands.get(&self.my_seat) {
                Some(tokens) => self.decode_cards(tokens),
                None => Vec::new(),
            },
            None => Vec::new(),
        };

        self.selected.clear();
        self.error_message = None;
        self.recompute_derived();
    }

    fn decode_deal(&mut self, deal: &SnapshotDeal) -> DealState {
        let table_play = deal
            .table_play
            .as_ref()
            .map(|play| CardGroup::from_cards(self.decode_cards(&play.cards)));
        DealState {
            deal_id: deal.deal_id.clone(),
            trump: deal.trump.clone(),
            phase: deal.phase.clone(),
            current_turn: deal.current_turn,
            table_play,
            last_player: deal.last_player,
        }
    }

    /// Apply one gated event. The caller guarantees it is the correct next
    /// event; the recorded version is advanced here to keep the state
    /// self-describing.
    pub fn apply_event(&mut self, version: Version, event: &GameEvent) {
        self.state.version = version;
        match event {
            GameEvent::MatchCreated(payload) => self.on_match_created(payload),
            GameEvent::CardsDealt(payload) => self.on_cards_dealt(payload),
            GameEvent::DealStarted(payload) => self.on_deal_started(payload),
            GameEvent::CardsPlayed(payload) => self.on_cards_played(payload),
            GameEvent::PlayerPassed(payload) => self.on_player_passed(payload),
            GameEvent::TrickWon(payload) => self.on_trick_won(payload),
            GameEvent::Unknown { .. } => {}
        }
        self.recompute_derived();
    }

    fn on_match_created(&mut self, payload: &MatchCreatedPayload) {
        self.state.players = payload
            .players
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let seat = entry.seat_id.and_then(Seat::from_index)?;
                Some(Player {
                    id: if entry.id.is_empty() {
                        format!("player_{index}")
                    } else {
                        entry.id.clone()
                    },
                    name: if entry.name.is_empty() {
                        format!("Player {index}")
                    } else {
                        entry.name.clone()
                    },
                    seat,
                    hand_count: 0,
                    level: entry.level,
                    connected: entry.is_online,
                })
            })
            .collect();
        self.state.status = MatchStatus::Playing;
    }

    fn on_cards_dealt(&mut self, payload: &CardsDealtPayload) {
        let Some(hands) = &payload.hands else {
            return;
        };
        for (key, tokens) in hands {
            let Some(seat) = key.parse::<i64>().ok().and_then(Seat::from_index) else {
                continue;
            };
            if let Some(player) = self.state.player_at_mut(seat) {
                player.hand_count = tokens.len();
            }
            if seat == self.my_seat {
                self.my_hand = self.decode_cards(tokens);
            }
        }
    }

    fn on_deal_started(&mut self, payload: &DealStartedPayload) {
        let Some(first) = Seat::from_index(payload.first_player) else {
            return;
        };
        // A deal boundary replaces the whole DealState; nothing from the
        // previous deal survives into the new one.
        self.state.current_deal = Some(DealState {
            deal_id: format!("deal_{}", payload.deal_number),
            trump: trump_label(&payload.trump),
            phase: "in_progress".to_owned(),
            current_turn: Some(first),
            table_play: None,
            last_player: None,
        });
        self.state.status = MatchStatus::Playing;
    }

    fn on_cards_played(&mut self, payload: &CardsPlayedPayload) {
        let Some(seat) = Seat::from_index(payload.player) else {
            return;
        };
        let cards = self.decode_cards(&payload.cards);

        if let Some(deal) = &mut self.state.current_deal {
            deal.table_play = Some(CardGroup::from_cards(cards.clone()));
            deal.last_player = Some(seat);
            deal.current_turn = Some(seat.next());
        }

        if seat == self.my_seat {
            remove_multiset(&mut self.my_hand, &cards);
        }

        if let Some(player) = self.state.player_at_mut(seat) {
            player.hand_count = player.hand_count.saturating_sub(cards.len());
        }
    }

    fn on_player_passed(&mut self, payload: &PlayerPassedPayload) {
        let Some(seat) = Seat::from_index(payload.player) else {
            return;
        };
        if let Some(deal) = &mut self.state.current_deal {
            deal.current_turn = Some(seat.next());
        }
    }

    fn on_trick_won(&mut self, payload: &TrickWonPayload) {
        let Some(winner) = Seat::from_index(payload.winner) else {
            return;
        };
        if let Some(deal) = &mut self.state.current_deal {
            deal.table_play = None;
            deal.current_turn = Some(winner);
        }
    }

    fn decode_cards(&mut self, tokens: &[Value]) -> Vec<Card> {
        tokens
            .iter()
            .map(|token| {
                let decoded = Card::decode(token);
                if decoded.anomaly.is_some() {
                    self.decode_anomalies += 1;
                }
                decoded.card
            })
            .collect()
    }

    fn recompute_derived(&mut self) {
        self.is_my_turn = self.state.status == MatchStatus::Playing
            && self.state.current_turn() == Some(self.my_seat);
        self.can_play = self.is_my_turn;
    }

    /// Validate a play against local state before it is sent.
    ///
    /// Checks turn, status, non-empty selection, and multiset containment
    /// in the local hand. Rule legality is the server's business.
    pub fn validate_play(&self, cards: &[Card]) -> Result<(), PlayError> {
        if !self.is_my_turn {
            return Err(PlayError::NotYourTurn);
        }
        if cards.is_empty() {
            return Err(PlayError::EmptySelection);
        }
        if self.state.status != MatchStatus::Playing {
            return Err(PlayError::NotPlaying);
        }

        let mut remaining = self.my_hand.clone();
        for card in cards {
            match remaining.iter().position(|held| held == card) {
                Some(index) => {
                    remaining.swap_remove(index);
                }
                None => return Err(PlayError::MissingCard(*card)),
            }
        }
        Ok(())
    }

    /// Validate a pass against local state before it is sent.
    pub fn validate_pass(&self) -> Result<(), PlayError> {
        if !self.is_my_turn {
            return Err(PlayError::NotYourTurn);
        }
        if self.state.status != MatchStatus::Playing {
            return Err(PlayError::NotPlaying);
        }
        Ok(())
    }

    /// Add a card to the selection, bounded by the copies actually held.
    pub fn select_card(&mut self, card: Card) {
        let held = self.my_hand.iter().filter(|c| **c == card).count();
        let picked = self.selected.iter().filter(|c| **c == card).count();
        if picked < held {
            self.selected.push(card);
        }
    }

    /// Remove one copy of a card from the selection.
    pub fn deselect_card(&mut self, card: Card) {
        if let Some(index) = self.selected.iter().position(|c| *c == card) {
            self.selected.remove(index);
        }
    }

    /// Clear the selection (after a successful play submission).
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Surface a transient error message to the UI.
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Clear the transient error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

fn remove_multiset(hand: &mut Vec<Card>, played: &[Card]) {
    for card in played {
        if let Some(index) = hand.iter().position(|held| held == card) {
            hand.remove(index);
        }
    }
}

fn trump_label(value: &Value) -> String {
    if let Some(code) = value.as_i64() {
        return Rank::from_code(code)
            .map(|rank| rank.literal().to_owned())
            .unwrap_or_else(|| code.to_string());
    }
    value.as_str().map(str::to_owned).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guandan_types::Suit;
    use serde_json::json;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn roster_event() -> GameEvent {
        GameEvent::from_wire(
            "MatchCreated",
            &json!({
                "Players": [
                    {"ID": "p0", "Name": "Li", "SeatID": 0, "Level": 2, "IsOnline": true},
                    {"ID": "p1", "Name": "Wei", "SeatID": 1, "Level": 2, "IsOnline": true},
                    {"ID": "p2", "Name": "Na", "SeatID": 2, "Level": 2, "IsOnline": true},
                    {"ID": "p3", "Name": "Jun", "SeatID": 3, "Level": 2, "IsOnline": false}
                ]
            }),
        )
    }

    fn deal_started(first_player: i64) -> GameEvent {
        GameEvent::from_wire(
            "DealStarted",
            &json!({"DealNumber": 1, "Trump": 1, "FirstPlayer": first_player}),
        )
    }

    /// A store mid-deal: four seated players, east to act.
    fn playing_store(my_seat: Seat) -> Store {
        let mut store = Store::new(my_seat);
        store.apply_event(Version::new(1), &roster_event());
        store.apply_event(Version::new(2), &deal_started(0));
        store
    }

    #[test]
    fn match_created_seats_the_roster() {
        let mut store = Store::new(Seat::East);
        store.apply_event(Version::new(1), &roster_event());

        assert_eq!(store.state().players.len(), 4);
        assert_eq!(store.state().status, MatchStatus::Playing);
        assert_eq!(store.state().version, Version::new(1));
        assert!(!store.state().player_at(Seat::North).unwrap().connected);
    }

    #[test]
    fn match_created_drops_unresolvable_seats() {
        let mut store = Store::new(Seat::East);
        let event = GameEvent::from_wire(
            "MatchCreated",
            &json!({
                "Players": [
                    {"ID": "p0", "Name": "Li", "SeatID": 0},
                    {"ID": "px", "Name": "Ghost", "SeatID": 9},
                    {"ID": "py", "Name": "Shade"}
                ]
            }),
        );
        store.apply_event(Version::new(1), &event);

        assert_eq!(store.state().players.len(), 1);
        assert_eq!(store.state().players[0].seat, Seat::East);
    }

    #[test]
    fn match_created_fills_missing_names() {
        let mut store = Store::new(Seat::East);
        let event = GameEvent::from_wire(
            "MatchCreated",
            &json!({"Players": [{"SeatID": 0}]}),
        );
        store.apply_event(Version::new(1), &event);

        assert_eq!(store.state().players[0].id, "player_0");
        assert_eq!(store.state().players[0].name, "Player 0");
    }

    #[test]
    fn cards_dealt_records_counts_and_local_hand() {
        let mut store = playing_store(Seat::South);
        let event = GameEvent::from_wire(
            "CardsDealt",
            &json!({"Hands": {
                "0": ["♥2", "♥3"],
                "1": ["♠A", "小王", "♦10"],
                "2": ["♣4"],
                "3": []
            }}),
        );
        store.apply_event(Version::new(3), &event);

        assert_eq!(store.state().player_at(Seat::East).unwrap().hand_count, 2);
        assert_eq!(store.state().player_at(Seat::South).unwrap().hand_count, 3);
        assert_eq!(
            store.my_hand(),
            &[
                card(Suit::Spades, Rank::Ace),
                card(Suit::Joker, Rank::SmallJoker),
                card(Suit::Diamonds, Rank::Ten),
            ]
        );
        // Hand-size counter matches the held hand for the local seat.
        assert_eq!(
            store.my_hand().len(),
            store.state().player_at(Seat::South).unwrap().hand_count
        );
    }

    #[test]
    fn cards_dealt_without_hands_is_a_no_op() {
        let mut store = playing_store(Seat::South);
        let before = store.state().clone();
        store.apply_event(Version::new(3), &GameEvent::from_wire("CardsDealt", &json!({})));

        assert_eq!(store.state().players, before.players);
        assert!(store.my_hand().is_empty());
    }

    #[test]
    fn deal_started_replaces_the_deal_wholesale() {
        let mut store = playing_store(Seat::East);

        // Put a play on the table, then start a new deal.
        let played = GameEvent::from_wire(
            "CardsPlayed",
            &json!({"Player": 0, "Cards": ["♥5"]}),
        );
        store.apply_event(Version::new(3), &played);
        assert!(store.state().current_deal.as_ref().unwrap().table_play.is_some());

        let event = GameEvent::from_wire(
            "DealStarted",
            &json!({"DealNumber": 2, "Trump": 2, "FirstPlayer": 2}),
        );
        store.apply_event(Version::new(4), &event);

        let deal = store.state().current_deal.as_ref().unwrap();
        assert_eq!(deal.deal_id, "deal_2");
        assert_eq!(deal.trump, "3");
        assert_eq!(deal.current_turn, Some(Seat::West));
        assert!(deal.table_play.is_none());
        assert!(deal.last_player.is_none());
    }

    #[test]
    fn cards_played_advances_turn_in_rotation() {
        let mut store = playing_store(Seat::West);
        assert_eq!(store.state().current_turn(), Some(Seat::East));

        let event = GameEvent::from_wire(
            "CardsPlayed",
            &json!({"Player": 0, "Cards": ["♥5"]}),
        );
        store.apply_event(Version::new(3), &event);

        assert_eq!(store.state().current_turn(), Some(Seat::South));
        let deal = store.state().current_deal.as_ref().unwrap();
        assert_eq!(deal.last_player, Some(Seat::East));
        assert_eq!(
            deal.table_play.as_ref().unwrap().cards,
            vec![card(Suit::Hearts, Rank::Five)]
        );
    }

    #[test]
    fn pass_wraps_around_from_north_to_east() {
        let mut store = playing_store(Seat::East);
        let event = GameEvent::from_wire("PlayerPassed", &json!({"Player": 3}));
        store.apply_event(Version::new(3), &event);

        assert_eq!(store.state().current_turn(), Some(Seat::East));
        assert!(store.view().is_my_turn);
    }

    #[test]
    fn pass_leaves_the_table_untouched() {
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire("CardsPlayed", &json!({"Player": 0, "Cards": ["♥5"]})),
        );
        store.apply_event(
            Version::new(4),
            &GameEvent::from_wire("PlayerPassed", &json!({"Player": 1})),
        );

        let deal = store.state().current_deal.as_ref().unwrap();
        assert!(deal.table_play.is_some());
        assert_eq!(deal.current_turn, Some(Seat::West));
    }

    #[test]
    fn disconnected_seat_still_receives_its_turn() {
        // North is offline in the roster fixture; a play by west must still
        // hand the turn to north, not skip to east.
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire("CardsPlayed", &json!({"Player": 2, "Cards": ["♣9"]})),
        );
        assert_eq!(store.state().current_turn(), Some(Seat::North));
    }

    #[test]
    fn trick_won_clears_table_and_hands_turn_to_winner() {
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire("CardsPlayed", &json!({"Player": 0, "Cards": ["♥5"]})),
        );
        store.apply_event(
            Version::new(4),
            &GameEvent::from_wire("TrickWon", &json!({"Winner": 2})),
        );

        let deal = store.state().current_deal.as_ref().unwrap();
        assert!(deal.table_play.is_none());
        assert_eq!(deal.current_turn, Some(Seat::West));
    }

    #[test]
    fn local_play_removes_exact_multiset_from_hand() {
        let mut store = playing_store(Seat::East);
        // Two decks: the hand legitimately holds two copies of ♥7.
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire(
                "CardsDealt",
                &json!({"Hands": {"0": ["♥7", "♥7", "♦7", "♠A"]}}),
            ),
        );

        store.apply_event(
            Version::new(4),
            &GameEvent::from_wire(
                "CardsPlayed",
                &json!({"Player": 0, "Cards": ["♥7", "♦7"]}),
            ),
        );

        // One ♥7 remains; only one copy was removed.
        assert_eq!(
            store.my_hand(),
            &[card(Suit::Hearts, Rank::Seven), card(Suit::Spades, Rank::Ace)]
        );
        assert_eq!(store.state().player_at(Seat::East).unwrap().hand_count, 2);
        assert_eq!(
            store.my_hand().len(),
            store.state().player_at(Seat::East).unwrap().hand_count
        );
    }

    #[test]
    fn remote_play_only_decrements_counter() {
        let mut store = playing_store(Seat::South);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire(
                "CardsDealt",
                &json!({"Hands": {"0": ["♥7", "♦7"], "1": ["♠A"]}}),
            ),
        );

        store.apply_event(
            Version::new(4),
            &GameEvent::from_wire("CardsPlayed", &json!({"Player": 0, "Cards": ["♥7"]})),
        );

        assert_eq!(store.state().player_at(Seat::East).unwrap().hand_count, 1);
        assert_eq!(store.my_hand().len(), 1);
    }

    #[test]
    fn unknown_event_changes_nothing_but_version() {
        let mut store = playing_store(Seat::East);
        let before = store.view();
        store.apply_event(
            Version::new(3),
            &GameEvent::Unknown {
                kind: "TributeRequested".into(),
            },
        );

        let after = store.view();
        assert_eq!(after.state.version, Version::new(3));
        assert_eq!(after.state.players, before.state.players);
        assert_eq!(after.state.current_deal, before.state.current_deal);
    }

    #[test]
    fn snapshot_replaces_everything_and_clears_errors() {
        let mut store = playing_store(Seat::South);
        store.set_error("stale".into());
        store.select_card(card(Suit::Hearts, Rank::Two));

        let snapshot: SnapshotState = serde_json::from_value(json!({
            "matchId": "m-9",
            "players": [
                {"id": "p1", "name": "Wei", "seat": "south", "handCount": 2, "level": 3, "connected": true}
            ],
            "status": "playing",
            "version": 40,
            "currentDeal": {
                "dealId": "deal_3",
                "trump": "5",
                "phase": "in_progress",
                "currentTurn": "south",
                "playerHands": {"south": ["♠K", "♠Q"]}
            }
        }))
        .unwrap();
        store.apply_snapshot(&snapshot);

        let view = store.view();
        assert_eq!(view.state.match_id, "m-9");
        assert_eq!(view.state.version, Version::new(40));
        assert_eq!(
            view.my_hand,
            vec![card(Suit::Spades, Rank::King), card(Suit::Spades, Rank::Queen)]
        );
        assert!(view.is_my_turn);
        assert!(view.can_play);
        assert!(view.error_message.is_none());
        assert!(view.selected.is_empty());
    }

    #[test]
    fn snapshot_without_local_hand_empties_it() {
        let mut store = playing_store(Seat::West);
        let snapshot: SnapshotState = serde_json::from_value(json!({
            "matchId": "m-9",
            "players": [],
            "status": "waiting",
            "version": 12
        }))
        .unwrap();
        store.apply_snapshot(&snapshot);

        assert!(store.my_hand().is_empty());
        assert!(!store.view().is_my_turn);
    }

    #[test]
    fn validate_play_rejects_out_of_turn() {
        let store = playing_store(Seat::South); // east to act
        assert_eq!(
            store.validate_play(&[card(Suit::Hearts, Rank::Two)]),
            Err(PlayError::NotYourTurn)
        );
    }

    #[test]
    fn validate_play_rejects_empty_selection() {
        let store = playing_store(Seat::East);
        assert_eq!(store.validate_play(&[]), Err(PlayError::EmptySelection));
    }

    #[test]
    fn validate_play_rejects_cards_not_held() {
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire("CardsDealt", &json!({"Hands": {"0": ["♥7"]}})),
        );

        // Asking for two copies while holding one is a multiset violation.
        let seven = card(Suit::Hearts, Rank::Seven);
        assert_eq!(
            store.validate_play(&[seven, seven]),
            Err(PlayError::MissingCard(seven))
        );
        assert!(store.validate_play(&[seven]).is_ok());
    }

    #[test]
    fn validate_pass_requires_turn() {
        let store = playing_store(Seat::North);
        assert_eq!(store.validate_pass(), Err(PlayError::NotYourTurn));

        let store = playing_store(Seat::East);
        assert!(store.validate_pass().is_ok());
    }

    #[test]
    fn selection_is_multiset_bounded() {
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire("CardsDealt", &json!({"Hands": {"0": ["♥7", "♥7"]}})),
        );

        let seven = card(Suit::Hearts, Rank::Seven);
        store.select_card(seven);
        store.select_card(seven);
        store.select_card(seven); // third copy is not held
        assert_eq!(store.selected().len(), 2);

        store.deselect_card(seven);
        assert_eq!(store.selected().len(), 1);
    }

    #[test]
    fn decode_anomalies_are_counted_not_fatal() {
        let mut store = playing_store(Seat::East);
        store.apply_event(
            Version::new(3),
            &GameEvent::from_wire(
                "CardsDealt",
                &json!({"Hands": {"0": ["♥7", {"Suit": 9, "Rank": 1}, "x3"]}}),
            ),
        );

        assert_eq!(store.my_hand().len(), 3);
        assert_eq!(store.decode_anomalies(), 2);
    }
}
