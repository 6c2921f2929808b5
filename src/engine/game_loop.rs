use tracing::{debug, info, warn};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandRank, HandState, HandSummary, PlayerHandResult, Street};
use crate::domain::player::{PlayerStatus, SeatState};
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex};
use crate::eval::evaluate_best_hand;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{apply_validated, is_round_complete, next_to_act, reset_for_street, sweep_bets};
use crate::engine::errors::{EngineError, IllegalAction};
use crate::engine::gate::{ActionGate, InFlightToken};
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, next_dealer, seats_after};
use crate::engine::side_pots::{compute_side_pots, Contribution, SidePot};
use crate::engine::validation::validate_action;
use crate::engine::view::TableSnapshot;
use crate::engine::RandomSource;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary, HandHistory),
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished(..))
    }
}

/// Раздача целиком: состояние, колода, журнал и точка ожидания решения.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub hand: HandState,
    pub deck: Deck,
    pub history: HandHistory,
    /// Поты последнего шоудауна (пусто, если до вскрытия не дошло).
    pub side_pots: Vec<SidePot>,
    gate: ActionGate,
    summary: Option<HandSummary>,
    /// Снимки открытых улиц, ещё не забранные контроллером.
    street_snapshots: Vec<TableSnapshot>,
}

impl HandEngine {
    pub fn hand_id(&self) -> HandId {
        self.hand.hand_id
    }

    /// Чей сейчас ход.
    pub fn active_seat(&self) -> Option<SeatIndex> {
        if self.hand.complete {
            None
        } else {
            self.hand.active
        }
    }

    pub fn is_complete(&self) -> bool {
        self.hand.complete
    }

    pub fn summary(&self) -> Option<&HandSummary> {
        self.summary.as_ref()
    }

    pub fn status(&self) -> HandStatus {
        match &self.summary {
            Some(summary) => HandStatus::Finished(summary.clone(), self.history.clone()),
            None => HandStatus::Ongoing,
        }
    }

    /// Ожидается ли сейчас решение от источника действий.
    pub fn is_decision_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Открыть точку решения для активного места.
    /// Пока она открыта, `apply_action` и повторный `begin_decision` отклоняются.
    pub fn begin_decision(&mut self) -> Result<InFlightToken, EngineError> {
        let seat = self.active_seat().ok_or(EngineError::NoActiveHand)?;
        self.gate.begin(self.hand.hand_id, seat)
    }

    /// Бросить точку решения без действия.
    pub fn abandon_decision(&mut self, token: InFlightToken) {
        self.gate.release(&token);
    }

    /// Забрать снимки улиц, открытых после прошлого вызова.
    /// При докатке борда без ставок здесь по снимку на флоп, тёрн и ривер.
    pub fn take_street_snapshots(&mut self) -> Vec<TableSnapshot> {
        std::mem::take(&mut self.street_snapshots)
    }
}

/// Старт новой раздачи:
/// - сдвигает кнопку;
/// - сажает в раздачу всех, у кого есть фишки;
/// - постит блайнды (короткий блайнд – олл-ин);
/// - раздаёт по 2 карты, начиная слева от дилера;
/// - назначает первый ход.
///
/// Если ходить некому (все в олл-ине на блайндах), борд докладывается сразу
/// и раздача возвращается уже рассчитанной.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    new_hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }
    table
        .config
        .stakes
        .validate()
        .map_err(EngineError::InvalidStakes)?;
    if table.dealable_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let dealer = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;

    let seats: Vec<SeatState> = table
        .seats
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| slot.as_ref().map(|p| (idx, p)))
        .filter(|(_, p)| p.can_be_dealt())
        .map(|(idx, p)| SeatState::from_player(idx as SeatIndex, p))
        .collect();

    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);

    let stakes = table.config.stakes.clone();
    let mut engine = HandEngine {
        hand: HandState {
            table_id: table.id,
            hand_id: new_hand_id,
            seats,
            dealer,
            board: Vec::new(),
            pot: Chips::ZERO,
            street: Street::Preflop,
            current_bet: Chips::ZERO,
            min_raise: stakes.big_blind,
            last_aggressor: None,
            big_blind: stakes.big_blind,
            active: None,
            complete: false,
        },
        deck,
        history: HandHistory::new(),
        side_pots: Vec::new(),
        gate: ActionGate::new(),
        summary: None,
        street_snapshots: Vec::new(),
    };

    table.dealer_button = Some(dealer);
    table.hand_in_progress = true;

    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id: new_hand_id,
        dealer,
    });
    info!(
        table_id = table.id,
        hand_id = new_hand_id,
        dealer,
        players = engine.hand.seats.len(),
        "раздача началась"
    );

    let (sb_seat, bb_seat) = blind_seats(&engine.hand).ok_or(EngineError::NotEnoughPlayers)?;
    let sb_paid = post_blind(&mut engine.hand, sb_seat, stakes.small_blind);
    let bb_paid = post_blind(&mut engine.hand, bb_seat, stakes.big_blind);
    // Короткий BB не снижает ставку ниже SB.
    engine.hand.current_bet = sb_paid.max(bb_paid);
    engine.hand.min_raise = stakes.big_blind;
    engine.history.push(HandEventKind::BlindsPosted {
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });

    deal_hole_cards(&mut engine);

    engine.hand.active = next_to_act(&engine.hand, bb_seat);
    if engine.hand.active.is_none() {
        advance_if_needed(table, &mut engine)?;
    }

    Ok(engine)
}

fn post_blind(hand: &mut HandState, seat: SeatIndex, amount: Chips) -> Chips {
    hand.seat_mut(seat).map_or(Chips::ZERO, |s| s.commit(amount))
}

/// По 2 карты каждому, по кругу начиная с первого слева от дилера.
fn deal_hole_cards(engine: &mut HandEngine) {
    let order: Vec<SeatIndex> = seats_after(&engine.hand, engine.hand.dealer)
        .map(|s| s.seat)
        .collect();

    for _round in 0..2 {
        for &seat in &order {
            let Some(card) = engine.deck.draw_one() else {
                return;
            };
            if let Some(s) = engine.hand.seat_mut(seat) {
                s.hole_cards.push(card);
            }
        }
    }

    for &seat in &order {
        if let Some(s) = engine.hand.seat(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: s.hole_cards.clone(),
            });
        }
    }
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Пока контроллер ждёт решения (`begin_decision`), прямое применение запрещено.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    if engine.gate.is_pending() {
        return Err(EngineError::ActionInFlight);
    }
    apply_checked(table, engine, action)
}

/// Применить решение, полученное по открытой точке решения.
///
/// При успехе точка закрывается и токен становится устаревшим.
/// При ошибке точка остаётся открытой: можно переспросить с тем же токеном.
pub fn apply_with_token(
    table: &mut Table,
    engine: &mut HandEngine,
    token: &InFlightToken,
    kind: PlayerActionKind,
) -> Result<HandStatus, EngineError> {
    engine.gate.check(token)?;
    let seat = token.seat();
    let player_id = engine
        .hand
        .seat(seat)
        .map(|s| s.player_id)
        .ok_or(EngineError::EmptySeat)?;

    let status = apply_checked(table, engine, PlayerAction::new(player_id, seat, kind))?;
    engine.gate.release(token);
    Ok(status)
}

fn apply_checked(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress || engine.hand.complete {
        return Err(EngineError::NoActiveHand);
    }
    if action.seat as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }

    let seat_state = engine.hand.seat(action.seat).ok_or(EngineError::EmptySeat)?;
    if seat_state.player_id != action.player_id {
        return Err(EngineError::PlayerNotAtSeat(action.player_id));
    }
    if engine.hand.active != Some(action.seat) {
        return Err(IllegalAction::NotPlayersTurn(action.seat).into());
    }

    let normalized = validate_action(seat_state, &action.kind, &engine.hand)?;
    let paid = apply_validated(&mut engine.hand, action.seat, normalized);

    let new_stack = engine
        .hand
        .seat(action.seat)
        .map_or(Chips::ZERO, |s| s.stack);
    let pot_after = engine.hand.total_pot();
    engine.history.push(HandEventKind::PlayerActed {
        player_id: action.player_id,
        seat: action.seat,
        action: normalized,
        paid,
        new_stack,
        pot_after,
    });
    debug!(
        hand_id = engine.hand.hand_id,
        seat = action.seat,
        action = normalized.name(),
        paid = paid.0,
        pot = pot_after.0,
        "действие применено"
    );

    if engine.hand.in_hand_count() == 1 {
        return finish_without_showdown(table, engine);
    }

    match next_to_act(&engine.hand, action.seat) {
        Some(next) => {
            engine.hand.active = Some(next);
            Ok(HandStatus::Ongoing)
        }
        None => advance_if_needed(table, engine),
    }
}

/// Переход улиц / шоудаун / завершение раздачи.
///
/// Пока раунд на улице завершён, открывает следующую улицу. Если ходить некому
/// (все в олл-ине), борд докладывается до ривера без остановок.
pub fn advance_if_needed(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    loop {
        if engine.hand.complete {
            return Ok(engine.status());
        }
        if engine.hand.in_hand_count() <= 1 {
            return finish_without_showdown(table, engine);
        }
        if !is_round_complete(&engine.hand) {
            if engine.hand.active.is_none() {
                engine.hand.active = next_to_act(&engine.hand, engine.hand.dealer);
            }
            return Ok(HandStatus::Ongoing);
        }

        let street = engine.hand.street;
        engine.history.push(HandEventKind::RoundCompleted { street });

        match street.next() {
            Some((Street::Showdown, _)) => {
                reset_for_street(&mut engine.hand, Street::Showdown);
                engine.hand.active = None;
                return finish_with_showdown(table, engine);
            }
            Some((next, count)) => {
                reset_for_street(&mut engine.hand, next);
                let cards = engine.deck.draw_n(count);
                if cards.len() != count {
                    return Err(EngineError::Internal("колода закончилась"));
                }
                engine.hand.board.extend_from_slice(&cards);
                engine.history.push(HandEventKind::BoardDealt { street: next, cards });
                engine.hand.active = next_to_act(&engine.hand, engine.hand.dealer);
                debug!(
                    hand_id = engine.hand.hand_id,
                    street = next.as_str(),
                    pot = engine.hand.pot.0,
                    "новая улица"
                );
                let snapshot = TableSnapshot::capture(table, engine);
                engine.street_snapshots.push(snapshot);
            }
            None => return Err(EngineError::Internal("переход после шоудауна")),
        }
    }
}

/// Прервать раздачу: каждому вернуть всё, что он внёс.
pub fn abort_hand(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    if engine.hand.complete {
        return Err(EngineError::NoActiveHand);
    }

    for seat in engine.hand.seats.iter_mut() {
        seat.stack += seat.committed;
        seat.committed = Chips::ZERO;
        seat.current_bet = Chips::ZERO;
    }
    engine.hand.pot = Chips::ZERO;
    engine.hand.current_bet = Chips::ZERO;
    engine.hand.active = None;
    engine.hand.complete = true;
    engine.gate.clear();

    write_back_stacks(table, &engine.hand);
    table.hand_in_progress = false;

    engine.history.push(HandEventKind::HandAborted);
    warn!(
        table_id = table.id,
        hand_id = engine.hand.hand_id,
        "раздача прервана, вклады возвращены"
    );
    Ok(())
}

/// Все, кроме одного, сфолдили: банк уходит оставшемуся без вскрытия.
fn finish_without_showdown(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    let swept = sweep_bets(&mut engine.hand);
    engine.hand.pot += swept;
    engine.hand.active = None;

    let winner = engine
        .hand
        .seats
        .iter()
        .find(|s| s.is_in_hand())
        .map(|s| (s.seat, s.player_id))
        .ok_or(EngineError::Internal("не осталось игроков в раздаче"))?;

    let total_pot = engine.hand.pot;
    let mut won = vec![Chips::ZERO; engine.hand.seats.len()];
    if let Some(pos) = engine.hand.position_of(winner.0) {
        won[pos] = total_pot;
    }
    engine.history.push(HandEventKind::PotAwarded {
        seat: winner.0,
        player_id: winner.1,
        pot_index: 0,
        amount: total_pot,
    });

    settle(table, engine, &won, &[], false)
}

/// Шоудаун: оценить все несфолдившие руки, разложить банк на поты и раздать.
fn finish_with_showdown(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    engine.hand.street = Street::Showdown;

    let mut ranks: Vec<(SeatIndex, HandRank)> = Vec::new();
    for s in engine.hand.seats.iter().filter(|s| s.is_in_hand()) {
        let rank = evaluate_best_hand(&s.hole_cards, &engine.hand.board)?;
        ranks.push((s.seat, rank));
    }
    for &(seat, rank) in &ranks {
        if let Some(s) = engine.hand.seat(seat) {
            engine.history.push(HandEventKind::ShowdownReveal {
                seat,
                player_id: s.player_id,
                hole_cards: s.hole_cards.clone(),
                rank,
            });
        }
    }

    let contributions: Vec<Contribution> = engine.hand.seats.iter().map(Contribution::from).collect();
    let pots = compute_side_pots(&contributions);

    // Порядок выдачи лишних фишек: с первого слева от дилера.
    let award_order: Vec<SeatIndex> = seats_after(&engine.hand, engine.hand.dealer)
        .map(|s| s.seat)
        .collect();

    let mut won = vec![Chips::ZERO; engine.hand.seats.len()];
    for (pot_index, pot) in pots.iter().enumerate() {
        let best = ranks
            .iter()
            .filter(|(seat, _)| pot.eligible_seats.contains(seat))
            .map(|(_, rank)| *rank)
            .max()
            .ok_or(EngineError::Internal("банк без претендентов"))?;

        let winners: Vec<SeatIndex> = award_order
            .iter()
            .copied()
            .filter(|seat| pot.eligible_seats.contains(seat))
            .filter(|seat| ranks.iter().any(|(s, r)| s == seat && *r == best))
            .collect();

        let (share, remainder) = pot.amount.split(winners.len());
        for (i, &seat) in winners.iter().enumerate() {
            let prize = if (i as u64) < remainder.0 {
                share + Chips(1)
            } else {
                share
            };
            let Some(pos) = engine.hand.position_of(seat) else {
                continue;
            };
            won[pos] += prize;
            let player_id = engine.hand.seats[pos].player_id;
            engine.history.push(HandEventKind::PotAwarded {
                seat,
                player_id,
                pot_index,
                amount: prize,
            });
        }
    }

    engine.side_pots = pots;
    settle(table, engine, &won, &ranks, true)
}

/// Расчёт: выигрыши в стеки, стеки обратно на стол, итог раздачи.
fn settle(
    table: &mut Table,
    engine: &mut HandEngine,
    won: &[Chips],
    ranks: &[(SeatIndex, HandRank)],
    showdown: bool,
) -> Result<HandStatus, EngineError> {
    let total_pot = engine.hand.pot;

    let mut results = Vec::with_capacity(engine.hand.seats.len());
    for (pos, seat) in engine.hand.seats.iter_mut().enumerate() {
        let prize = won.get(pos).copied().unwrap_or(Chips::ZERO);
        seat.stack += prize;
        results.push(PlayerHandResult {
            seat: seat.seat,
            player_id: seat.player_id,
            rank: ranks.iter().find(|(s, _)| *s == seat.seat).map(|(_, r)| *r),
            committed: seat.committed,
            won: prize,
            final_stack: seat.stack,
            is_winner: !prize.is_zero(),
        });
    }
    engine.hand.pot = Chips::ZERO;
    engine.hand.complete = true;
    engine.hand.active = None;
    engine.gate.clear();

    write_back_stacks(table, &engine.hand);
    table.hand_in_progress = false;
    table.hands_played += 1;

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand.hand_id,
        table_id: engine.hand.table_id,
    });

    let summary = HandSummary {
        hand_id: engine.hand.hand_id,
        table_id: engine.hand.table_id,
        street_reached: engine.hand.street,
        board: engine.hand.board.clone(),
        total_pot,
        showdown,
        results,
    };
    info!(
        table_id = summary.table_id,
        hand_id = summary.hand_id,
        pot = total_pot.0,
        showdown,
        winners = ?summary.winners(),
        "раздача завершена"
    );

    engine.summary = Some(summary.clone());
    Ok(HandStatus::Finished(summary, engine.history.clone()))
}

/// Стеки раздачи обратно на стол. Нулевой стек – игрок вылетел.
fn write_back_stacks(table: &mut Table, hand: &HandState) {
    for seat in &hand.seats {
        let Some(Some(player)) = table.seats.get_mut(seat.seat as usize) else {
            continue;
        };
        player.stack = seat.stack;
        player.status = if seat.stack.is_zero() {
            PlayerStatus::Busted
        } else {
            PlayerStatus::Active
        };
    }
}
