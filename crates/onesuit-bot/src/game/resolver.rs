use super::GameError;
use crate::player::Player;
use crate::policy::{ResponseContext, StrategyKind};
use onesuit_core::model::deal::Deal;
use onesuit_core::model::deck::DeckDistributor;
use onesuit_core::model::result::GameResult;
use onesuit_core::model::seat::Seat;
use onesuit_core::model::trick::Trick;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{Level, event};

/// Per-seat seeds drawn from one master stream seeded with `seed`.
pub fn seat_seeds(seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.next_u64()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress { tricks_remaining: usize },
    Finished,
}

/// Plays whole games between a fixed table of players. The same players
/// are reused for every game; each game starts by resetting their hands.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    hand_size: usize,
    phase: GamePhase,
    leader: Seat,
    tricks_lost: Vec<usize>,
}

impl Game {
    /// `players[i]` must sit in seat `i`.
    pub fn new(players: Vec<Player>, hand_size: usize) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::TooFewPlayers {
                found: players.len(),
            });
        }
        if let Some((index, player)) = players
            .iter()
            .enumerate()
            .find(|(index, player)| player.seat().index() != *index)
        {
            return Err(GameError::SeatOrder {
                index,
                seat: player.seat(),
            });
        }
        let tricks_lost = vec![0; players.len()];
        Ok(Self {
            players,
            hand_size,
            phase: GamePhase::NotStarted,
            leader: Seat::new(0),
            tricks_lost,
        })
    }

    /// One player per strategy, seated in order. Seat seeds come from
    /// [`seat_seeds`].
    pub fn with_strategies(
        strategies: &[StrategyKind],
        hand_size: usize,
        seed: u64,
    ) -> Result<Self, GameError> {
        let players = strategies
            .iter()
            .zip(seat_seeds(seed, strategies.len()))
            .enumerate()
            .map(|(index, (kind, seat_seed))| {
                Player::with_kind(Seat::new(index), *kind, seat_seed)
            })
            .collect();
        Self::new(players, hand_size)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Play one game, from `deal` when given, otherwise from a fresh deal
    /// drawn from `distributor`.
    pub fn play(
        &mut self,
        deal: Option<&Deal>,
        distributor: &mut dyn DeckDistributor,
    ) -> Result<GameResult, GameError> {
        match deal {
            Some(deal) => self.play_deal(deal),
            None => {
                let deal = distributor.distribute(self.hand_size, self.players.len())?;
                self.play_deal(&deal)
            }
        }
    }

    pub fn play_deal(&mut self, deal: &Deal) -> Result<GameResult, GameError> {
        self.start(deal)?;
        while let GamePhase::InProgress { .. } = self.step()? {}

        debug_assert!(self.players.iter().all(|player| player.hand().is_empty()));

        let result = GameResult::new(self.tricks_lost.clone());
        event!(
            target: "onesuit_bot::game",
            Level::DEBUG,
            hand_size = self.hand_size,
            tricks_lost = ?result.tricks_lost()
        );
        Ok(result)
    }

    /// Validate `deal`, hand it out and put seat 0 on lead.
    pub fn start(&mut self, deal: &Deal) -> Result<(), GameError> {
        let num_players = self.players.len();
        deal.validate(self.hand_size, num_players)?;

        for (player, hand) in self.players.iter_mut().zip(deal.hands()) {
            player.reset(hand);
        }

        self.tricks_lost = vec![0; num_players];
        self.leader = Seat::new(0);
        self.phase = GamePhase::InProgress {
            tricks_remaining: self.hand_size,
        };
        Ok(())
    }

    /// Advance a started game by one trick, or to `Finished` once no tricks
    /// remain. Outside `InProgress` this is a no-op.
    pub fn step(&mut self) -> Result<GamePhase, GameError> {
        if let GamePhase::InProgress { tricks_remaining } = self.phase {
            if tricks_remaining == 0 {
                self.phase = GamePhase::Finished;
            } else {
                let loser = self.play_trick(self.leader)?;
                self.tricks_lost[loser.index()] += 1;
                self.leader = loser;
                self.phase = GamePhase::InProgress {
                    tricks_remaining: tricks_remaining - 1,
                };
            }
        }
        Ok(self.phase)
    }

    /// Tricks lost so far in the current game.
    pub fn tricks_lost(&self) -> &[usize] {
        &self.tricks_lost
    }

    /// Leader plays, everyone else responds in rotation; returns the seat
    /// that takes the trick.
    fn play_trick(&mut self, leader: Seat) -> Result<Seat, GameError> {
        let num_players = self.players.len();
        let mut trick = Trick::new(leader, num_players);

        for seat in leader.rotation(num_players) {
            let player = &mut self.players[seat.index()];
            let played = match trick.current_max() {
                None => player.lead(),
                Some(current_max) => player.respond(ResponseContext {
                    current_max,
                    is_last_to_act: trick.is_last_to_act(seat),
                }),
            };
            let card = played.map_err(|source| GameError::Hand { seat, source })?;
            trick.play(seat, card)?;
        }

        let loser = trick.loser()?;
        event!(
            target: "onesuit_bot::game",
            Level::TRACE,
            leader = %leader,
            plays = ?trick.plays(),
            loser = %loser
        );
        Ok(loser)
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GamePhase, seat_seeds};
    use crate::game::GameError;
    use crate::player::Player;
    use crate::policy::StrategyKind;
    use onesuit_core::model::card::Card;
    use onesuit_core::model::deal::{Deal, DealError};
    use onesuit_core::model::deck::ShuffleDistributor;
    use onesuit_core::model::seat::Seat;

    fn table(kinds: &[StrategyKind], hand_size: usize) -> Game {
        Game::with_strategies(kinds, hand_size, 0).unwrap()
    }

    #[test]
    fn rejects_short_tables_and_misseated_players() {
        assert_eq!(
            Game::with_strategies(&[StrategyKind::Default], 2, 0).unwrap_err(),
            GameError::TooFewPlayers { found: 1 }
        );
        let players = vec![
            Player::with_kind(Seat::new(1), StrategyKind::Lowest, 0),
            Player::with_kind(Seat::new(0), StrategyKind::Lowest, 0),
        ];
        assert!(matches!(
            Game::new(players, 1),
            Err(GameError::SeatOrder { index: 0, .. })
        ));
    }

    #[test]
    fn single_card_game_goes_to_holder_of_the_top_card() {
        let mut game = table(&[StrategyKind::Lowest, StrategyKind::Lowest], 1);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        let result = game.play_deal(&Deal::from_ranks([[0], [1]])).unwrap();
        assert_eq!(result.tricks_lost(), &[0, 1]);
        let result = game.play_deal(&Deal::from_ranks([[1], [0]])).unwrap();
        assert_eq!(result.tricks_lost(), &[1, 0]);
        assert_eq!(game.phase(), GamePhase::Finished);
    }

    #[test]
    fn heads_up_default_play() {
        // Trick 1: P1 leads 0, P2 closes with nothing below 0 and dumps 2.
        // Trick 2: P2 leads 1, P1 holds only 3 and must take it.
        let mut game = table(&[StrategyKind::Default, StrategyKind::Default], 2);
        let result = game
            .play_deal(&Deal::from_ranks([vec![0, 3], vec![1, 2]]))
            .unwrap();
        assert_eq!(result.tricks_lost(), &[1, 1]);
    }

    #[test]
    fn three_handed_rotation_follows_the_loser() {
        // Trick 1: P1 leads 0, P2 sacrifices 1, P3 closes and dumps 4.
        // Trick 2: P3 leads 2, P1 sacrifices 5, P2 closes and ducks with 3.
        let mut game = table(&[StrategyKind::Default; 3], 2);
        let result = game
            .play_deal(&Deal::from_ranks([vec![0, 5], vec![1, 3], vec![2, 4]]))
            .unwrap();
        assert_eq!(result.tricks_lost(), &[1, 0, 1]);
        assert!(game.players().iter().all(|p| p.hand().is_empty()));
    }

    #[test]
    fn four_handed_single_trick() {
        let mut game = table(&[StrategyKind::Default; 4], 1);
        let result = game
            .play_deal(&Deal::from_ranks([[2], [0], [3], [1]]))
            .unwrap();
        assert_eq!(result.tricks_lost(), &[0, 0, 1, 0]);
    }

    #[test]
    fn invalid_deals_are_rejected_before_play() {
        let mut game = table(&[StrategyKind::Lowest, StrategyKind::Lowest], 2);
        let err = game
            .play_deal(&Deal::from_ranks([vec![0, 1], vec![1, 2]]))
            .unwrap_err();
        assert_eq!(err, GameError::Deal(DealError::DuplicateCard(Card::new(1))));
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn distributor_deals_when_no_deal_is_given() {
        let mut game = table(
            &[
                StrategyKind::Default,
                StrategyKind::Random,
                StrategyKind::Highest,
                StrategyKind::Lowest,
            ],
            5,
        );
        let mut distributor = ShuffleDistributor::with_seed(9);
        for _ in 0..50 {
            let result = game.play(None, &mut distributor).unwrap();
            assert_eq!(result.total(), 5);
            assert_eq!(game.phase(), GamePhase::Finished);
        }
    }

    #[test]
    fn explicit_deal_wins_over_distributor() {
        let mut game = table(&[StrategyKind::Lowest, StrategyKind::Lowest], 1);
        let mut distributor = ShuffleDistributor::with_seed(1);
        let deal = Deal::from_ranks([[1], [0]]);
        let result = game.play(Some(&deal), &mut distributor).unwrap();
        assert_eq!(result.tricks_lost(), &[1, 0]);
    }

    #[test]
    fn stepping_plays_one_trick_at_a_time() {
        let mut game = table(&[StrategyKind::Default; 3], 2);
        assert_eq!(game.step().unwrap(), GamePhase::NotStarted);
        let deal = Deal::from_ranks([vec![0, 5], vec![1, 3], vec![2, 4]]);
        game.start(&deal).unwrap();
        assert_eq!(game.phase(), GamePhase::InProgress { tricks_remaining: 2 });
        assert_eq!(
            game.step().unwrap(),
            GamePhase::InProgress { tricks_remaining: 1 }
        );
        assert_eq!(game.tricks_lost(), &[0, 0, 1]);
        assert!(game.players().iter().all(|p| p.hand().len() == 1));
        assert_eq!(
            game.step().unwrap(),
            GamePhase::InProgress { tricks_remaining: 0 }
        );
        assert_eq!(game.step().unwrap(), GamePhase::Finished);
        assert_eq!(game.step().unwrap(), GamePhase::Finished);
        assert_eq!(game.tricks_lost(), &[1, 0, 1]);
    }

    #[test]
    fn seat_seeds_are_distinct_and_not_the_master_seed() {
        let seeds = seat_seeds(42, 4);
        assert_eq!(seeds, seat_seeds(42, 4));
        assert!(!seeds.contains(&42));
        for (i, a) in seeds.iter().enumerate() {
            assert!(seeds[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn zero_card_game_finishes_immediately() {
        let mut game = table(&[StrategyKind::Default, StrategyKind::Default], 0);
        let result = game.play_deal(&Deal::new(vec![vec![], vec![]])).unwrap();
        assert_eq!(result.tricks_lost(), &[0, 0]);
        assert_eq!(game.phase(), GamePhase::Finished);
    }
}
