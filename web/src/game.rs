use crate::settings;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use pairs_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Ready,
    Active,
    Won,
    GameOver,
}

impl ViewGameState {
    fn from_engine(engine: &game::PlayEngine) -> Self {
        use game::EngineState::*;
        match engine.state() {
            Ready => Self::Ready,
            Active => Self::Active,
            Won => Self::Won,
            OutOfMoves => Self::GameOver,
        }
    }

    fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::GameOver)
    }

    fn class(self) -> &'static str {
        match self {
            Self::Ready => "not-started",
            Self::Active => "in-progress",
            Self::Won => "win",
            Self::GameOver => "lose",
        }
    }
}

/// Label of the reset button, which only shows up once a pair was found or the game is over.
fn reset_label(engine: &game::PlayEngine) -> Option<&'static str> {
    let state = ViewGameState::from_engine(engine);
    if state.is_finished() {
        Some("Play Again")
    } else if engine.resolved_count() > 0 {
        Some("Reset")
    } else {
        None
    }
}

/// Applies a settings message to `current`, returning the new config and whether it needs a new deal.
fn next_config(current: game::GameConfig, msg: &Msg) -> (game::GameConfig, bool) {
    match *msg {
        Msg::SetGridSize(side) => {
            let config = game::GameConfig::new(side, current.max_moves);
            (config, config.side != current.side)
        }
        // the engine keeps its limit until the next deal
        Msg::SetMaxMoves(max_moves) => (
            game::GameConfig {
                max_moves,
                ..current
            },
            false,
        ),
        Msg::Reset => (current, true),
        Msg::CardClick(_) | Msg::ClearMismatch(_) => (current, false),
    }
}

/// Whether this flip is the one that used up the last move without winning.
fn ran_out_of_moves<E>(outcome: &Result<game::FlipOutcome, E>, engine: &game::PlayEngine) -> bool {
    matches!(outcome, Ok(outcome) if outcome.has_update())
        && engine.state() == game::EngineState::OutOfMoves
}

/// Owns the single pending turn-down of a mismatched pair. Dropping the handle cancels the timeout.
#[derive(Debug, Default)]
pub(crate) struct MismatchTimer {
    pending: Option<(game::PendingClear, Timeout)>,
}

impl MismatchTimer {
    pub(crate) fn schedule(
        &mut self,
        pending: game::PendingClear,
        on_fire: impl FnOnce(game::PendingClear) + 'static,
    ) {
        let millis = u32::try_from(pending.delay().as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || on_fire(pending));
        self.pending = Some((pending, timeout));
    }

    pub(crate) fn cancel(&mut self) -> Option<game::PendingClear> {
        self.pending.take().map(|(pending, _)| pending)
    }

    /// Forgets the handle once its callback ran.
    pub(crate) fn fired(&mut self, pending: game::PendingClear) {
        if self.pending.as_ref().is_some_and(|(scheduled, _)| *scheduled == pending) {
            self.pending = None;
        }
    }
}

fn format_moves(engine: &game::PlayEngine) -> Option<String> {
    match engine.max_moves() {
        0 => None,
        max_moves => Some(format!("{}/{}", engine.move_count(), max_moves)),
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<game::ClearOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::ClearOutcome| outcome.has_update())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClick(game::CardId),
    ClearMismatch(game::PendingClear),
    SetGridSize(game::Coord),
    SetMaxMoves(game::MoveCount),
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    slot: game::Slot,
    face: game::CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::CardFace::*;

    let CardProps {
        slot,
        face,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match face {
            Hidden => classes!(),
            FaceUp(_) => classes!("flipped"),
            Resolved(_) => classes!("resolved"),
            Blank => classes!("blank"),
        }
    );
    if locked {
        class.push("locked");
    }

    let label = match face {
        Hidden => "?".to_string(),
        FaceUp(value) | Resolved(value) => value.to_string(),
        Blank => String::new(),
    };

    let onclick = slot.card_id().map(|id| {
        Callback::from(move |_: MouseEvent| {
            log::trace!("card {} clicked", id);
            callback.emit(id);
        })
    });

    html! {
        <div {class} {onclick}>{label}</div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Initial grid size
    #[arg(long)]
    pub size: Option<game::Coord>,

    /// Initial move limit, 0 for unlimited
    #[arg(long)]
    pub max_moves: Option<game::MoveCount>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    config: game::GameConfig,
    engine: game::PlayEngine,
    forced_seed: Option<u64>,
    mismatch_timer: MismatchTimer,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    /// Replaces the whole session and cancels the pending turn-down.
    fn deal(&mut self) {
        if let Some(pending) = self.mismatch_timer.cancel() {
            log::debug!("cancelled clear of {:?}", pending.cards());
        }
        let seed = self.next_seed();
        self.engine.initialize(self.config, seed);
        log::debug!("dealt {:?} with seed {}", self.config, seed);
        self.trace_snapshot();
    }

    fn flip_card(&mut self, ctx: &Context<Self>, id: game::CardId) -> bool {
        use game::FlipOutcome::*;

        let outcome = self.engine.flip(id);
        match outcome {
            Ok(Mismatched(pending)) => self.schedule_clear(ctx, pending),
            Ok(Won) => log::info!("won in {} moves", self.engine.move_count()),
            Ok(_) => {}
            Err(err) => log::debug!("flip {} rejected: {}", id, err),
        }
        if ran_out_of_moves(&outcome, &self.engine) {
            log::info!("out of moves after {}", self.engine.move_count());
        }

        let updated = outcome.has_update();
        if updated {
            self.trace_snapshot();
        }
        updated
    }

    fn schedule_clear(&mut self, ctx: &Context<Self>, pending: game::PendingClear) {
        let link = ctx.link().clone();
        self.mismatch_timer
            .schedule(pending, move |pending| link.send_message(Msg::ClearMismatch(pending)));
    }

    fn clear_mismatch(&mut self, pending: game::PendingClear) -> bool {
        self.mismatch_timer.fired(pending);
        let outcome = self.engine.clear_mismatch(pending);
        if let Err(err) = outcome {
            log::debug!("clear skipped: {}", err);
        }
        outcome.has_update()
    }

    fn trace_snapshot(&self) {
        if log::log_enabled!(log::Level::Trace) {
            let snapshot = game::Snapshot::from_engine(&self.engine);
            match serde_json::to_string(&snapshot) {
                Ok(json) => log::trace!("state: {}", json),
                Err(err) => log::error!("failed to serialize state: {:?}", err),
            }
        }
    }

    fn grid_style(side: game::Coord) -> String {
        format!(
            "grid-template-columns: repeat({side}, minmax(0, 1fr)); width: min(100%, {}rem)",
            f32::from(side) * 5.5
        )
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let defaults = game::GameConfig::default();
        let config = game::GameConfig::new(
            props.size.unwrap_or(defaults.side),
            props.max_moves.unwrap_or(defaults.max_moves),
        );
        let forced_seed = props.seed;
        let seed = forced_seed.unwrap_or_else(js_random_seed);

        Self {
            config,
            engine: game::PlayEngine::deal(config, seed),
            forced_seed,
            mismatch_timer: MismatchTimer::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClick(id) => self.flip_card(ctx, id),
            ClearMismatch(pending) => self.clear_mismatch(pending),
            SetGridSize(_) | SetMaxMoves(_) | Reset => {
                let (config, redeal) = next_config(self.config, &msg);
                // a clamped size still has to re-render the field
                let clamped = matches!(msg, SetGridSize(side) if side != config.side);
                let changed = config != self.config;
                self.config = config;
                if redeal {
                    self.deal();
                } else if changed {
                    log::debug!("move limit {} applies from the next deal", config.max_moves);
                }
                redeal || changed || clamped
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;

        let engine = &self.engine;
        let side = engine.side();
        let state = ViewGameState::from_engine(engine);
        let callback = ctx.link().callback(Msg::CardClick);
        let on_side = ctx.link().callback(Msg::SetGridSize);
        let on_max_moves = ctx.link().callback(Msg::SetMaxMoves);

        let moves = format_moves(engine).map(|moves| {
            html! {
                <div class="moves"><strong>{"Moves"}</strong>{": "}{moves}</div>
            }
        });

        let banner = match state {
            ViewGameState::Won => Some(html! { <div class="banner win">{"You Won"}</div> }),
            ViewGameState::GameOver => {
                Some(html! { <div class="banner lose">{"Game Over"}</div> })
            }
            ViewGameState::Ready | ViewGameState::Active => None,
        };

        let reset = reset_label(engine).map(|label| {
            let onclick = ctx.link().callback(|_: MouseEvent| Msg::Reset);
            html! {
                <button class={classes!("reset", state.class())} {onclick}>{label}</button>
            }
        });

        html! {
            <div class={classes!("pairs", state.class())}>
                <h1>{"Memory Game"}</h1>
                <SettingsView config={self.config} {on_side} {on_max_moves}/>
                {moves}
                <div class="grid" style={GameView::grid_style(side)}>
                    {
                        for engine.deck().iter_slots().map(|(coords, slot)| {
                            let face = engine.face_at(coords);
                            let locked = slot.card_id().map_or(true, |id| !engine.can_flip(id));
                            let callback = callback.clone();
                            html! {
                                <CardView {slot} {face} {locked} {callback}/>
                            }
                        })
                    }
                </div>
                {banner}
                {reset}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(side: game::Coord, values: &[game::PairValue], max_moves: u32) -> game::PlayEngine {
        game::PlayEngine::new(game::Deck::from_values(side, values).unwrap(), max_moves)
    }

    fn id(raw: game::CardCount) -> game::CardId {
        game::CardId::new(raw)
    }

    #[test]
    fn reset_button_appears_after_first_pair_and_on_game_over() {
        let mut engine = engine(2, &[1, 2, 1, 2], 0);
        assert_eq!(reset_label(&engine), None);

        engine.flip(id(0)).unwrap();
        engine.flip(id(2)).unwrap();
        assert_eq!(reset_label(&engine), Some("Reset"));

        engine.flip(id(1)).unwrap();
        engine.flip(id(3)).unwrap();
        assert_eq!(reset_label(&engine), Some("Play Again"));
    }

    #[test]
    fn out_of_moves_maps_to_game_over() {
        let mut engine = engine(2, &[1, 2, 1, 2], 1);
        engine.flip(id(0)).unwrap();

        let state = ViewGameState::from_engine(&engine);
        assert_eq!(state, ViewGameState::GameOver);
        assert_eq!(state.class(), "lose");
        assert_eq!(reset_label(&engine), Some("Play Again"));
        assert_eq!(format_moves(&engine).as_deref(), Some("1/1"));
    }

    #[test]
    fn move_counter_is_hidden_without_limit() {
        let engine = engine(2, &[1, 2, 1, 2], 0);

        assert_eq!(format_moves(&engine), None);
    }

    #[test]
    fn rejected_transitions_have_no_update() {
        let mut engine = engine(2, &[1, 2, 1, 2], 0);

        assert!(engine.flip(id(0)).has_update());
        assert!(!engine.flip(id(0)).has_update());
        assert!(!engine.flip(id(9)).has_update());

        let pending = engine.flip(id(1)).unwrap().pending_clear().unwrap();
        assert!(!engine.flip(id(2)).has_update());

        engine.initialize(game::GameConfig::new(2, 0), 1);
        assert!(!engine.clear_mismatch(pending).has_update());
    }

    #[test]
    fn grid_style_scales_with_side() {
        assert_eq!(
            GameView::grid_style(4),
            "grid-template-columns: repeat(4, minmax(0, 1fr)); width: min(100%, 22rem)"
        );
    }

    #[test]
    fn max_moves_change_waits_for_next_deal() {
        let mut config = game::GameConfig::new(2, 0);
        let mut engine = game::PlayEngine::deal(config, 1);

        let (next, redeal) = next_config(config, &Msg::SetMaxMoves(6));
        assert!(!redeal);
        assert_eq!(next, game::GameConfig::new(2, 6));
        config = next;
        assert_eq!(engine.max_moves(), 0);

        let (next, redeal) = next_config(config, &Msg::Reset);
        assert!(redeal);
        engine.initialize(next, 2);
        assert_eq!(engine.max_moves(), 6);
    }

    #[test]
    fn clamped_grid_size_equal_to_current_does_not_redeal() {
        let config = game::GameConfig::new(2, 3);

        let (next, redeal) = next_config(config, &Msg::SetGridSize(1));
        assert_eq!(next, config);
        assert!(!redeal);

        let (next, redeal) = next_config(config, &Msg::SetGridSize(2));
        assert_eq!(next, config);
        assert!(!redeal);
    }

    #[test]
    fn new_grid_size_redeals_and_keeps_move_limit() {
        let config = game::GameConfig::new(2, 3);

        let (next, redeal) = next_config(config, &Msg::SetGridSize(4));
        assert_eq!(next, game::GameConfig::new(4, 3));
        assert!(redeal);

        let (next, redeal) = next_config(config, &Msg::SetGridSize(200));
        assert_eq!(next.side, game::GameConfig::MAX_SIDE);
        assert!(redeal);
    }

    #[test]
    fn card_messages_leave_config_alone() {
        let config = game::GameConfig::new(3, 0);

        assert_eq!(next_config(config, &Msg::CardClick(id(0))), (config, false));
    }

    #[test]
    fn running_out_of_moves_is_reported_once() {
        let mut engine = engine(2, &[1, 2, 1, 2], 1);

        let outcome = engine.flip(id(0));
        assert!(ran_out_of_moves(&outcome, &engine));

        let outcome = engine.flip(id(1));
        assert!(!ran_out_of_moves(&outcome, &engine));
    }

    #[test]
    fn winning_on_the_last_move_is_not_out_of_moves() {
        let mut engine = engine(2, &[1, 1, 2, 2], 4);
        engine.flip(id(0)).unwrap();
        engine.flip(id(1)).unwrap();
        engine.flip(id(2)).unwrap();

        let outcome = engine.flip(id(3));
        assert!(!ran_out_of_moves(&outcome, &engine));
    }
}
