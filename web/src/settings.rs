use crate::utils::parse_number;
use pairs_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub config: game::GameConfig,
    pub on_side: Callback<game::Coord>,
    pub on_max_moves: Callback<game::MoveCount>,
}

/// Grid size and move limit inputs. Sizes outside the supported range are clamped by the receiver.
#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        config,
        on_side,
        on_max_moves,
    } = props;

    let oninput_side = {
        let on_side = on_side.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(side) = parse_number::<u32>(&input.value()) {
                let side = game::Coord::try_from(side).unwrap_or(game::Coord::MAX);
                log::trace!("grid size input: {}", side);
                on_side.emit(side);
            }
        })
    };

    let oninput_max_moves = {
        let on_max_moves = on_max_moves.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(max_moves) = parse_number::<game::MoveCount>(&input.value()) {
                log::trace!("max moves input: {}", max_moves);
                on_max_moves.emit(max_moves);
            }
        })
    };

    html! {
        <fieldset class="settings">
            <label for="grid-size">{"Grid Size"}</label>
            <input
                id="grid-size"
                type="number"
                min={game::GameConfig::MIN_SIDE.to_string()}
                max={game::GameConfig::MAX_SIDE.to_string()}
                value={config.side.to_string()}
                oninput={oninput_side}
            />
            <label for="max-move">{"Max Moves (0 for unlimited)"}</label>
            <input
                id="max-move"
                type="number"
                min="0"
                value={config.max_moves.to_string()}
                oninput={oninput_max_moves}
            />
        </fieldset>
    }
}
