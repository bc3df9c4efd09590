use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{PokemonSummary, PokemonTypes};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    PokemonDidLoad(Vec<PokemonSummary>),
    PokemonDidError(String),

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,

    ScrollBy(i32),
    ScrollToTop,
    ScrollToBottom,

    /// Move the card cursor by a signed number of cards
    CursorMove(i32),

    CompareStart,
    CardActivate(String),
    CompareDetailDidLoad { name: String, detail: PokemonTypes },
    CompareDetailDidError { name: String, error: String },

    SpriteDidLoad { id: u32, sprite: SpriteData },
    SpriteDidError { id: u32, error: String },

    UiTerminalResize(u16, u16),
    /// Advances a running scroll animation
    Tick,
    Quit,
}
