pub mod compare_panel;
pub mod list_view;
pub mod pokemon_card;
pub mod pokemon_grid;
pub mod search_bar;
pub mod theme;

pub use tui_dispatch::Component;

pub use compare_panel::{ComparePanel, ComparePanelProps};
pub use list_view::{PokemonListView, PokemonListViewProps};
pub use pokemon_card::{format_name, PokemonCard, PokemonCardProps};
pub use pokemon_grid::{PokemonGrid, PokemonGridProps};
pub use search_bar::{SearchBar, SearchBarProps};
