#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPokemon { api_base: String, limit: u32 },
    LoadCompareDetail { api_base: String, name: String },
    LoadSprite { id: u32 },
    /// Deliver the next animation `Tick` after one frame
    ScheduleTick,
}
