//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{PokemonSummary, PokemonTypes};

const SPRITE_URL_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response parse error: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    types: Vec<PokemonTypeSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: TypeName,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeName {
    name: String,
}

/// Sprite image for a national dex id.
pub fn sprite_url(id: u32) -> String {
    format!("{SPRITE_URL_BASE}/{id}.png")
}

/// The first `limit` Pokémon, ordered by id.
pub async fn fetch_all_pokemon(
    api_base: &str,
    limit: u32,
) -> Result<Vec<PokemonSummary>, ApiError> {
    let url = format!("{}/pokemon?limit={limit}", api_base.trim_end_matches('/'));
    let body = fetch_text(&url).await?;
    let entries = parse_pokemon_list(&body)?;
    tracing::info!(count = entries.len(), %url, "pokemon list fetched");
    Ok(entries)
}

/// Id and types of one Pokémon, for the comparison panel.
pub async fn fetch_pokemon_types(api_base: &str, name: &str) -> Result<PokemonTypes, ApiError> {
    let url = format!(
        "{}/pokemon/{}",
        api_base.trim_end_matches('/'),
        name.to_lowercase()
    );
    let body = fetch_text(&url).await?;
    parse_pokemon_types(&body)
}

/// Raw sprite image bytes.
pub async fn fetch_sprite(id: u32) -> Result<Vec<u8>, ApiError> {
    let response = http_client().get(sprite_url(id)).send().await?;
    let response = response.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

pub fn parse_pokemon_list(body: &str) -> Result<Vec<PokemonSummary>, ApiError> {
    let response: ListResponse =
        serde_json::from_str(body).map_err(|err| ApiError::Parse(err.to_string()))?;
    let mut entries: Vec<PokemonSummary> = response
        .results
        .into_iter()
        .filter_map(|entry| match resource_id(&entry.url) {
            Some(id) if !entry.name.is_empty() => Some(PokemonSummary::new(id, entry.name)),
            _ => {
                tracing::warn!(
                    name = %entry.name,
                    url = %entry.url,
                    "skipping list entry without id"
                );
                None
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.id);
    Ok(entries)
}

pub fn parse_pokemon_types(body: &str) -> Result<PokemonTypes, ApiError> {
    let response: PokemonResponse =
        serde_json::from_str(body).map_err(|err| ApiError::Parse(err.to_string()))?;
    Ok(PokemonTypes {
        id: response.id,
        name: response.name,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
    })
}

/// Trailing numeric path segment of a resource URL, e.g. `.../pokemon/25/`.
fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
}

async fn fetch_text(url: &str) -> Result<String, ApiError> {
    let response = http_client().get(url).send().await?;
    let response = response.error_for_status()?;
    Ok(response.text().await?)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
