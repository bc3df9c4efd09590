//! Search filter over the fetched collection

use crate::state::PokemonSummary;

/// True when `entry` should stay visible for `term`.
///
/// Names compare case-insensitively; the id compares as its decimal string,
/// so `"1"` also matches `#10`, `#21`, `#100`.
pub fn matches(entry: &PokemonSummary, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(&term.to_lowercase()) || entry.id.to_string().contains(term)
}

/// Matching records in their original order.
pub fn filter_pokemon<'a>(collection: &'a [PokemonSummary], term: &str) -> Vec<&'a PokemonSummary> {
    collection
        .iter()
        .filter(|entry| matches(entry, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dex() -> Vec<PokemonSummary> {
        vec![
            PokemonSummary::new(1, "Bulbasaur"),
            PokemonSummary::new(4, "charmander"),
            PokemonSummary::new(7, "squirtle"),
            PokemonSummary::new(12, "butterfree"),
            PokemonSummary::new(25, "pikachu"),
        ]
    }

    fn names<'a>(entries: &[&'a PokemonSummary]) -> Vec<&'a str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn empty_term_is_identity() {
        let dex = dex();
        let all: Vec<&PokemonSummary> = dex.iter().collect();
        assert_eq!(filter_pokemon(&dex, ""), all);
    }

    #[test]
    fn empty_collection_yields_nothing() {
        assert!(filter_pokemon(&[], "pika").is_empty());
        assert!(filter_pokemon(&[], "").is_empty());
    }

    #[test]
    fn name_match_ignores_case() {
        let dex = dex();
        assert_eq!(names(&filter_pokemon(&dex, "bulb")), vec!["Bulbasaur"]);
        assert_eq!(names(&filter_pokemon(&dex, "BULB")), vec!["Bulbasaur"]);
        assert_eq!(names(&filter_pokemon(&dex, "CHAR")), vec!["charmander"]);
    }

    #[test]
    fn id_match_is_substring_of_decimal() {
        let dex = dex();
        assert_eq!(names(&filter_pokemon(&dex, "1")), vec!["Bulbasaur", "butterfree"]);
        assert_eq!(names(&filter_pokemon(&dex, "2")), vec!["butterfree", "pikachu"]);
        assert!(!filter_pokemon(&dex, "2")
            .iter()
            .any(|entry| entry.name == "Bulbasaur"));
    }

    #[test]
    fn name_or_id_either_matches() {
        let dex = dex();
        // "u" hits several names, "25" only the id of pikachu
        assert_eq!(names(&filter_pokemon(&dex, "25")), vec!["pikachu"]);
        assert_eq!(
            names(&filter_pokemon(&dex, "u")),
            vec!["Bulbasaur", "squirtle", "butterfree", "pikachu"]
        );
    }

    #[test]
    fn term_is_not_trimmed() {
        let dex = dex();
        assert!(filter_pokemon(&dex, " pika").is_empty());
    }

    #[test]
    fn result_preserves_relative_order() {
        let dex = dex();
        for term in ["", "a", "e", "1", "r", "zz"] {
            let result = filter_pokemon(&dex, term);
            let positions: Vec<usize> = result
                .iter()
                .map(|entry| dex.iter().position(|other| other == *entry).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            assert_eq!(positions, sorted, "term {term:?}");
        }
    }
}
