// File: src/consolidate/merge.rs
//! The single merge policy used by every consolidation step: a word's
//! definitions are the union of all variants ever seen for it.

use crate::core::types::{DefinitionMap, Population, RawWordRecord, VARIANT_SEPARATOR};
use std::collections::BTreeSet;

/// Trimmed, non-empty variant tokens of a definition string.
pub fn split_variants(definition: &str) -> BTreeSet<String> {
    definition
        .split(VARIANT_SEPARATOR)
        .map(str::trim)
        .filter(|variant| !variant.is_empty())
        .map(str::to_string)
        .collect()
}

/// Adds `variants` to `word`'s entry.
pub fn absorb(map: &mut DefinitionMap, word: String, variants: BTreeSet<String>) {
    map.entry(word).or_default().extend(variants);
}

/// Union of two stores, word by word. Order of arguments does not matter.
pub fn merge(mut existing: DefinitionMap, incoming: DefinitionMap) -> DefinitionMap {
    for (word, variants) in incoming {
        absorb(&mut existing, word, variants);
    }
    existing
}

/// Plain and affix stores built from raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Populations {
    pub plain: DefinitionMap,
    pub affix: DefinitionMap,
}

impl Populations {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RawWordRecord>) -> Self {
        let mut populations = Self::default();
        for record in records {
            let target = populations.get_mut(Population::of(&record.word));
            absorb(
                target,
                record.word.clone(),
                split_variants(&record.definition_text),
            );
        }
        populations
    }

    pub fn get(&self, population: Population) -> &DefinitionMap {
        match population {
            Population::Plain => &self.plain,
            Population::Affix => &self.affix,
        }
    }

    pub fn get_mut(&mut self, population: Population) -> &mut DefinitionMap {
        match population {
            Population::Plain => &mut self.plain,
            Population::Affix => &mut self.affix,
        }
    }

    /// Merges each population with its counterpart only.
    pub fn merge(self, incoming: Populations) -> Populations {
        Populations {
            plain: merge(self.plain, incoming.plain),
            affix: merge(self.affix, incoming.affix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SourceLocation;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn map(entries: &[(&str, &str)]) -> DefinitionMap {
        entries
            .iter()
            .map(|(word, variants)| (word.to_string(), split_variants(variants)))
            .collect()
    }

    fn record(word: &str, definition: &str) -> RawWordRecord {
        RawWordRecord {
            word: word.into(),
            definition_text: definition.into(),
            location: SourceLocation {
                file: PathBuf::from("test.txt"),
                line: 1,
            },
        }
    }

    #[test]
    fn test_merge_is_commutative_union() {
        let left = map(&[("w", "a、b")]);
        let right = map(&[("w", "b、c")]);
        let expected = map(&[("w", "a、b、c")]);
        assert_eq!(merge(left.clone(), right.clone()), expected);
        assert_eq!(merge(right, left), expected);
    }

    #[test]
    fn test_merge_keeps_unrelated_words() {
        let merged = merge(map(&[("a", "1")]), map(&[("b", "2")]));
        assert_eq!(merged, map(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_split_variants_trims_and_dedups() {
        let variants: Vec<String> = split_variants(" 跑 、奔跑、跑、 ").into_iter().collect();
        assert_eq!(variants, vec!["奔跑", "跑"]);
    }

    #[test]
    fn test_populations_never_mix() {
        let records = [
            record("pre-", "之前"),
            record("run", "跑"),
            record("run", "奔跑"),
            record("-tion", "名詞"),
        ];
        let populations = Populations::from_records(&records);
        assert_eq!(populations.plain, map(&[("run", "奔跑、跑")]));
        assert_eq!(populations.affix, map(&[("-tion", "名詞"), ("pre-", "之前")]));
    }
}
