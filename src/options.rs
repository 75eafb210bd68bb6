use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::session::Direction;
use crate::vocab::WordEntry;

/// Number of wrong options shown next to the correct one
pub const DISTRACTOR_COUNT: usize = 3;

/// Build the shuffled option list for `pool[target]`.
///
/// Distractors come from the session pool only. Entries that are another sense
/// of the target word (or share its meaning when asking for the term) are never
/// offered, since they would also be correct. With fewer than three unique
/// distractors available, distractors are drawn with replacement so the list
/// still has four slots; with none at all, only the correct answer is returned.
pub fn generate_options<R: Rng + ?Sized>(
    pool: &[WordEntry],
    target: usize,
    direction: Direction,
    rng: &mut R,
) -> Vec<String> {
    let target_entry = &pool[target];
    let correct = direction.answer_of(target_entry).trim();

    let candidates: Vec<&str> = pool
        .iter()
        .filter(|e| !is_same_word(e, target_entry, direction))
        .map(|e| direction.answer_of(e).trim())
        .filter(|value| !value.is_empty() && *value != correct)
        .unique()
        .collect();

    let mut options: Vec<String> = if candidates.len() >= DISTRACTOR_COUNT {
        candidates
            .choose_multiple(rng, DISTRACTOR_COUNT)
            .map(|s| s.to_string())
            .collect()
    } else if candidates.is_empty() {
        Vec::new()
    } else {
        (0..DISTRACTOR_COUNT)
            .filter_map(|_| candidates.choose(rng))
            .map(|s| s.to_string())
            .collect()
    };

    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

fn is_same_word(entry: &WordEntry, target: &WordEntry, direction: Direction) -> bool {
    match direction {
        Direction::TermToMeaning => entry.term.trim() == target.term.trim(),
        Direction::MeaningToTerm => entry.meaning.trim() == target.meaning.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn distinct_pool(n: u32) -> Vec<WordEntry> {
        (1..=n)
            .map(|i| WordEntry::new(i, format!("語{i}"), format!("意味{i}")))
            .collect()
    }

    fn count_of(options: &[String], value: &str) -> usize {
        options.iter().filter(|o| *o == value).count()
    }

    #[test]
    fn test_four_distinct_options_from_large_pool() {
        let pool = distinct_pool(10);
        let mut rng = rng();
        for target in 0..pool.len() {
            let options = generate_options(&pool, target, Direction::TermToMeaning, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(count_of(&options, &pool[target].meaning), 1);
            assert_eq!(options.iter().unique().count(), 4);
            assert!(options
                .iter()
                .all(|o| pool.iter().any(|e| e.meaning == *o)));
        }
    }

    #[test]
    fn test_meaning_to_term_offers_terms() {
        let pool = distinct_pool(6);
        let options = generate_options(&pool, 2, Direction::MeaningToTerm, &mut rng());
        assert_eq!(options.len(), 4);
        assert_eq!(count_of(&options, "語3"), 1);
        assert!(options.iter().all(|o| o.starts_with('語')));
    }

    #[test]
    fn test_two_distinct_meanings_still_yields_four_options() {
        let pool = vec![
            WordEntry::new(1, "うつくし", "かわいらしい"),
            WordEntry::new(2, "らうたし", "かわいらしい"),
            WordEntry::new(3, "をかし", "趣がある"),
            WordEntry::new(4, "あはれなり", "趣がある"),
        ];
        let mut rng = rng();
        for target in 0..pool.len() {
            let options = generate_options(&pool, target, Direction::TermToMeaning, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(count_of(&options, &pool[target].meaning), 1);
        }
    }

    #[test]
    fn test_single_answer_value_gives_single_option() {
        let pool = vec![
            WordEntry::new(1, "うつくし", "かわいらしい"),
            WordEntry::new(2, "らうたし", "かわいらしい"),
        ];
        let options = generate_options(&pool, 0, Direction::TermToMeaning, &mut rng());
        assert_eq!(options, vec!["かわいらしい".to_string()]);
    }

    #[test]
    fn test_single_entry_pool() {
        let pool = distinct_pool(1);
        let options = generate_options(&pool, 0, Direction::MeaningToTerm, &mut rng());
        assert_eq!(options, vec!["語1".to_string()]);
    }

    #[test]
    fn test_other_senses_of_target_are_not_distractors() {
        let pool = vec![
            WordEntry::new(1, "あやし", "不思議だ"),
            WordEntry::new(1, "あやし", "身分が低い"),
            WordEntry::new(2, "をかし", "趣がある"),
            WordEntry::new(3, "いみじ", "並々でない"),
            WordEntry::new(4, "ありく", "歩き回る"),
        ];
        let mut rng = rng();
        for _ in 0..20 {
            let options = generate_options(&pool, 0, Direction::TermToMeaning, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(count_of(&options, "不思議だ"), 1);
            assert_eq!(count_of(&options, "身分が低い"), 0);
        }
    }

    #[test]
    fn test_synonyms_are_not_term_distractors() {
        let pool = vec![
            WordEntry::new(1, "うつくし", "かわいらしい"),
            WordEntry::new(2, "らうたし", "かわいらしい"),
            WordEntry::new(3, "をかし", "趣がある"),
        ];
        let mut rng = rng();
        for _ in 0..20 {
            let options = generate_options(&pool, 0, Direction::MeaningToTerm, &mut rng);
            assert_eq!(count_of(&options, "らうたし"), 0);
            assert_eq!(count_of(&options, "うつくし"), 1);
            assert_eq!(options.len(), 4);
        }
    }

    #[test]
    fn test_blank_values_are_never_offered() {
        let pool = vec![
            WordEntry::new(1, "あはれなり", "しみじみとした趣"),
            WordEntry::new(2, "をかし", "   "),
            WordEntry::new(3, "いみじ", "並々でない"),
        ];
        let mut rng = rng();
        for _ in 0..20 {
            let options = generate_options(&pool, 0, Direction::TermToMeaning, &mut rng);
            assert!(options.iter().all(|o| !o.trim().is_empty()));
        }
    }

    #[test]
    fn test_duplicate_values_are_deduplicated_before_sampling() {
        let pool = vec![
            WordEntry::new(1, "a", "target"),
            WordEntry::new(2, "b", "same"),
            WordEntry::new(3, "c", "same"),
            WordEntry::new(4, "d", "same"),
            WordEntry::new(5, "e", "other"),
            WordEntry::new(6, "f", "third"),
        ];
        let mut rng = rng();
        for _ in 0..20 {
            let options = generate_options(&pool, 0, Direction::TermToMeaning, &mut rng);
            assert_eq!(options.iter().unique().count(), 4);
        }
    }
}
