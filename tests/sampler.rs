//! Question Sampler Integration Tests
//!
//! Randomized properties checked over many seeded trials.

use artquiz::core::QuestionSampler;
use artquiz::Painting;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn paintings(artists: &[&str]) -> Vec<Painting> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| Painting::new(*a, format!("https://img/{i}.jpg")))
        .collect()
}

#[test]
fn test_no_immediate_repeat_over_many_draws() {
    let paintings = paintings(&["A", "B", "C", "A", "D"]);
    let pool: Vec<&Painting> = paintings.iter().collect();
    let sampler = QuestionSampler::default();
    let mut rng = StdRng::seed_from_u64(42);

    let mut last = None;
    for _ in 0..1000 {
        let (index, painting) = sampler.pick_painting(&mut rng, &pool, last).unwrap();
        assert_ne!(Some(index), last);
        assert!(std::ptr::eq(painting, pool[index]));
        last = Some(index);
    }
}

#[test]
fn test_choices_contain_correct_and_are_distinct() {
    let paintings = paintings(&["A", "B", "C", "D", "E", "F", "G", "A", "B"]);
    let pool: Vec<&Painting> = paintings.iter().collect();
    let sampler = QuestionSampler::default();

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (_, painting) = sampler.pick_painting(&mut rng, &pool, None).unwrap();
        let choices = sampler.build_choices(&mut rng, &painting.artist, &pool);

        assert_eq!(choices.len(), 4);
        assert!(choices.contains(&painting.artist));

        let mut unique = choices.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), choices.len());
    }
}

#[test]
fn test_choice_count_is_capped_by_distinct_artists() {
    for (artists, expected) in [
        (vec!["A"], 1),
        (vec!["A", "B"], 2),
        (vec!["A", "B", "A", "C"], 3),
        (vec!["A", "B", "C", "D", "E"], 4),
    ] {
        let paintings = paintings(&artists);
        let pool: Vec<&Painting> = paintings.iter().collect();
        let mut rng = StdRng::seed_from_u64(5);

        let choices = QuestionSampler::default().build_choices(&mut rng, "A", &pool);
        assert_eq!(choices.len(), expected, "pool {:?}", artists);
        assert!(choices.contains(&"A".to_string()));
    }
}

#[test]
fn test_choices_are_shuffled() {
    let paintings = paintings(&["A", "B", "C", "D"]);
    let pool: Vec<&Painting> = paintings.iter().collect();
    let sampler = QuestionSampler::default();

    let first_positions: std::collections::HashSet<usize> = (0..50)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let choices = sampler.build_choices(&mut rng, "A", &pool);
            choices.iter().position(|c| c == "A").unwrap()
        })
        .collect();

    assert!(first_positions.len() > 1);
}
