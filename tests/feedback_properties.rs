use codebreaker::engines::evaluation::compute;
use codebreaker::{Alphabet, Code, Feedback};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rgby() -> Alphabet {
    Alphabet::from_names(vec!["R".into(), "G".into(), "B".into(), "Y".into()]).unwrap()
}

#[test]
fn test_documented_examples() {
    let alphabet = rgby();
    let secret = alphabet.parse_code("RGBY").unwrap();

    assert_eq!(
        compute(&alphabet.parse_code("RRBY").unwrap(), &secret),
        Feedback::new(3, 0)
    );
    assert_eq!(
        compute(&alphabet.parse_code("GRYB").unwrap(), &secret),
        Feedback::new(0, 4)
    );
}

#[test]
fn test_random_codes_properties() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..2000 {
        let length = rng.gen_range(1..9);
        let colors = rng.gen_range(1..12u8);
        let a = Code::from_indices(&(0..length).map(|_| rng.gen_range(0..colors)).collect::<Vec<_>>());
        let b = Code::from_indices(&(0..length).map(|_| rng.gen_range(0..colors)).collect::<Vec<_>>());

        assert_eq!(compute(&a, &a), Feedback::new(length, 0));

        let ab = compute(&a, &b);
        assert_eq!(ab, compute(&b, &a));
        assert!(ab.exact + ab.wrong <= length);
    }
}

#[test]
fn test_independent_of_residual_order() {
    // Same residual multisets, different arrangement.
    let reference = Code::from_indices(&[0, 1, 2, 3, 4]);
    let first = compute(&Code::from_indices(&[0, 2, 3, 1, 5]), &reference);
    let second = compute(&Code::from_indices(&[0, 3, 1, 2, 5]), &reference);
    assert_eq!(first, Feedback::new(1, 3));
    assert_eq!(first, second);
}
