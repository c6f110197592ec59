use rand::Rng;

use crate::domain::cognitive::CognitiveProfile;

/// Lowest score a quick assessment can produce (inclusive).
pub const ASSESSMENT_FLOOR: u32 = 70;
/// Highest score a quick assessment can produce (exclusive).
pub const ASSESSMENT_CEILING: u32 = 100;

/// Scores a quick in-store assessment. Each dimension is drawn uniformly from
/// `ASSESSMENT_FLOOR..ASSESSMENT_CEILING`; questionnaire answers are not weighed yet.
pub fn run_assessment<R: Rng>(rng: &mut R) -> CognitiveProfile {
    let mut sample = || f64::from(rng.gen_range(ASSESSMENT_FLOOR..ASSESSMENT_CEILING));

    CognitiveProfile {
        memory: sample(),
        focus: sample(),
        sleep: sample(),
        energy: sample(),
        mood: sample(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::domain::cognitive::Dimension;

    use super::*;

    #[test]
    fn assessment_scores_fall_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let profile = run_assessment(&mut rng);
            for dimension in Dimension::ORDERED {
                let value = profile.value(dimension);
                assert!((70.0..100.0).contains(&value), "{dimension} = {value}");
                assert_eq!(value.fract(), 0.0);
            }
        }
    }

    #[test]
    fn seeded_assessment_is_reproducible() {
        let first = run_assessment(&mut StdRng::seed_from_u64(42));
        let second = run_assessment(&mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }
}
