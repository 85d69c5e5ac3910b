//! Property checks for the pass/fail and letter-grade rules.
//!
//! Increase cases locally with: PROPTEST_CASES=2000 cargo test --test grade_properties

use std::env;

use gradebookd::calc::{
    derive, result_and_grade, Grade, Outcome, SubjectScores, PASS_MARK, SCORE_LIMIT,
};
use proptest::prelude::*;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(256);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

fn passing_scores() -> impl Strategy<Value = [i64; 6]> {
    prop::array::uniform6(PASS_MARK..=100i64)
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn any_score_below_pass_mark_fails(
        mut v in prop::array::uniform6(0i64..=100),
        idx in 0usize..6,
        low in 0i64..PASS_MARK,
    ) {
        v[idx] = low;
        let got = result_and_grade(&SubjectScores::from_array(v));
        prop_assert_eq!(got, (Outcome::Fail, Grade::F));
    }

    #[test]
    fn passing_scores_are_banded_by_average(v in passing_scores()) {
        let (result, grade) = result_and_grade(&SubjectScores::from_array(v));
        prop_assert_eq!(result, Outcome::Pass);

        // Compare on the integer sum to avoid float edges: avg >= 75 <=> sum >= 450.
        let sum: i64 = v.iter().sum();
        let expected = if sum >= 450 {
            Grade::A
        } else if sum >= 300 {
            Grade::B
        } else {
            Grade::C
        };
        prop_assert_eq!(grade, expected);
    }

    #[test]
    fn total_is_the_plain_sum(v in prop::array::uniform6(0i64..=100)) {
        let d = derive(&SubjectScores::from_array(v));
        prop_assert_eq!(d.map(|d| d.total), Some(v.iter().sum::<i64>()));
    }

    #[test]
    fn in_range_scores_always_have_a_total(
        v in prop::array::uniform6(-SCORE_LIMIT..=SCORE_LIMIT),
    ) {
        let scores = SubjectScores::from_array(v);
        prop_assert_eq!(scores.out_of_range(), None);
        let wide: i128 = v.iter().map(|&m| i128::from(m)).sum();
        let d = derive(&scores);
        prop_assert_eq!(d.map(|d| i128::from(d.total)), Some(wide));
    }
}
