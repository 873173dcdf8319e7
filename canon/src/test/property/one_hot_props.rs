//! Property tests for `OneHotEncoder` membership synthesis.

use proptest::prelude::*;

use onnx_canon_ir::op::attr;
use onnx_canon_ir::{RewriteContext, Rule, TensorData};

use crate::attrs::{Categories, one_hot_membership};
use crate::rules::OneHotEncoderAttributeSynthesis;
use crate::test::helpers::one_hot_over_int;

fn arb_categories() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(-50i64..50, 0..8).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn membership_has_category_length(cats in arb_categories(), value in -60i64..60) {
        let membership = one_hot_membership(Some(&TensorData::scalar_i64(value)), &Categories::Int64s(&cats));
        prop_assert_eq!(membership.len(), cats.len());

        let hot: Vec<usize> = membership.iter().enumerate().filter(|(_, m)| **m == 1.0).map(|(i, _)| i).collect();
        match cats.iter().position(|&c| c == value) {
            Some(slot) => prop_assert_eq!(hot, vec![slot]),
            None => prop_assert!(hot.is_empty()),
        }
        prop_assert!(membership.iter().all(|&m| m == 0.0 || m == 1.0));
    }

    #[test]
    fn rule_applies_iff_value_is_a_category(cats in arb_categories(), value in -60i64..60) {
        let encoder = one_hot_over_int(value, &cats);
        let result = OneHotEncoderAttributeSynthesis.rewrite(&encoder, &mut RewriteContext::default()).unwrap();

        prop_assert_eq!(result.is_some(), cats.contains(&value));
        if let Some(rewritten) = result {
            let membership = rewritten.attributes().floats(attr::MEMBERSHIP).unwrap().unwrap();
            prop_assert_eq!(membership.len(), cats.len());
            prop_assert!(!OneHotEncoderAttributeSynthesis.matches(&rewritten));
        }
    }
}
