//! Property tests: read-after-write, overflow policies, atomic failure and
//! rebuild purity over the player and account fixtures

use proptest::prelude::*;
use scalpel::{
    coerce, get_field, rebuild_field, set_field, FieldSetter, OverflowPolicy, Scalar, ScalarKind,
    SetOptions,
};
use scalpel_test_utils::{create_test_account, create_test_player};

proptest! {
    #[test]
    fn prop_set_then_read_equals_coerced(value in any::<i64>()) {
        let raw = value.to_string();
        let mut player = create_test_player();
        set_field(&mut player, &["Sign", "Day"], &raw).unwrap();

        let expected = coerce(&raw, ScalarKind::I32, OverflowPolicy::Truncate).unwrap();
        prop_assert_eq!(get_field(&player, &["Sign", "Day"]).unwrap(), expected);
        prop_assert_eq!(player.sign.day, value as i32);
    }

    #[test]
    fn prop_narrow_integers_truncate(value in any::<u64>()) {
        let mut account = create_test_account();
        set_field(&mut account, &["profile", "level"], &value.to_string()).unwrap();
        prop_assert_eq!(account.profile.level, value as u8);
    }

    #[test]
    fn prop_reject_policy_accepts_only_in_range(value in any::<i64>()) {
        let setter = FieldSetter::new(SetOptions::new().with_overflow(OverflowPolicy::Reject));
        let mut account = create_test_account();
        let result = setter.set(&mut account, &["profile", "level"], &value.to_string());
        match u8::try_from(value) {
            Ok(level) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(account.profile.level, level);
            }
            Err(_) => {
                prop_assert!(result.unwrap_err().is_type_mismatch());
                prop_assert_eq!(account.profile.level, 3);
            }
        }
    }

    #[test]
    fn prop_finite_floats_round_trip(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let mut account = create_test_account();
        set_field(&mut account, &["profile", "rating"], &value.to_string()).unwrap();
        prop_assert_eq!(account.profile.rating.to_bits(), value.to_bits());
    }

    #[test]
    fn prop_strings_pass_through(value in ".*") {
        let mut player = create_test_player();
        set_field(&mut player, &["Uuid"], &value).unwrap();
        prop_assert_eq!(get_field(&player, &["Uuid"]).unwrap(), Scalar::String(value));
    }

    #[test]
    fn prop_out_of_range_index_leaves_root_unchanged(index in prop_oneof![i64::MIN..0i64, 3i64..i64::MAX]) {
        let index = index.to_string();
        let mut player = create_test_player();
        let err = set_field(&mut player, &["Array", index.as_str()], "9").unwrap_err();
        prop_assert!(err.is_index_out_of_range());
        prop_assert_eq!(player, create_test_player());
    }

    #[test]
    fn prop_rebuild_never_mutates_input(pool in 1i32..=2, reward in 0usize..2, amount in any::<i64>()) {
        let player = create_test_player();
        let path = ["SomeData".to_string(), "Pool".into(), pool.to_string(), "Rewards".into(), reward.to_string(), "Amount".into()];

        let rebuilt = rebuild_field(&player, &path, &amount.to_string()).unwrap();
        prop_assert_eq!(&player, &create_test_player());
        prop_assert_eq!(rebuilt.some_data.pool[&pool].rewards[reward].amount, amount);

        let mut in_place = create_test_player();
        set_field(&mut in_place, &path, &amount.to_string()).unwrap();
        prop_assert_eq!(rebuilt, in_place);
    }
}
