use proptest::prelude::*;
use proptest::test_runner::Config;
use shared::{BloodType, Donor, DonorFilter, ExpiryBucket};

fn blood_type() -> impl Strategy<Value = BloodType> {
    prop::sample::select(BloodType::ALL.to_vec())
}

fn donor() -> impl Strategy<Value = Donor> {
    (1_u32..500, "[A-Za-z]{1,8}", "[A-Za-z]{1,8}", blood_type()).prop_map(
        |(donor_id, first_name, last_name, blood_type)| Donor {
            donor_id,
            first_name,
            last_name,
            blood_type,
            phone_num: "555-0100".to_string(),
            last_donated_date: None,
            drive_id: None,
        },
    )
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn expiry_bucket_thresholds_are_exclusive(days in -1_000_i64..1_000_i64) {
        let expected = if days < 0 {
            ExpiryBucket::Expired
        } else if days <= 1 {
            ExpiryBucket::Critical
        } else if days <= 7 {
            ExpiryBucket::Warning
        } else {
            ExpiryBucket::Good
        };
        prop_assert_eq!(ExpiryBucket::from_days(days), expected);
    }

    #[test]
    fn donor_filter_is_idempotent(
        donors in prop::collection::vec(donor(), 0..40),
        search in "[A-Za-z0-9]{0,3}",
        choice in prop::option::of(blood_type()),
    ) {
        let filter = DonorFilter { search, blood_type: choice };
        let once: Vec<Donor> = filter.apply(&donors).into_iter().cloned().collect();
        let twice: Vec<Donor> = filter.apply(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn donor_filter_is_conjunction(
        donors in prop::collection::vec(donor(), 0..40),
        search in "[A-Za-z]{0,3}",
        choice in blood_type(),
    ) {
        let by_search = DonorFilter { search: search.clone(), blood_type: None };
        let by_type = DonorFilter { search: String::new(), blood_type: Some(choice) };
        let both = DonorFilter { search, blood_type: Some(choice) };

        for donor in &donors {
            prop_assert_eq!(
                both.matches(donor),
                by_search.matches(donor) && by_type.matches(donor)
            );
        }
    }
}

#[test]
fn o_negative_lee_only_returns_o_negative_lees() {
    let donors = vec![
        Donor {
            donor_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lee".to_string(),
            blood_type: BloodType::ONegative,
            phone_num: "555-0101".to_string(),
            last_donated_date: None,
            drive_id: None,
        },
        Donor {
            donor_id: 2,
            first_name: "Lee".to_string(),
            last_name: "Ng".to_string(),
            blood_type: BloodType::OPositive,
            phone_num: "555-0102".to_string(),
            last_donated_date: None,
            drive_id: None,
        },
        Donor {
            donor_id: 3,
            first_name: "Sam".to_string(),
            last_name: "Park".to_string(),
            blood_type: BloodType::ONegative,
            phone_num: "555-0103".to_string(),
            last_donated_date: None,
            drive_id: None,
        },
    ];
    let filter = DonorFilter {
        search: "Lee".to_string(),
        blood_type: Some(BloodType::ONegative),
    };

    let matched = filter.apply(&donors);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].donor_id, 1);
}
