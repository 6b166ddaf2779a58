use glycolens_dashboard::Controller;
use glycolens_dashboard::FilterState;
use glycolens_dashboard::Selection;
use glycolens_dashboard::aggregate::rate_by_group;
use glycolens_dashboard::apply_filters;
use glycolens_dataset::Dataset;
use glycolens_dataset::Gender;
use glycolens_dataset::Race;
use glycolens_dataset::RaceFlags;
use glycolens_dataset::Record;
use proptest::prelude::*;

const STATES: [&str; 3] = ["Texas", "Ohio", "Utah"];
const SMOKING: [&str; 4] = ["never", "current", "former", "No Info"];
const GENDERS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

fn record() -> impl Strategy<Value = Record> {
    (
        0..STATES.len(),
        0..GENDERS.len(),
        0..SMOKING.len(),
        prop::array::uniform5(any::<bool>()),
        any::<bool>(),
        any::<bool>(),
        0.0..90.0f64,
    )
        .prop_map(|(state, gender, smoking, race, heart_disease, diabetes, age)| Record {
            year: 2020,
            gender: GENDERS[gender],
            age,
            location: STATES[state].to_owned(),
            race: RaceFlags::new(race),
            hypertension: heart_disease && diabetes,
            heart_disease,
            smoking_history: SMOKING[smoking].to_owned(),
            bmi: 18.0 + age / 10.0,
            hba1c_level: 5.5,
            blood_glucose_level: 120.0,
            diabetes,
        })
}

fn selection() -> impl Strategy<Value = Selection> {
    prop_oneof![
        (0..STATES.len()).prop_map(|idx| Selection::State(STATES[idx].to_owned())),
        (0..Race::ALL.len()).prop_map(|idx| Selection::Race(Race::ALL[idx])),
        (0..SMOKING.len()).prop_map(|idx| Selection::Smoking(SMOKING[idx].to_owned())),
        (0..GENDERS.len()).prop_map(|idx| Selection::Gender(GENDERS[idx])),
    ]
}

fn filter_state() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(selection(), 0..6).prop_map(|selections| {
        let mut state = FilterState::new();
        for selection in selections {
            state.toggle(selection);
        }
        state
    })
}

proptest! {
    #[test]
    fn toggling_twice_restores_an_unset_dimension(state in filter_state(), selection in selection()) {
        let mut state = state;
        state.clear(selection.dimension());

        let mut toggled = state.clone();
        toggled.toggle(selection.clone());
        toggled.toggle(selection);

        prop_assert_eq!(toggled, state);
    }

    #[test]
    fn toggling_twice_over_another_value_clears_the_dimension(
        state in filter_state(),
        selection in selection(),
    ) {
        prop_assume!(!state.selections().contains(&selection));

        let mut toggled = state.clone();
        toggled.toggle(selection.clone());
        toggled.toggle(selection.clone());

        let mut expected = state;
        expected.clear(selection.dimension());
        prop_assert_eq!(toggled, expected);
    }

    #[test]
    fn setting_a_dimension_never_grows_the_result(
        records in prop::collection::vec(record(), 0..60),
        state in filter_state(),
        selection in selection(),
    ) {
        let mut narrowed = state.clone();
        narrowed.clear(selection.dimension());
        let wider = apply_filters(&narrowed, &records).len();
        narrowed.toggle(selection);

        prop_assert!(apply_filters(&narrowed, &records).len() <= wider);
    }

    #[test]
    fn filters_combine_with_and(
        records in prop::collection::vec(record(), 0..60),
        state in filter_state(),
    ) {
        let filtered = apply_filters(&state, &records);

        let mut expected: Vec<&Record> = records.iter().collect();
        for selection in state.selections() {
            let mut single = FilterState::new();
            single.toggle(selection);
            expected.retain(|record| single.matches(record));
        }

        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn unset_state_is_the_identity(records in prop::collection::vec(record(), 0..60)) {
        let filtered = apply_filters(&FilterState::new(), &records);

        prop_assert_eq!(filtered, records.iter().collect::<Vec<_>>());
    }

    #[test]
    fn rates_are_bounded(records in prop::collection::vec(record(), 0..60)) {
        let stats = rate_by_group(&records, |r| r.location.clone(), |r| r.diabetes);

        prop_assert_eq!(stats.values().map(|s| s.total).sum::<usize>(), records.len());
        for stat in stats.values() {
            prop_assert!((0.0..=1.0).contains(&stat.rate));
            prop_assert!(stat.positive_count <= stat.total);
        }
    }

    #[test]
    fn snapshots_only_depend_on_the_state(
        records in prop::collection::vec(record(), 1..40),
        selections in prop::collection::vec(selection(), 0..4),
    ) {
        let mut controller = Controller::new(Dataset { records, boundaries: None });

        let mut last = controller.snapshot();
        for selection in selections {
            last = controller.toggle_filter(selection);
        }

        prop_assert_eq!(&last, &controller.snapshot());
        prop_assert_eq!(last.rows, controller.filtered().len());
    }
}
