use jobsim::*;
use proptest::prelude::*;

fn arb_frequencies() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..1000, 1..=50)
}

proptest! {
    #[test]
    fn ranges_partition_the_scale(freqs in arb_frequencies()) {
        let ranges = allocate_ranges(&FrequencyTable::numbered(&freqs)).unwrap();
        let all: Vec<JobRange> = ranges.iter().map(|(_, r)| r).collect();

        prop_assert_eq!(all.len(), freqs.len());
        prop_assert_eq!(all[0].start, 1);
        prop_assert_eq!(all[all.len() - 1].end, TOTAL_RANGE);
        for pair in all.windows(2) {
            prop_assert_eq!(pair[1].start, pair[0].end + 1);
        }

        // every number on the scale is owned by exactly one job
        for n in 1..=TOTAL_RANGE {
            let owners = all.iter().filter(|r| r.contains(n)).count();
            prop_assert_eq!(owners, 1, "number {}", n);
        }
    }

    #[test]
    fn resolver_is_total_on_allocated_ranges(freqs in arb_frequencies()) {
        let ranges = allocate_ranges(&FrequencyTable::numbered(&freqs)).unwrap();
        for n in 1..=TOTAL_RANGE {
            let job = resolve_job(&ranges, n);
            prop_assert!(job.is_some(), "number {} unresolved", n);
            let owned = ranges.get(job.unwrap()).unwrap();
            prop_assert!(owned.contains(n));
        }
    }

    #[test]
    fn equal_frequencies_get_equal_sizes(n in 2usize..=50, freq in 1u32..100) {
        let ranges = allocate_ranges(&FrequencyTable::numbered(&vec![freq; n])).unwrap();
        // skip the last job and any job clamped at the end of the scale
        let sizes: Vec<u32> = ranges
            .iter()
            .take(n - 1)
            .filter(|(_, r)| r.end < TOTAL_RANGE)
            .map(|(_, r)| r.len())
            .collect();
        if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
            prop_assert!(max - min <= 1, "sizes {:?}", sizes);
        }
    }

    #[test]
    fn counts_and_probabilities_add_up(
        freqs in arb_frequencies(),
        sims in 1usize..20,
        draws in 1usize..20,
        seed in any::<u64>(),
    ) {
        let ranges = allocate_ranges(&FrequencyTable::numbered(&freqs)).unwrap();
        let batch = run_simulations(
            &ranges,
            ranges.total_range(),
            sims,
            draws,
            &mut RngSource::seeded(seed),
        )
        .unwrap();
        let aggregate = &batch.aggregate;

        let total: u64 = aggregate.iter().map(|s| s.count).sum();
        prop_assert_eq!(total, (sims * draws) as u64);
        prop_assert_eq!(aggregate.total_draws(), (sims * draws) as u64);

        let prob_sum: f64 = aggregate.iter().map(|s| s.probability).sum();
        prop_assert!((prob_sum - 1.0).abs() < 1e-9);
        let last = aggregate.iter().last().unwrap();
        prop_assert_eq!(last.cumulative_probability, prob_sum);

        prop_assert_eq!(batch.runs.len(), sims);
        let masses: Vec<f64> = batch.details().flatten().map(|d| d.running_mass).collect();
        prop_assert_eq!(masses.len(), sims * draws);
        for pair in masses.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
        prop_assert!((masses[masses.len() - 1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scripted_draws_are_reproducible(
        script in prop::collection::vec(1u32..=99, 1..30),
        sims in 1usize..5,
        draws in 1usize..10,
    ) {
        let ranges = allocate_ranges(&FrequencyTable::numbered(&[10, 20, 70])).unwrap();
        let a = run_simulations(&ranges, 99, sims, draws, &mut ScriptedDraws::new(script.clone())).unwrap();
        let b = run_simulations(&ranges, 99, sims, draws, &mut ScriptedDraws::new(script.clone())).unwrap();
        prop_assert_eq!(&a, &b);

        // the sequence is exactly the script resolved in order
        let expected: Vec<&str> = (0..sims * draws)
            .map(|i| resolve_job(&ranges, script[i % script.len()]).unwrap())
            .collect();
        let got: Vec<&str> = a.sequences().flatten().map(String::as_str).collect();
        prop_assert_eq!(got, expected);
    }
}
