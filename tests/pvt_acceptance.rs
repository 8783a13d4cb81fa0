use pvt_rs::{
    BubblePointBoundary, Conditions, Correlation, DeadOilViscosity, ReservoirInputs, RsCorrelation,
    RsTable, SaturatedFvf, SaturatedViscosity, SweepOptions, UndersaturatedFvf,
    fvf_above_bubble_point, fvf_summary, saturated_fvf, solution_gor, solution_gor_at_bubble_point,
    solution_gor_sweep, viscosity_summary,
};

fn reference_conditions(reservoir_pressure: f64) -> Conditions {
    ReservoirInputs {
        api: 47.1,
        gas_gravity: 0.851,
        reservoir_pressure_psia: reservoir_pressure,
        reservoir_temp_f: 250.0,
        bubble_point_psig: 2377.0,
        separator_pressure_psig: 150.0,
        separator_temp_f: 60.0,
        ..Default::default()
    }
    .normalized()
    .unwrap()
}

fn approx_in_range(v: f64, min: f64, max: f64) {
    assert!((min..=max).contains(&v), "value {v} not in [{min}, {max}]");
}

#[test]
fn rs_rises_below_bubble_point_and_flattens_above() {
    for api in [22.0, 35.0, 47.1] {
        let cond = ReservoirInputs {
            api,
            ..Default::default()
        }
        .normalized()
        .unwrap();
        for corr in RsCorrelation::ALL {
            let series = solution_gor_sweep(&cond, *corr, &SweepOptions::default()).unwrap();
            let at_pb = solution_gor_at_bubble_point(&cond, *corr);
            for ((p0, r0), (_, r1)) in series.points().zip(series.points().skip(1)) {
                if p0 < cond.bubble_point_pressure {
                    assert!(r1 >= r0, "{} Rs decreased at {p0} psia", corr.name());
                } else {
                    assert_eq!(r0, at_pb, "{} Rs not constant at {p0} psia", corr.name());
                }
            }
        }
    }
}

#[test]
fn sweep_length_is_reservoir_pressure_minus_500() {
    for pr in [500.0, 501.0, 5000.0, 8000.0] {
        let cond = reference_conditions(pr);
        let series =
            solution_gor_sweep(&cond, RsCorrelation::Standing, &SweepOptions::default()).unwrap();
        assert_eq!(series.len(), (pr - 500.0) as usize);
        if let Some(&first) = series.axis_values.first() {
            assert_eq!(first, 500.0);
        }
        assert!(series.axis_values.iter().all(|&p| p < pr));
    }
}

#[test]
fn standing_rs_at_internal_bubble_point_matches_boundary() {
    let cond = reference_conditions(8000.0);
    assert!((cond.bubble_point_pressure - 2391.7).abs() < 1e-9);

    let direct = solution_gor(&cond, RsCorrelation::Standing, 2391.7);
    let boundary = solution_gor_at_bubble_point(&cond, RsCorrelation::Standing);
    assert!((direct - boundary).abs() / boundary < 1e-4);

    let series =
        solution_gor_sweep(&cond, RsCorrelation::Standing, &SweepOptions::default()).unwrap();
    let tail = series.last_value().unwrap();
    assert!((tail - boundary).abs() / boundary < 1e-4);
}

#[test]
fn bo_at_least_one_for_physical_inputs() {
    for api in [15.0, 30.0, 47.1, 60.0] {
        for temp in [100.0, 250.0, 350.0] {
            let cond = ReservoirInputs {
                api,
                reservoir_temp_f: temp,
                ..Default::default()
            }
            .normalized()
            .unwrap();
            for corr in SaturatedFvf::ALL
                .iter()
                .filter(|c| **c != SaturatedFvf::MaterialBalance)
            {
                for rs in [100.0, 400.0, 751.0, 1500.0] {
                    let bo = saturated_fvf(&cond, *corr, rs);
                    assert!(bo >= 1.0, "{} Bo = {bo} at API {api}, T {temp}, Rs {rs}", corr.name());
                }
            }
        }
    }

    // density measured on the same live oil
    let cond = reference_conditions(5000.0);
    approx_in_range(
        saturated_fvf(&cond, SaturatedFvf::MaterialBalance, 751.0),
        1.0,
        2.0,
    );
}

#[test]
fn bo_decreases_above_bubble_point() {
    let cond = reference_conditions(5000.0);
    let bob = saturated_fvf(&cond, SaturatedFvf::Standing, 751.0);
    let boundary = BubblePointBoundary::at(cond.bubble_point_pressure)
        .with_bo(bob)
        .with_rs(751.0);
    for corr in UndersaturatedFvf::ALL {
        let above =
            fvf_above_bubble_point(&cond, *corr, &boundary, &SweepOptions::default()).unwrap();
        assert_eq!(above.axis_values[0], cond.bubble_point_pressure);
        assert!(
            above.values.windows(2).all(|w| w[1] < w[0]),
            "{} Bo not decreasing",
            corr.name()
        );
        approx_in_range(*above.values.last().unwrap(), 1.0, bob);
    }
}

#[test]
fn viscosity_increases_above_bubble_point() {
    let cond = Conditions {
        solution_gor: Some(751.0),
        ..reference_conditions(5000.0)
    };
    for dead in DeadOilViscosity::ALL {
        for sat in SaturatedViscosity::ALL {
            let s = viscosity_summary(&cond, *dead, *sat, None, &SweepOptions::default()).unwrap();
            assert!(
                s.above.values.windows(2).all(|w| w[1] > w[0]),
                "{} / {} uo not increasing",
                dead.name(),
                sat.name()
            );
        }
    }
}

#[test]
fn full_range_series_are_continuous_in_pressure() {
    let cond = reference_conditions(5000.0);
    let table = RsTable::new(
        vec![600.0, 1200.0, 1800.0, 2391.7, 2800.0],
        vec![180.0, 370.0, 560.0, 751.0, 751.0],
    )
    .unwrap();

    let bo = fvf_summary(
        &cond,
        SaturatedFvf::Standing,
        UndersaturatedFvf::VasquezBeggs,
        Some(&table),
        &SweepOptions::default(),
    )
    .unwrap();
    let uo = viscosity_summary(
        &cond,
        DeadOilViscosity::BeggsRobinson,
        SaturatedViscosity::BeggsRobinson,
        Some(&table),
        &SweepOptions::default(),
    )
    .unwrap();

    for full in [bo.full_range.unwrap(), uo.full_range.unwrap()] {
        assert!(full.axis_values.windows(2).all(|w| w[1] >= w[0]));
        // four rows at or below Pb plus the sweep [2391.7, 5000)
        assert_eq!(full.len(), 4 + 2609);
    }
}
