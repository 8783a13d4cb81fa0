use pvt_rs::{
    Correlation, Quantity, ReservoirInputs, RsCorrelation, RsTable, SaturatedFvf, SweepOptions,
    bubble_point_from_table, bubble_point_pressure, fvf_below_bubble_point, read_result_csv,
    read_rs_table, saturated_fvf, solution_gor, solution_gor_at_bubble_point, solution_gor_sweep,
    write_result_csv,
};

#[test]
fn inverse_correlations_recover_bubble_point() {
    for api in [22.0, 47.1] {
        for pb_psig in [800.0, 2377.0, 4500.0] {
            let cond = ReservoirInputs {
                api,
                bubble_point_psig: pb_psig,
                ..Default::default()
            }
            .normalized()
            .unwrap();
            for corr in RsCorrelation::ALL {
                let rs = solution_gor_at_bubble_point(&cond, *corr);
                let pb = bubble_point_pressure(&cond, *corr, rs);
                let rel = (pb - cond.bubble_point_pressure).abs() / cond.bubble_point_pressure;
                assert!(
                    rel < 1e-3,
                    "{}: Pb {pb} vs {} (API {api})",
                    corr.name(),
                    cond.bubble_point_pressure
                );
            }
        }
    }
}

#[test]
fn table_of_computed_rs_maps_back_to_its_pressures() {
    let cond = ReservoirInputs::default().normalized().unwrap();
    let pressures = vec![1000.0, 1500.0, 2000.0];
    for corr in RsCorrelation::ALL {
        let rs: Vec<f64> = pressures
            .iter()
            .map(|&p| solution_gor(&cond, *corr, p))
            .collect();
        let table = RsTable::new(pressures.clone(), rs).unwrap();
        let pb = bubble_point_from_table(&cond, *corr, &table);
        for (expected, got) in pressures.iter().zip(&pb.values) {
            assert!((got - expected).abs() / expected < 1e-3, "{} {got} vs {expected}", corr.name());
        }
    }
}

#[test]
fn exported_bo_reloads_bit_identical() {
    let cond = ReservoirInputs {
        api: 47.1,
        gas_gravity: 0.851,
        reservoir_temp_f: 250.0,
        ..Default::default()
    }
    .normalized()
    .unwrap();
    let direct = saturated_fvf(&cond, SaturatedFvf::Standing, 751.0);

    let table = RsTable::new(vec![1500.0, 2391.7], vec![480.0, 751.0]).unwrap();
    let below = fvf_below_bubble_point(&cond, SaturatedFvf::Standing, &table).unwrap();
    assert_eq!(below.last_value(), Some(direct));

    let mut buf = Vec::new();
    write_result_csv(&below, &mut buf).unwrap();
    let reloaded = read_result_csv(buf.as_slice(), "Standing").unwrap();

    assert_eq!(reloaded.axis, Quantity::Pressure);
    assert_eq!(reloaded.property, Quantity::FormationVolumeFactor);
    assert_eq!(reloaded.last_value(), Some(direct));
    assert_eq!(reloaded, below);
}

#[test]
fn exported_rs_sweep_feeds_the_bubble_point_calculator() {
    use std::fs::File;
    use std::io::BufReader;
    use tempfile::tempdir;

    let cond = ReservoirInputs {
        reservoir_pressure_psia: 3000.0,
        ..Default::default()
    }
    .normalized()
    .unwrap();
    let sweep = solution_gor_sweep(&cond, RsCorrelation::Standing, &SweepOptions::default()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("standing_data.csv");
    write_result_csv(&sweep, File::create(&path).unwrap()).unwrap();

    let table = read_rs_table(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(table.len(), sweep.len());
    let pb = bubble_point_from_table(&cond, RsCorrelation::Standing, &table);
    let last = *pb.values.last().unwrap();
    assert!((last - cond.bubble_point_pressure).abs() / cond.bubble_point_pressure < 1e-3);
}
