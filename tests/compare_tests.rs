//! End-to-end scenarios for the comparison battery.

use cotejar::prelude::*;

fn verdict(report: &Report, name: &str) -> Verdict {
    report
        .check(name)
        .unwrap_or_else(|| panic!("missing check '{name}'"))
        .verdict
}

#[test]
fn identical_vectors_pass_the_full_battery() {
    let v = [1.0, 2.0, 3.0];
    let report = compare(&v, &v).unwrap();

    assert!(report.all_passed());
    assert_eq!(
        report.check("cosine-sim").unwrap().value,
        CheckValue::Num(1.0)
    );
    assert_eq!(report.check("Linf").unwrap().value, CheckValue::Num(0.0));
    assert_eq!(
        report.check("same-sign").unwrap().value,
        CheckValue::Ratio { count: 3, total: 3 }
    );
    assert_eq!(
        report.check("mean relative error").unwrap().value,
        CheckValue::Num(0.0)
    );
    assert_eq!(
        report.check("mean rescaled error").unwrap().value,
        CheckValue::Num(0.0)
    );
}

#[test]
fn sign_flip_fails_same_sign_at_two_thirds() {
    let expect = [1.0, 0.0, -1.0];
    let got = [1.0, 0.0, 1.0];
    let report = compare(&expect, &got).unwrap();

    let check = report.check("same-sign").unwrap();
    assert_eq!(check.value, CheckValue::Ratio { count: 2, total: 3 });
    assert_eq!(check.verdict, Verdict::Fail);
    assert_eq!(check.value.to_string(), "2/3 (66.7%)");
    assert!(!report.all_passed());
}

#[test]
fn zero_vectors_agree_trivially() {
    let report = compare(&[0.0, 0.0], &[0.0, 0.0]).unwrap();
    assert_eq!(
        report.check("mean relative error").unwrap().value,
        CheckValue::Num(0.0)
    );
    assert_eq!(
        report.check("cosine-sim").unwrap().value,
        CheckValue::Num(1.0)
    );
    assert!(report.all_passed());
}

#[test]
fn shared_scale_factor_disagreement_is_by_design() {
    // Same direction scaled by 100: the two error metrics disagree on
    // purpose. Relative error sees the scale, rescaled error cancels it.
    let expect = [1.0, 2.0];
    let got = [100.0, 200.0];
    let report = compare(&expect, &got).unwrap();

    assert_eq!(verdict(&report, "cosine-sim"), Verdict::Pass);
    assert_eq!(verdict(&report, "mean relative error"), Verdict::Fail);
    assert_eq!(verdict(&report, "mean rescaled error"), Verdict::Pass);
    // The consistent offset also trips the bias check.
    assert_eq!(verdict(&report, "got is larger"), Verdict::Fail);
}

#[test]
fn full_battery_runs_despite_failures() {
    // No early exit: a vector failing several checks still yields the
    // complete report in battery order.
    let expect = [1.0, 2.0, 3.0, 4.0];
    let got = [-1.0, 5.0, 0.0, 9.0];
    let report = compare(&expect, &got).unwrap();

    let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "cosine-sim",
            "Linf",
            "same-sign",
            "mean relative error",
            "mean rescaled error",
        ]
    );
    assert!(!report.all_passed());
}

#[test]
fn labeled_comparison_reports_worst_dimensions_first() {
    let expect = [1.0, 2.0, -3.0, 4.0];
    let got = [1.0, 2.2, 3.0, 4.0];
    let report = compare_with(
        &expect,
        &got,
        CompareOptions::new()
            .with_name("gradient")
            .with_alphabet(vec!["dx", "dy", "dz", "dw"]),
    )
    .unwrap();

    assert_eq!(report.rel_errors.len(), 2);
    assert_eq!(report.rel_errors[0].label, "dz");
    assert!(report.rel_errors[0].sign_mismatch);
    assert_eq!(report.rel_errors[1].label, "dy");
    assert!(report.rel_errors[0].error >= report.rel_errors[1].error);

    let text = report.render();
    assert!(text.contains("Comparison (gradient): n=4"));
    assert!(text.contains("Relative errors"));
}

#[test]
fn tabular_and_raw_inputs_agree() {
    let expect = vec![1.0, 2.0, 3.0];
    let got = vec![1.0, 2.0, 3.5];

    let df = DataFrame::new(vec![
        ("expect".to_string(), expect.clone()),
        ("got".to_string(), got.clone()),
    ])
    .unwrap();

    let raw = compare(&expect, &got).unwrap();
    let tabular = compare_columns(&df, "expect", "got", CompareOptions::new()).unwrap();

    assert_eq!(raw.checks, tabular.checks);
}

#[test]
fn regression_diagnostic_recovers_scale_and_offset() {
    // got = (expect - 3) / 2, so expect = 2 * got + 3.
    let expect = [1.0, 3.0, 5.0, 7.0];
    let got = [-1.0, 0.0, 1.0, 2.0];
    let report = compare_with(
        &expect,
        &got,
        CompareOptions::new().with_regression(true),
    )
    .unwrap();

    let check = report.check("regression").unwrap();
    assert_eq!(check.verdict, Verdict::Info);
    match &check.value {
        CheckValue::Fit(fit) => {
            assert!((fit.slope - 2.0).abs() < 1e-9);
            assert!((fit.intercept - 3.0).abs() < 1e-9);
        }
        other => panic!("expected fit, got {other:?}"),
    }
    // Informational results never fail the report on their own.
    assert_eq!(report.failed_count(), report.checks.len() - report.passed_count() - 1);
}

#[test]
fn report_serializes_and_round_trips() {
    let report = compare(&[1.0, 2.0], &[1.0, 2.5]).unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("cosine-sim"));

    let back: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(back.checks, report.checks);
    assert_eq!(back.n, 2);
}
