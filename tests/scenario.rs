//! Cenários ponta a ponta: fuzzify → regras → defuzzify.

use fuzzy_decision::{
    persistence, DefuzzifyMethod, FuzzyError, FuzzyModule, FuzzyRule, FuzzyTerm, FuzzyVariable,
    SetRef, Term,
};

const EPS: f64 = 1e-9;

struct Distance {
    module: FuzzyModule,
    near: SetRef,
    far: SetRef,
    low: SetRef,
    high: SetRef,
}

/// "near" vale 1 em 0 e zera em 25; "far" é 0 abaixo de 25 e 1 acima de 50.
fn distance_module() -> Distance {
    let mut distance = FuzzyVariable::new("distance");
    let near = distance.add_left_shoulder("near", 0.0, 0.0, 25.0).unwrap();
    let far = distance.add_right_shoulder("far", 25.0, 50.0, 100.0).unwrap();

    let mut desirability = FuzzyVariable::new("desirability");
    let low = desirability.add_left_shoulder("low", 0.0, 25.0, 50.0).unwrap();
    let high = desirability.add_right_shoulder("high", 50.0, 75.0, 100.0).unwrap();

    let mut module = FuzzyModule::new();
    module.add_flv("distance", distance);
    module.add_flv("desirability", desirability);
    Distance {
        module,
        near,
        far,
        low,
        high,
    }
}

#[test]
fn near_enemy_makes_attack_desirable() {
    let mut d = distance_module();
    d.module.add_rule(FuzzyRule::new(&d.near, &d.high)).unwrap();

    d.module.fuzzify("distance", 10.0).unwrap();
    assert!(d.near.degree_of_membership() > 0.0);
    assert_eq!(d.far.degree_of_membership(), 0.0);

    let value = d.module.defuzzify("desirability", DefuzzifyMethod::MaxAv).unwrap();
    assert!((value - d.high.representative_value()).abs() < EPS);
    assert!((d.high.degree_of_membership() - d.near.degree_of_membership()).abs() < EPS);
}

#[test]
fn both_methods_agree_on_direction() {
    let mut d = distance_module();
    d.module.add_rule(FuzzyRule::new(&d.near, &d.high)).unwrap();
    d.module.add_rule(FuzzyRule::new(&d.far, &d.low)).unwrap();

    d.module.fuzzify("distance", 5.0).unwrap();
    let close_max_av = d.module.defuzzify("desirability", DefuzzifyMethod::MaxAv).unwrap();
    let close_centroid = d.module.defuzzify("desirability", DefuzzifyMethod::Centroid).unwrap();

    d.module.fuzzify("distance", 80.0).unwrap();
    let far_max_av = d.module.defuzzify("desirability", DefuzzifyMethod::MaxAv).unwrap();
    let far_centroid = d.module.defuzzify("desirability", DefuzzifyMethod::Centroid).unwrap();

    assert!(close_max_av > far_max_av);
    assert!(close_centroid > far_centroid);
}

/// Um consequente composto alimenta vários conjuntos de saída.
#[test]
fn composite_consequent_feeds_every_output() {
    let mut d = distance_module();
    let mut alert = FuzzyVariable::new("alert");
    let raised = alert.add_right_shoulder("raised", 0.0, 1.0, 1.0).unwrap();
    d.module.add_flv("alert", alert);

    let consequent = Term::and(vec![(&d.high).into(), (&raised).into()]).unwrap();
    d.module.add_rule(FuzzyRule::new(&d.near, consequent)).unwrap();
    d.module.fuzzify("distance", 20.0).unwrap();

    d.module.defuzzify("alert", DefuzzifyMethod::MaxAv).unwrap();
    assert!((raised.degree_of_membership() - 0.2).abs() < EPS);
    assert!((d.high.degree_of_membership() - 0.2).abs() < EPS);
}

#[test]
fn misuse_is_reported_to_the_caller() {
    let mut d = distance_module();
    assert!(matches!(
        d.module.fuzzify("distance", -1.0),
        Err(FuzzyError::OutOfRange { .. })
    ));
    assert!(matches!(
        d.module.defuzzify("speed", DefuzzifyMethod::Centroid),
        Err(FuzzyError::UnknownVariable { .. })
    ));
    assert!(matches!(
        Term::and(Vec::new()),
        Err(FuzzyError::EmptyComposite { .. })
    ));
    assert!(matches!(
        d.module.add_rule(FuzzyRule::new(Term::And(Vec::new()), &d.high)),
        Err(FuzzyError::EmptyComposite { .. })
    ));
    assert!(matches!(
        d.module.add_rule(FuzzyRule::new(
            Term::or(vec![Term::And(Vec::new())]),
            &d.high
        )),
        Err(FuzzyError::EmptyComposite { .. })
    ));
    assert!(d.module.rules().is_empty());
    let unknown = uuid::Uuid::new_v4();
    assert_eq!(
        d.module.remove_rule(unknown).unwrap_err(),
        FuzzyError::UnknownRule { id: unknown }
    );
}

#[test]
fn snapshot_round_trip_keeps_module_behaviour() {
    let mut d = distance_module();
    d.module
        .add_rule(FuzzyRule::new(Term::fairly(&d.near), &d.high))
        .unwrap();
    d.module.add_rule(FuzzyRule::new(&d.far, Term::very(&d.low))).unwrap();

    let restored = persistence::from_json(&persistence::to_json(&d.module).unwrap()).unwrap();
    for reading in [0.0, 12.0, 30.0, 45.0, 90.0] {
        d.module.fuzzify("distance", reading).unwrap();
        restored.fuzzify("distance", reading).unwrap();
        for method in [DefuzzifyMethod::MaxAv, DefuzzifyMethod::Centroid] {
            let original = d.module.defuzzify("desirability", method).unwrap();
            let copy = restored.defuzzify("desirability", method).unwrap();
            assert!((original - copy).abs() < EPS, "{reading} / {method:?}");
        }
    }
}
