use super::*;

#[test]
fn int_addition_stays_integral() {
    let v = Value::from(5).checked_add(&Value::from(1)).unwrap();
    assert_eq!(v, Value::Int(6));
}

#[test]
fn mixed_numbers_promote_to_float() {
    let v = Value::from(1).checked_add(&Value::from(0.5)).unwrap();
    assert_eq!(v, Value::Float(1.5));
    let v = Value::from(1.5).checked_sub(&Value::from(2)).unwrap();
    assert_eq!(v, Value::Float(-0.5));
}

#[test]
fn points_combine_component_wise_and_broadcast_numbers() {
    let a = Value::from(Point3::new(1.0, 2.0, 3.0));
    let b = Value::from(Point3::new(1.0, 1.0, 1.0));
    assert_eq!(
        a.checked_add(&b).unwrap(),
        Value::Point(Point3::new(2.0, 3.0, 4.0))
    );
    assert_eq!(
        a.checked_sub(&Value::from(1)).unwrap(),
        Value::Point(Point3::new(0.0, 1.0, 2.0))
    );
    assert_eq!(
        Value::from(10.0).checked_sub(&a).unwrap(),
        Value::Point(Point3::new(9.0, 8.0, 7.0))
    );
}

#[test]
fn incompatible_operands_are_evaluation_errors() {
    let err = Value::from("eye")
        .checked_add(&Value::from(Point3::ZERO))
        .unwrap_err();
    assert!(err.to_string().contains("cannot evaluate text + point"));
}

#[test]
fn integer_overflow_is_reported() {
    assert!(Value::from(i64::MAX).checked_add(&Value::from(1)).is_err());
}

#[test]
fn serializes_untagged() {
    let v = Value::List(vec![
        Value::Null,
        Value::from(true),
        Value::from(2),
        Value::from(0.5),
        Value::from("s"),
        Value::from(Point3::new(1.0, 2.0, 3.0)),
    ]);
    assert_eq!(
        serde_json::to_string(&v).unwrap(),
        r#"[null,true,2,0.5,"s",[1.0,2.0,3.0]]"#
    );
}
