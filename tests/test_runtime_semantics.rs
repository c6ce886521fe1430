use std::io::Write;

use proptest::prelude::*;
use pyjs_lessons::builtins::{
    compare_chain, for_else, py_floordiv, py_mod, py_div, range, range_from, range_step, to_int, zip, CmpOp, Flow,
};
use pyjs_lessons::runtime::{Branches, Match, Namespace};
use pyjs_lessons::{CallArgs, Config, LessonError, LessonName, PyFunction, Signature, Value};

fn ints(items: impl IntoIterator<Item = i64>) -> Vec<i64> {
    items.into_iter().collect()
}

#[test]
fn test_range_forms() {
    assert_eq!(ints(range(5)), vec![0, 1, 2, 3, 4]);
    assert_eq!(ints(range_from(2, 6)), vec![2, 3, 4, 5]);
    assert_eq!(ints(range_step(0, 10, 2).unwrap()), vec![0, 2, 4, 6, 8]);
    assert_eq!(ints(range_step(10, 0, -1).unwrap()), (1..=10).rev().collect::<Vec<_>>());

    let err = range_step(0, 10, 0).unwrap_err();
    assert_eq!(err.kind(), "ValueError");
    assert_eq!(err.to_string(), "ValueError: range() arg 3 must not be zero");
}

proptest! {
    #[test]
    fn prop_positive_step(start in -500i64..500, stop in -500i64..500, step in 1i64..20) {
        let values = ints(range_step(start, stop, step).unwrap());
        if let Some(first) = values.first() {
            prop_assert_eq!(*first, start);
        }
        prop_assert!(values.windows(2).all(|w| w[1] - w[0] == step));
        prop_assert!(values.iter().all(|&v| v < stop));
        prop_assert_eq!(values.len(), range_step(start, stop, step).unwrap().len());
    }

    #[test]
    fn prop_negative_step(start in -500i64..500, stop in -500i64..500, step in -20i64..=-1) {
        let values = ints(range_step(start, stop, step).unwrap());
        if let Some(first) = values.first() {
            prop_assert_eq!(*first, start);
        }
        prop_assert!(values.windows(2).all(|w| w[1] - w[0] == step));
        prop_assert!(values.iter().all(|&v| v > stop));
    }

    #[test]
    fn prop_floor_division_identity(a in -1000i64..1000, b in -50i64..50) {
        prop_assume!(b != 0);
        let (x, y) = (Value::Int(a), Value::Int(b));
        let q = py_floordiv(&x, &y).unwrap().as_int().unwrap();
        let r = py_mod(&x, &y).unwrap().as_int().unwrap();
        prop_assert_eq!(q * b + r, a);
        // the remainder takes the divisor's sign
        prop_assert!(r == 0 || (r < 0) == (b < 0));
    }
}

#[test]
fn test_zip_truncates() {
    let names = ["Alice", "Bob", "Charlie"];
    let ages = [25, 30, 35];
    let pairs: Vec<_> = zip(names, ages).collect();
    assert_eq!(pairs, vec![("Alice", 25), ("Bob", 30), ("Charlie", 35)]);
    assert_eq!(zip(names, [1]).count(), 1);
}

#[test]
fn test_for_else() {
    let mut runs = 0;
    let broke = for_else(range(3), |_| Ok(Flow::Next), || {
        runs += 1;
        Ok(())
    })
    .unwrap();
    assert!(!broke);
    assert_eq!(runs, 1);

    let mut runs = 0;
    let mut seen = Vec::new();
    let broke = for_else(
        range(5),
        |i| {
            if i == 3 {
                return Ok(Flow::Break);
            }
            seen.push(i);
            Ok(Flow::Next)
        },
        || {
            runs += 1;
            Ok(())
        },
    )
    .unwrap();
    assert!(broke);
    assert_eq!(runs, 0);
    assert_eq!(seen, vec![0, 1, 2]);
}

fn make_multiplier(n: i64) -> Value {
    PyFunction::new(Signature::new("multiplier").required("x"), move |args| {
        pyjs_lessons::builtins::py_mul(args.get("x")?, &Value::Int(n))
    })
    .unwrap()
    .into_value()
}

#[test]
fn test_closures_are_independent() {
    let call = |f: &Value, x: i64| pyjs_lessons::runtime::call_value(f, CallArgs::new().arg(x)).unwrap();
    let times_three = make_multiplier(3);
    assert_eq!(call(&times_three, 5), Value::Int(15));
    let times_ten = make_multiplier(10);
    assert_eq!(call(&times_ten, 7), Value::Int(70));
    assert_eq!(call(&times_three, 5), Value::Int(15));
}

fn complex_signature() -> Signature {
    Signature::new("f").required("name").default("age", 18).varargs("args").varkw("kwargs")
}

#[test]
fn test_full_binding() {
    let bound = complex_signature()
        .bind(CallArgs::new().arg("X").arg(25).arg("h1").arg("h2").kw("city", "Beijing"))
        .unwrap();
    assert_eq!(bound.get("name").unwrap(), &Value::str("X"));
    assert_eq!(bound.get("age").unwrap(), &Value::Int(25));
    assert_eq!(bound.varargs().to_string(), "('h1', 'h2')");
    assert_eq!(bound.varkw().to_string(), "{'city': 'Beijing'}");

    let defaulted = complex_signature().bind(CallArgs::new().arg("Y")).unwrap();
    assert_eq!(defaulted.get("age").unwrap(), &Value::Int(18));
    assert_eq!(defaulted.varargs().to_string(), "()");
}

#[test]
fn test_binding_errors() {
    let sig = Signature::new("create_person").required("name").required("age").required("city");

    let missing = sig.bind(CallArgs::new().arg("A").arg(1)).unwrap_err();
    assert_eq!(missing.to_string(), "ArgumentError: create_person() missing required argument: 'city'");

    let duplicate = sig
        .bind(CallArgs::new().arg("A").arg(1).arg("B").kw("name", "C"))
        .unwrap_err();
    assert!(duplicate.to_string().contains("got multiple values for argument 'name'"));

    let unexpected = sig
        .bind(CallArgs::new().arg("A").arg(1).arg("B").kw("country", "C"))
        .unwrap_err();
    assert!(unexpected.to_string().contains("got an unexpected keyword argument 'country'"));

    let too_many = sig.bind(CallArgs::positional((0..4).map(Value::Int))).unwrap_err();
    assert!(too_many.to_string().contains("takes 3 positional arguments but 4 were given"));
    assert!(matches!(too_many, LessonError::Argument { .. }));
}

#[test]
fn test_non_default_after_default_is_rejected() {
    let err = PyFunction::new(Signature::new("bad").default("a", 1).required("b"), |_| Ok(Value::None)).unwrap_err();
    assert!(err.to_string().contains("non-default argument 'b' follows default argument"));
}

#[test]
fn test_shared_mutable_default() {
    let add_item = PyFunction::new(
        Signature::new("add_item").required("item").default("items", Value::empty_list()),
        |args| {
            let items = args.get("items")?.clone();
            items.append(args.get("item")?.clone())?;
            Ok(items)
        },
    )
    .unwrap();

    assert_eq!(add_item.call1("a").unwrap().to_string(), "['a']");
    assert_eq!(add_item.call1("b").unwrap().to_string(), "['a', 'b']");
    // an explicit list is not the shared default
    let fresh = add_item.call2("c", Value::empty_list()).unwrap();
    assert_eq!(fresh.to_string(), "['c']");
    assert_eq!(add_item.call1("d").unwrap().to_string(), "['a', 'b', 'd']");
}

#[test]
fn test_global_write_through_and_shadowing() {
    let module = Namespace::new();
    module.set("counter", 0);

    let mut shadow = module.enter();
    shadow.assign("counter", 99);
    assert_eq!(shadow.lookup("counter").unwrap(), Value::Int(99));
    assert_eq!(module.get("counter").unwrap(), Value::Int(0));

    let mut writer = module.enter();
    writer.declare_global("counter").unwrap();
    writer.assign("counter", 1);
    assert_eq!(module.get("counter").unwrap(), Value::Int(1));

    let err = module.get("missing").unwrap_err();
    assert_eq!(err.to_string(), "NameError: name 'missing' is not defined");
}

#[test]
fn test_dispatch() {
    let grade = |score: i64| {
        Branches::new()
            .when(move || Ok(score >= 90), || Ok("A"))
            .when(move || Ok(score >= 60), || Ok("C"))
            .otherwise(|| Ok("F"))
            .unwrap()
    };
    assert_eq!(grade(95), "A");
    assert_eq!(grade(70), "C");
    assert_eq!(grade(10), "F");

    let day = |n: i64| {
        Match::on(n)
            .case(1, |_| Ok("Monday".to_string()))
            .case_if(|v| v.as_int().is_some_and(|d| d >= 6), |v| Ok(format!("weekend day {}", v)))
            .wildcard(|v| Ok(format!("day {}", v)))
            .unwrap()
    };
    assert_eq!(day(1), "Monday");
    assert_eq!(day(7), "weekend day 7");
    assert_eq!(day(3), "day 3");
}

#[test]
fn test_arithmetic_and_rendering() {
    let (a, b) = (Value::Int(-7), Value::Int(2));
    assert_eq!(py_floordiv(&a, &b).unwrap(), Value::Int(-4));
    assert_eq!(py_mod(&a, &b).unwrap(), Value::Int(1));
    assert_eq!(py_mod(&Value::Int(7), &Value::Int(-2)).unwrap(), Value::Int(-1));
    assert_eq!(py_div(&Value::Int(10), &Value::Int(3)).unwrap().to_string(), "3.3333333333333335");
    assert_eq!(Value::Float(15.0).to_string(), "15.0");
    assert_eq!(Value::Float(1e16).to_string(), "1e+16");
    assert_eq!(py_div(&Value::Int(1), &Value::Int(0)).unwrap_err().kind(), "ZeroDivisionError");

    assert!(compare_chain(&Value::Int(10), &[(CmpOp::Le, Value::Int(15)), (CmpOp::Le, Value::Int(20))]).unwrap());
    assert!(!compare_chain(&Value::Int(0), &[(CmpOp::Lt, Value::Int(15)), (CmpOp::Lt, Value::Int(10))]).unwrap());
}

#[test]
fn test_truthiness_and_conversions() {
    for falsy in [Value::empty_list(), Value::str(""), Value::Int(0), Value::Float(0.0), Value::None] {
        assert!(!falsy.is_truthy(), "{}", falsy.repr());
    }
    for truthy in [Value::list([Value::Int(0)]), Value::str("x"), Value::Int(-1)] {
        assert!(truthy.is_truthy(), "{}", truthy.repr());
    }

    assert_eq!(to_int(&Value::str("123")).unwrap(), Value::Int(123));
    let err = to_int(&Value::str("abc")).unwrap_err();
    assert_eq!(err.kind(), "ConversionError");
    assert!(err.to_string().contains("invalid literal for int() with base 10: 'abc'"));
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[output]\nshow_js = true\nlessons = [\"conditionals\"]").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert!(config.output.show_js);
    assert_eq!(config.output.lessons, vec![LessonName::Conditionals]);
}

#[test]
fn test_config_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = Config::resolve(Some(missing.as_path())).unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
    assert!(err.to_string().contains("absent.toml"));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "[logging]\nlevel = 3").unwrap();
    assert!(matches!(Config::load(&bad), Err(LessonError::Config { .. })));
}
