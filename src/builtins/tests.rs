//! Tests for builtin functions

use super::*;
use crate::core::Value;
use crate::errors::LessonError;

#[test]
fn test_range_basic() {
    let mut r = range(5);
    assert_eq!(r.next(), Some(0));
    assert_eq!(r.next(), Some(1));
    assert_eq!(r.next(), Some(2));
    assert_eq!(r.next(), Some(3));
    assert_eq!(r.next(), Some(4));
    assert_eq!(r.next(), None);
}

#[test]
fn test_range_forms() {
    assert_eq!(range_from(2, 6).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    assert_eq!(range_step(0, 10, 2).unwrap().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    assert_eq!(
        range_step(10, 0, -1).unwrap().collect::<Vec<_>>(),
        vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]
    );
}

#[test]
fn test_range_negative_step() {
    let mut r = range_step(10, 0, -3).unwrap();
    assert_eq!(r.next(), Some(10));
    assert_eq!(r.next(), Some(7));
    assert_eq!(r.next(), Some(4));
    assert_eq!(r.next(), Some(1));
    assert_eq!(r.next(), None);
}

#[test]
fn test_range_empty() {
    let mut r = range_from(0, 0);
    assert_eq!(r.len(), 0);
    assert_eq!(r.next(), None);

    // step points away from stop
    assert_eq!(range_step(0, 10, -1).unwrap().count(), 0);
    assert_eq!(range_step(10, 0, 1).unwrap().count(), 0);
    assert_eq!(range(-3).count(), 0);
}

#[test]
fn test_range_zero_step() {
    let err = range_step(0, 10, 0).unwrap_err();
    assert!(matches!(err, LessonError::Value(_)));
    assert_eq!(err.to_string(), "ValueError: range() arg 3 must not be zero");
}

#[test]
fn test_range_len() {
    assert_eq!(range(10).len(), 10);
    assert_eq!(range_step(0, 10, 2).unwrap().len(), 5);
    assert_eq!(range_step(0, 9, 2).unwrap().len(), 5);
    assert_eq!(range_step(10, 0, -1).unwrap().len(), 10);
}

#[test]
fn test_range_double_ended() {
    let mut r = range(5);
    assert_eq!(r.next(), Some(0));
    assert_eq!(r.next_back(), Some(4));
    assert_eq!(r.next(), Some(1));
    assert_eq!(r.next_back(), Some(3));
    assert_eq!(r.next(), Some(2));
    assert_eq!(r.next(), None);
    assert_eq!(r.next_back(), None);

    let stepped: Vec<_> = range_step(0, 9, 2).unwrap().rev().collect();
    assert_eq!(stepped, vec![8, 6, 4, 2, 0]);
}

#[test]
fn test_range_next_back_wide_span() {
    let mut wide = range_from(-10, i64::MAX);
    assert_eq!(wide.step(), 1);
    assert_eq!(wide.next_back(), Some(i64::MAX - 1));
    assert_eq!(wide.next(), Some(-10));

    let mut down = range_step(i64::MAX, i64::MIN, -3).unwrap();
    assert_eq!(down.next_back(), Some(i64::MIN + 3));
    assert_eq!(down.next(), Some(i64::MAX));
}

#[test]
fn test_enumerate_start() {
    let names = ["a", "b", "c"];
    let pairs: Vec<_> = enumerate(names, 1).collect();
    assert_eq!(pairs, vec![(1, "a"), (2, "b"), (3, "c")]);
}

#[test]
fn test_zip_truncates() {
    let pairs: Vec<_> = zip(["Alice", "Bob", "Charlie"], [25, 30]).collect();
    assert_eq!(pairs, vec![("Alice", 25), ("Bob", 30)]);
}

#[test]
fn test_for_else_runs_without_break() {
    let mut seen = Vec::new();
    let mut else_runs = 0;
    let broke = for_else(
        range(3),
        |i| {
            seen.push(i);
            Ok(Flow::Next)
        },
        || {
            else_runs += 1;
            Ok(())
        },
    )
    .unwrap();

    assert!(!broke);
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(else_runs, 1);
}

#[test]
fn test_for_else_skipped_on_break() {
    let mut seen = Vec::new();
    let mut else_ran = false;
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
            else_ran = true;
            Ok(())
        },
    )
    .unwrap();

    assert!(broke);
    assert_eq!(seen, vec![0, 1, 2]);
    assert!(!else_ran);
}

#[test]
fn test_comprehend() {
    let squares = comprehend([1, 2, 3, 4, 5], |n| Ok(n * n), None).unwrap();
    assert_eq!(squares, vec![1, 4, 9, 16, 25]);

    let mut is_even = |n: &i64| -> std::result::Result<bool, LessonError> { Ok(n % 2 == 0) };
    let even_squares = comprehend([1i64, 2, 3, 4, 5], |n| Ok(n * n), Some(&mut is_even)).unwrap();
    assert_eq!(even_squares, vec![4, 16]);
}

#[test]
fn test_comprehend_filter_error_propagates() {
    let items = vec![Value::Int(1), Value::str("two"), Value::Int(3)];
    let mut mapped = 0;
    let mut is_odd = |v: &Value| -> std::result::Result<bool, LessonError> {
        Ok(py_mod(v, &Value::Int(2))? == Value::Int(1))
    };
    let err = comprehend(
        items,
        |v| {
            mapped += 1;
            Ok(v)
        },
        Some(&mut is_odd),
    )
    .unwrap_err();
    assert!(matches!(err, LessonError::Type(_)));
    // stopped at the failing element instead of dropping it
    assert_eq!(mapped, 1);
}

#[test]
fn test_all_any() {
    let scores = [85, 90, 78, 92, 88];
    assert!(all(scores, |s| Ok(*s >= 60)).unwrap());
    assert!(!all(scores, |s| Ok(*s >= 80)).unwrap());
    assert!(any(scores, |s| Ok(*s >= 90)).unwrap());
    assert!(!any(scores, |s| Ok(*s > 100)).unwrap());
    assert!(all(Vec::<i64>::new(), |_| Ok(false)).unwrap());
    assert!(!any(Vec::<i64>::new(), |_| Ok(true)).unwrap());
}

#[test]
fn test_reversed() {
    let items = Value::list(vec!["first".into(), "second".into(), "third".into()]);
    let backwards: Vec<String> = reversed(&items).unwrap().iter().map(|v| v.to_string()).collect();
    assert_eq!(backwards, vec!["third", "second", "first"]);
    assert_eq!(reverse_slice(&items).unwrap().to_string(), "['third', 'second', 'first']");
    assert_eq!(reverse_slice(&Value::str("abc")).unwrap(), Value::str("cba"));
    // the source list is untouched
    assert_eq!(items.to_string(), "['first', 'second', 'third']");
}

#[test]
fn test_sorted_by_key() {
    let scores = vec![Value::Int(92), Value::Int(78), Value::Int(85)];
    let ascending = sorted(scores.clone(), |v| Ok(v.clone())).unwrap();
    assert_eq!(ascending, vec![Value::Int(78), Value::Int(85), Value::Int(92)]);

    let mixed = vec![Value::Int(1), Value::str("a")];
    assert!(matches!(sorted(mixed, |v| Ok(v.clone())), Err(LessonError::Type(_))));

    let list = Value::list(scores);
    sort_list(&list, |v| py_sub(&Value::Int(0), v)).unwrap();
    assert_eq!(list.to_string(), "[92, 85, 78]");
}

#[test]
fn test_type_of() {
    assert_eq!(type_of(&Value::Int(25)), "<class 'int'>");
    assert_eq!(type_of(&Value::Float(99.99)), "<class 'float'>");
    assert_eq!(type_of(&Value::str("x")), "<class 'str'>");
    assert_eq!(type_of(&Value::Bool(true)), "<class 'bool'>");
    assert_eq!(type_of(&Value::None), "<class 'NoneType'>");
}

#[test]
fn test_console_capture() {
    let (mut console, buffer) = Console::capture();
    console.header(60, "1. Title").unwrap();
    console.print_end("a", "  ").unwrap();
    console.print_end("b", "  ").unwrap();
    console.blank().unwrap();
    console.js("const x = 1;").unwrap();

    let text = buffer.contents();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "=".repeat(60));
    assert_eq!(lines[1], "1. Title");
    assert_eq!(lines[2], "=".repeat(60));
    assert_eq!(lines[3], "a  b  ");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_console_js_toggle() {
    let (console, buffer) = Console::capture();
    let mut console = console.with_show_js(true);
    console.js("for (const x of xs) {\n  console.log(x);\n}").unwrap();
    assert_eq!(
        buffer.contents(),
        "  // JS/TS:\n  // for (const x of xs) {\n  //   console.log(x);\n  // }\n"
    );
}

#[test]
fn test_format_positional() {
    let name = Value::str("ZhangSan");
    assert_eq!(format_positional("Hello, {}!", &[name.clone()]).unwrap(), "Hello, ZhangSan!");
    assert_eq!(
        format_positional("{1} and {0}", &[Value::Int(1), Value::Int(2)]).unwrap(),
        "2 and 1"
    );
    assert_eq!(format_positional("{:.2f}", &[Value::Float(86.6)]).unwrap(), "86.60");
    assert_eq!(format_positional("{{literal}}", &[]).unwrap(), "{literal}");
    assert!(format_positional("{} {}", &[name]).is_err());
    assert!(format_positional("{", &[]).is_err());
}
