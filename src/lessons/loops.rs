//! for loops: sequences, ranges, dicts, loop control and comprehensions

use super::{closing, row, section, CheatRow, Lesson, LessonName};
use crate::builtins::{
    compare, comprehend, enumerate, fixed, for_loop, py_add, py_div, py_mod, py_mul, py_pow, range, range_from,
    range_step, reverse_slice, reversed, zip, CmpOp, Console, Flow,
};
use crate::core::Value;
use crate::errors::Result;

const WIDTH: usize = 60;

const CHEATSHEET: &[CheatRow] = &[
    row("Iterate an array", "for x in arr", "for (const x of arr)"),
    row("Counting loop", "range(n)", "for (let i = 0; i < n; i++)"),
    row("Index and value", "enumerate(arr)", "arr.forEach((x, i) => ...)"),
    row("Iterate an object", "d.items()", "Object.entries(obj)"),
    row("break / continue", "same", "same"),
    row("Map / filter", "[f(x) for x in arr if p(x)]", "arr.filter(p).map(f)"),
    row("for...else", "supported", "not supported"),
    row("Parallel iteration", "zip(a, b)", "a.map((x, i) => [x, b[i]])"),
    row("Reverse iteration", "reversed(arr)", "[...arr].reverse()"),
];

pub struct Loops;

impl Lesson for Loops {
    fn name(&self) -> LessonName {
        LessonName::Loops
    }

    fn title(&self) -> &'static str {
        "for loops: sequences, range(), enumerate(), dicts, for...else, comprehensions"
    }

    fn sections(&self) -> usize {
        12
    }

    fn cheatsheet(&self) -> &'static [CheatRow] {
        CHEATSHEET
    }

    fn run(&self, c: &mut Console) -> Result<()> {
        list_iteration(c)?;
        ranges(c)?;
        enumerate_items(c)?;
        string_chars(c)?;
        dict_iteration(c)?;
        nested(c)?;
        break_continue(c)?;
        for_else_clause(c)?;
        comprehensions(c)?;
        parallel(c)?;
        reverse(c)?;
        practical(c)?;
        closing(c, WIDTH, "for loop demo complete!")
    }
}

fn header(c: &mut Console, title: &str) -> Result<()> {
    section(c, LessonName::Loops, WIDTH, title)
}

fn strs(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::str(s)))
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().map(|&n| Value::Int(n)))
}

fn is_even(n: &Value) -> Result<bool> {
    Ok(py_mod(n, &Value::Int(2))? == Value::Int(0))
}

fn list_iteration(c: &mut Console) -> Result<()> {
    header(c, "1. Iterating a list (like JS for...of array)")?;

    let fruits = strs(&["apple", "banana", "orange"]);
    for fruit in fruits.items()? {
        c.print(format!("I like to eat {}", fruit))?;
    }

    c.js(r#"const fruits = ["apple", "banana", "orange"];
for (const fruit of fruits) {
  console.log(`I like to eat ${fruit}`);
}"#)?;
    c.blank()
}

fn ranges(c: &mut Console) -> Result<()> {
    header(c, "2. Generating number sequences with range()")?;

    c.print("range(5):")?;
    for i in range(5) {
        c.print(format!("  i = {}", i))?;
    }
    c.blank()?;

    c.print("range(2, 6):")?;
    for i in range_from(2, 6) {
        c.print(format!("  i = {}", i))?;
    }
    c.blank()?;

    c.print("range(0, 10, 2):")?;
    for i in range_step(0, 10, 2)? {
        c.print(format!("  i = {}", i))?;
    }
    c.blank()?;

    c.print("range(10, 0, -1):")?;
    for i in range_step(10, 0, -1)? {
        c.print(format!("  countdown: {}", i))?;
    }
    c.blank()?;

    // step pointing away from stop: nothing to iterate, no error
    c.print(format!("range(5, 0) runs {} times", range_from(5, 0).count()))?;

    c.js("for (let i = 0; i < 5; i++) { console.log(`i = ${i}`); }
for (let i = 2; i < 6; i++) { ... }
for (let i = 0; i < 10; i += 2) { ... }
for (let i = 10; i > 0; i--) { ... }")?;
    c.blank()
}

fn enumerate_items(c: &mut Console) -> Result<()> {
    header(c, "3. enumerate() for index and value (like JS array.forEach)")?;

    let students = strs(&["Xiao Ming", "Xiao Hong", "Xiao Gang"]);
    for (index, student) in enumerate(students.items()?, 0) {
        c.print(format!("  index {}: {}", index, student))?;
    }
    c.blank()?;

    for (index, student) in enumerate(students.items()?, 1) {
        c.print(format!("  student #{}: {}", index, student))?;
    }

    c.js(r#"students.forEach((student, index) => {
  console.log(`index ${index}: ${student}`);
});"#)?;
    c.blank()
}

fn string_chars(c: &mut Console) -> Result<()> {
    header(c, "4. Iterating over the characters of a string")?;

    let word = Value::str("Python");
    for ch in word.items()? {
        c.print(format!("  char: {}", ch))?;
    }

    c.js("for (const ch of \"Python\") { console.log(`char: ${ch}`); }")?;
    c.blank()
}

fn dict_iteration(c: &mut Console) -> Result<()> {
    header(c, "5. Iterating a dict (like JS for...in object)")?;

    let person = Value::dict(vec![
        ("name", Value::str("Zhang San")),
        ("age", Value::Int(25)),
        ("city", Value::str("Beijing")),
    ]);

    c.print("Keys:")?;
    for key in person.items()? {
        c.print(format!("  {}", key))?;
    }
    c.blank()?;

    c.print("Key/value pairs:")?;
    for (key, value) in person.dict_entries()? {
        c.print(format!("  {}: {}", key, value))?;
    }
    c.blank()?;

    c.print("Values only:")?;
    for value in person.dict_values()? {
        c.print(format!("  {}", value))?;
    }

    c.js(r#"for (const [key, value] of Object.entries(person)) {
  console.log(`${key}: ${value}`);
}"#)?;
    c.blank()
}

fn nested(c: &mut Console) -> Result<()> {
    header(c, "6. Nested loops (multiplication table)")?;

    // first three rows only
    for i in range_from(1, 4) {
        for j in range_from(1, 4) {
            let product = py_mul(&Value::Int(i), &Value::Int(j))?;
            c.print_end(format!("  {} × {} = {}", i, j, product), "  ")?;
        }
        c.blank()?;
    }

    c.js("for (let i = 1; i < 4; i++) {
  for (let j = 1; j < 4; j++) { ... }
}")?;
    c.blank()
}

fn break_continue(c: &mut Console) -> Result<()> {
    header(c, "7. break (leave the loop) and continue (skip this iteration)")?;

    c.print("break example - stop at the first even number:")?;
    for num in ints(&[1, 3, 5, 8, 9, 10]).items()? {
        if is_even(&num)? {
            c.print(format!("  found the first even number: {}", num))?;
            break;
        }
        c.print(format!("  {} is odd, keep looking...", num))?;
    }
    c.blank()?;

    c.print("continue example - print only even numbers:")?;
    for num in range_from(1, 11) {
        if !is_even(&Value::Int(num))? {
            continue;
        }
        c.print(format!("  {} is even", num))?;
    }

    c.js("for (const num of nums) {
  if (num % 2 === 0) { console.log(num); break; }
}")?;
    c.blank()
}

fn for_else_clause(c: &mut Console) -> Result<()> {
    header(c, "8. for...else (a Python-only feature)")?;

    c.print("Example 1: the loop finishes normally, so else runs")?;
    for_loop(range(3), |i| {
        c.print(format!("  running {}", i))?;
        Ok(Flow::Next)
    })?
    .otherwise(|| c.print("  loop completed normally (no break)"))?;
    c.blank()?;

    c.print("Example 2: the loop is broken out of, so else is skipped")?;
    for_loop(range(5), |i| {
        if i == 3 {
            c.print(format!("  break at {}", i))?;
            return Ok(Flow::Break);
        }
        c.print(format!("  running {}", i))?;
        Ok(Flow::Next)
    })?
    .otherwise(|| c.print("  this line never runs"))?;

    c.js("let broke = false;
for (let i = 0; i < 5; i++) {
  if (i === 3) { broke = true; break; }
}
if (!broke) { console.log(\"loop completed normally\"); }")?;
    c.blank()
}

fn comprehensions(c: &mut Console) -> Result<()> {
    header(c, "9. List comprehensions (like JS map/filter)")?;

    let numbers = ints(&[1, 2, 3, 4, 5]);
    let two = Value::Int(2);

    let squares = Value::empty_list();
    for num in numbers.items()? {
        squares.append(py_pow(&num, &two)?)?;
    }
    c.print(format!("Classic loop: {}", squares))?;

    let squares = Value::list(comprehend(numbers.items()?, |n| py_pow(&n, &two), None)?);
    c.print(format!("List comprehension: {}", squares))?;
    c.blank()?;

    let mut keep_even = |n: &Value| is_even(n);
    let even_squares = Value::list(comprehend(numbers.items()?, |n| py_pow(&n, &two), Some(&mut keep_even))?);
    c.print(format!("Even squares: {}", even_squares))?;

    c.js("const squares = numbers.map(num => num ** 2);
const evenSquares = numbers
  .filter(num => num % 2 === 0)
  .map(num => num ** 2);")?;
    c.blank()
}

fn parallel(c: &mut Console) -> Result<()> {
    header(c, "10. zip() to iterate several sequences at once")?;

    let names = strs(&["Alice", "Bob", "Charlie"]);
    let ages = ints(&[25, 30, 35]);
    for (name, age) in zip(names.items()?, ages.items()?) {
        c.print(format!("  {} is {} years old", name, age))?;
    }

    c.js("for (let i = 0; i < names.length; i++) {
  console.log(`${names[i]} is ${ages[i]} years old`);
}")?;
    c.blank()
}

fn reverse(c: &mut Console) -> Result<()> {
    header(c, "11. Iterating a list in reverse")?;

    let items = strs(&["first item", "second item", "third item"]);

    c.print("Method 1: reversed()")?;
    for item in reversed(&items)? {
        c.print(format!("  {}", item))?;
    }
    c.blank()?;

    c.print("Method 2: slice [::-1]")?;
    for item in reverse_slice(&items)?.items()? {
        c.print(format!("  {}", item))?;
    }

    c.js("for (let i = items.length - 1; i >= 0; i--) {
  console.log(items[i]);
}")?;
    c.blank()
}

fn practical(c: &mut Console) -> Result<()> {
    header(c, "12. Practical examples")?;

    let scores = ints(&[85, 90, 78, 92, 88]);
    let mut total = Value::Int(0);
    for score in scores.items()? {
        total = py_add(&total, &score)?;
    }
    let average = py_div(&total, &Value::Int(scores.len()? as i64))?;
    c.print(format!("Score list: {}", scores))?;
    c.print(format!("Total: {}, average: {}", total, fixed(&average, 2)?))?;
    c.blank()?;

    let mut max_score = scores.get_item(&Value::Int(0))?;
    for score in scores.items()? {
        if compare(CmpOp::Gt, &score, &max_score)? {
            max_score = score;
        }
    }
    c.print(format!("Highest score: {}", max_score))?;

    c.js("const total = scores.reduce((a, b) => a + b, 0);
const average = (total / scores.length).toFixed(2);
const maxScore = Math.max(...scores);")?;
    c.blank()
}
