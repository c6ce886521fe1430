//! Conditionals: if/elif/else, boolean operators, membership, identity,
//! truthiness, chained comparisons and match

use super::{closing, row, section, CheatRow, Lesson, LessonName};
use crate::builtins::{
    all, any, compare, compare_chain, contains, len, py_and, py_not, py_or, ternary, CmpOp, Console,
};
use crate::core::Value;
use crate::errors::Result;
use crate::runtime::{Branches, CallArgs, Match, PyFunction, Signature};

const WIDTH: usize = 60;

const CHEATSHEET: &[CheatRow] = &[
    row("Logical and", "and", "&&"),
    row("Logical or", "or", "||"),
    row("Logical not", "not", "!"),
    row("else if", "elif", "else if"),
    row("Ternary", "x if cond else y", "cond ? x : y"),
    row("Membership", "in / not in", "includes()"),
    row("Absent value", "None", "null"),
    row("Booleans", "True / False", "true / false"),
    row("switch", "match ... case", "switch"),
    row("Chained comparison", "10 <= x <= 20", "x >= 10 && x <= 20"),
];

pub struct Conditionals;

impl Lesson for Conditionals {
    fn name(&self) -> LessonName {
        LessonName::Conditionals
    }

    fn title(&self) -> &'static str {
        "conditionals: if/elif/else, and/or/not, in, is, ternary, truthiness, match"
    }

    fn sections(&self) -> usize {
        15
    }

    fn cheatsheet(&self) -> &'static [CheatRow] {
        CHEATSHEET
    }

    fn run(&self, c: &mut Console) -> Result<()> {
        basic_if(c)?;
        if_else(c)?;
        elif_chain(c)?;
        comparisons(c)?;
        logical(c)?;
        membership(c)?;
        identity(c)?;
        ternaries(c)?;
        truthiness(c)?;
        chained(c)?;
        weather(c)?;
        nested(c)?;
        quantifiers(c)?;
        matching(c)?;
        best_practices(c)?;
        closing(c, WIDTH, "if conditionals demo complete!")
    }
}

fn header(c: &mut Console, title: &str) -> Result<()> {
    section(c, LessonName::Conditionals, WIDTH, title)
}

fn cmp(op: CmpOp, a: &Value, b: i64) -> Result<bool> {
    compare(op, a, &Value::Int(b))
}

fn basic_if(c: &mut Console) -> Result<()> {
    header(c, "1. The basic if statement")?;

    let age = Value::Int(18);
    if cmp(CmpOp::Ge, &age, 18)? {
        c.print("  You are an adult!")?;
    }

    c.js(r#"if (age >= 18) {
  console.log("You are an adult!");
}"#)?;
    c.blank()
}

fn if_else(c: &mut Console) -> Result<()> {
    header(c, "2. The if...else statement")?;

    let score = Value::Int(85);
    if cmp(CmpOp::Ge, &score, 60)? {
        c.print("  Passed!")?;
    } else {
        c.print("  Failed")?;
    }

    c.js(r#"if (score >= 60) {
  console.log("Passed!");
} else {
  console.log("Failed");
}"#)?;
    c.blank()
}

fn elif_chain(c: &mut Console) -> Result<()> {
    header(c, "3. if...elif...else (several conditions, like switch)")?;

    let score = Value::Int(92);
    let grade = Branches::new()
        .when(|| cmp(CmpOp::Ge, &score, 90), || Ok("Excellent"))
        .when(|| cmp(CmpOp::Ge, &score, 80), || Ok("Good"))
        .when(|| cmp(CmpOp::Ge, &score, 60), || Ok("Pass"))
        .otherwise(|| Ok("Fail"))?;
    c.print(format!("  score: {}, grade: {}", score, grade))?;

    c.js(r#"if (score >= 90) {
  grade = "Excellent";
} else if (score >= 80) {
  grade = "Good";
} else if (score >= 60) {
  grade = "Pass";
} else {
  grade = "Fail";
}"#)?;
    c.blank()
}

fn comparisons(c: &mut Console) -> Result<()> {
    header(c, "4. Comparison operators (same as JS/TS)")?;

    let [a, b] = Value::tuple(vec![Value::Int(10), Value::Int(20)]).unpack::<2>()?;
    c.print(format!("  a = {}, b = {}", a, b))?;

    let labelled = [
        (CmpOp::Eq, "equal to"),
        (CmpOp::Ne, "not equal to"),
        (CmpOp::Lt, "less than"),
        (CmpOp::Gt, "greater than"),
        (CmpOp::Le, "less than or equal to"),
        (CmpOp::Ge, "greater than or equal to"),
    ];
    for (op, label) in labelled {
        let result = Value::Bool(compare(op, &a, &b)?);
        c.print(format!("  a {} b ({}): {}", op.symbol(), label, result))?;
    }

    c.js("// == compares values; use === in JS, plain == in Python")?;
    c.blank()
}

fn logical(c: &mut Console) -> Result<()> {
    header(c, "5. Logical operators (Python uses and/or/not, not &&/||/!)")?;

    let age = Value::Int(25);
    let has_license = Value::Bool(true);

    let over_18 = Value::Bool(cmp(CmpOp::Ge, &age, 18)?);
    if py_and(over_18, || has_license.clone()).is_truthy() {
        c.print("  may drive")?;
    }

    let minor = Value::Bool(cmp(CmpOp::Lt, &age, 18)?);
    let senior = Value::Bool(cmp(CmpOp::Gt, &age, 65)?);
    if py_or(minor, || senior).is_truthy() {
        c.print("  needs special care")?;
    }

    if py_not(&has_license).is_truthy() {
        c.print("  has no driving license")?;
    } else {
        c.print("  has a driving license")?;
    }

    c.js(r#"if (age >= 18 && hasLicense) { console.log("may drive"); }
if (age < 18 || age > 65) { console.log("needs special care"); }
if (!hasLicense) { ... }"#)?;
    c.blank()
}

fn membership(c: &mut Console) -> Result<()> {
    header(c, "6. Membership operators (in / not in, like JS includes)")?;

    let fruits = Value::list(vec![Value::str("apple"), Value::str("banana"), Value::str("orange")]);
    let favorite = Value::str("apple");
    if contains(&fruits, &favorite)? {
        c.print(format!("  {} is in the fruit list", favorite))?;
    }

    let watermelon = Value::str("watermelon");
    if !contains(&fruits, &watermelon)? {
        c.print("  watermelon is not in the fruit list")?;
    }
    c.blank()?;

    let text = Value::str("Hello Python");
    if contains(&text, &Value::str("Python"))? {
        c.print(format!("  'Python' is in the string '{}'", text))?;
    }

    c.js("if (fruits.includes(favorite)) { ... }
if (text.includes(\"Python\")) { ... }")?;
    c.blank()
}

fn identity(c: &mut Console) -> Result<()> {
    header(c, "7. Identity operators (is / is not, compare object identity, like JS ===)")?;

    let numbers = || Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let a = numbers();
    let b = numbers();
    let same = a.clone();

    c.print(format!("  a = {}", a))?;
    c.print(format!("  b = {}", b))?;
    c.print("  c = a")?;
    c.print(format!("  a == b (equal values): {}", Value::Bool(a == b)))?;
    c.print(format!("  a is b (same object): {}", Value::Bool(a.is_identical(&b))))?;
    c.print(format!("  a is c (same object): {}", Value::Bool(a.is_identical(&same))))?;

    let value = Value::None;
    if value.is_identical(&Value::None) {
        c.print("  value is None (check it with `is None`)")?;
    }

    c.js("const a = [1, 2, 3];
const b = [1, 2, 3];
console.log(a === b); // false, different references
if (value === null) { ... }")?;
    c.blank()
}

fn ternaries(c: &mut Console) -> Result<()> {
    header(c, "8. The ternary operator (Python's syntax differs)")?;

    let age = Value::Int(20);
    let status = ternary(&Value::Bool(cmp(CmpOp::Ge, &age, 18)?), || "adult", || "minor");
    c.print(format!("  age {}: {}", age, status))?;

    // nesting works, but reads poorly
    let score = Value::Int(85);
    let result = Branches::new()
        .when(|| cmp(CmpOp::Ge, &score, 90), || Ok("Excellent"))
        .when(|| cmp(CmpOp::Ge, &score, 80), || Ok("Good"))
        .when(|| cmp(CmpOp::Ge, &score, 60), || Ok("Pass"))
        .otherwise(|| Ok("Fail"))?;
    c.print(format!("  score {}: {}", score, result))?;

    c.js(r#"const status = age >= 18 ? "adult" : "minor";"#)?;
    c.blank()
}

fn truthiness(c: &mut Console) -> Result<()> {
    header(c, "9. Truthiness (Python's truthy and falsy values)")?;

    // falsy: False, None, 0, 0.0, "", [], {}, ()
    let my_list = Value::empty_list();
    if !my_list.is_truthy() {
        c.print("  the list is empty")?;
    }

    let name = Value::str("");
    if !name.is_truthy() {
        c.print("  the name is empty")?;
    }

    let value = Value::None;
    if value.is_none() {
        c.print("  value is None")?;
    }

    let count = Value::Int(0);
    if count.is_truthy() {
        c.print("  count is not 0")?;
    } else {
        c.print("  count is 0")?;
    }

    c.js("if (myList.length === 0) { ... }
// note: in JS an empty array is truthy")?;
    c.blank()
}

fn chained(c: &mut Console) -> Result<()> {
    header(c, "10. Chained comparisons (Python-only syntax)")?;

    let x = Value::Int(15);

    if compare_chain(&Value::Int(10), &[(CmpOp::Le, x.clone()), (CmpOp::Le, Value::Int(20))])? {
        c.print(format!("  {} is between 10 and 20", x))?;
    }

    if compare_chain(&Value::Int(0), &[(CmpOp::Lt, x.clone()), (CmpOp::Lt, Value::Int(10))])? {
        c.print(format!("  {} is between 0 and 10", x))?;
    } else {
        c.print(format!("  {} is not between 0 and 10", x))?;
    }

    c.js("if (x >= 10 && x <= 20) { ... }")?;
    c.blank()
}

fn weather(c: &mut Console) -> Result<()> {
    header(c, "11. Practical example: several conditions")?;

    let check_weather = PyFunction::new(
        Signature::new("check_weather")
            .required("temp")
            .required("is_sunny")
            .required("is_weekend"),
        |args| {
            let temp = args.get("temp")?;
            let sunny = args.get("is_sunny")?;
            let weekend = args.get("is_weekend")?;
            let line = format!("  temperature: {}°C, sunny: {}, weekend: {}", temp, sunny, weekend);

            let verdict = Branches::new()
                .when(
                    || Ok(sunny.is_truthy() && cmp(CmpOp::Gt, temp, 20)? && weekend.is_truthy()),
                    || Ok("Perfect! Great for a day in the park"),
                )
                .when(
                    || Ok(sunny.is_truthy() && cmp(CmpOp::Gt, temp, 15)?),
                    || Ok("Nice weather for going out"),
                )
                .when(
                    || Ok(!sunny.is_truthy() || cmp(CmpOp::Lt, temp, 10)?),
                    || Ok("Bad weather, better stay at home"),
                )
                .otherwise(|| Ok("So-so weather"))?;

            Ok(Value::tuple(vec![Value::str(line), Value::str(verdict)]))
        },
    )?
    .with_doc("Judge the weather from several conditions");

    let cases = [(25, true, true), (12, false, false)];
    for (index, (temp, sunny, weekend)) in cases.into_iter().enumerate() {
        let call = CallArgs::new().arg(temp).arg(sunny).arg(weekend);
        let [line, verdict] = check_weather.call(call)?.unpack::<2>()?;
        c.print(line)?;
        c.print(format!("  result {}: {}", index + 1, verdict))?;
    }

    c.js("function checkWeather(temp, isSunny, isWeekend) {
  if (isSunny && temp > 20 && isWeekend) return \"Perfect!\";
  ...
}")?;
    c.blank()
}

fn nested(c: &mut Console) -> Result<()> {
    header(c, "12. Nested if statements")?;

    let age = Value::Int(20);
    let has_ticket = Value::Bool(true);
    let has_id = Value::Bool(true);

    if cmp(CmpOp::Ge, &age, 18)? {
        c.print("  age requirement met")?;
        if has_ticket.is_truthy() {
            c.print("    has a ticket")?;
            if has_id.is_truthy() {
                c.print("      may enter")?;
            } else {
                c.print("      needs an ID card")?;
            }
        } else {
            c.print("    needs a ticket")?;
        }
    } else {
        c.print("  age requirement not met")?;
    }

    c.js("if (age >= 18) {
  if (hasTicket) { ... }
}")?;
    c.blank()
}

fn quantifiers(c: &mut Console) -> Result<()> {
    header(c, "13. all() and any() (like JS every/some)")?;

    let scores = Value::list([85, 90, 78, 92, 88].map(Value::Int));

    if all(scores.items()?, |s| cmp(CmpOp::Ge, s, 60))? {
        c.print("  every score is a pass")?;
    }
    if any(scores.items()?, |s| cmp(CmpOp::Ge, s, 90))? {
        c.print("  at least one score is excellent")?;
    }

    c.js("if (scores.every(score => score >= 60)) { ... }
if (scores.some(score => score >= 90)) { ... }")?;
    c.blank()
}

fn matching(c: &mut Console) -> Result<()> {
    header(c, "14. match...case (Python 3.10+, like JS switch)")?;

    let status = Value::str("success");
    let message = Match::on(status)
        .case("success", |_| Ok("operation succeeded"))
        .case("error", |_| Ok("operation failed"))
        .case("pending", |_| Ok("operation in progress"))
        .wildcard(|_| Ok("unknown status"))?;
    c.print(format!("  {}", message))?;

    c.js(r#"switch (status) {
  case "success":
    console.log("operation succeeded");
    break;
  default:
    console.log("unknown status");
}"#)?;
    c.blank()
}

fn best_practices(c: &mut Console) -> Result<()> {
    header(c, "15. Conditional best practices")?;

    let is_valid = Value::Bool(true);
    if is_valid.is_truthy() {
        c.print("  ✅ Recommended: test the boolean directly")?;
    }
    if compare(CmpOp::Eq, &is_valid, &Value::Bool(true))? {
        c.print("  ❌ Discouraged: no need for == True")?;
    }

    let value = Value::None;
    if value.is_identical(&Value::None) {
        c.print("  ✅ Recommended: check for None with is None")?;
    }
    if compare(CmpOp::Eq, &value, &Value::None)? {
        c.print("  ❌ Discouraged: == None works, but is not idiomatic")?;
    }

    let items = Value::empty_list();
    if !items.is_truthy() {
        c.print("  ✅ Recommended: test emptiness directly")?;
    }
    if len(&items)? == 0 {
        c.print("  ❌ Discouraged: len(items) == 0")?;
    }

    c.js("if (isValid) { ... }
if (value === null) { ... }
if (items.length === 0) { ... }")?;
    c.blank()
}
